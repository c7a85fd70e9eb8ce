//! Plain-text file adapters.
//!
//! Everything the core reads or writes goes through these two functions,
//! so every I/O failure carries the offending path.

use std::fs::File;
use std::io::{BufWriter, Write};

use camino::Utf8Path;

use crate::error::{ExtractError, ExtractResult};

/// Read a UTF-8 text file and split it into lines.
///
/// When `max_bytes` is set, the file size is checked via metadata before
/// the contents are loaded. `\n`, `\r\n` and a lone `\r` all end a line.
#[tracing::instrument(skip_all, fields(path = %path))]
pub fn read_lines(path: &Utf8Path, max_bytes: Option<usize>) -> ExtractResult<Vec<String>> {
    let metadata = std::fs::metadata(path).map_err(|e| ExtractError::io(path, e))?;
    if let Some(limit) = max_bytes {
        let size = metadata.len();
        if size > limit as u64 {
            return Err(ExtractError::InputTooLarge {
                path: path.to_path_buf(),
                size,
                limit,
            });
        }
    }

    let content = std::fs::read_to_string(path).map_err(|e| ExtractError::io(path, e))?;
    let lines = split_lines(&content);
    tracing::debug!(lines = lines.len(), "read file");
    Ok(lines)
}

fn split_lines(content: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut rest = content;
    while !rest.is_empty() {
        match rest.find(['\n', '\r']) {
            Some(end) => {
                lines.push(rest[..end].to_string());
                let terminator = if rest[end..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[end + terminator..];
            }
            None => {
                lines.push(rest.to_string());
                break;
            }
        }
    }
    lines
}

/// Write lines to a file, truncating it first. Each line ends with `\n`.
#[tracing::instrument(skip_all, fields(path = %path))]
pub fn write_lines<I, S>(path: &Utf8Path, lines: I) -> ExtractResult<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let file = File::create(path).map_err(|e| ExtractError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    let mut written = 0usize;
    for line in lines {
        writeln!(writer, "{}", line.as_ref()).map_err(|e| ExtractError::io(path, e))?;
        written += 1;
    }
    writer.flush().map_err(|e| ExtractError::io(path, e))?;
    tracing::debug!(lines = written, "wrote file");
    Ok(())
}
