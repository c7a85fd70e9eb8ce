//! An extraction session: three paths and the most recent result.
//!
//! Front ends fill in the paths, call [`Session::extract_tags`], optionally
//! [`Session::save_report`], and [`Session::clear`] to start over. The
//! session owns the only frequency map; each extraction replaces it.

use camino::{Utf8Path, Utf8PathBuf};

use crate::error::{ExtractError, ExtractResult};
use crate::frequency::{FrequencyMap, analyze_text};
use crate::report::{Report, save_report};
use crate::stopwords::StopWordSet;
use crate::tokenize::TokenizerMode;

/// Paths, settings and the current frequency map for one front end.
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// Source text file.
    pub input: Option<Utf8PathBuf>,
    /// Stop-word list.
    pub stop_words: Option<Utf8PathBuf>,
    /// Where [`Session::save_report`] writes.
    pub output: Option<Utf8PathBuf>,
    /// Tokenization rule.
    pub mode: TokenizerMode,
    /// Maximum source size in bytes, if any.
    pub max_input_bytes: Option<usize>,
    frequencies: FrequencyMap,
}

impl Session {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the source text path.
    pub fn with_input<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.input = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the stop-word list path.
    pub fn with_stop_words<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.stop_words = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the report output path.
    pub fn with_output<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.output = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the tokenization rule.
    pub const fn with_mode(mut self, mode: TokenizerMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the source size limit.
    pub const fn with_max_input_bytes(mut self, limit: Option<usize>) -> Self {
        self.max_input_bytes = limit;
        self
    }

    /// The frequency map from the last successful extraction.
    pub const fn frequencies(&self) -> &FrequencyMap {
        &self.frequencies
    }

    /// The current frequencies as a sorted report.
    pub fn report(&self) -> Report {
        Report::from_frequencies(&self.frequencies)
    }

    /// Load the stop words, count the source text, and keep the result.
    ///
    /// Both paths are validated before any file is opened. On failure the
    /// previous frequency map is left untouched.
    #[tracing::instrument(skip_all, fields(input = ?self.input, stop_words = ?self.stop_words))]
    pub fn extract_tags(&mut self) -> ExtractResult<Report> {
        let input = required(self.input.as_deref(), "input file")?;
        let stop_path = required(self.stop_words.as_deref(), "stop word file")?;

        let stop_words = StopWordSet::load(stop_path)?;
        let frequencies = analyze_text(input, &stop_words, self.mode, self.max_input_bytes)?;
        self.frequencies = frequencies;
        Ok(self.report())
    }

    /// Write the current report, sorted, to the output path.
    ///
    /// Returns the path written.
    #[tracing::instrument(skip_all, fields(output = ?self.output))]
    pub fn save_report(&self) -> ExtractResult<Utf8PathBuf> {
        let output = required(self.output.as_deref(), "output file")?;
        save_report(output, &self.report().lines())?;
        Ok(output.to_path_buf())
    }

    /// Reset every path and forget the current frequencies.
    pub fn clear(&mut self) {
        self.input = None;
        self.stop_words = None;
        self.output = None;
        self.frequencies.clear();
        tracing::debug!("session cleared");
    }
}

fn required<'a>(path: Option<&'a Utf8Path>, field: &'static str) -> ExtractResult<&'a Utf8Path> {
    match path {
        Some(p) if !p.as_str().trim().is_empty() => Ok(p),
        _ => Err(ExtractError::MissingInput { field }),
    }
}
