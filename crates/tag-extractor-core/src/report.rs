//! Sorted frequency reports.
//!
//! A [`Report`] is derived from a [`FrequencyMap`] and never mutated. Entries
//! are ordered by descending count; the sort is stable, so equal counts keep
//! the map's first-seen order.

use std::fmt;

use camino::Utf8Path;
use serde::{Deserialize, Serialize};

use crate::error::ExtractResult;
use crate::frequency::FrequencyMap;
use crate::io;

/// One report line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCount {
    /// The tag.
    pub word: String,
    /// How many times it occurred.
    pub count: usize,
}

impl fmt::Display for TagCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.word, self.count)
    }
}

/// Tags sorted by descending frequency.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Distinct tags, most frequent first.
    pub entries: Vec<TagCount>,
}

impl Report {
    /// Sort a frequency map into a report.
    #[tracing::instrument(skip_all, fields(tags = frequencies.len()))]
    pub fn from_frequencies(frequencies: &FrequencyMap) -> Self {
        let mut entries: Vec<TagCount> = frequencies
            .iter()
            .map(|(word, count)| TagCount {
                word: word.to_string(),
                count,
            })
            .collect();
        entries.sort_by(|a, b| b.count.cmp(&a.count));
        Self { entries }
    }

    /// Number of distinct tags.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the report has no tags.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }

    /// The `n` most frequent entries.
    pub fn top(&self, n: usize) -> &[TagCount] {
        &self.entries[..n.min(self.entries.len())]
    }

    /// Render every entry as `word: count`.
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{entry}")?;
        }
        Ok(())
    }
}

/// Sort `frequencies` and render the `word: count` lines.
pub fn format_report(frequencies: &FrequencyMap) -> Vec<String> {
    Report::from_frequencies(frequencies).lines()
}

/// Write rendered report lines to `path`, replacing any existing file.
#[tracing::instrument(skip_all, fields(path = %path, lines = lines.len()))]
pub fn save_report(path: &Utf8Path, lines: &[String]) -> ExtractResult<()> {
    io::write_lines(path, lines)?;
    tracing::info!("saved report");
    Ok(())
}
