//! Stop-word lists.
//!
//! A stop-word file holds one word per line in any case, with arbitrary
//! surrounding whitespace. Words are stored lowercased, so membership is
//! case-insensitive.

use std::collections::HashSet;

use camino::Utf8Path;

use crate::error::ExtractResult;
use crate::io;

/// An immutable, case-insensitive set of words excluded from counting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopWordSet {
    words: HashSet<String>,
}

impl StopWordSet {
    /// Load a stop-word file.
    ///
    /// Each line is trimmed and lowercased. Blank lines are skipped.
    #[tracing::instrument(skip_all, fields(path = %path))]
    pub fn load(path: &Utf8Path) -> ExtractResult<Self> {
        let lines = io::read_lines(path, None)?;
        let set = Self::from_lines(lines);
        tracing::debug!(words = set.len(), "loaded stop words");
        Ok(set)
    }

    /// Build a set from raw lines.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = lines
            .into_iter()
            .map(|line| line.as_ref().trim().to_lowercase())
            .filter(|word| !word.is_empty())
            .collect();
        Self { words }
    }

    /// Whether `word` is a stop word, ignoring case.
    pub fn contains(&self, word: &str) -> bool {
        if self.words.contains(word) {
            return true;
        }
        self.words.contains(&word.to_lowercase())
    }

    /// Number of distinct stop words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterate over the stored (lowercase) words in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for StopWordSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_lines(iter)
    }
}
