//! Tag frequency counting.

use camino::Utf8Path;
use indexmap::IndexMap;
use serde::Serialize;

use crate::error::ExtractResult;
use crate::io;
use crate::stopwords::StopWordSet;
use crate::tokenize::{TokenizerMode, tokenize};

/// Occurrence counts per tag, iterated in first-seen order.
///
/// Every key is non-empty, absent from the stop-word set it was counted
/// against, and has a count of at least one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FrequencyMap {
    counts: IndexMap<String, usize>,
}

impl FrequencyMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one token, lowercased, unless it is blank or a stop word.
    ///
    /// Returns `true` if the token was counted.
    pub fn record(&mut self, token: &str, stop_words: &StopWordSet) -> bool {
        let token = token.to_lowercase();
        if token.trim().is_empty() || stop_words.contains(&token) {
            return false;
        }
        *self.counts.entry(token).or_insert(0) += 1;
        true
    }

    /// Count for `word`, if it was seen.
    pub fn get(&self, word: &str) -> Option<usize> {
        self.counts.get(word).copied()
    }

    /// Number of distinct tags.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether no tag has been counted.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Iterate `(tag, count)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(word, count)| (word.as_str(), *count))
    }

    /// Forget every count.
    pub fn clear(&mut self) {
        self.counts.clear();
    }
}

/// Tally `tokens`, skipping blanks and stop words.
pub fn count_tokens<I, S>(tokens: I, stop_words: &StopWordSet) -> FrequencyMap
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut map = FrequencyMap::new();
    for token in tokens {
        map.record(token.as_ref(), stop_words);
    }
    map
}

/// Read a source file and count the tags on every line.
#[tracing::instrument(skip_all, fields(path = %path, %mode, stop_words = stop_words.len()))]
pub fn analyze_text(
    path: &Utf8Path,
    stop_words: &StopWordSet,
    mode: TokenizerMode,
    max_bytes: Option<usize>,
) -> ExtractResult<FrequencyMap> {
    let lines = io::read_lines(path, max_bytes)?;
    let map = count_tokens(
        lines.iter().flat_map(|line| tokenize(line, mode)),
        stop_words,
    );
    tracing::info!(
        lines = lines.len(),
        tags = map.len(),
        total = map.total(),
        "analyzed text"
    );
    Ok(map)
}
