//! Line tokenization.
//!
//! Two rules are available. [`TokenizerMode::Reference`] is the default and
//! reproduces the historical behavior byte for byte: it deletes ASCII
//! letters and spaces, so only digits, punctuation and non-ASCII characters
//! survive. [`TokenizerMode::Letters`] is the opt-in corrected rule that
//! keeps letters and deletes everything else.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// ASCII letters and the space character, deleted by the reference rule.
static LETTERS_AND_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-zA-Z ]").expect("valid regex"));

/// Anything that is neither an ASCII letter nor ASCII whitespace.
static NON_LETTERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z[:space:]]").expect("valid regex"));

/// Runs of ASCII whitespace (space, tab, newline, vertical tab, form feed, CR).
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[[:space:]]+").expect("valid regex"));

/// Which characters a line keeps before it is split into tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum TokenizerMode {
    /// Strip ASCII letters and spaces (historical behavior).
    #[default]
    Reference,
    /// Strip everything except ASCII letters and whitespace.
    Letters,
}

impl TokenizerMode {
    /// Returns the mode name as used in config files and on the command line.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Reference => "reference",
            Self::Letters => "letters",
        }
    }
}

impl std::fmt::Display for TokenizerMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Split one line into lowercase tokens.
///
/// The line is lowercased, filtered according to `mode`, then split on
/// whitespace runs. Empty pieces are never returned.
pub fn tokenize(line: &str, mode: TokenizerMode) -> Vec<String> {
    let lowered = line.to_lowercase();
    let filtered = match mode {
        TokenizerMode::Reference => LETTERS_AND_SPACE.replace_all(&lowered, ""),
        TokenizerMode::Letters => NON_LETTERS.replace_all(&lowered, ""),
    };
    WHITESPACE_RUN
        .split(&filtered)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}
