//! Core library for tag-extractor.
//!
//! Reads a text file, drops every token found in a stop-word list, counts
//! what is left and sorts the result into a `word: count` report. Nothing
//! here depends on a user interface; front ends call the functions below
//! or drive a [`Session`].
//!
//! # Modules
//!
//! - [`stopwords`] - Stop-word list loading
//! - [`tokenize`] - Line tokenization rules
//! - [`frequency`] - Tag counting
//! - [`report`] - Sorting, rendering and saving reports
//! - [`io`] - Plain-text file adapters
//! - [`session`] - Path fields and current result for a front end
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```no_run
//! use camino::Utf8Path;
//! use tag_extractor_core::{TokenizerMode, analyze_text, format_report, load_stop_words};
//!
//! let stop_words = load_stop_words(Utf8Path::new("stop.txt"))?;
//! let frequencies = analyze_text(
//!     Utf8Path::new("book.txt"),
//!     &stop_words,
//!     TokenizerMode::Reference,
//!     None,
//! )?;
//! for line in format_report(&frequencies) {
//!     println!("{line}");
//! }
//! # Ok::<(), tag_extractor_core::ExtractError>(())
//! ```
#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod frequency;
pub mod io;
pub mod report;
pub mod session;
pub mod stopwords;
pub mod tokenize;

use camino::Utf8Path;

pub use config::{Config, ConfigLoader, ConfigSources, LogLevel};
pub use error::{ConfigError, ConfigResult, ExtractError, ExtractResult};
pub use frequency::{FrequencyMap, analyze_text, count_tokens};
pub use report::{Report, TagCount, format_report, save_report};
pub use session::Session;
pub use stopwords::StopWordSet;
pub use tokenize::{TokenizerMode, tokenize};

/// Load a stop-word list. See [`StopWordSet::load`].
pub fn load_stop_words(path: &Utf8Path) -> ExtractResult<StopWordSet> {
    StopWordSet::load(path)
}
