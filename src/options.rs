//! Configuration options for thread extraction.
//!
//! The `Options` struct controls which extraction strategy runs and the
//! thresholds used to tell posts from page chrome. Every field has a default,
//! so a TOML file only needs the keys it wants to change.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::patterns;

/// How post units are located and how strictly they are validated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum ExtractionStrategy {
    /// Pick `Structural` when page 1 carries topic/post articles, else `HeuristicScan`.
    #[default]
    Auto,
    /// Known markup containers (`article#topic`, `article#post-N`).
    Structural,
    /// Scan every `div` and filter noise with text heuristics.
    #[cfg_attr(feature = "cli", value(alias = "heuristic"))]
    HeuristicScan,
}

/// Configuration options for thread extraction.
///
/// # Example
///
/// ```rust
/// use rs_ninisite::{ExtractionStrategy, Options};
///
/// let options = Options {
///     strategy: ExtractionStrategy::HeuristicScan,
///     fingerprint_prefix_len: 80,
///     ..Options::default()
/// };
/// assert!(options.deduplicate);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Extraction strategy.
    ///
    /// Default: `Auto`
    pub strategy: ExtractionStrategy,

    /// Drop posts whose content prefix was already seen.
    ///
    /// Default: `true`
    pub deduplicate: bool,

    /// Number of leading content characters hashed into a fingerprint.
    ///
    /// Default: `100`
    pub fingerprint_prefix_len: usize,

    /// Minimum content length (characters) on loosely-structured paths.
    ///
    /// Default: `30`
    pub min_content_len: usize,

    /// Minimum raw text length (characters) of a scanned block.
    ///
    /// Default: `50`
    pub min_scan_block_len: usize,

    /// Lower bound of the inclusive word-count range for scanned posts.
    ///
    /// Default: `5`
    pub min_words: usize,

    /// Upper bound of the word-count range.
    ///
    /// Default: `200`
    pub max_words: usize,

    /// Maximum navigation phrase occurrences tolerated in a post.
    ///
    /// Default: `2`
    pub max_nav_phrases: usize,

    /// Maximum distinct navigation phrases tolerated in a scanned block.
    ///
    /// Default: `3`
    pub max_scan_nav_phrases: usize,

    /// Phrases counted by the validator.
    pub nav_phrases: Vec<String>,

    /// Phrases counted by the block pre-filter.
    pub scan_nav_phrases: Vec<String>,

    /// Phrases removed from scanned text.
    pub boilerplate_phrases: Vec<String>,

    /// English UI words that disqualify a scanned block.
    pub ui_terms: Vec<String>,

    /// Thread URL, used for the topic id and title fallback.
    ///
    /// Default: `None`
    pub url: Option<String>,
}

fn owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_string()).collect()
}

impl Default for Options {
    fn default() -> Self {
        Self {
            strategy: ExtractionStrategy::Auto,
            deduplicate: true,
            fingerprint_prefix_len: 100,
            min_content_len: 30,
            min_scan_block_len: 50,
            min_words: 5,
            max_words: 200,
            max_nav_phrases: 2,
            max_scan_nav_phrases: 3,
            nav_phrases: owned(patterns::NAV_PHRASES),
            scan_nav_phrases: owned(patterns::SCAN_NAV_PHRASES),
            boilerplate_phrases: owned(patterns::BOILERPLATE_PHRASES),
            ui_terms: owned(patterns::UI_TERMS),
            url: None,
        }
    }
}

impl Options {
    /// Parse options from TOML. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the document is not valid TOML or a
    /// value has the wrong type.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| Error::Config(e.to_string()))
    }

    /// Read and parse an options file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and [`Error::Config`]
    /// if it does not parse.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}
