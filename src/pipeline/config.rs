//! Unified configuration for page layout analysis.
//!
//! This module consolidates the tuning constants of every stage:
//! - LayoutConfig (column break detection and panel construction)
//! - SectionHeaderConfig (numbered heading recognition)
//! - Parallelism (how pages are scheduled)
//!
//! Configuration is built once and handed to the stages by reference.

use crate::error::{Error, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

/// Default heading pattern: `<1-2 digit number>[.]<optional subnumber>[.] <title>`.
pub const DEFAULT_SECTION_PATTERN: &str = r"^([1-9][0-9]?)[.]?([0-9]*)[.]?\s+(.+)";

/// Words allowed to stay lowercase inside a section title.
pub const DEFAULT_SECTION_STOPWORDS: [&str; 8] =
    ["stop", "in", "of", "and", "to", "the", "a", "on"];

lazy_static! {
    static ref DEFAULT_SECTION_REGEX: Regex = Regex::new(DEFAULT_SECTION_PATTERN).unwrap();
}

/// Thresholds for column break detection and panel construction.
///
/// The defaults are empirical and tuned for academic papers with a
/// full-width title/abstract above a two-column body.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Rows with fewer non-whitespace characters don't count towards
    /// straddler statistics (they still occupy a row slot)
    pub min_row_chars: usize,

    /// Rows whose offset is within this fraction of the page height from
    /// the top never become break candidates
    pub top_exclusion_fraction: f32,

    /// Score forced onto rows with a straddling figure/table caption
    pub caption_break_score: f32,

    /// Score forced onto rows with no straddling block
    pub no_straddler_score: f32,

    /// Case-insensitive prefixes that mark a straddling block as a caption
    pub caption_prefixes: Vec<String>,

    /// Page-wide straddler ratio above which the page is single-column
    pub single_column_ratio: f32,

    /// Best break score above which a full-width header panel is emitted
    pub min_header_break_score: f32,

    /// Padding added below the lowest block of each column
    pub column_bottom_pad: f32,

    /// Padding added above the column top when a header panel is present
    pub column_top_pad: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            min_row_chars: 10,
            top_exclusion_fraction: 0.1,
            caption_break_score: 10.0,
            no_straddler_score: -1.0,
            caption_prefixes: vec!["figure".to_string(), "table".to_string()],
            single_column_ratio: 0.5,
            min_header_break_score: 0.2,
            column_bottom_pad: 15.0,
            column_top_pad: 5.0,
        }
    }
}

/// Rules for recognizing numbered section headers.
///
/// The pattern must expose three capture groups: section number,
/// subsection number (may match empty) and title.
#[derive(Debug, Clone)]
pub struct SectionHeaderConfig {
    /// Compiled heading pattern
    pub pattern: Regex,
    /// Words permitted to be fully lowercase in a title
    pub stopwords: HashSet<String>,
    /// Minimum title length in characters (inclusive)
    pub min_title_chars: usize,
    /// Maximum title length in characters (inclusive)
    pub max_title_chars: usize,
    /// Largest section number accepted
    pub max_section_number: u32,
}

impl SectionHeaderConfig {
    /// Build a configuration around a custom heading pattern.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the pattern does not compile or
    /// has fewer than three capture groups.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_panels::pipeline::SectionHeaderConfig;
    ///
    /// let config = SectionHeaderConfig::with_pattern(r"^(\d+)()\s+(.+)").unwrap();
    /// assert!(config.pattern.is_match("3 Results"));
    ///
    /// assert!(SectionHeaderConfig::with_pattern(r"^(\d+)").is_err());
    /// ```
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)
            .map_err(|e| Error::InvalidConfig(format!("bad section pattern: {}", e)))?;
        // captures_len includes the implicit whole-match group
        if regex.captures_len() < 4 {
            return Err(Error::InvalidConfig(format!(
                "section pattern needs 3 capture groups, found {}",
                regex.captures_len() - 1
            )));
        }
        Ok(Self {
            pattern: regex,
            ..Self::default()
        })
    }

    /// Whether `word` may appear fully lowercase in a title.
    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }
}

impl Default for SectionHeaderConfig {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_SECTION_REGEX.clone(),
            stopwords: DEFAULT_SECTION_STOPWORDS
                .iter()
                .map(|w| w.to_string())
                .collect(),
            min_title_chars: 4,
            max_title_chars: 100,
            max_section_number: 20,
        }
    }
}

/// How pages of a document are scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parallelism {
    /// Analyze pages one after another on the calling thread
    Sequential,
    /// Analyze pages on a bounded worker pool (0 = available parallelism)
    Threads(usize),
}

impl Default for Parallelism {
    fn default() -> Self {
        Self::Threads(0)
    }
}

/// Complete configuration for document analysis.
#[derive(Debug, Clone, Default)]
pub struct AnalysisConfig {
    /// Column break and panel thresholds
    pub layout: LayoutConfig,
    /// Section header rules
    pub sections: SectionHeaderConfig,
    /// Page scheduling
    pub parallelism: Parallelism,
}

impl AnalysisConfig {
    /// Configuration that analyzes pages on the calling thread.
    pub fn sequential() -> Self {
        Self {
            parallelism: Parallelism::Sequential,
            ..Self::default()
        }
    }
}
