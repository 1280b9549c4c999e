//! Section header detection.
//!
//! Recognizes numbered headings ("3 Results", "4.2. Related Work") among a
//! page's text blocks using the lexical rules of a [`SectionHeaderConfig`]:
//! a numbered-heading pattern, a bounded title length, a cap on the section
//! number and a capitalization check on every word of the title.
//!
//! "Not a header" is the normal outcome for most blocks and is reported as
//! `None`, never as an error.

use crate::layout::text_block::TextBlock;
use crate::pipeline::config::SectionHeaderConfig;
use serde::Serialize;

/// A text block recognized as a numbered section heading.
///
/// The originating block is referenced by its index in the page's block
/// list; the header does not own it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionHeader {
    /// Index of the source block in the page's block list
    pub block_index: usize,
    /// Top-level section number
    pub section_number: u32,
    /// Subsection number, when the heading carries one
    pub subsection_number: Option<u32>,
    /// Heading title without its number
    pub title: String,
    /// Zero-based index of the page the heading was found on
    pub page_index: usize,
    /// Top-down vertical offset of the source block
    pub y_offset: f32,
}

/// Filters text blocks for numbered section headings.
#[derive(Debug, Clone, Copy)]
pub struct SectionHeaderExtractor<'a> {
    config: &'a SectionHeaderConfig,
}

impl<'a> SectionHeaderExtractor<'a> {
    /// Create an extractor that applies `config`.
    pub fn new(config: &'a SectionHeaderConfig) -> Self {
        Self { config }
    }

    /// Classify one block.
    ///
    /// Returns `None` when the text does not match the heading pattern, the
    /// title is too short or too long, the section number is too large, or
    /// the title contains a fully lowercase word that is not a stopword.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_panels::layout::{SectionHeaderExtractor, TextBlock, TextRun};
    /// use pdf_panels::pipeline::SectionHeaderConfig;
    ///
    /// let config = SectionHeaderConfig::default();
    /// let extractor = SectionHeaderExtractor::new(&config);
    ///
    /// let heading = TextBlock::from_runs(
    ///     vec![TextRun::new("4.2 Results on the Benchmark", 72.0, 200.0, 12.0, 500.0)],
    ///     292.0,
    /// );
    /// let header = extractor.extract(&heading, 5, 0).unwrap();
    /// assert_eq!(header.section_number, 4);
    /// assert_eq!(header.subsection_number, Some(2));
    /// assert_eq!(header.title, "Results on the Benchmark");
    ///
    /// let prose = TextBlock::from_runs(
    ///     vec![TextRun::new("15 items were found", 72.0, 120.0, 12.0, 480.0)],
    ///     312.0,
    /// );
    /// assert!(extractor.extract(&prose, 6, 0).is_none());
    /// ```
    pub fn extract(
        &self,
        block: &TextBlock,
        block_index: usize,
        page_index: usize,
    ) -> Option<SectionHeader> {
        let text = block.text();
        let caps = self.config.pattern.captures(&text)?;

        let section_number: u32 = caps.get(1)?.as_str().parse().ok()?;
        // An empty subsection group means a top-level heading; one that does
        // not fit a u32 is noise, not a heading
        let subsection_number = match caps.get(2).map(|m| m.as_str()) {
            Some(digits) if !digits.is_empty() => Some(digits.parse::<u32>().ok()?),
            _ => None,
        };
        let title = caps.get(3)?.as_str();

        let title_chars = title.chars().count();
        let length_range = self.config.min_title_chars..=self.config.max_title_chars;
        if !length_range.contains(&title_chars) {
            log::trace!("Rejecting heading candidate {:?}: title length {}", text, title_chars);
            return None;
        }
        if section_number > self.config.max_section_number {
            log::trace!("Rejecting heading candidate {:?}: section {}", text, section_number);
            return None;
        }
        if let Some(word) = self.first_uncapitalized_word(title) {
            log::trace!("Rejecting heading candidate {:?}: lowercase word {:?}", text, word);
            return None;
        }

        Some(SectionHeader {
            block_index,
            section_number,
            subsection_number,
            title: title.to_string(),
            page_index,
            y_offset: block.y_offset,
        })
    }

    /// Extract every section header of a page, in block order.
    pub fn extract_all(&self, blocks: &[TextBlock], page_index: usize) -> Vec<SectionHeader> {
        let headers: Vec<SectionHeader> = blocks
            .iter()
            .enumerate()
            .filter_map(|(idx, block)| self.extract(block, idx, page_index))
            .collect();
        if !headers.is_empty() {
            log::debug!("Page {}: found {} section headers", page_index, headers.len());
        }
        headers
    }

    /// First title word that is entirely lowercase and not a stopword.
    fn first_uncapitalized_word<'t>(&self, title: &'t str) -> Option<&'t str> {
        title
            .split_whitespace()
            .find(|w| w.to_lowercase() == *w && !self.config.is_stopword(w))
    }
}
