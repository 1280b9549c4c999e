//! Document engine seam.
//!
//! Page parsing and glyph extraction live outside this crate. A
//! [`DocumentEngine`] supplies, per page, the page geometry and the text runs
//! in the engine's native order; everything downstream is pure analysis.

use crate::error::{Error, Result};
use crate::geometry::PageGeometry;
use crate::layout::text_block::TextRun;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// Everything the analysis needs from one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageContent {
    /// View rectangle and page number
    pub geometry: PageGeometry,
    /// Text runs in engine order
    pub runs: Vec<TextRun>,
}

/// Source of page content.
///
/// Implementations must be shareable across worker threads; pages are
/// requested independently and possibly concurrently.
pub trait DocumentEngine: Sync {
    /// Number of pages in the document.
    fn page_count(&self) -> usize;

    /// Content of the page at zero-based `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PageNotFound`] for an index past the end, or
    /// [`Error::Engine`] when the page cannot be produced.
    fn page(&self, index: usize) -> Result<PageContent>;
}

/// A document held entirely in memory, typically loaded from a JSON dump.
///
/// The dump format is `{"pages": [{"geometry": {...}, "runs": [...]}]}`.
///
/// # Examples
///
/// ```
/// use pdf_panels::engine::{DocumentEngine, InMemoryDocument};
///
/// let json = r#"{"pages": [{
///     "geometry": {"view": {"x": 0, "y": 0, "width": 612, "height": 792}, "page_number": 1},
///     "runs": [{"text": "1 Introduction", "start_x": 72, "width": 90,
///               "height": 12, "baseline_y": 700}]
/// }]}"#;
///
/// let doc = InMemoryDocument::from_json_str(json).unwrap();
/// assert_eq!(doc.page_count(), 1);
/// assert_eq!(doc.page(0).unwrap().runs[0].text, "1 Introduction");
/// assert!(doc.page(1).is_err());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemoryDocument {
    pages: Vec<PageContent>,
    #[serde(skip)]
    unavailable: BTreeSet<usize>,
}

impl InMemoryDocument {
    /// Create a document from already extracted pages.
    pub fn new(pages: Vec<PageContent>) -> Self {
        Self {
            pages,
            unavailable: BTreeSet::new(),
        }
    }

    /// Parse a JSON dump.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON dump from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Serialize the document back into the dump format.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Mark a page as unavailable; requesting it yields [`Error::Engine`].
    ///
    /// Models an engine that cannot produce one page (a damaged content
    /// stream, a cancelled fetch) while the rest of the document is fine.
    pub fn with_unavailable_page(mut self, index: usize) -> Self {
        self.unavailable.insert(index);
        self
    }
}

impl DocumentEngine for InMemoryDocument {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page(&self, index: usize) -> Result<PageContent> {
        if self.unavailable.contains(&index) {
            return Err(Error::Engine {
                page: index,
                reason: "page marked unavailable".to_string(),
            });
        }
        self.pages
            .get(index)
            .cloned()
            .ok_or(Error::PageNotFound(index))
    }
}
