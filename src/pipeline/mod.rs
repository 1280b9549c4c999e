//! Page and document analysis pipeline.
//!
//! ```text
//! DocumentEngine
//!     ↓ (per page: geometry + text runs)
//! [merge_runs] → TextBlock[]
//!     ↓                         ↘
//! [detect_column_break]    [SectionHeaderExtractor]
//!     ↓                         ↓
//! [build_panel_layout]     SectionHeader[]
//!     ↓
//! PanelLayout
//! ```
//!
//! Pages are independent: no stage reads another page's data, so pages run
//! either sequentially or on a bounded worker pool with identical results.

pub mod config;

// Re-export main types
pub use config::{
    AnalysisConfig, DEFAULT_SECTION_PATTERN, DEFAULT_SECTION_STOPWORDS, LayoutConfig,
    Parallelism, SectionHeaderConfig,
};

use crate::engine::{DocumentEngine, PageContent};
use crate::error::{Error, Result};
use crate::geometry::PageGeometry;
use crate::layout::{
    BreakAnalysis, PanelLayout, SectionHeader, SectionHeaderExtractor, TextBlock,
    build_panel_layout, detect_column_break, merge_runs,
};
use rayon::ThreadPoolBuilder;
use rayon::prelude::*;
use serde::Serialize;

/// Worker count used for [`Parallelism::Threads`]`(0)`.
pub(crate) fn default_thread_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Analysis result for one page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageStructure {
    /// Zero-based page index
    pub page_index: usize,
    /// Geometry the page was analyzed with
    pub geometry: PageGeometry,
    /// Merged text blocks in engine order
    pub blocks: Vec<TextBlock>,
    /// Panel decomposition of the page
    pub layout: PanelLayout,
    /// Section headers, referencing `blocks` by index
    pub sections: Vec<SectionHeader>,
    /// Row scores and classification behind `layout`
    pub break_analysis: BreakAnalysis,
}

impl PageStructure {
    /// Source block of a header found on this page.
    pub fn block(&self, header: &SectionHeader) -> Option<&TextBlock> {
        if header.page_index != self.page_index {
            return None;
        }
        self.blocks.get(header.block_index)
    }

    /// Index of the first panel that contains the header's block.
    ///
    /// This is the panel a viewer shows when jumping to the section.
    pub fn panel_for_section(&self, header: &SectionHeader) -> Option<usize> {
        let block = self.block(header)?;
        self.layout.panel_index_containing(block)
    }

    /// Vertical offset of the header relative to the top of a panel.
    pub fn section_scroll_offset(
        &self,
        header: &SectionHeader,
        panel_index: usize,
    ) -> Option<f32> {
        let panel = self.layout.panels().get(panel_index)?;
        Some(header.y_offset - panel.bounds().top())
    }
}

/// Analysis result for a whole document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentStructure {
    /// Page count reported by the engine
    pub num_pages: usize,
    /// Successfully analyzed pages, in page order
    pub pages: Vec<PageStructure>,
    /// All section headers of the document, in page order
    pub sections: Vec<SectionHeader>,
}

impl DocumentStructure {
    /// Analyzed page with the given zero-based index.
    ///
    /// `None` when the page is out of range or the engine failed on it.
    pub fn page(&self, page_index: usize) -> Option<&PageStructure> {
        self.pages.iter().find(|p| p.page_index == page_index)
    }
}

/// Run every analysis stage over one page.
///
/// # Examples
///
/// ```
/// use pdf_panels::engine::PageContent;
/// use pdf_panels::geometry::PageGeometry;
/// use pdf_panels::layout::{PanelLayoutKind, TextRun};
/// use pdf_panels::pipeline::{AnalysisConfig, analyze_page};
///
/// let content = PageContent {
///     geometry: PageGeometry::new(0.0, 0.0, 600.0, 800.0, 1),
///     runs: vec![
///         TextRun::new("1 Introduction", 72.0, 456.0, 12.0, 700.0),
///         TextRun::new("Body text that spans the page", 72.0, 456.0, 10.0, 680.0),
///     ],
/// };
///
/// let page = analyze_page(&content, 0, &AnalysisConfig::default());
/// assert_eq!(page.layout.kind, PanelLayoutKind::SingleColumn);
/// assert_eq!(page.sections[0].title, "Introduction");
/// assert_eq!(page.panel_for_section(&page.sections[0]), Some(0));
/// ```
pub fn analyze_page(
    content: &PageContent,
    page_index: usize,
    config: &AnalysisConfig,
) -> PageStructure {
    let geometry = content.geometry;
    let blocks = merge_runs(&content.runs, &geometry);
    let break_analysis = detect_column_break(&blocks, &geometry, &config.layout);
    let layout = build_panel_layout(&break_analysis, &blocks, &geometry, &config.layout);
    let sections = SectionHeaderExtractor::new(&config.sections).extract_all(&blocks, page_index);

    log::debug!(
        "Page {}: {} runs, {} blocks, {:?}, {} sections",
        page_index,
        content.runs.len(),
        blocks.len(),
        layout.kind,
        sections.len()
    );

    PageStructure {
        page_index,
        geometry,
        blocks,
        layout,
        sections,
        break_analysis,
    }
}

/// Analyze every page a document engine supplies.
///
/// Pages the engine fails to produce are logged and left out; they never
/// abort the other pages. The result lists pages in index order regardless
/// of [`Parallelism`].
///
/// # Errors
///
/// Returns [`Error::ThreadPool`] if the worker pool cannot be created.
pub fn analyze_document<E>(engine: &E, config: &AnalysisConfig) -> Result<DocumentStructure>
where
    E: DocumentEngine + ?Sized,
{
    let num_pages = engine.page_count();
    let analyze = |page_index: usize| -> Option<PageStructure> {
        match engine.page(page_index) {
            Ok(content) => Some(analyze_page(&content, page_index, config)),
            Err(e) => {
                log::warn!("Skipping page {}: {}", page_index, e);
                None
            },
        }
    };

    let pages: Vec<PageStructure> = match config.parallelism {
        Parallelism::Sequential => (0..num_pages).filter_map(&analyze).collect(),
        Parallelism::Threads(requested) => {
            let thread_count = if requested == 0 {
                default_thread_count()
            } else {
                requested
            };
            let pool = ThreadPoolBuilder::new()
                .num_threads(thread_count)
                .build()
                .map_err(|e| Error::ThreadPool(e.to_string()))?;

            let mut results: Vec<(usize, PageStructure)> = pool.install(|| {
                (0..num_pages)
                    .into_par_iter()
                    .filter_map(|page_index| analyze(page_index).map(|page| (page_index, page)))
                    .collect()
            });
            results.sort_by_key(|(page_index, _)| *page_index);
            results.into_iter().map(|(_, page)| page).collect()
        },
    };

    let sections: Vec<SectionHeader> = pages
        .iter()
        .flat_map(|page| page.sections.iter().cloned())
        .collect();

    log::debug!(
        "Analyzed {}/{} pages, {} section headers",
        pages.len(),
        num_pages,
        sections.len()
    );

    Ok(DocumentStructure {
        num_pages,
        pages,
        sections,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::InMemoryDocument;
    use crate::layout::{PanelKind, PanelLayoutKind, TextRun};

    const PAGE_HEIGHT: f32 = 1000.0;

    fn run(text: &str, x: f32, width: f32, offset: f32) -> TextRun {
        TextRun::new(text, x, width, 10.0, PAGE_HEIGHT - offset)
    }

    /// Title and abstract across the page, then two columns; the left column
    /// opens with a numbered heading.
    fn paper_first_page() -> PageContent {
        let mut runs = vec![
            run("A Study of Panel Layouts", 150.0, 300.0, 120.0),
            run("Abstract text spanning both columns", 80.0, 440.0, 160.0),
            run("1 Introduction", 60.0, 100.0, 200.0),
        ];
        for i in 1..8 {
            runs.push(run("left column body text", 60.0, 200.0, 200.0 + 20.0 * i as f32));
        }
        for i in 0..8 {
            runs.push(run("right column body text", 320.0, 220.0, 200.0 + 20.0 * i as f32));
        }
        PageContent {
            geometry: PageGeometry::new(0.0, 0.0, 600.0, PAGE_HEIGHT, 1),
            runs,
        }
    }

    fn single_column_page(number: u32) -> PageContent {
        let mut runs = vec![run("2 Method", 72.0, 60.0, 100.0)];
        for i in 1..8 {
            runs.push(run("full width body text line", 72.0, 450.0, 100.0 + 20.0 * i as f32));
        }
        PageContent {
            geometry: PageGeometry::new(0.0, 0.0, 600.0, PAGE_HEIGHT, number),
            runs,
        }
    }

    fn document() -> InMemoryDocument {
        InMemoryDocument::new(vec![paper_first_page(), single_column_page(2)])
    }

    #[test]
    fn test_analyze_page_header_and_columns() {
        let page = analyze_page(&paper_first_page(), 0, &AnalysisConfig::default());

        assert_eq!(page.layout.kind, PanelLayoutKind::TopFullWidthTwoColumn);
        assert_eq!(page.blocks.len(), 18);
        let header = page.layout.panel(PanelKind::TopHeader).unwrap().bounds();
        assert_eq!((header.left(), header.right(), header.bottom()), (150.0, 450.0, 150.0));
        let left = page.layout.panel(PanelKind::LeftColumn).unwrap().bounds();
        assert_eq!((left.left(), left.top()), (60.0, 185.0));
        assert_eq!((left.right(), left.bottom()), (260.0, 355.0));
    }

    #[test]
    fn test_section_navigation() {
        let page = analyze_page(&paper_first_page(), 0, &AnalysisConfig::default());

        assert_eq!(page.sections.len(), 1);
        let intro = &page.sections[0];
        assert_eq!(intro.title, "Introduction");
        assert_eq!(page.block(intro).unwrap().text(), "1 Introduction");
        assert_eq!(page.panel_for_section(intro), Some(1));
        assert_eq!(page.section_scroll_offset(intro, 1), Some(15.0));
        assert_eq!(page.section_scroll_offset(intro, 3), None);
    }

    #[test]
    fn test_block_rejects_foreign_header() {
        let page = analyze_page(&paper_first_page(), 0, &AnalysisConfig::default());
        let mut foreign = page.sections[0].clone();
        foreign.page_index = 5;
        assert!(page.block(&foreign).is_none());
        assert!(page.panel_for_section(&foreign).is_none());
    }

    #[test]
    fn test_analyze_document_sequential() {
        let structure = analyze_document(&document(), &AnalysisConfig::sequential()).unwrap();

        assert_eq!(structure.num_pages, 2);
        assert_eq!(structure.pages.len(), 2);
        assert_eq!(structure.pages[1].layout.kind, PanelLayoutKind::SingleColumn);
        let titles: Vec<&str> = structure.sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Introduction", "Method"]);
        assert_eq!(structure.sections[1].page_index, 1);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let doc = document();
        let sequential = analyze_document(&doc, &AnalysisConfig::sequential()).unwrap();
        for threads in [0, 1, 3] {
            let config = AnalysisConfig {
                parallelism: Parallelism::Threads(threads),
                ..AnalysisConfig::default()
            };
            assert_eq!(analyze_document(&doc, &config).unwrap(), sequential);
        }
    }

    #[test]
    fn test_failed_page_is_omitted() {
        let doc = document().with_unavailable_page(0);
        let structure = analyze_document(&doc, &AnalysisConfig::default()).unwrap();

        assert_eq!(structure.num_pages, 2);
        assert_eq!(structure.pages.len(), 1);
        assert!(structure.page(0).is_none());
        assert_eq!(structure.page(1).unwrap().sections[0].title, "Method");
        assert_eq!(structure.sections.len(), 1);
    }

    #[test]
    fn test_empty_document() {
        let structure =
            analyze_document(&InMemoryDocument::default(), &AnalysisConfig::default()).unwrap();
        assert_eq!(structure.num_pages, 0);
        assert!(structure.pages.is_empty());
        assert!(structure.sections.is_empty());
    }

    #[test]
    fn test_default_thread_count_positive() {
        assert!(default_thread_count() >= 1);
    }
}
