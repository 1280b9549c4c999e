//! # PDF Panels
//!
//! Column/panel layout inference and section header extraction for PDF pages.
//!
//! ## Core Features
//!
//! - **Row Merging**: Groups text runs sharing a baseline into text blocks
//! - **Column Break Detection**: Scores rows by midline straddling to classify a
//!   page as single-column, two-column, or full-width header over two columns
//! - **Panel Construction**: Turns the classification into concrete panel rectangles
//! - **Section Headers**: Finds numbered headings ("3.2 Related Work") for navigation
//! - **Parallel Pages**: Pages are independent and run on a bounded worker pool
//!
//! Page parsing is out of scope: a [`DocumentEngine`](engine::DocumentEngine)
//! supplies page geometry and text runs.
//!
//! ## Quick Start
//!
//! ```
//! use pdf_panels::engine::{InMemoryDocument, PageContent};
//! use pdf_panels::geometry::PageGeometry;
//! use pdf_panels::layout::TextRun;
//! use pdf_panels::pipeline::{AnalysisConfig, analyze_document};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let page = PageContent {
//!     geometry: PageGeometry::new(0.0, 0.0, 612.0, 792.0, 1),
//!     runs: vec![TextRun::new("1 Introduction", 72.0, 468.0, 12.0, 700.0)],
//! };
//! let doc = InMemoryDocument::new(vec![page]);
//!
//! let structure = analyze_document(&doc, &AnalysisConfig::default())?;
//! for section in &structure.sections {
//!     println!("{} {} (page {})", section.section_number, section.title, section.page_index);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

// Error handling
pub mod error;

// Geometry and page content
pub mod engine;
pub mod geometry;

// Analysis stages
pub mod layout;
pub mod pipeline;

pub use engine::{DocumentEngine, InMemoryDocument, PageContent};
pub use error::{Error, Result};
pub use layout::{Panel, PanelKind, PanelLayout, PanelLayoutKind, SectionHeader};
pub use pipeline::{
    AnalysisConfig, DocumentStructure, PageStructure, analyze_document, analyze_page,
};
