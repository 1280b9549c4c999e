//! Page layout analysis.
//!
//! The stages run per page, in this order:
//! - Row merging (text runs → text blocks)
//! - Column break detection (row scoring and page classification)
//! - Panel construction (break decision → panel rectangles)
//! - Section header detection (runs independently over the same blocks)

pub mod column_detector;
pub mod heading_detector;
pub mod panel;
pub mod panel_builder;
pub mod row_merger;
pub mod text_block;

// Re-export main types
pub use column_detector::{BreakAnalysis, BreakRow, Row, detect_column_break, group_rows};
pub use heading_detector::{SectionHeader, SectionHeaderExtractor};
pub use panel::{Panel, PanelKind, PanelLayout, PanelLayoutKind};
pub use panel_builder::build_panel_layout;
pub use row_merger::merge_runs;
pub use text_block::{TextBlock, TextRun};
