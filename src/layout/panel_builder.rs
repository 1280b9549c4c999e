//! Panel construction from a column break decision.
//!
//! Turns a [`BreakAnalysis`] into concrete panel rectangles. The column
//! geometry (horizontal extents, bottoms, and the shared column top) is
//! computed once in [`ColumnSplit`] and reused by both two-column layouts.

use crate::geometry::{PageGeometry, Rect, Span};
use crate::layout::column_detector::{BreakAnalysis, BreakRow};
use crate::layout::panel::{Panel, PanelKind, PanelLayout, PanelLayoutKind};
use crate::layout::text_block::TextBlock;
use crate::pipeline::config::LayoutConfig;

/// Build the panel layout of a page.
///
/// Every returned panel satisfies `x0 <= x1` and `y0 <= y1`. A page without
/// blocks gets one full-page panel covering the content view.
pub fn build_panel_layout(
    analysis: &BreakAnalysis,
    blocks: &[TextBlock],
    page: &PageGeometry,
    config: &LayoutConfig,
) -> PanelLayout {
    match (analysis.kind, analysis.header_break()) {
        (PanelLayoutKind::SingleColumn, _) => single_column_layout(blocks, page),
        (PanelLayoutKind::TopFullWidthTwoColumn, Some(header_break)) => {
            let columns = ColumnSplit::compute(blocks, analysis, page, config);
            let top = columns.column_top(Some(header_break.offset), page) - config.column_top_pad;
            PanelLayout::top_full_width_two_column(
                header_panel(header_break, blocks, page),
                columns.left_panel(top),
                columns.right_panel(top),
            )
        },
        _ => {
            let columns = ColumnSplit::compute(blocks, analysis, page, config);
            let top = columns.column_top(None, page);
            PanelLayout::two_column(columns.left_panel(top), columns.right_panel(top))
        },
    }
}

fn single_column_layout(blocks: &[TextBlock], page: &PageGeometry) -> PanelLayout {
    // Trim horizontal margins to the text actually on the page
    let x_span =
        Span::enclosing(blocks.iter().map(TextBlock::x_span)).unwrap_or(page.view.x_span());
    PanelLayout::single_column(Rect::from_spans(x_span, page.view.y_span()))
}

/// Header panel spanning from the page top to just above the break row.
///
/// On the first page the header is only as wide as the blocks above the
/// break (typically a title block); later pages use the full page width.
fn header_panel(header_break: &BreakRow, blocks: &[TextBlock], page: &PageGeometry) -> Panel {
    let full_width = page.view.x_span();
    let x_span = if page.is_first_page() {
        Span::enclosing(
            blocks
                .iter()
                .filter(|b| b.y_offset < header_break.offset)
                .map(TextBlock::x_span),
        )
        .unwrap_or(full_width)
    } else {
        full_width
    };
    let bottom = header_break.offset - header_break.max_height;
    Panel::from_spans(PanelKind::TopHeader, x_span, Span::new(page.view.top(), bottom))
}

/// Geometry of the left/right columns below the break.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ColumnSplit {
    left_x: Span,
    right_x: Span,
    left_bottom: f32,
    right_bottom: f32,
    /// Lower of the two columns' topmost block tops, when both have blocks
    block_top: Option<f32>,
}

impl ColumnSplit {
    fn compute(
        blocks: &[TextBlock],
        analysis: &BreakAnalysis,
        page: &PageGeometry,
        config: &LayoutConfig,
    ) -> Self {
        let mid_x = analysis.mid_x;
        let below_break = |b: &&TextBlock| match analysis.best_break {
            Some(brk) => b.y_offset > brk.offset,
            None => true,
        };
        let left: Vec<&TextBlock> = blocks
            .iter()
            .filter(below_break)
            .filter(|b| b.x_span().end <= mid_x)
            .collect();
        let right: Vec<&TextBlock> = blocks
            .iter()
            .filter(below_break)
            .filter(|b| b.x_span().start > mid_x)
            .collect();

        if left.is_empty() || right.is_empty() {
            log::debug!(
                "Page {}: column without blocks (left={}, right={}), splitting at midline",
                page.page_number,
                left.len(),
                right.len()
            );
            return Self {
                left_x: Span::new(page.view.left(), mid_x),
                right_x: Span::new(mid_x, page.view.right()),
                left_bottom: page.view.bottom(),
                right_bottom: page.view.bottom(),
                block_top: None,
            };
        }

        let (left_x, left_y) = extents(&left);
        let (right_x, right_y) = extents(&right);
        Self {
            left_x,
            right_x,
            left_bottom: left_y.end + config.column_bottom_pad,
            right_bottom: right_y.end + config.column_bottom_pad,
            block_top: Some(left_y.start.max(right_y.start)),
        }
    }

    /// Shared top of both columns.
    ///
    /// Block-derived top when both columns have blocks, otherwise the
    /// header break offset if there is one, otherwise the page top.
    fn column_top(&self, header_break_offset: Option<f32>, page: &PageGeometry) -> f32 {
        self.block_top
            .or(header_break_offset)
            .unwrap_or(page.view.top())
    }

    fn left_panel(&self, top: f32) -> Panel {
        Panel::from_spans(PanelKind::LeftColumn, self.left_x, Span::new(top, self.left_bottom))
    }

    fn right_panel(&self, top: f32) -> Panel {
        Panel::from_spans(PanelKind::RightColumn, self.right_x, Span::new(top, self.right_bottom))
    }
}

/// Tight horizontal and vertical spans of a non-empty block set.
fn extents(blocks: &[&TextBlock]) -> (Span, Span) {
    let first = (blocks[0].x_span(), blocks[0].y_span());
    blocks[1..]
        .iter()
        .fold(first, |(x, y), b| (x.union(&b.x_span()), y.union(&b.y_span())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::column_detector::detect_column_break;
    use crate::layout::text_block::TextRun;

    const PAGE_HEIGHT: f32 = 1000.0;

    fn page(number: u32) -> PageGeometry {
        PageGeometry::new(0.0, 0.0, 600.0, PAGE_HEIGHT, number)
    }

    fn mock_block(text: &str, x: f32, width: f32, offset: f32) -> TextBlock {
        TextBlock::from_runs(
            vec![TextRun::new(text, x, width, 10.0, PAGE_HEIGHT - offset)],
            offset,
        )
    }

    fn layout_for(blocks: &[TextBlock], page: &PageGeometry) -> PanelLayout {
        let config = LayoutConfig::default();
        let analysis = detect_column_break(blocks, page, &config);
        build_panel_layout(&analysis, blocks, page, &config)
    }

    fn two_column_body(blocks: &mut Vec<TextBlock>, first: f32, rows: usize) {
        for i in 0..rows {
            let offset = first + 20.0 * i as f32;
            blocks.push(mock_block("left column body text", 60.0, 200.0, offset));
            blocks.push(mock_block("right column body text", 320.0, 220.0, offset));
        }
    }

    #[test]
    fn test_empty_page_full_page_panel() {
        let layout = layout_for(&[], &page(1));
        assert_eq!(layout.kind, PanelLayoutKind::SingleColumn);
        assert_eq!(layout.panels().len(), 1);
        assert_eq!(layout.panels()[0].bounds(), Rect::from_points(0.0, 0.0, 600.0, PAGE_HEIGHT));
    }

    #[test]
    fn test_single_column_trims_margins() {
        let blocks: Vec<TextBlock> = (0..5)
            .map(|i| {
                let offset = 200.0 + 20.0 * i as f32;
                mock_block("a long line of running text", 72.0 + i as f32, 450.0, offset)
            })
            .collect();
        let layout = layout_for(&blocks, &page(1));

        assert_eq!(layout.kind, PanelLayoutKind::SingleColumn);
        let bounds = layout.panels()[0].bounds();
        assert_eq!(bounds.left(), 72.0);
        assert_eq!(bounds.right(), 526.0);
        assert_eq!(bounds.top(), 0.0);
        assert_eq!(bounds.bottom(), PAGE_HEIGHT);
    }

    #[test]
    fn test_two_column_bounds() {
        let mut blocks = Vec::new();
        two_column_body(&mut blocks, 150.0, 10);
        let layout = layout_for(&blocks, &page(2));

        assert_eq!(layout.kind, PanelLayoutKind::TwoColumn);
        let left = layout.panel(PanelKind::LeftColumn).unwrap().bounds();
        let right = layout.panel(PanelKind::RightColumn).unwrap().bounds();

        assert_eq!(left.left(), 60.0);
        assert_eq!(left.right(), 260.0);
        assert_eq!(right.left(), 320.0);
        assert_eq!(right.right(), 540.0);
        // Topmost block top is offset - height
        assert_eq!(left.top(), 140.0);
        assert_eq!(right.top(), 140.0);
        // Lowest baseline plus bottom pad
        assert_eq!(left.bottom(), 330.0 + 15.0);
        assert_eq!(right.bottom(), 330.0 + 15.0);
    }

    #[test]
    fn test_two_column_ragged_top_uses_lower_top() {
        let mut blocks = vec![mock_block("left starts high", 60.0, 200.0, 150.0)];
        two_column_body(&mut blocks, 200.0, 6);
        let layout = layout_for(&blocks, &page(2));

        let left = layout.panel(PanelKind::LeftColumn).unwrap().bounds();
        let right = layout.panel(PanelKind::RightColumn).unwrap().bounds();
        assert_eq!(left.top(), 190.0);
        assert_eq!(right.top(), 190.0);
    }

    #[test]
    fn test_two_column_empty_side_falls_back_to_midline() {
        let blocks: Vec<TextBlock> = (0..6)
            .map(|i| mock_block("left only body text", 60.0, 200.0, 150.0 + 20.0 * i as f32))
            .collect();
        let layout = layout_for(&blocks, &page(3));

        assert_eq!(layout.kind, PanelLayoutKind::TwoColumn);
        let left = layout.panel(PanelKind::LeftColumn).unwrap().bounds();
        let right = layout.panel(PanelKind::RightColumn).unwrap().bounds();
        assert_eq!((left.left(), left.right()), (0.0, 300.0));
        assert_eq!((right.left(), right.right()), (300.0, 600.0));
        assert_eq!(left.top(), 0.0);
        assert_eq!(left.bottom(), PAGE_HEIGHT);
        assert_eq!(right.bottom(), PAGE_HEIGHT);
    }

    #[test]
    fn test_header_on_first_page_is_tight() {
        let mut blocks = vec![
            mock_block("A Study of Panel Layouts", 150.0, 300.0, 120.0),
            mock_block("Abstract spanning the full text width", 80.0, 440.0, 160.0),
        ];
        two_column_body(&mut blocks, 200.0, 8);
        let layout = layout_for(&blocks, &page(1));

        assert_eq!(layout.kind, PanelLayoutKind::TopFullWidthTwoColumn);
        let header = layout.panel(PanelKind::TopHeader).unwrap().bounds();
        // Only the title row lies strictly above the break row at 160
        assert_eq!(header.left(), 150.0);
        assert_eq!(header.right(), 450.0);
        assert_eq!(header.top(), 0.0);
        assert_eq!(header.bottom(), 150.0);

        let left = layout.panel(PanelKind::LeftColumn).unwrap().bounds();
        assert_eq!(left.top(), 190.0 - 5.0);
    }

    #[test]
    fn test_header_on_later_page_is_full_width() {
        let mut blocks = vec![
            mock_block("Running header spanning the page", 80.0, 440.0, 120.0),
            mock_block("Another full width line of text", 80.0, 440.0, 140.0),
        ];
        two_column_body(&mut blocks, 200.0, 8);
        let layout = layout_for(&blocks, &page(4));

        assert_eq!(layout.kind, PanelLayoutKind::TopFullWidthTwoColumn);
        let header = layout.panel(PanelKind::TopHeader).unwrap().bounds();
        assert_eq!((header.left(), header.right()), (0.0, 600.0));
        assert_eq!(header.bottom(), 130.0);
    }

    #[test]
    fn test_header_columns_fall_back_to_break_offset() {
        // Caption break with only left-column content below it
        let mut blocks = Vec::new();
        for i in 0..3 {
            let offset = 150.0 + 20.0 * i as f32;
            blocks.push(mock_block("right column body text", 320.0, 220.0, offset));
        }
        blocks.push(mock_block("Figure 4: Throughput under load", 100.0, 400.0, 400.0));
        for i in 0..3 {
            let offset = 450.0 + 20.0 * i as f32;
            blocks.push(mock_block("left column body text", 60.0, 200.0, offset));
        }
        let layout = layout_for(&blocks, &page(2));

        assert_eq!(layout.kind, PanelLayoutKind::TopFullWidthTwoColumn);
        let left = layout.panel(PanelKind::LeftColumn).unwrap().bounds();
        assert_eq!(left.top(), 400.0 - 5.0);
        assert_eq!((left.left(), left.right()), (0.0, 300.0));
        assert_eq!(left.bottom(), PAGE_HEIGHT);
    }

    #[test]
    fn test_column_top_fallback_order() {
        let split = ColumnSplit {
            left_x: Span::new(0.0, 300.0),
            right_x: Span::new(300.0, 600.0),
            left_bottom: 1000.0,
            right_bottom: 1000.0,
            block_top: None,
        };
        assert_eq!(split.column_top(Some(420.0), &page(1)), 420.0);
        assert_eq!(split.column_top(None, &page(1)), 0.0);

        let with_blocks = ColumnSplit {
            block_top: Some(250.0),
            ..split
        };
        assert_eq!(with_blocks.column_top(Some(420.0), &page(1)), 250.0);
    }

    #[test]
    fn test_all_panels_well_formed() {
        // Left column ends above where the right column starts
        let mut blocks = Vec::new();
        for i in 0..4 {
            let offset = 20.0 * i as f32;
            blocks.push(mock_block("left column body text", 60.0, 200.0, 150.0 + offset));
            blocks.push(mock_block("right column body text", 320.0, 220.0, 600.0 + offset));
        }
        let layout = layout_for(&blocks, &page(2));

        for panel in layout.panels() {
            assert!(panel.bounds().is_well_formed(), "{:?}", panel);
        }
    }
}
