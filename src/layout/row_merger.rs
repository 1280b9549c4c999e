//! Row merging: text runs → text blocks.
//!
//! Runs are grouped in a single linear pass over the engine's native order.
//! A block is a maximal stretch of consecutive runs whose baselines compare
//! exactly equal; nothing is sorted and non-contiguous runs on the same
//! baseline stay in separate blocks.

use crate::geometry::PageGeometry;
use crate::layout::text_block::{TextBlock, TextRun};

/// Merge a page's text runs into text blocks.
///
/// Baselines are compared with exact equality. Empty input yields no blocks.
///
/// # Examples
///
/// ```
/// use pdf_panels::geometry::PageGeometry;
/// use pdf_panels::layout::{merge_runs, TextRun};
///
/// let page = PageGeometry::new(0.0, 0.0, 100.0, 800.0, 1);
/// let runs = vec![
///     TextRun::new("one", 10.0, 20.0, 10.0, 700.0),
///     TextRun::new("two", 40.0, 20.0, 10.0, 700.0),
///     TextRun::new("three", 10.0, 30.0, 10.0, 680.0),
/// ];
///
/// let blocks = merge_runs(&runs, &page);
/// assert_eq!(blocks.len(), 2);
/// assert_eq!(blocks[0].text(), "one two");
/// assert_eq!(blocks[1].y_offset, 120.0);
/// ```
pub fn merge_runs(runs: &[TextRun], page: &PageGeometry) -> Vec<TextBlock> {
    let mut blocks = Vec::new();
    let Some((first, rest)) = runs.split_first() else {
        return blocks;
    };

    let mut in_progress = vec![first.clone()];
    for run in rest {
        if run.baseline_y == in_progress[0].baseline_y {
            in_progress.push(run.clone());
        } else {
            let finished = std::mem::replace(&mut in_progress, vec![run.clone()]);
            blocks.push(close_block(finished, page));
        }
    }
    blocks.push(close_block(in_progress, page));

    log::trace!("Merged {} runs into {} blocks", runs.len(), blocks.len());
    blocks
}

fn close_block(runs: Vec<TextRun>, page: &PageGeometry) -> TextBlock {
    let y_offset = page.y_offset(runs[0].baseline_y);
    TextBlock::from_runs(runs, y_offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> PageGeometry {
        PageGeometry::new(0.0, 0.0, 600.0, 800.0, 1)
    }

    fn run(text: &str, x: f32, baseline: f32) -> TextRun {
        TextRun::new(text, x, 30.0, 10.0, baseline)
    }

    #[test]
    fn test_empty_input() {
        assert!(merge_runs(&[], &page()).is_empty());
    }

    #[test]
    fn test_single_run() {
        let blocks = merge_runs(&[run("solo", 0.0, 500.0)], &page());
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].runs.len(), 1);
        assert_eq!(blocks[0].y_offset, 300.0);
    }

    #[test]
    fn test_consecutive_equal_baselines_merge() {
        let runs = vec![
            run("a", 0.0, 500.0),
            run("b", 40.0, 500.0),
            run("c", 80.0, 500.0),
            run("d", 0.0, 480.0),
        ];
        let blocks = merge_runs(&runs, &page());
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].runs.len(), 3);
        assert_eq!(blocks[1].runs.len(), 1);
    }

    #[test]
    fn test_non_contiguous_same_baseline_not_merged() {
        let runs = vec![run("a", 0.0, 500.0), run("b", 0.0, 480.0), run("c", 300.0, 500.0)];
        let blocks = merge_runs(&runs, &page());
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0].baseline_y(), blocks[2].baseline_y());
    }

    #[test]
    fn test_near_equal_baselines_stay_separate() {
        let runs = vec![run("a", 0.0, 500.0), run("b", 40.0, 500.01)];
        assert_eq!(merge_runs(&runs, &page()).len(), 2);
    }

    #[test]
    fn test_engine_order_preserved() {
        let runs = vec![run("low", 0.0, 100.0), run("high", 0.0, 700.0)];
        let blocks = merge_runs(&runs, &page());
        assert_eq!(blocks[0].text(), "low");
        assert_eq!(blocks[1].text(), "high");
    }
}
