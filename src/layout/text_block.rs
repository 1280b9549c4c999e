//! Text run and text block representation for layout analysis.
//!
//! A [`TextRun`] is what the document engine hands us: a positioned piece of
//! text on a baseline. A [`TextBlock`] is a maximal group of adjacent runs on
//! the same baseline, i.e. one visual line segment.

use crate::geometry::{Rect, Span};
use serde::{Deserialize, Serialize};

/// A positioned piece of text as emitted by the document engine.
///
/// Coordinates are page-native units. `baseline_y` is bottom-up (PDF user
/// space), the same way the engine reports text positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    /// The text content of the run
    pub text: String,
    /// Horizontal start offset
    pub start_x: f32,
    /// Advance width of the whole run
    pub width: f32,
    /// Height of the run (roughly the font size)
    pub height: f32,
    /// Baseline y-coordinate
    pub baseline_y: f32,
}

impl TextRun {
    /// Create a new text run.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_panels::layout::TextRun;
    ///
    /// let run = TextRun::new("Introduction", 72.0, 60.0, 12.0, 700.0);
    /// assert_eq!(run.end_x(), 132.0);
    /// ```
    pub fn new(
        text: impl Into<String>,
        start_x: f32,
        width: f32,
        height: f32,
        baseline_y: f32,
    ) -> Self {
        Self {
            text: text.into(),
            start_x,
            width,
            height,
            baseline_y,
        }
    }

    /// Right edge of the run.
    pub fn end_x(&self) -> f32 {
        self.start_x + self.width
    }
}

/// One or more text runs sharing a baseline, treated as one visual line.
///
/// Every derived attribute (text, spans, heights) is computed from `runs` on
/// demand. The vertical offset is fixed when the block is built because it
/// depends on the page the runs came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextBlock {
    /// Runs in engine order, all on the same baseline
    pub runs: Vec<TextRun>,
    /// Top-down vertical offset of the shared baseline
    pub y_offset: f32,
}

impl TextBlock {
    /// Create a text block from runs sharing one baseline.
    ///
    /// `y_offset` is the baseline converted to the page's top-down frame
    /// (see [`crate::geometry::PageGeometry::y_offset`]).
    ///
    /// # Panics
    ///
    /// Panics if the `runs` vector is empty.
    pub fn from_runs(runs: Vec<TextRun>, y_offset: f32) -> Self {
        assert!(!runs.is_empty(), "Cannot create TextBlock from empty runs");
        Self { runs, y_offset }
    }

    /// Bottom-up baseline shared by every run in the block.
    pub fn baseline_y(&self) -> f32 {
        self.runs[0].baseline_y
    }

    /// Concatenated text of the block.
    ///
    /// A single space is inserted between two runs when the next run starts
    /// to the right of the previous run's right edge.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_panels::layout::{TextBlock, TextRun};
    ///
    /// let block = TextBlock::from_runs(
    ///     vec![
    ///         TextRun::new("2", 10.0, 6.0, 12.0, 700.0),
    ///         TextRun::new("Method", 20.0, 40.0, 12.0, 700.0),
    ///         TextRun::new("s", 60.0, 5.0, 12.0, 700.0),
    ///     ],
    ///     92.0,
    /// );
    /// assert_eq!(block.text(), "2 Methods");
    /// ```
    pub fn text(&self) -> String {
        let mut text = String::new();
        for (idx, run) in self.runs.iter().enumerate() {
            text.push_str(&run.text);
            if let Some(next) = self.runs.get(idx + 1) {
                if next.start_x > run.end_x() {
                    text.push(' ');
                }
            }
        }
        text
    }

    /// Horizontal span `[min start_x, max end_x]` across all runs.
    pub fn x_span(&self) -> Span {
        let first = Span::new(self.runs[0].start_x, self.runs[0].end_x());
        self.runs
            .iter()
            .skip(1)
            .fold(first, |acc, run| acc.union(&Span::new(run.start_x, run.end_x())))
    }

    /// Vertical span from the tallest run's top down to the baseline.
    pub fn y_span(&self) -> Span {
        Span::new(self.y_offset - self.max_height(), self.y_offset)
    }

    /// Bounding rectangle in the top-down page frame.
    pub fn bounds(&self) -> Rect {
        Rect::from_spans(self.x_span(), self.y_span())
    }

    /// Height of the tallest run.
    pub fn max_height(&self) -> f32 {
        self.runs
            .iter()
            .map(|r| r.height)
            .fold(f32::NEG_INFINITY, f32::max)
    }

    /// Number of non-whitespace characters across all runs.
    pub fn non_whitespace_len(&self) -> usize {
        self.runs
            .iter()
            .flat_map(|r| r.text.chars())
            .filter(|c| !c.is_whitespace())
            .count()
    }

    /// Whether the block's horizontal span crosses the vertical line `mid_x`.
    pub fn straddles(&self, mid_x: f32) -> bool {
        self.x_span().contains(mid_x)
    }

    /// Sum of the run widths.
    ///
    /// Differs from the length of [`x_span`](Self::x_span) when runs leave
    /// gaps or overlap.
    pub fn width(&self) -> f32 {
        self.runs.iter().map(|r| r.width).sum()
    }
}

/// Case-insensitive check whether `text` starts with `prefix`.
pub fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    let mut chars = text.chars().flat_map(char::to_lowercase);
    prefix
        .chars()
        .flat_map(char::to_lowercase)
        .all(|p| chars.next() == Some(p))
}
