//! Column break detection.
//!
//! Decides whether a page is single-column, two-column, or a full-width
//! header followed by two columns, and where the header/column boundary
//! falls.
//!
//! Blocks are grouped into rows by vertical offset. A row is a
//! "mid-straddler" when one of its blocks crosses the page midline. Scanning
//! rows top to bottom, the break score of a row is the straddler ratio of the
//! rows so far minus the straddler ratio of the rows after it: high scores
//! mean "full width above, columns below".

use crate::geometry::PageGeometry;
use crate::layout::panel::PanelLayoutKind;
use crate::layout::text_block::{TextBlock, starts_with_ignore_case};
use crate::pipeline::config::LayoutConfig;
use serde::Serialize;

/// Blocks sharing one vertical offset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    /// Top-down vertical offset shared by the row's blocks
    pub offset: f32,
    /// Indices into the page's block list, in block order
    pub blocks: Vec<usize>,
    /// Whether the row is long enough to count towards straddler statistics
    pub counted: bool,
    /// Whether at least one block crosses the midline
    pub straddles: bool,
}

/// The row chosen as header/column boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BreakRow {
    /// Index into [`BreakAnalysis::rows`]
    pub row_index: usize,
    /// Vertical offset of the row
    pub offset: f32,
    /// Break score of the row
    pub score: f32,
    /// Height of the tallest block in the row
    pub max_height: f32,
}

/// Result of column break detection for one page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakAnalysis {
    /// Vertical midline of the page
    pub mid_x: f32,
    /// Rows sorted top to bottom
    pub rows: Vec<Row>,
    /// Break score per row; `None` where a ratio was undefined and no
    /// override applied
    pub scores: Vec<Option<f32>>,
    /// Highest-scoring candidate row, if any row beat the no-straddler score
    pub best_break: Option<BreakRow>,
    /// Counted rows with a straddling block
    pub straddling_rows: usize,
    /// Rows long enough to count
    pub counted_rows: usize,
    /// `straddling_rows / counted_rows`; when no row is long enough to
    /// count, the share of straddling rows among all rows (0 without rows)
    pub straddler_ratio: f32,
    /// Page classification
    pub kind: PanelLayoutKind,
}

impl BreakAnalysis {
    /// The break row, only when the page has a full-width header region.
    pub fn header_break(&self) -> Option<&BreakRow> {
        match self.kind {
            PanelLayoutKind::TopFullWidthTwoColumn => self.best_break.as_ref(),
            _ => None,
        }
    }
}

/// Group blocks into rows of equal vertical offset, sorted top to bottom.
///
/// `counted` and `straddles` are filled in from `mid_x` and `min_row_chars`.
pub fn group_rows(blocks: &[TextBlock], mid_x: f32, min_row_chars: usize) -> Vec<Row> {
    let mut order: Vec<usize> = (0..blocks.len()).collect();
    // Stable, so blocks within a row keep their input order
    order.sort_by(|&a, &b| blocks[a].y_offset.total_cmp(&blocks[b].y_offset));

    let mut rows: Vec<Row> = Vec::new();
    for idx in order {
        let offset = blocks[idx].y_offset;
        match rows.last_mut() {
            Some(row) if row.offset == offset => row.blocks.push(idx),
            _ => rows.push(Row {
                offset,
                blocks: vec![idx],
                counted: false,
                straddles: false,
            }),
        }
    }

    for row in &mut rows {
        let chars: usize = row.blocks.iter().map(|&i| blocks[i].non_whitespace_len()).sum();
        row.counted = chars >= min_row_chars;
        row.straddles = row.blocks.iter().any(|&i| blocks[i].straddles(mid_x));
    }

    rows
}

/// Detect the column structure of a page.
///
/// Never fails: a page without blocks is classified single-column, and a
/// page where nothing straddles the midline yields no break row.
///
/// # Examples
///
/// ```
/// use pdf_panels::geometry::PageGeometry;
/// use pdf_panels::layout::{detect_column_break, merge_runs, PanelLayoutKind, TextRun};
/// use pdf_panels::pipeline::LayoutConfig;
///
/// let page = PageGeometry::new(0.0, 0.0, 600.0, 800.0, 1);
/// let runs: Vec<TextRun> = (0..10)
///     .map(|i| {
///         let baseline = 700.0 - 20.0 * i as f32;
///         TextRun::new("a line spanning the page", 50.0, 500.0, 10.0, baseline)
///     })
///     .collect();
/// let blocks = merge_runs(&runs, &page);
///
/// let analysis = detect_column_break(&blocks, &page, &LayoutConfig::default());
/// assert_eq!(analysis.straddler_ratio, 1.0);
/// assert_eq!(analysis.kind, PanelLayoutKind::SingleColumn);
/// ```
pub fn detect_column_break(
    blocks: &[TextBlock],
    page: &PageGeometry,
    config: &LayoutConfig,
) -> BreakAnalysis {
    let mid_x = page.mid_x();
    let rows = group_rows(blocks, mid_x, config.min_row_chars);

    // Cumulative counts up to and including each row
    let mut straddlers_so_far = Vec::with_capacity(rows.len());
    let mut counted_so_far = Vec::with_capacity(rows.len());
    let (mut straddlers, mut counted) = (0usize, 0usize);
    for row in &rows {
        if row.counted {
            counted += 1;
            if row.straddles {
                straddlers += 1;
            }
        }
        straddlers_so_far.push(straddlers);
        counted_so_far.push(counted);
    }
    let (total_straddlers, total_counted) = (straddlers, counted);

    let page_height = page.height();
    let mut scores = Vec::with_capacity(rows.len());
    let mut best_break: Option<BreakRow> = None;
    let mut best_score = config.no_straddler_score;

    for (idx, row) in rows.iter().enumerate() {
        let above = ratio(straddlers_so_far[idx], counted_so_far[idx]);
        let below = ratio(
            total_straddlers - straddlers_so_far[idx],
            total_counted - counted_so_far[idx],
        );
        let mut score = above.zip(below).map(|(a, b)| a - b);

        // Too close to the top of the page to be a header boundary
        if page_height > 0.0 && row.offset / page_height < config.top_exclusion_fraction {
            scores.push(Some(0.0));
            continue;
        }

        if has_straddling_caption(row, blocks, mid_x, &config.caption_prefixes) {
            score = Some(config.caption_break_score);
        }
        if !row.straddles {
            score = Some(config.no_straddler_score);
        }

        if let Some(s) = score {
            if s > best_score {
                best_score = s;
                best_break = Some(BreakRow {
                    row_index: idx,
                    offset: row.offset,
                    score: s,
                    max_height: row_max_height(row, blocks),
                });
            }
        }
        log::trace!("row {} offset={:.1} score={:?}", idx, row.offset, score);
        scores.push(score);
    }

    // Pages of short lines only (page numbers, labels) fall back to every row
    let straddler_ratio = ratio(total_straddlers, total_counted)
        .or_else(|| ratio(rows.iter().filter(|r| r.straddles).count(), rows.len()))
        .unwrap_or(0.0);

    let kind = if blocks.is_empty() || straddler_ratio > config.single_column_ratio {
        PanelLayoutKind::SingleColumn
    } else {
        match best_break {
            Some(b) if b.score > config.min_header_break_score => {
                PanelLayoutKind::TopFullWidthTwoColumn
            },
            _ => PanelLayoutKind::TwoColumn,
        }
    };

    log::debug!(
        "Page {}: {} rows, straddler ratio {:.2} ({}/{}), best break {:?} -> {:?}",
        page.page_number,
        rows.len(),
        straddler_ratio,
        total_straddlers,
        total_counted,
        best_break.map(|b| (b.row_index, b.score)),
        kind
    );

    BreakAnalysis {
        mid_x,
        rows,
        scores,
        best_break,
        straddling_rows: total_straddlers,
        counted_rows: total_counted,
        straddler_ratio,
        kind,
    }
}

fn ratio(part: usize, whole: usize) -> Option<f32> {
    if whole == 0 {
        None
    } else {
        Some(part as f32 / whole as f32)
    }
}

fn has_straddling_caption(
    row: &Row,
    blocks: &[TextBlock],
    mid_x: f32,
    prefixes: &[String],
) -> bool {
    row.blocks
        .iter()
        .map(|&i| &blocks[i])
        .filter(|block| block.straddles(mid_x))
        .any(|block| {
            let text = block.text();
            prefixes.iter().any(|p| starts_with_ignore_case(&text, p))
        })
}

fn row_max_height(row: &Row, blocks: &[TextBlock]) -> f32 {
    row.blocks
        .iter()
        .map(|&i| blocks[i].max_height())
        .fold(f32::NEG_INFINITY, f32::max)
}
