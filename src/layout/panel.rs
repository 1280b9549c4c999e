//! Panels and panel layouts.
//!
//! A [`PanelLayout`] is the structural decomposition of one page into
//! rectangular [`Panel`]s. Both kinds are closed sets and the layout
//! constructors fix the panel shape for each layout kind, so a layout can
//! never hold the wrong number or order of panels.

use crate::geometry::{Rect, Span};
use crate::layout::text_block::TextBlock;
use serde::Serialize;

/// Structural role of a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PanelKind {
    /// The whole page (single-column layouts)
    FullPage,
    /// Left column of a two-column body
    LeftColumn,
    /// Right column of a two-column body
    RightColumn,
    /// Full-width region above a two-column body
    TopHeader,
}

/// Layout classification of a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PanelLayoutKind {
    /// No column split
    SingleColumn,
    /// Whole page splits into two columns
    TwoColumn,
    /// Full-width content on top, two columns below some break row
    TopFullWidthTwoColumn,
}

impl PanelLayoutKind {
    /// Panel kinds, in order, that a layout of this kind contains.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_panels::layout::{PanelKind, PanelLayoutKind};
    ///
    /// assert_eq!(PanelLayoutKind::SingleColumn.panel_kinds(), &[PanelKind::FullPage]);
    /// assert_eq!(PanelLayoutKind::TopFullWidthTwoColumn.panel_kinds().len(), 3);
    /// ```
    pub fn panel_kinds(&self) -> &'static [PanelKind] {
        match self {
            PanelLayoutKind::SingleColumn => &[PanelKind::FullPage],
            PanelLayoutKind::TwoColumn => &[PanelKind::LeftColumn, PanelKind::RightColumn],
            PanelLayoutKind::TopFullWidthTwoColumn => {
                &[PanelKind::TopHeader, PanelKind::LeftColumn, PanelKind::RightColumn]
            },
        }
    }
}

/// A rectangular page region with a structural role.
///
/// Bounds are page coordinates in the top-down frame, never display pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Panel {
    /// Role of the panel
    pub kind: PanelKind,
    bounds: Rect,
}

impl Panel {
    /// Create a panel from corner coordinates.
    ///
    /// Inverted extents are clamped to zero so that `x0 <= x1` and
    /// `y0 <= y1` always hold.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_panels::layout::{Panel, PanelKind};
    ///
    /// let panel = Panel::new(PanelKind::LeftColumn, 10.0, 300.0, 290.0, 250.0);
    /// assert_eq!(panel.bounds().top(), 300.0);
    /// assert_eq!(panel.height(), 0.0);
    /// ```
    pub fn new(kind: PanelKind, x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        if x1 < x0 || y1 < y0 {
            log::debug!(
                "Clamping inverted {:?} panel bounds ({:.1}, {:.1}, {:.1}, {:.1})",
                kind,
                x0,
                y0,
                x1,
                y1
            );
        }
        Self {
            kind,
            bounds: Rect::from_points(x0, y0, x1.max(x0), y1.max(y0)),
        }
    }

    /// Create a panel from a horizontal and a vertical span.
    pub fn from_spans(kind: PanelKind, x: Span, y: Span) -> Self {
        Self::new(kind, x.start, y.start, x.end, y.end)
    }

    /// Panel bounds.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Panel width.
    pub fn width(&self) -> f32 {
        self.bounds.width
    }

    /// Panel height.
    pub fn height(&self) -> f32 {
        self.bounds.height
    }

    /// True iff the panel encloses the block's bounds on all four sides.
    pub fn contains(&self, block: &TextBlock) -> bool {
        self.bounds.contains(&block.bounds())
    }
}

/// Decomposition of one page into panels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelLayout {
    /// Layout classification
    pub kind: PanelLayoutKind,
    panels: Vec<Panel>,
}

impl PanelLayout {
    /// Single-column layout made of one full-page panel.
    pub fn single_column(full_page: Rect) -> Self {
        Self {
            kind: PanelLayoutKind::SingleColumn,
            panels: vec![Panel::from_spans(
                PanelKind::FullPage,
                full_page.x_span(),
                full_page.y_span(),
            )],
        }
    }

    /// Two-column layout.
    pub fn two_column(left: Panel, right: Panel) -> Self {
        Self {
            kind: PanelLayoutKind::TwoColumn,
            panels: vec![
                Panel { kind: PanelKind::LeftColumn, ..left },
                Panel { kind: PanelKind::RightColumn, ..right },
            ],
        }
    }

    /// Full-width header above a two-column body.
    pub fn top_full_width_two_column(header: Panel, left: Panel, right: Panel) -> Self {
        Self {
            kind: PanelLayoutKind::TopFullWidthTwoColumn,
            panels: vec![
                Panel { kind: PanelKind::TopHeader, ..header },
                Panel { kind: PanelKind::LeftColumn, ..left },
                Panel { kind: PanelKind::RightColumn, ..right },
            ],
        }
    }

    /// Panels in reading order.
    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    /// First panel of the given kind.
    pub fn panel(&self, kind: PanelKind) -> Option<&Panel> {
        self.panels.iter().find(|p| p.kind == kind)
    }

    /// Index of the first panel that contains `block`.
    pub fn panel_index_containing(&self, block: &TextBlock) -> Option<usize> {
        self.panels.iter().position(|p| p.contains(block))
    }
}
