//! Geometric primitives for layout analysis.
//!
//! All coordinates are page-native units in a top-down frame: `y` grows
//! towards the bottom of the page, the same frame the panel bounds are
//! reported in.

use serde::{Deserialize, Serialize};

/// A closed interval `[start, end]` along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// Lower end of the interval
    pub start: f32,
    /// Upper end of the interval
    pub end: f32,
}

impl Span {
    /// Create a new span.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_panels::geometry::Span;
    ///
    /// let span = Span::new(10.0, 90.0);
    /// assert_eq!(span.union(&Span::new(0.0, 40.0)), Span::new(0.0, 90.0));
    /// ```
    pub fn new(start: f32, end: f32) -> Self {
        Self { start, end }
    }

    /// Check whether `value` lies within the span, ends included.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_panels::geometry::Span;
    ///
    /// let span = Span::new(10.0, 90.0);
    /// assert!(span.contains(50.0));
    /// assert!(span.contains(90.0));
    /// assert!(!span.contains(90.5));
    /// ```
    pub fn contains(&self, value: f32) -> bool {
        self.start <= value && value <= self.end
    }

    /// Smallest span covering both spans.
    pub fn union(&self, other: &Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }

    /// Tight span covering every span in `spans`, or `None` if empty.
    pub fn enclosing<I>(spans: I) -> Option<Span>
    where
        I: IntoIterator<Item = Span>,
    {
        spans.into_iter().reduce(|acc, s| acc.union(&s))
    }
}

/// A rectangle in page space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// X coordinate of top-left corner
    pub x: f32,
    /// Y coordinate of top-left corner
    pub y: f32,
    /// Width of rectangle
    pub width: f32,
    /// Height of rectangle
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle from position and dimensions.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_panels::geometry::Rect;
    ///
    /// let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
    /// assert_eq!(rect.width, 100.0);
    /// assert_eq!(rect.height, 50.0);
    /// ```
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from two corner points `(x0, y0)` and `(x1, y1)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_panels::geometry::Rect;
    ///
    /// let rect = Rect::from_points(10.0, 20.0, 110.0, 70.0);
    /// assert_eq!(rect.x, 10.0);
    /// assert_eq!(rect.y, 20.0);
    /// assert_eq!(rect.width, 100.0);
    /// assert_eq!(rect.height, 50.0);
    /// ```
    pub fn from_points(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            x: x0,
            y: y0,
            width: x1 - x0,
            height: y1 - y0,
        }
    }

    /// Create a rectangle from a horizontal and a vertical span.
    pub fn from_spans(x: Span, y: Span) -> Self {
        Self::from_points(x.start, y.start, x.end, y.end)
    }

    /// Get the left edge x-coordinate.
    pub fn left(&self) -> f32 {
        self.x
    }

    /// Get the right edge x-coordinate.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Get the top edge y-coordinate.
    pub fn top(&self) -> f32 {
        self.y
    }

    /// Get the bottom edge y-coordinate.
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Horizontal extent as a span.
    pub fn x_span(&self) -> Span {
        Span::new(self.left(), self.right())
    }

    /// Vertical extent as a span.
    pub fn y_span(&self) -> Span {
        Span::new(self.top(), self.bottom())
    }

    /// Check if this rectangle encloses `other` on all four sides.
    ///
    /// Shared edges count as enclosed.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_panels::geometry::Rect;
    ///
    /// let outer = Rect::from_points(0.0, 0.0, 100.0, 200.0);
    /// assert!(outer.contains(&Rect::from_points(10.0, 10.0, 90.0, 50.0)));
    /// assert!(!outer.contains(&Rect::from_points(10.0, 10.0, 110.0, 50.0)));
    /// ```
    pub fn contains(&self, other: &Rect) -> bool {
        self.left() <= other.left()
            && self.top() <= other.top()
            && self.right() >= other.right()
            && self.bottom() >= other.bottom()
    }

    /// Whether the rectangle has non-negative width and height.
    pub fn is_well_formed(&self) -> bool {
        self.width >= 0.0 && self.height >= 0.0
    }
}

/// Page geometry supplied by the document engine.
///
/// `view` is the page's content view rectangle. Text run baselines are
/// reported bottom-up (PDF user space); [`PageGeometry::y_offset`] converts a
/// baseline into the top-down frame used for blocks and panels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    /// Content view rectangle of the page
    pub view: Rect,
    /// One-based page number
    pub page_number: u32,
}

impl PageGeometry {
    /// Create page geometry from view corners and a one-based page number.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_panels::geometry::PageGeometry;
    ///
    /// let page = PageGeometry::new(0.0, 0.0, 612.0, 792.0, 1);
    /// assert_eq!(page.mid_x(), 306.0);
    /// assert_eq!(page.y_offset(692.0), 100.0);
    /// ```
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32, page_number: u32) -> Self {
        Self {
            view: Rect::from_points(x0, y0, x1, y1),
            page_number,
        }
    }

    /// Vertical midline used to decide whether a block straddles columns.
    pub fn mid_x(&self) -> f32 {
        self.view.width / 2.0
    }

    /// Height of the page at unit scale.
    pub fn height(&self) -> f32 {
        self.view.height
    }

    /// Convert a bottom-up baseline into a top-down vertical offset.
    pub fn y_offset(&self, baseline_y: f32) -> f32 {
        self.view.height - baseline_y
    }

    /// Whether this is the first page of the document.
    pub fn is_first_page(&self) -> bool {
        self.page_number == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_contains_is_inclusive() {
        let span = Span::new(10.0, 90.0);
        assert!(span.contains(10.0));
        assert!(span.contains(90.0));
        assert!(!span.contains(9.99));
    }

    #[test]
    fn test_span_enclosing() {
        let spans = vec![Span::new(40.0, 60.0), Span::new(10.0, 20.0), Span::new(55.0, 95.0)];
        assert_eq!(Span::enclosing(spans), Some(Span::new(10.0, 95.0)));
        assert_eq!(Span::enclosing(Vec::new()), None);
    }

    #[test]
    fn test_rect_from_points() {
        let r = Rect::from_points(10.0, 20.0, 110.0, 70.0);
        assert_eq!(r.x, 10.0);
        assert_eq!(r.y, 20.0);
        assert_eq!(r.width, 100.0);
        assert_eq!(r.height, 50.0);
    }

    #[test]
    fn test_rect_edges() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(r.left(), 10.0);
        assert_eq!(r.right(), 110.0);
        assert_eq!(r.top(), 20.0);
        assert_eq!(r.bottom(), 70.0);
        assert_eq!(r.x_span(), Span::new(10.0, 110.0));
        assert_eq!(r.y_span(), Span::new(20.0, 70.0));
    }

    #[test]
    fn test_rect_contains() {
        let outer = Rect::from_points(0.0, 0.0, 100.0, 200.0);
        assert!(outer.contains(&Rect::from_points(10.0, 10.0, 90.0, 50.0)));
        assert!(outer.contains(&outer));
        assert!(!outer.contains(&Rect::from_points(10.0, 10.0, 110.0, 50.0)));
        assert!(!outer.contains(&Rect::from_points(-1.0, 10.0, 90.0, 50.0)));
        assert!(!outer.contains(&Rect::from_points(10.0, 10.0, 90.0, 201.0)));
    }

    #[test]
    fn test_page_geometry_offsets() {
        let page = PageGeometry::new(0.0, 0.0, 600.0, 800.0, 2);
        assert_eq!(page.mid_x(), 300.0);
        assert_eq!(page.height(), 800.0);
        assert_eq!(page.y_offset(800.0), 0.0);
        assert_eq!(page.y_offset(100.0), 700.0);
        assert!(!page.is_first_page());
    }

    #[test]
    fn test_rect_well_formed() {
        assert!(Rect::from_points(0.0, 0.0, 0.0, 0.0).is_well_formed());
        assert!(!Rect::from_points(10.0, 0.0, 5.0, 10.0).is_well_formed());
    }
}
