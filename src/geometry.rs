//! # Geometry
//!
//! Coordinate helpers shared by every rendering context.
//!
//! Placements are stored as percentages of the surface they sit on. A surface
//! is whatever rectangle is currently showing the template: the half-scale
//! editor canvas, the preview canvas, or the physical page. Converting through
//! percentages is what keeps a calibration made on screen valid on paper.
//!
//! ## Anchor Formula
//!
//! A field's `(x%, y%)` is its *anchor point*. The text box is shifted left by
//! a fraction of its own width depending on alignment:
//!
//! | Align  | Shift | CSS                  |
//! |--------|-------|----------------------|
//! | left   | 0     | `none`               |
//! | center | 0.5   | `translateX(-50%)`   |
//! | right  | 1     | `translateX(-100%)`  |
//!
//! [`anchor_left`] and [`Align::css_transform`] are the only two places this
//! table is encoded.

use serde::{Deserialize, Serialize};

/// A point in pixels (or millimeters, for print surfaces).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// Width and height of a surface.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True if either side is zero, negative, or not a number.
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// An axis-aligned rectangle, e.g. the rendered bounding box of the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// A rectangle at the origin with the given size.
    pub const fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Whether `p` lies inside the rectangle (edges inclusive).
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x <= self.right() && p.y >= self.top && p.y <= self.bottom()
    }

    /// Convert an absolute point to percentages of this rectangle.
    ///
    /// The result is NOT clamped: points outside the rectangle give values
    /// below 0 or above 100. Returns `None` for a degenerate rectangle.
    pub fn to_percent(&self, p: Point) -> Option<Point> {
        if self.size().is_degenerate() {
            return None;
        }
        Some(Point::new(
            (p.x - self.left) / self.width * 100.0,
            (p.y - self.top) / self.height * 100.0,
        ))
    }

    /// Convert percentages of this rectangle to an absolute point.
    pub fn from_percent(&self, pct: Point) -> Point {
        Point::new(
            self.left + pct.x / 100.0 * self.width,
            self.top + pct.y / 100.0 * self.height,
        )
    }
}

/// Clamp a percentage into `[0, 100]`. NaN clamps to 0.
pub fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

/// Clamp both axes of a percentage point.
pub fn clamp_point(p: Point) -> Point {
    Point::new(clamp_percent(p.x), clamp_percent(p.y))
}

// ============================================================================
// ALIGNMENT
// ============================================================================

/// Horizontal alignment of a field's text relative to its anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

impl Align {
    /// Fraction of the text's own width to shift left.
    pub fn shift_fraction(self) -> f64 {
        match self {
            Align::Left => 0.0,
            Align::Center => 0.5,
            Align::Right => 1.0,
        }
    }

    /// CSS transform that applies [`shift_fraction`](Self::shift_fraction)
    /// in a browser, which measures the text itself.
    pub fn css_transform(self) -> &'static str {
        match self {
            Align::Left => "none",
            Align::Center => "translateX(-50%)",
            Align::Right => "translateX(-100%)",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Center => "center",
            Align::Right => "right",
        }
    }
}

/// Left edge of a text box whose anchor sits at `anchor_x`.
pub fn anchor_left(anchor_x: f64, text_width: f64, align: Align) -> f64 {
    anchor_x - align.shift_fraction() * text_width
}

// ============================================================================
// TEXT MEASUREMENT
// ============================================================================

/// Measures the rendered width of a string.
///
/// Layout needs text widths to place center/right aligned boxes. Browsers
/// measure text themselves, so this is only used where overprint computes
/// boxes on its own (editor hit testing, print surface bounds).
pub trait TextMeasure {
    /// Width of `text` at `font_size`, in the same unit as `font_size`.
    fn text_width(&self, text: &str, font_size: f64) -> f64;

    /// Line height at `font_size`.
    fn line_height(&self, font_size: f64) -> f64 {
        font_size * 1.2
    }
}

/// Fixed-advance metrics, matching the default Courier New family.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMetrics {
    /// Advance width as a fraction of the font size.
    pub advance: f64,
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self { advance: 0.6 }
    }
}

impl TextMeasure for MonospaceMetrics {
    fn text_width(&self, text: &str, font_size: f64) -> f64 {
        text.chars().count() as f64 * self.advance * font_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_percent_inside() {
        let rect = Rect::new(100.0, 50.0, 600.0, 750.0);
        let pct = rect.to_percent(Point::new(400.0, 425.0)).unwrap();
        assert!((pct.x - 50.0).abs() < 1e-9);
        assert!((pct.y - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_to_percent_outside_is_unclamped() {
        let rect = Rect::new(0.0, 0.0, 200.0, 100.0);
        let pct = rect.to_percent(Point::new(-100.0, 300.0)).unwrap();
        assert!(pct.x < 0.0);
        assert!(pct.y > 100.0);
        let clamped = clamp_point(pct);
        assert_eq!(clamped, Point::new(0.0, 100.0));
    }

    #[test]
    fn test_degenerate_rect_has_no_percent() {
        let rect = Rect::new(0.0, 0.0, 0.0, 100.0);
        assert!(rect.to_percent(Point::new(1.0, 1.0)).is_none());
    }

    #[test]
    fn test_percent_round_trip() {
        let rect = Rect::new(12.0, 34.0, 300.0, 420.0);
        let p = rect.from_percent(Point::new(25.0, 80.0));
        let back = rect.to_percent(p).unwrap();
        assert!((back.x - 25.0).abs() < 1e-9);
        assert!((back.y - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_clamp_nan() {
        assert_eq!(clamp_percent(f64::NAN), 0.0);
        assert_eq!(clamp_percent(f64::INFINITY), 100.0);
        assert_eq!(clamp_percent(-3.0), 0.0);
        assert_eq!(clamp_percent(42.5), 42.5);
    }

    #[test]
    fn test_anchor_left() {
        assert_eq!(anchor_left(100.0, 40.0, Align::Left), 100.0);
        assert_eq!(anchor_left(100.0, 40.0, Align::Center), 80.0);
        assert_eq!(anchor_left(100.0, 40.0, Align::Right), 60.0);
    }

    #[test]
    fn test_css_transform_matches_shift() {
        for align in [Align::Left, Align::Center, Align::Right] {
            let pct = align.shift_fraction() * 100.0;
            let expected = if pct == 0.0 {
                "none".to_string()
            } else {
                format!("translateX(-{}%)", pct)
            };
            assert_eq!(align.css_transform(), expected);
        }
    }

    #[test]
    fn test_monospace_width() {
        let m = MonospaceMetrics::default();
        assert!((m.text_width("1,234.50", 10.0) - 48.0).abs() < 1e-9);
        assert_eq!(m.text_width("", 12.0), 0.0);
    }
}
