//! Screen geometry and colour value types.
//!
//! Coordinates are physical pixels on the primary display, origin at the
//! top-left corner. Containment follows the half-open convention: a rectangle
//! at `(0, 0)` with width 1920 contains `x = 1919` but not `x = 1920`.

use std::fmt;
use std::ops::{Add, Sub};

/// A pointer position or offset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the point with both coordinates made non-negative.
    ///
    /// Uses saturating absolute value, so `i32::MIN` becomes `i32::MAX`.
    pub const fn abs(self) -> Self {
        Self {
            x: self.x.saturating_abs(),
            y: self.y.saturating_abs(),
        }
    }

    /// `true` when both coordinates are `>= 0`.
    pub const fn is_non_negative(self) -> bool {
        self.x >= 0 && self.y >= 0
    }

    pub const fn saturating_add(self, other: Point) -> Self {
        Self {
            x: self.x.saturating_add(other.x),
            y: self.y.saturating_add(other.y),
        }
    }
}

impl Add for Point {
    type Output = Point;

    /// Saturates at the `i32` bounds.
    fn add(self, rhs: Point) -> Point {
        self.saturating_add(rhs)
    }
}

impl Sub for Point {
    type Output = Point;

    /// Saturates at the `i32` bounds.
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x.saturating_sub(rhs.x), self.y.saturating_sub(rhs.y))
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A rectangle anchored at the origin.
    pub const fn from_size(size: Size) -> Self {
        Self::new(0, 0, size.width, size.height)
    }

    pub const fn location(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Exclusive right edge, widened to avoid overflow.
    fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    /// Exclusive bottom edge, widened to avoid overflow.
    fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64
    }

    /// `true` if `(x, y)` lies inside the rectangle.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.x <= x && (x as i64) < self.right() && self.y <= y && (y as i64) < self.bottom()
    }

    pub fn contains_point(&self, point: Point) -> bool {
        self.contains(point.x, point.y)
    }

    /// `true` if `other` lies entirely inside this rectangle.
    ///
    /// An empty `other` is contained when its origin is within the bounds.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        self.x <= other.x
            && other.right() <= self.right()
            && self.y <= other.y
            && other.bottom() <= self.bottom()
    }

    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{x={}, y={}, width={}, height={}}}",
            self.x, self.y, self.width, self.height
        )
    }
}

/// An opaque RGB colour read back from the screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Decodes a GDI `COLORREF` (`0x00BBGGRR`).
    pub const fn from_colorref(value: u32) -> Self {
        Self {
            r: (value & 0xFF) as u8,
            g: ((value >> 8) & 0xFF) as u8,
            b: ((value >> 16) & 0xFF) as u8,
        }
    }

    /// Formats as `#RRGGBB`.
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_abs_makes_both_coordinates_non_negative() {
        assert_eq!(Point::new(-5, 7).abs(), Point::new(5, 7));
        assert_eq!(Point::new(3, -9).abs(), Point::new(3, 9));
        assert!(Point::new(i32::MIN, -1).abs().is_non_negative());
    }

    #[test]
    fn test_point_abs_saturates_at_min() {
        assert_eq!(Point::new(i32::MIN, 0).abs().x, i32::MAX);
    }

    #[test]
    fn test_point_operators_saturate_instead_of_overflowing() {
        // Arrange
        let near_max = Point::new(i32::MAX - 1, 10);
        let near_min = Point::new(i32::MIN + 1, -10);

        // Act
        let sum = near_max + Point::new(5, 5);
        let difference = near_min - Point::new(5, 5);

        // Assert
        assert_eq!(sum, Point::new(i32::MAX, 15));
        assert_eq!(difference, Point::new(i32::MIN, -15));
        assert_eq!(Point::new(3, 4) - Point::new(1, 1), Point::new(2, 3));
    }

    #[test]
    fn test_rect_contains_is_half_open() {
        let bounds = Rect::new(0, 0, 1920, 1080);
        assert!(bounds.contains(0, 0));
        assert!(bounds.contains(1919, 1079));
        assert!(!bounds.contains(1920, 0));
        assert!(!bounds.contains(0, 1080));
        assert!(!bounds.contains(-1, 10));
    }

    #[test]
    fn test_rect_contains_rect_accepts_full_bounds() {
        let bounds = Rect::new(0, 0, 1920, 1080);
        assert!(bounds.contains_rect(&bounds));
        assert!(bounds.contains_rect(&Rect::new(100, 100, 50, 50)));
    }

    #[test]
    fn test_rect_contains_rect_rejects_overhang() {
        let bounds = Rect::new(0, 0, 1920, 1080);
        assert!(!bounds.contains_rect(&Rect::new(1900, 0, 21, 10)));
        assert!(!bounds.contains_rect(&Rect::new(-1, 0, 10, 10)));
        assert!(!bounds.contains_rect(&Rect::new(0, 1000, 10, 81)));
    }

    #[test]
    fn test_rect_edges_do_not_overflow() {
        let bounds = Rect::new(0, 0, i32::MAX, i32::MAX);
        assert!(bounds.contains(i32::MAX - 1, 0));
        assert!(!bounds.contains_rect(&Rect::new(i32::MAX, 0, i32::MAX, 1)));
    }

    #[test]
    fn test_color_from_colorref_unpacks_bgr() {
        let color = Color::from_colorref(0x00_33_22_11);
        assert_eq!(color, Color::new(0x11, 0x22, 0x33));
        assert_eq!(color.to_hex(), "#112233");
    }
}
