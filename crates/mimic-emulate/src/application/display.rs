//! Primary display queries: bounds, pixel colour and bitmap capture.
//!
//! [`Display`] reads the screen size once when it is built. Every query is
//! checked against those bounds first, so an out-of-range request fails with
//! [`DisplayError::OutOfRange`] without reaching the [`ScreenReader`].

use std::fmt;
use std::sync::Arc;

use image::RgbaImage;
use mimic_core::{Color, Rect, Size};
use thiserror::Error;
use tracing::debug;

/// Error type for display queries.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DisplayError {
    #[error("region {requested} is outside the display bounds {bounds}")]
    OutOfRange { requested: Rect, bounds: Rect },
    #[error("platform error: {0}")]
    Platform(String),
}

/// Native screen access.
pub trait ScreenReader: Send + Sync {
    /// Size of the primary screen in pixels.
    fn screen_size(&self) -> Result<Size, DisplayError>;

    /// Colour of one pixel. Callers guarantee the point is on screen.
    fn pixel(&self, x: i32, y: i32) -> Result<Color, DisplayError>;

    /// Copies `region` of the screen. Callers guarantee the region is on
    /// screen and non-empty.
    fn capture(&self, region: Rect) -> Result<RgbaImage, DisplayError>;
}

/// The primary display as seen when this value was built.
pub struct Display {
    reader: Arc<dyn ScreenReader>,
    bounds: Rect,
}

impl Display {
    /// # Errors
    ///
    /// Propagates a failure to read the screen size.
    pub fn new(reader: Arc<dyn ScreenReader>) -> Result<Self, DisplayError> {
        let size = reader.screen_size()?;
        debug!(width = size.width, height = size.height, "display bounds captured");
        Ok(Self {
            reader,
            bounds: Rect::from_size(size),
        })
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn size(&self) -> Size {
        self.bounds.size()
    }

    pub fn width(&self) -> i32 {
        self.bounds.width
    }

    pub fn height(&self) -> i32 {
        self.bounds.height
    }

    /// Whether `(x, y)` lies on the display.
    pub fn has_coordinates(&self, x: i32, y: i32) -> bool {
        self.bounds.contains(x, y)
    }

    /// Whether `region` is non-empty and lies entirely on the display.
    pub fn has_region(&self, region: &Rect) -> bool {
        !region.is_empty() && self.bounds.contains_rect(region)
    }

    /// # Errors
    ///
    /// [`DisplayError::OutOfRange`] if `(x, y)` is off screen, otherwise any
    /// reader failure.
    pub fn get_color(&self, x: i32, y: i32) -> Result<Color, DisplayError> {
        if !self.has_coordinates(x, y) {
            return Err(self.out_of_range(Rect::new(x, y, 1, 1)));
        }
        self.reader.pixel(x, y)
    }

    /// Captures the whole display.
    pub fn get_bitmap(&self) -> Result<RgbaImage, DisplayError> {
        self.get_bitmap_region(self.bounds)
    }

    /// # Errors
    ///
    /// [`DisplayError::OutOfRange`] if `region` is empty or not fully on
    /// screen, otherwise any reader failure.
    pub fn get_bitmap_region(&self, region: Rect) -> Result<RgbaImage, DisplayError> {
        if !self.has_region(&region) {
            return Err(self.out_of_range(region));
        }
        self.reader.capture(region)
    }

    fn out_of_range(&self, requested: Rect) -> DisplayError {
        DisplayError::OutOfRange {
            requested,
            bounds: self.bounds,
        }
    }
}

impl fmt::Display for Display {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.width(), self.height())
    }
}

impl fmt::Debug for Display {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Display").field("bounds", &self.bounds).finish()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::display::mock::MockScreenReader;

    fn hd_display() -> (Arc<MockScreenReader>, Display) {
        let reader = Arc::new(MockScreenReader::new(Size::new(1920, 1080)));
        let display = Display::new(reader.clone()).expect("size query succeeds");
        (reader, display)
    }

    #[test]
    fn test_display_formats_as_width_height() {
        let (_, display) = hd_display();
        assert_eq!(display.to_string(), "(1920, 1080)");
        assert_eq!(display.size(), Size::new(1920, 1080));
    }

    #[test]
    fn test_has_coordinates_is_half_open() {
        let (_, display) = hd_display();
        assert!(display.has_coordinates(0, 0));
        assert!(display.has_coordinates(1919, 1079));
        assert!(!display.has_coordinates(1920, 0));
        assert!(!display.has_coordinates(0, -1));
    }

    #[test]
    fn test_out_of_bounds_pixel_fails_without_native_call() {
        // Arrange
        let (reader, display) = hd_display();

        // Act
        let result = display.get_color(1920, 5);

        // Assert
        assert!(matches!(result, Err(DisplayError::OutOfRange { .. })));
        assert_eq!(reader.pixel_calls(), 0);
    }

    #[test]
    fn test_in_bounds_pixel_reaches_reader() {
        let (reader, display) = hd_display();

        let color = display.get_color(10, 10).expect("pixel");

        assert_eq!(color, reader.fill());
        assert_eq!(reader.pixel_calls(), 1);
    }

    #[test]
    fn test_region_partially_off_screen_is_rejected() {
        let (reader, display) = hd_display();

        let result = display.get_bitmap_region(Rect::new(1900, 0, 40, 10));

        assert!(matches!(result, Err(DisplayError::OutOfRange { .. })));
        assert_eq!(reader.capture_calls(), 0);
    }

    #[test]
    fn test_empty_region_is_rejected() {
        let (_, display) = hd_display();
        assert!(display.get_bitmap_region(Rect::new(0, 0, 0, 10)).is_err());
    }

    #[test]
    fn test_full_bitmap_has_display_dimensions() {
        let (_, display) = hd_display();

        let bitmap = display.get_bitmap().expect("capture");

        assert_eq!(bitmap.dimensions(), (1920, 1080));
    }

    #[test]
    fn test_size_query_failure_propagates() {
        let reader = Arc::new(MockScreenReader::failing("no display"));

        let result = Display::new(reader);

        assert!(matches!(result, Err(DisplayError::Platform(_))));
    }
}
