//! Mock screen reader for tests.
//!
//! Serves a solid-colour screen of a fixed size and counts native-style
//! calls, so tests can prove that bounds checks short-circuit before the
//! reader is reached.

use std::sync::atomic::{AtomicUsize, Ordering};

use image::{Rgba, RgbaImage};
use mimic_core::{Color, Rect, Size};

use crate::application::display::{DisplayError, ScreenReader};

/// Colour served for every pixel unless overridden.
const DEFAULT_FILL: Color = Color::new(0x20, 0x40, 0x60);

#[derive(Debug)]
pub struct MockScreenReader {
    size: Size,
    fill: Color,
    failure: Option<String>,
    pixel_calls: AtomicUsize,
    capture_calls: AtomicUsize,
}

impl MockScreenReader {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            fill: DEFAULT_FILL,
            failure: None,
            pixel_calls: AtomicUsize::new(0),
            capture_calls: AtomicUsize::new(0),
        }
    }

    /// A 1920×1080 screen.
    pub fn full_hd() -> Self {
        Self::new(Size::new(1920, 1080))
    }

    /// A reader whose every call fails with [`DisplayError::Platform`].
    pub fn failing(reason: &str) -> Self {
        Self {
            failure: Some(reason.to_string()),
            ..Self::new(Size::default())
        }
    }

    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = fill;
        self
    }

    pub fn fill(&self) -> Color {
        self.fill
    }

    pub fn pixel_calls(&self) -> usize {
        self.pixel_calls.load(Ordering::SeqCst)
    }

    pub fn capture_calls(&self) -> usize {
        self.capture_calls.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), DisplayError> {
        match &self.failure {
            Some(reason) => Err(DisplayError::Platform(reason.clone())),
            None => Ok(()),
        }
    }
}

impl ScreenReader for MockScreenReader {
    fn screen_size(&self) -> Result<Size, DisplayError> {
        self.check()?;
        Ok(self.size)
    }

    fn pixel(&self, _x: i32, _y: i32) -> Result<Color, DisplayError> {
        self.pixel_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.fill)
    }

    fn capture(&self, region: Rect) -> Result<RgbaImage, DisplayError> {
        self.capture_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        let Color { r, g, b } = self.fill;
        let width = u32::try_from(region.width).unwrap_or(0);
        let height = u32::try_from(region.height).unwrap_or(0);
        Ok(RgbaImage::from_pixel(width, height, Rgba([r, g, b, 0xFF])))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_fills_region_with_colour() {
        let reader = MockScreenReader::full_hd().with_fill(Color::new(1, 2, 3));

        let image = reader.capture(Rect::new(0, 0, 4, 2)).expect("capture");

        assert_eq!(image.dimensions(), (4, 2));
        assert_eq!(image.get_pixel(3, 1), &Rgba([1, 2, 3, 0xFF]));
        assert_eq!(reader.capture_calls(), 1);
    }

    #[test]
    fn test_failing_reader_reports_platform_error() {
        let reader = MockScreenReader::failing("gone");

        assert_eq!(
            reader.screen_size(),
            Err(DisplayError::Platform("gone".to_string()))
        );
    }
}
