//! Windows screen reader via GetSystemMetrics and GDI.
//!
//! Screen size comes from `SM_CXSCREEN`/`SM_CYSCREEN` (primary monitor).
//! Pixels are read with `GetPixel` on the screen DC; captures `BitBlt` the
//! region into a memory bitmap and read it back top-down with `GetDIBits`.
//!
//! # Safety
//!
//! This module uses `unsafe` code exclusively for Windows API FFI calls.
//! All `unsafe` blocks are annotated with `// SAFETY:` comments. GDI handles
//! are released by the guard types below on every path.

#![cfg(target_os = "windows")]

use image::RgbaImage;
use mimic_core::{Color, Rect, Size};
use windows::Win32::Graphics::Gdi::{
    BitBlt, CreateCompatibleBitmap, CreateCompatibleDC, DeleteDC, DeleteObject, GetDC, GetDIBits,
    GetPixel, ReleaseDC, SelectObject, BITMAPINFO, BITMAPINFOHEADER, BI_RGB, CLR_INVALID,
    DIB_RGB_COLORS, HBITMAP, HDC, HGDIOBJ, SRCCOPY,
};
use windows::Win32::UI::WindowsAndMessaging::{GetSystemMetrics, SM_CXSCREEN, SM_CYSCREEN};

use crate::application::display::{DisplayError, ScreenReader};

/// Windows implementation of [`ScreenReader`].
#[derive(Debug, Default)]
pub struct GdiScreenReader;

impl GdiScreenReader {
    pub fn new() -> Self {
        Self
    }
}

impl ScreenReader for GdiScreenReader {
    fn screen_size(&self) -> Result<Size, DisplayError> {
        // SAFETY: GetSystemMetrics has no preconditions.
        let (width, height) =
            unsafe { (GetSystemMetrics(SM_CXSCREEN), GetSystemMetrics(SM_CYSCREEN)) };
        if width <= 0 || height <= 0 {
            return Err(DisplayError::Platform(format!(
                "GetSystemMetrics reported a {width}x{height} screen"
            )));
        }
        Ok(Size::new(width, height))
    }

    fn pixel(&self, x: i32, y: i32) -> Result<Color, DisplayError> {
        let screen = ScreenDc::acquire()?;
        // SAFETY: `screen.0` is a valid screen DC for the guard's lifetime.
        let color = unsafe { GetPixel(screen.0, x, y) };
        if color.0 == CLR_INVALID {
            return Err(DisplayError::Platform(format!(
                "GetPixel failed at ({x}, {y})"
            )));
        }
        Ok(Color::from_colorref(color.0))
    }

    fn capture(&self, region: Rect) -> Result<RgbaImage, DisplayError> {
        let width = u32::try_from(region.width)
            .map_err(|_| DisplayError::Platform("negative capture width".into()))?;
        let height = u32::try_from(region.height)
            .map_err(|_| DisplayError::Platform("negative capture height".into()))?;

        let screen = ScreenDc::acquire()?;
        let memory = MemoryDc::compatible_with(&screen)?;
        let bitmap = Bitmap::compatible_with(&screen, region.width, region.height)?;

        // SAFETY: both DCs and the bitmap are valid; the previous object is
        // restored before the guards drop.
        let previous = unsafe { SelectObject(memory.0, bitmap.0.into()) };
        // SAFETY: source and destination DCs are valid and the destination
        // bitmap is `region.width` x `region.height`.
        let blit = unsafe {
            BitBlt(
                memory.0,
                0,
                0,
                region.width,
                region.height,
                Some(screen.0),
                region.x,
                region.y,
                SRCCOPY,
            )
        };
        // SAFETY: `previous` was returned by SelectObject on this DC.
        unsafe { SelectObject(memory.0, previous) };
        blit.map_err(|e| DisplayError::Platform(format!("BitBlt failed: {e}")))?;

        let mut info = BITMAPINFO {
            bmiHeader: BITMAPINFOHEADER {
                biSize: std::mem::size_of::<BITMAPINFOHEADER>() as u32,
                biWidth: region.width,
                // Negative height requests top-down rows.
                biHeight: -region.height,
                biPlanes: 1,
                biBitCount: 32,
                biCompression: BI_RGB.0,
                ..Default::default()
            },
            ..Default::default()
        };
        let mut bgra = vec![0u8; width as usize * height as usize * 4];
        // SAFETY: `bgra` holds exactly `height` rows of 32-bit pixels, which
        // is what `info` describes, and the bitmap is not selected into a DC.
        let rows = unsafe {
            GetDIBits(
                memory.0,
                bitmap.0,
                0,
                height,
                Some(bgra.as_mut_ptr().cast()),
                &mut info,
                DIB_RGB_COLORS,
            )
        };
        if rows == 0 {
            return Err(DisplayError::Platform("GetDIBits failed".into()));
        }

        RgbaImage::from_raw(width, height, bgra_to_rgba(bgra))
            .ok_or_else(|| DisplayError::Platform("capture buffer size mismatch".into()))
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// GDI returns BGRX; swaps to RGBA with an opaque alpha channel.
fn bgra_to_rgba(mut pixels: Vec<u8>) -> Vec<u8> {
    for px in pixels.chunks_exact_mut(4) {
        px.swap(0, 2);
        px[3] = 0xFF;
    }
    pixels
}

/// The whole-screen DC, released on drop.
struct ScreenDc(HDC);

impl ScreenDc {
    fn acquire() -> Result<Self, DisplayError> {
        // SAFETY: GetDC(None) returns the screen DC or a null handle.
        let hdc = unsafe { GetDC(None) };
        if hdc.is_invalid() {
            return Err(DisplayError::Platform("GetDC failed".into()));
        }
        Ok(Self(hdc))
    }
}

impl Drop for ScreenDc {
    fn drop(&mut self) {
        // SAFETY: the DC was obtained with GetDC(None) and is released once.
        unsafe { ReleaseDC(None, self.0) };
    }
}

/// A memory DC, deleted on drop.
struct MemoryDc(HDC);

impl MemoryDc {
    fn compatible_with(screen: &ScreenDc) -> Result<Self, DisplayError> {
        // SAFETY: `screen.0` is a valid DC.
        let hdc = unsafe { CreateCompatibleDC(Some(screen.0)) };
        if hdc.is_invalid() {
            return Err(DisplayError::Platform("CreateCompatibleDC failed".into()));
        }
        Ok(Self(hdc))
    }
}

impl Drop for MemoryDc {
    fn drop(&mut self) {
        // SAFETY: created by CreateCompatibleDC and deleted once.
        let _ = unsafe { DeleteDC(self.0) };
    }
}

/// A device-dependent bitmap, deleted on drop.
struct Bitmap(HBITMAP);

impl Bitmap {
    fn compatible_with(screen: &ScreenDc, width: i32, height: i32) -> Result<Self, DisplayError> {
        // SAFETY: `screen.0` is a valid DC; dimensions were validated by the caller.
        let bitmap = unsafe { CreateCompatibleBitmap(screen.0, width, height) };
        if bitmap.is_invalid() {
            return Err(DisplayError::Platform(
                "CreateCompatibleBitmap failed".into(),
            ));
        }
        Ok(Self(bitmap))
    }
}

impl Drop for Bitmap {
    fn drop(&mut self) {
        // SAFETY: created by CreateCompatibleBitmap, no longer selected, deleted once.
        let _ = unsafe { DeleteObject(HGDIOBJ::from(self.0)) };
    }
}
