//! BGR to RGB conversion
//!
//! Turns camera frames (OpenCV BGR order) into tightly packed RGB bytes for
//! the display surface.

use crate::error::{MediaError, Result};
use crate::video::frame::{PixelFormat, VideoFrame};
use opencv::prelude::{MatTraitConst, MatTraitConstManual};

const PIXEL_SIZE: usize = 3;

/// Packed 8-bit RGB pixels, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbImage {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u8>,
}

/// Converts a 3-channel frame to packed RGB
///
/// # Returns
/// * `Ok(RgbImage)` - Frame dimensions and RGB pixel data
/// * `Err(MediaError::Processing)` - If the frame is not 8-bit, 3-channel
pub fn frame_to_rgb(frame: &VideoFrame) -> Result<RgbImage> {
    let mat = frame.data();
    if mat.channels() != PIXEL_SIZE as i32 {
        return Err(MediaError::Processing(format!(
            "Expected a 3-channel frame, got {} channels",
            mat.channels()
        )));
    }

    let width = mat.cols() as usize;
    let height = mat.rows() as usize;

    // Row padding (ROIs, some backends) makes `data_bytes` fail; compact first.
    let compact;
    let mat = if mat.is_continuous() {
        mat
    } else {
        compact = mat.try_clone()?;
        &compact
    };

    let bytes = mat
        .data_bytes()
        .map_err(|e| MediaError::Processing(format!("Failed to get frame data: {}", e)))?;

    let pixels = match frame.format() {
        PixelFormat::Rgb => bytes.to_vec(),
        PixelFormat::Bgr => swap_red_blue(bytes),
    };

    Ok(RgbImage {
        width,
        height,
        pixels,
    })
}

fn swap_red_blue(bgr: &[u8]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(bgr.len());
    for px in bgr.chunks_exact(PIXEL_SIZE) {
        rgb.extend_from_slice(&[px[2], px[1], px[0]]);
    }
    rgb
}
