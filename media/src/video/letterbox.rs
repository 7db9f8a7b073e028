//! Aspect-preserving fit of a frame into a viewport.
//!
//! The source is scaled until one axis matches the viewport and the other
//! axis is padded with black bars (letterbox above/below, pillarbox
//! left/right). The layout maths is a separate pure function so it can be
//! checked without touching pixels.

use crate::error::{MediaError, Result};
use crate::video::frame::VideoFrame;
use opencv::core::{BORDER_CONSTANT, Mat, Scalar, Size, copy_make_border};
use opencv::imgproc::{INTER_LINEAR, resize};
use std::cmp::Ordering;

/// Where the scaled image sits inside the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LetterboxLayout {
    pub scaled_width: u32,
    pub scaled_height: u32,
    pub top: u32,
    pub bottom: u32,
    pub left: u32,
    pub right: u32,
}

impl LetterboxLayout {
    /// Size of the padded output, always equal to the viewport
    pub fn output_size(&self) -> (u32, u32) {
        (
            self.scaled_width + self.left + self.right,
            self.scaled_height + self.top + self.bottom,
        )
    }

    /// True when the source fills the viewport without bars
    pub fn is_unpadded(&self) -> bool {
        self.top == 0 && self.bottom == 0 && self.left == 0 && self.right == 0
    }
}

/// Computes the letterbox layout for `source` inside `viewport`
///
/// Ratios are compared exactly through cross-multiplication. The scaled
/// length on the padded axis is rounded to the nearest pixel, and the
/// padding splits as `floor(diff / 2)` before and the remainder after.
///
/// # Returns
/// * `Err(MediaError::Processing)` - if either size has a zero dimension
pub fn letterbox_layout(source: (u32, u32), viewport: (u32, u32)) -> Result<LetterboxLayout> {
    let (w, h) = source;
    let (fw, fh) = viewport;
    if w == 0 || h == 0 || fw == 0 || fh == 0 {
        return Err(MediaError::Processing(format!(
            "Cannot letterbox {}x{} into {}x{}",
            w, h, fw, fh
        )));
    }

    let aspect = f64::from(w) / f64::from(h);
    let source_cross = u64::from(w) * u64::from(fh);
    let viewport_cross = u64::from(fw) * u64::from(h);

    let layout = match source_cross.cmp(&viewport_cross) {
        // Source is wider than the viewport: bars above and below.
        Ordering::Greater => {
            let scaled_height = ((f64::from(fw) / aspect).round() as u32).clamp(1, fh);
            let (top, bottom) = split_padding(fh - scaled_height);
            LetterboxLayout {
                scaled_width: fw,
                scaled_height,
                top,
                bottom,
                left: 0,
                right: 0,
            }
        }
        // Source is taller: bars left and right.
        Ordering::Less => {
            let scaled_width = ((f64::from(fh) * aspect).round() as u32).clamp(1, fw);
            let (left, right) = split_padding(fw - scaled_width);
            LetterboxLayout {
                scaled_width,
                scaled_height: fh,
                top: 0,
                bottom: 0,
                left,
                right,
            }
        }
        Ordering::Equal => LetterboxLayout {
            scaled_width: fw,
            scaled_height: fh,
            top: 0,
            bottom: 0,
            left: 0,
            right: 0,
        },
    };

    Ok(layout)
}

fn split_padding(diff: u32) -> (u32, u32) {
    let first = diff / 2;
    (first, diff - first)
}

/// Fits `frame` into `viewport`, returning a new frame of exactly that size
///
/// Scaling is bilinear and the bars are black. A frame that already has the
/// viewport size is returned as an unchanged copy. The result keeps the
/// source pixel format and capture timestamp.
pub fn letterbox(frame: &VideoFrame, viewport: (u32, u32)) -> Result<VideoFrame> {
    let layout = letterbox_layout(frame.size(), viewport)?;
    if frame.size() == viewport {
        return Ok(frame.clone());
    }

    let mut scaled = Mat::default();
    resize(
        frame.data(),
        &mut scaled,
        Size::new(layout.scaled_width as i32, layout.scaled_height as i32),
        0.0,
        0.0,
        INTER_LINEAR,
    )?;

    let output = if layout.is_unpadded() {
        scaled
    } else {
        let mut padded = Mat::default();
        copy_make_border(
            &scaled,
            &mut padded,
            layout.top as i32,
            layout.bottom as i32,
            layout.left as i32,
            layout.right as i32,
            BORDER_CONSTANT,
            Scalar::all(0.0),
        )?;
        padded
    };

    Ok(VideoFrame::derived(output, frame.format(), frame.timestamp()))
}
