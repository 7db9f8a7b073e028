//! Video frame representation.
//!
//! Provides the core `VideoFrame` type that carries a decoded raster plus
//! its capture metadata from the camera to the display and the recorder.

use opencv::core::Mat;
use opencv::prelude::*;
use std::time::Instant;

/// Channel order of a 3-channel, 8-bit frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// OpenCV native order; what cameras deliver and encoders expect
    Bgr,
    /// Display order
    Rgb,
}

/// Decoded video frame
///
/// Wraps an OpenCV Mat with dimensions, pixel format and the instant it was
/// captured. Frames are never modified after capture: scaling and colour
/// conversion build a new frame that keeps the original timestamp.
#[derive(Clone)]
pub struct VideoFrame {
    data: Mat,
    width: u32,
    height: u32,
    format: PixelFormat,
    timestamp: Instant,
}

impl VideoFrame {
    /// Creates a BGR frame stamped with the current instant
    ///
    /// # Arguments
    /// * `mat` - OpenCV Matrix containing the frame data in BGR order
    pub fn new(mat: Mat) -> Self {
        Self::derived(mat, PixelFormat::Bgr, Instant::now())
    }

    /// Creates a frame derived from an earlier capture
    ///
    /// Used by transformations so the result keeps the source timestamp.
    pub fn derived(mat: Mat, format: PixelFormat, timestamp: Instant) -> Self {
        let width = mat.cols().max(0) as u32;
        let height = mat.rows().max(0) as u32;

        VideoFrame {
            data: mat,
            width,
            height,
            format,
            timestamp,
        }
    }

    /// Returns frame width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns frame height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns `(width, height)`
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Returns capture timestamp
    pub fn timestamp(&self) -> Instant {
        self.timestamp
    }

    /// Returns reference to the internal OpenCV matrix
    pub fn data(&self) -> &Mat {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opencv::core::{CV_8UC3, Scalar};

    fn solid(width: i32, height: i32) -> Mat {
        Mat::new_rows_cols_with_default(
            height,
            width,
            CV_8UC3,
            Scalar::new(100.0, 150.0, 200.0, 0.0),
        )
        .unwrap()
    }

    #[test]
    fn test_empty_frame() {
        let frame = VideoFrame::new(Mat::default());

        assert_eq!(frame.size(), (0, 0));
        assert_eq!(frame.format(), PixelFormat::Bgr);
    }

    #[test]
    fn test_frame_with_data() {
        let frame = VideoFrame::new(solid(640, 480));

        assert_eq!(frame.width(), 640);
        assert_eq!(frame.height(), 480);
        assert_eq!(frame.data().cols(), 640);
    }

    #[test]
    fn test_derived_frame_keeps_timestamp() {
        let original = VideoFrame::new(solid(4, 4));
        let derived = VideoFrame::derived(solid(8, 2), PixelFormat::Rgb, original.timestamp());

        assert_eq!(derived.timestamp(), original.timestamp());
        assert_eq!(derived.size(), (8, 2));
        assert_eq!(derived.format(), PixelFormat::Rgb);
    }

    #[test]
    fn test_frame_timestamp() {
        let before = Instant::now();
        let frame = VideoFrame::new(Mat::default());
        let after = Instant::now();

        assert!(frame.timestamp() >= before && frame.timestamp() <= after);
    }
}
