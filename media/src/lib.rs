//! Media Processing Module
//!
//! Camera capture, frame scaling and colour conversion, video recording and
//! still-image output for camdeck. Device and encoder access goes through the
//! traits in [`video::traits`] so the capture pipeline can be driven by
//! simulated devices in tests.

pub mod common;
pub mod error;
pub mod video;

pub use error::{MediaError, Result};

pub use video::{
    Camera, CaptureConfig, CaptureDevice, ImageFileWriter, ImageWriter, LetterboxLayout,
    OpenCvSinkFactory, PixelFormat, RgbImage, VideoFrame, VideoRecorder, VideoSink,
    VideoSinkFactory, frame_to_rgb, letterbox, letterbox_layout,
};
