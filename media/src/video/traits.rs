//! Device and output traits
//!
//! The capture pipeline only talks to cameras, video encoders and image
//! writers through these traits. The OpenCV implementations live next to
//! them ([`Camera`](super::Camera), [`VideoRecorder`](super::VideoRecorder),
//! [`ImageFileWriter`](super::ImageFileWriter)); tests substitute simulated
//! ones.

use super::frame::VideoFrame;
use crate::error::Result;
use std::path::Path;

/// A source of video frames
///
/// Opening happens in the implementor's constructor. The device may not
/// honour a requested format exactly, so callers read back [`format`]
/// after [`set_format`].
///
/// [`format`]: CaptureDevice::format
/// [`set_format`]: CaptureDevice::set_format
pub trait CaptureDevice: Send {
    /// Requests a capture resolution
    fn set_format(&mut self, width: u32, height: u32) -> Result<()>;

    /// Returns the negotiated `(width, height)`
    fn format(&self) -> Result<(u32, u32)>;

    /// Reads the next frame
    ///
    /// # Returns
    /// * `Err(MediaError::Camera)` - transient failure, retry next iteration
    /// * `Err(MediaError::DeviceLost)` - device is gone, stop capturing
    fn read_frame(&mut self) -> Result<VideoFrame>;

    /// Releases the device; further reads fail with `DeviceLost`
    fn release(&mut self) -> Result<()>;
}

/// An open video output stream with fixed size and frame rate
pub trait VideoSink: Send {
    /// Encodes one frame
    fn write_frame(&mut self, frame: &VideoFrame) -> Result<()>;

    /// Flushes and closes the stream
    fn close(&mut self) -> Result<()>;
}

/// Opens [`VideoSink`]s
pub trait VideoSinkFactory: Send + Sync {
    /// Opens an encoder writing to `path`
    ///
    /// # Arguments
    /// * `path` - Output file; the container follows its extension
    /// * `fps` - Nominal frame rate stored in the container
    /// * `size` - Frame size every written frame must have
    fn open(&self, path: &Path, fps: f64, size: (u32, u32)) -> Result<Box<dyn VideoSink>>;
}

/// Writes single frames as image files
pub trait ImageWriter: Send + Sync {
    /// Encodes `frame` to `path`; the format follows the extension
    fn write_image(&self, path: &Path, frame: &VideoFrame) -> Result<()>;
}
