//! Video processing module
//!
//! Handles camera capture, frame scaling, colour conversion and output.

pub mod camera;
pub mod constants;
pub mod converters;
pub mod frame;
pub mod letterbox;
pub mod recorder;
pub mod snapshot;
pub mod traits;

// Re-exports
pub use camera::{Camera, CaptureConfig};
pub use converters::{RgbImage, frame_to_rgb};
pub use frame::{PixelFormat, VideoFrame};
pub use letterbox::{LetterboxLayout, letterbox, letterbox_layout};
pub use recorder::{OpenCvSinkFactory, VideoRecorder};
pub use snapshot::ImageFileWriter;
pub use traits::{CaptureDevice, ImageWriter, VideoSink, VideoSinkFactory};
