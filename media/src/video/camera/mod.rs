//! Camera capture module
//!
//! Provides capture configuration and the OpenCV-backed camera device.

pub mod config;
pub mod device;

pub use config::CaptureConfig;
pub use device::Camera;
