//! Frame format converters
//!
//! Utilities for converting frames to display pixel layouts

pub mod rgb_converter;

pub use rgb_converter::{RgbImage, frame_to_rgb};
