//! Utility Functions
//!
//! Helpers for frame conversion, output naming and shared state.

use chrono::Utc;
use egui::{Color32, ColorImage, Vec2};
use media::RgbImage;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Converts packed RGB pixels to an egui ColorImage
pub fn rgb_to_color_image(image: RgbImage) -> ColorImage {
    let pixels: Vec<Color32> = image
        .pixels
        .chunks_exact(3)
        .map(|rgb| Color32::from_rgb(rgb[0], rgb[1], rgb[2]))
        .collect();

    ColorImage {
        size: [image.width, image.height],
        pixels,
        source_size: Vec2::new(image.width as f32, image.height as f32),
    }
}

/// `<folder>/<unix seconds>.<extension>`
///
/// Two outputs started within the same second get the same name; the later
/// one overwrites the earlier.
pub fn timestamped_path(folder: &Path, extension: &str) -> PathBuf {
    folder.join(format!("{}.{}", Utc::now().timestamp(), extension))
}

/// Locks shared session state, recovering it from a panicked holder
///
/// The capture thread and the UI only store whole values through these
/// locks, so a poisoned guard still holds consistent data.
pub fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
