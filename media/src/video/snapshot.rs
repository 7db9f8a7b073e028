//! Still image output through OpenCV's image codecs.

use crate::error::{MediaError, Result};
use crate::video::frame::{PixelFormat, VideoFrame};
use crate::video::traits::ImageWriter;
use opencv::core::Mat;
use opencv::imgcodecs::imwrite_def;
use opencv::imgproc::{COLOR_RGB2BGR, cvt_color_def};
use std::path::Path;

/// Writes frames with `imwrite`; the encoder follows the file extension
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageFileWriter;

impl ImageWriter for ImageFileWriter {
    fn write_image(&self, path: &Path, frame: &VideoFrame) -> Result<()> {
        let filename = path.to_str().ok_or_else(|| {
            MediaError::Encoder(format!("Output path is not valid UTF-8: {}", path.display()))
        })?;

        let written = match frame.format() {
            PixelFormat::Bgr => imwrite_def(filename, frame.data()),
            PixelFormat::Rgb => {
                let mut bgr = Mat::default();
                cvt_color_def(frame.data(), &mut bgr, COLOR_RGB2BGR)?;
                imwrite_def(filename, &bgr)
            }
        }
        .map_err(|e| MediaError::Encoder(format!("Failed to write {}: {}", path.display(), e)))?;

        if !written {
            return Err(MediaError::Encoder(format!(
                "Image encoder rejected {}",
                path.display()
            )));
        }
        Ok(())
    }
}
