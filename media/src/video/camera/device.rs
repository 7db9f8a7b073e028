//! Camera device management.
//!
//! Opens a camera through OpenCV, negotiates its resolution and reads
//! frames. Implements [`CaptureDevice`] for the capture pipeline.

use crate::common::constants::logging::CAMERA_LOG_INTERVAL;
use crate::error::{MediaError, Result};
use crate::video::frame::VideoFrame;
use crate::video::traits::CaptureDevice;
use logging::Logger;
use opencv::prelude::*;
use opencv::videoio::{CAP_PROP_FRAME_HEIGHT, CAP_PROP_FRAME_WIDTH, VideoCapture};

use super::config::CaptureConfig;

/// DirectShow opens noticeably faster than MSMF for USB webcams on Windows.
#[cfg(windows)]
const CAPTURE_BACKEND: i32 = opencv::videoio::CAP_DSHOW;
#[cfg(not(windows))]
const CAPTURE_BACKEND: i32 = opencv::videoio::CAP_ANY;

/// Video capture device
///
/// Owns the OpenCV `VideoCapture` from open to release. Dropping the camera
/// releases it if [`CaptureDevice::release`] was not called first.
pub struct Camera {
    capture: VideoCapture,
    device_index: i32,
    logger: Logger,
    frame_count: u64,
    released: bool,
}

impl Camera {
    /// Opens camera `device_index` and requests the configured resolution
    ///
    /// The device may settle on a different size; read it back with
    /// [`CaptureDevice::format`].
    ///
    /// # Returns
    /// * `Ok(Camera)` - Successfully opened camera
    /// * `Err(MediaError::Camera)` - If the device cannot be opened
    pub fn open(device_index: i32, config: &CaptureConfig, logger: Logger) -> Result<Self> {
        logger.info(&format!(
            "Opening camera {} (requested {}x{} @ {} fps)",
            device_index, config.width, config.height, config.target_fps
        ));

        let capture = VideoCapture::new(device_index, CAPTURE_BACKEND)
            .map_err(|e| MediaError::Camera(format!("Failed to open camera: {}", e)))?;

        if !Self::is_opened(&capture)? {
            return Err(MediaError::Camera(format!(
                "Camera {} is not available",
                device_index
            )));
        }

        let mut camera = Camera {
            capture,
            device_index,
            logger,
            frame_count: 0,
            released: false,
        };
        camera.set_format(config.width, config.height)?;

        camera.logger.info("Camera opened successfully");
        Ok(camera)
    }

    /// Safely gets a camera property
    fn get_property(&self, prop: i32) -> Result<f64> {
        self.capture
            .get(prop)
            .map_err(|e| MediaError::Camera(format!("Error getting property: {}", e)))
    }

    /// Verifies if camera is opened and ready
    fn is_opened(capture: &VideoCapture) -> Result<bool> {
        capture
            .is_opened()
            .map_err(|e| MediaError::Camera(format!("Error verifying camera status: {}", e)))
    }

    /// Maps a failed read to a recoverable or fatal error
    fn read_failure(&self, reason: String) -> MediaError {
        match Self::is_opened(&self.capture) {
            Ok(true) => MediaError::Camera(reason),
            _ => MediaError::DeviceLost(format!(
                "camera {} closed ({})",
                self.device_index, reason
            )),
        }
    }
}

impl CaptureDevice for Camera {
    fn set_format(&mut self, width: u32, height: u32) -> Result<()> {
        // The backend answers `false` for sizes it cannot do and picks the
        // nearest one instead, which `format()` reports.
        let _ = self.capture.set(CAP_PROP_FRAME_WIDTH, f64::from(width));
        let _ = self.capture.set(CAP_PROP_FRAME_HEIGHT, f64::from(height));

        let actual = self.format()?;
        if actual != (width, height) {
            self.logger.warn(&format!(
                "Resolution mismatch (got: {}x{}, requested: {}x{})",
                actual.0, actual.1, width, height
            ));
        } else {
            self.logger
                .info(&format!("Camera configured: {}x{}", width, height));
        }
        Ok(())
    }

    fn format(&self) -> Result<(u32, u32)> {
        let width = self.get_property(CAP_PROP_FRAME_WIDTH)?;
        let height = self.get_property(CAP_PROP_FRAME_HEIGHT)?;
        Ok((width as u32, height as u32))
    }

    fn read_frame(&mut self) -> Result<VideoFrame> {
        if self.released {
            return Err(MediaError::DeviceLost("camera already released".to_string()));
        }

        let mut mat = Mat::default();
        let success = match self.capture.read(&mut mat) {
            Ok(success) => success,
            Err(e) => return Err(self.read_failure(format!("Failed to read frame: {}", e))),
        };

        if !success || mat.empty() || mat.cols() == 0 || mat.rows() == 0 {
            return Err(self.read_failure("Empty or invalid frame".to_string()));
        }

        self.frame_count += 1;
        if self.frame_count.is_multiple_of(CAMERA_LOG_INTERVAL) {
            self.logger
                .debug(&format!("Frames captured: {}", self.frame_count));
        }

        Ok(VideoFrame::new(mat))
    }

    fn release(&mut self) -> Result<()> {
        if self.released {
            return Ok(());
        }
        self.released = true;
        self.logger.info(&format!(
            "Releasing camera. Total frames captured: {}",
            self.frame_count
        ));
        self.capture
            .release()
            .map_err(|e| MediaError::Camera(format!("Error releasing camera: {}", e)))
    }
}

impl Drop for Camera {
    fn drop(&mut self) {
        if let Err(e) = self.release() {
            self.logger.error(&e.to_string());
        }
    }
}
