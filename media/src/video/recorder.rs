//! Video file recording.
//!
//! [`VideoRecorder`] wraps an OpenCV `VideoWriter` opened for one output
//! file with a fixed frame size and rate. [`OpenCvSinkFactory`] opens them
//! on behalf of the recording session.

use crate::common::constants::logging::RECORDER_LOG_INTERVAL;
use crate::error::{MediaError, Result};
use crate::video::constants::recording::FOURCC;
use crate::video::frame::{PixelFormat, VideoFrame};
use crate::video::traits::{VideoSink, VideoSinkFactory};
use logging::Logger;
use opencv::core::Size;
use opencv::prelude::*;
use opencv::videoio::VideoWriter;
use std::path::{Path, PathBuf};

/// Open video output stream
pub struct VideoRecorder {
    writer: VideoWriter,
    path: PathBuf,
    size: (u32, u32),
    frames_written: u64,
    closed: bool,
    logger: Logger,
}

impl VideoRecorder {
    /// Opens `path` for writing with the given codec, rate and frame size
    ///
    /// # Returns
    /// * `Err(MediaError::Encoder)` - if the path is not valid UTF-8 or the
    ///   backend cannot open an encoder for this codec/size combination
    pub fn open(
        path: &Path,
        fourcc: [char; 4],
        fps: f64,
        size: (u32, u32),
        logger: Logger,
    ) -> Result<Self> {
        let filename = path.to_str().ok_or_else(|| {
            MediaError::Encoder(format!("Output path is not valid UTF-8: {}", path.display()))
        })?;

        let code = VideoWriter::fourcc(fourcc[0], fourcc[1], fourcc[2], fourcc[3])?;
        let frame_size = Size::new(size.0 as i32, size.1 as i32);
        let writer = VideoWriter::new(filename, code, fps, frame_size, true)
            .map_err(|e| MediaError::Encoder(format!("Failed to create writer: {}", e)))?;

        if !writer.is_opened()? {
            return Err(MediaError::Encoder(format!(
                "Could not open {} encoder for {} at {}x{} @ {} fps",
                fourcc.iter().collect::<String>(),
                path.display(),
                size.0,
                size.1,
                fps
            )));
        }

        logger.info(&format!(
            "Recording to {} ({}x{} @ {} fps)",
            path.display(),
            size.0,
            size.1,
            fps
        ));

        Ok(Self {
            writer,
            path: path.to_path_buf(),
            size,
            frames_written: 0,
            closed: false,
            logger,
        })
    }
}

impl VideoSink for VideoRecorder {
    fn write_frame(&mut self, frame: &VideoFrame) -> Result<()> {
        if self.closed {
            return Err(MediaError::Encoder("Recorder already closed".to_string()));
        }
        if frame.size() != self.size {
            return Err(MediaError::FrameSizeMismatch {
                expected: self.size,
                actual: frame.size(),
            });
        }
        if frame.format() != PixelFormat::Bgr {
            return Err(MediaError::Encoder("Recorder expects BGR frames".to_string()));
        }

        self.writer
            .write(frame.data())
            .map_err(|e| MediaError::Encoder(format!("Failed to write frame: {}", e)))?;

        self.frames_written += 1;
        if self.frames_written.is_multiple_of(RECORDER_LOG_INTERVAL) {
            self.logger
                .debug(&format!("Frames recorded: {}", self.frames_written));
        }
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.writer
            .release()
            .map_err(|e| MediaError::Encoder(format!("Failed to close recording: {}", e)))?;
        self.logger.info(&format!(
            "Closed {} after {} frames",
            self.path.display(),
            self.frames_written
        ));
        Ok(())
    }
}

impl Drop for VideoRecorder {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            self.logger.error(&e.to_string());
        }
    }
}

/// Opens [`VideoRecorder`]s with a fixed codec
pub struct OpenCvSinkFactory {
    fourcc: [char; 4],
    logger: Logger,
}

impl OpenCvSinkFactory {
    /// Factory using the default recording codec (Xvid)
    pub fn new(logger: Logger) -> Self {
        Self::with_fourcc(FOURCC, logger)
    }

    pub fn with_fourcc(fourcc: [char; 4], logger: Logger) -> Self {
        Self { fourcc, logger }
    }
}

impl VideoSinkFactory for OpenCvSinkFactory {
    fn open(&self, path: &Path, fps: f64, size: (u32, u32)) -> Result<Box<dyn VideoSink>> {
        let recorder = VideoRecorder::open(path, self.fourcc, fps, size, self.logger.clone())?;
        Ok(Box::new(recorder))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logging::LogLevel;
    use opencv::core::{CV_8UC3, Mat, Scalar};
    use tempfile::tempdir;

    fn frame(width: i32, height: i32) -> VideoFrame {
        let mat =
            Mat::new_rows_cols_with_default(height, width, CV_8UC3, Scalar::all(90.0)).unwrap();
        VideoFrame::new(mat)
    }

    #[test]
    fn test_rejects_frame_of_other_size() {
        let dir = tempdir().unwrap();
        let logger = Logger::new(dir.path().join("rec.log"), LogLevel::Debug).unwrap();
        let factory = OpenCvSinkFactory::with_fourcc(['M', 'J', 'P', 'G'], logger);

        // Encoder availability depends on the OpenCV build; only check the
        // size guard when one could be opened.
        if let Ok(mut sink) = factory.open(&dir.path().join("clip.avi"), 30.0, (64, 48)) {
            assert!(sink.write_frame(&frame(64, 48)).is_ok());
            assert!(matches!(
                sink.write_frame(&frame(32, 24)),
                Err(MediaError::FrameSizeMismatch { .. })
            ));
            assert!(sink.close().is_ok());
        }
    }

    #[test]
    fn test_missing_directory_fails_to_open() {
        let dir = tempdir().unwrap();
        let logger = Logger::new(dir.path().join("rec.log"), LogLevel::Debug).unwrap();
        let factory = OpenCvSinkFactory::new(logger);

        let path = dir.path().join("does").join("not").join("exist.avi");
        assert!(factory.open(&path, 30.0, (64, 48)).is_err());
    }
}
