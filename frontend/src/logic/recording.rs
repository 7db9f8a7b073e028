//! Recording session state
//!
//! [`RecordingSink`] owns at most one open video stream. The capture thread
//! feeds it frames and elapsed time; the session controller starts and
//! stops it. Both go through the same `Mutex<RecordingSink>`.

use logging::Logger;
use media::{MediaError, VideoFrame, VideoSink, VideoSinkFactory};
use std::fs;
use std::path::{Path, PathBuf};

/// What a finished recording produced
#[derive(Debug, Clone, PartialEq)]
pub struct RecordingSummary {
    pub path: PathBuf,
    pub frames_written: u64,
    pub duration_ms: f64,
}

struct ActiveRecording {
    sink: Box<dyn VideoSink>,
    path: PathBuf,
    size: (u32, u32),
    accumulated_ms: f64,
    frames_written: u64,
    frames_rejected: u64,
}

/// Video output for the capture loop, idle until started
pub struct RecordingSink {
    factory: Box<dyn VideoSinkFactory>,
    active: Option<ActiveRecording>,
    logger: Logger,
}

impl RecordingSink {
    pub fn new(factory: Box<dyn VideoSinkFactory>, logger: Logger) -> Self {
        Self {
            factory,
            active: None,
            logger,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Time recorded so far; 0 when idle
    pub fn accumulated_ms(&self) -> f64 {
        self.active.as_ref().map_or(0.0, |a| a.accumulated_ms)
    }

    /// Opens a new recording at `path`
    ///
    /// Every frame written afterwards must have exactly `size`.
    ///
    /// # Returns
    /// * `Err(MediaError::Encoder)` - already recording, or the encoder
    ///   could not be opened
    /// * `Err(MediaError::Filesystem)` - the output folder cannot be created
    pub fn start(&mut self, path: &Path, fps: f64, size: (u32, u32)) -> media::Result<()> {
        if self.active.is_some() {
            return Err(MediaError::Encoder("already recording".to_string()));
        }

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| {
                MediaError::Filesystem(format!("Cannot create {}: {}", parent.display(), e))
            })?;
        }

        let sink = self.factory.open(path, fps, size)?;
        self.logger.info(&format!(
            "[REC] Started {} ({}x{} @ {} fps)",
            path.display(),
            size.0,
            size.1,
            fps
        ));

        self.active = Some(ActiveRecording {
            sink,
            path: path.to_path_buf(),
            size,
            accumulated_ms: 0.0,
            frames_written: 0,
            frames_rejected: 0,
        });
        Ok(())
    }

    /// Appends a frame to the running recording; no-op when idle
    ///
    /// # Returns
    /// * `Err(MediaError::FrameSizeMismatch)` - frame size differs from the
    ///   size the recording was started with; nothing is written
    pub fn write_frame(&mut self, frame: &VideoFrame) -> media::Result<()> {
        let Some(active) = self.active.as_mut() else {
            return Ok(());
        };

        if frame.size() != active.size {
            active.frames_rejected += 1;
            return Err(MediaError::FrameSizeMismatch {
                expected: active.size,
                actual: frame.size(),
            });
        }

        active.sink.write_frame(frame)?;
        active.frames_written += 1;
        Ok(())
    }

    /// Adds an observed capture interval to the recorded time
    pub fn advance(&mut self, elapsed_ms: f64) {
        if let Some(active) = self.active.as_mut() {
            active.accumulated_ms += elapsed_ms.max(0.0);
        }
    }

    /// Closes the running recording
    ///
    /// The sink is idle afterwards even when closing fails.
    ///
    /// # Returns
    /// * `Ok(None)` - nothing was recording
    /// * `Ok(Some(summary))` - the file was closed
    /// * `Err(MediaError)` - the encoder failed to close the file
    pub fn stop(&mut self) -> media::Result<Option<RecordingSummary>> {
        let Some(mut active) = self.active.take() else {
            return Ok(None);
        };

        if active.frames_rejected > 0 {
            self.logger.warn(&format!(
                "[REC] {} frames of the wrong size were skipped",
                active.frames_rejected
            ));
        }

        let closed = active.sink.close();
        let summary = RecordingSummary {
            path: active.path,
            frames_written: active.frames_written,
            duration_ms: active.accumulated_ms,
        };

        match closed {
            Ok(()) => {
                self.logger.info(&format!(
                    "[REC] Stopped {} ({} frames, {:.0} ms)",
                    summary.path.display(),
                    summary.frames_written,
                    summary.duration_ms
                ));
                Ok(Some(summary))
            }
            Err(e) => {
                self.logger.error(&format!(
                    "[REC] Failed to close {}: {}",
                    summary.path.display(),
                    e
                ));
                Err(e)
            }
        }
    }
}
