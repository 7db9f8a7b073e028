//! Simulated devices and outputs for logic tests

use logging::{LogLevel, Logger};
use media::{
    CaptureDevice, ImageWriter, MediaError, VideoFrame, VideoSink, VideoSinkFactory,
};
use opencv::core::{CV_8UC3, Mat, Scalar};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

pub fn test_logger() -> Logger {
    let dir = tempfile::tempdir().unwrap();
    Logger::new(dir.path().join("test.log"), LogLevel::Debug).unwrap()
}

pub fn test_frame(width: u32, height: u32) -> VideoFrame {
    let mat = Mat::new_rows_cols_with_default(
        height as i32,
        width as i32,
        CV_8UC3,
        Scalar::new(40.0, 80.0, 120.0, 0.0),
    )
    .unwrap();
    VideoFrame::new(mat)
}

/// Camera that snaps requested sizes to the closest supported one
pub struct SimulatedCamera {
    supported: Vec<(u32, u32)>,
    format: (u32, u32),
    reads: u64,
    lose_after: Option<u64>,
    transient_failures: u64,
    unreadable: Option<(u32, u32)>,
    released: Arc<AtomicBool>,
}

impl SimulatedCamera {
    pub fn new(supported: Vec<(u32, u32)>) -> Self {
        let format = supported[0];
        Self {
            supported,
            format,
            reads: 0,
            lose_after: None,
            transient_failures: 0,
            unreadable: None,
            released: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Reads after the first `reads` report the device as gone
    pub fn lose_after(mut self, reads: u64) -> Self {
        self.lose_after = Some(reads);
        self
    }

    /// The first `count` reads fail with a recoverable error
    pub fn fail_first(mut self, count: u64) -> Self {
        self.transient_failures = count;
        self
    }

    /// Requesting `size` leaves the device reporting 0x0
    pub fn unreadable_at(mut self, size: (u32, u32)) -> Self {
        self.unreadable = Some(size);
        self
    }

    pub fn released_flag(&self) -> Arc<AtomicBool> {
        self.released.clone()
    }
}

impl CaptureDevice for SimulatedCamera {
    fn set_format(&mut self, width: u32, height: u32) -> media::Result<()> {
        if self.unreadable == Some((width, height)) {
            self.format = (0, 0);
            return Ok(());
        }
        let distance = |&(w, h): &(u32, u32)| {
            (i64::from(w) - i64::from(width)).abs() + (i64::from(h) - i64::from(height)).abs()
        };
        if let Some(best) = self.supported.iter().min_by_key(|size| distance(size)) {
            self.format = *best;
        }
        Ok(())
    }

    fn format(&self) -> media::Result<(u32, u32)> {
        Ok(self.format)
    }

    fn read_frame(&mut self) -> media::Result<VideoFrame> {
        if self.released.load(Ordering::SeqCst) {
            return Err(MediaError::DeviceLost("released".to_string()));
        }
        self.reads += 1;
        if self.lose_after.is_some_and(|limit| self.reads > limit) {
            return Err(MediaError::DeviceLost("unplugged".to_string()));
        }
        if self.reads <= self.transient_failures {
            return Err(MediaError::Camera("empty frame".to_string()));
        }
        Ok(test_frame(self.format.0, self.format.1))
    }

    fn release(&mut self) -> media::Result<()> {
        self.released.store(true, Ordering::SeqCst);
        Ok(())
    }
}

#[derive(Default)]
struct SinkLog {
    opened: Vec<(PathBuf, f64, (u32, u32))>,
    written: Vec<(u32, u32)>,
    closed: usize,
}

/// Records what would have been encoded
#[derive(Clone, Default)]
pub struct MemorySinkFactory {
    log: Arc<Mutex<SinkLog>>,
    fail_open: bool,
    fail_close: bool,
}

impl MemorySinkFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail_open: true,
            ..Self::default()
        }
    }

    pub fn failing_close() -> Self {
        Self {
            fail_close: true,
            ..Self::default()
        }
    }

    pub fn opened(&self) -> Vec<(PathBuf, f64, (u32, u32))> {
        self.log.lock().unwrap().opened.clone()
    }

    pub fn written(&self) -> Vec<(u32, u32)> {
        self.log.lock().unwrap().written.clone()
    }

    pub fn closed(&self) -> usize {
        self.log.lock().unwrap().closed
    }
}

impl VideoSinkFactory for MemorySinkFactory {
    fn open(&self, path: &Path, fps: f64, size: (u32, u32)) -> media::Result<Box<dyn VideoSink>> {
        if self.fail_open {
            return Err(MediaError::Encoder("codec unavailable".to_string()));
        }
        self.log
            .lock()
            .unwrap()
            .opened
            .push((path.to_path_buf(), fps, size));
        Ok(Box::new(MemorySink {
            log: self.log.clone(),
            fail_close: self.fail_close,
        }))
    }
}

struct MemorySink {
    log: Arc<Mutex<SinkLog>>,
    fail_close: bool,
}

impl VideoSink for MemorySink {
    fn write_frame(&mut self, frame: &VideoFrame) -> media::Result<()> {
        self.log.lock().unwrap().written.push(frame.size());
        Ok(())
    }

    fn close(&mut self) -> media::Result<()> {
        if self.fail_close {
            return Err(MediaError::Encoder("disk full".to_string()));
        }
        self.log.lock().unwrap().closed += 1;
        Ok(())
    }
}

/// Image writer whose encoder always refuses
pub struct FailingImageWriter;

impl ImageWriter for FailingImageWriter {
    fn write_image(&self, path: &Path, _frame: &VideoFrame) -> media::Result<()> {
        Err(MediaError::Encoder(format!("cannot encode {}", path.display())))
    }
}
