//! Session Controller
//!
//! Owns everything the capture thread shares with the UI and turns user
//! commands (resolution, frame rate, recording, snapshots) into changes on
//! that shared state.

use super::capture_thread::{CaptureShared, run_capture_loop};
use super::error::SessionError;
use super::frame_buffer::FrameBuffer;
use super::recording::{RecordingSink, RecordingSummary};
use super::utils::{lock, timestamped_path};
use crate::config::{Catalog, FrameRate, Resolution};
use crate::events::CaptureEvent;
use logging::Logger;
use media::video::constants::recording::VIDEO_EXTENSION;
use media::video::constants::snapshot::IMAGE_EXTENSION;
use media::{CaptureConfig, CaptureDevice, ImageWriter, MediaError, VideoSinkFactory};
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

/// Where and how session output is written
pub struct SessionOutputs {
    pub sinks: Box<dyn VideoSinkFactory>,
    pub images: Box<dyn ImageWriter>,
    pub video_folder: PathBuf,
    pub photo_folder: PathBuf,
}

/// Result of [`SessionController::toggle_recording`]
#[derive(Debug, Clone, PartialEq)]
pub enum RecordingToggle {
    Started(PathBuf),
    /// `None` if the recording had already been closed by the capture thread
    Stopped(Option<RecordingSummary>),
}

/// Coordinates the capture thread, the recording and snapshot output
pub struct SessionController<D: CaptureDevice + 'static> {
    catalog: Catalog,
    shared: CaptureShared<D>,
    capture_thread: Option<JoinHandle<()>>,
    images: Box<dyn ImageWriter>,
    video_folder: PathBuf,
    photo_folder: PathBuf,
    logger: Logger,
}

impl<D: CaptureDevice + 'static> SessionController<D> {
    /// Applies the initial settings to `device` and builds the session
    ///
    /// The capture configuration stores the size the device actually
    /// negotiated, which may differ from the requested entry.
    ///
    /// # Returns
    /// * `Err(SessionError::Config)` - initial entries not in `catalog`
    /// * `Err(SessionError::Media)` - the device rejected the format query
    pub fn new(
        mut device: D,
        catalog: Catalog,
        initial: (Resolution, FrameRate),
        outputs: SessionOutputs,
        logger: Logger,
    ) -> Result<Self, SessionError> {
        let resolution = catalog.resolution(initial.0.name())?;
        let frame_rate = catalog.frame_rate(initial.1.name())?;

        let (width, height) = resolution.dimensions();
        device.set_format(width, height)?;
        let negotiated = device.format()?;
        let config = CaptureConfig::new(negotiated.0, negotiated.1, frame_rate.fps())?;

        logger.info(&format!(
            "[SESSION] {} requested, capturing at {}x{} @ {} fps",
            resolution, negotiated.0, negotiated.1, frame_rate
        ));

        let recorder = RecordingSink::new(outputs.sinks, logger.for_component("Recorder"));

        Ok(Self {
            catalog,
            shared: CaptureShared {
                device: Arc::new(Mutex::new(device)),
                config: Arc::new(Mutex::new(config)),
                recorder: Arc::new(Mutex::new(recorder)),
                frames: Arc::new(FrameBuffer::new()),
                shutdown: Arc::new(AtomicBool::new(false)),
            },
            capture_thread: None,
            images: outputs.images,
            video_folder: outputs.video_folder,
            photo_folder: outputs.photo_folder,
            logger,
        })
    }

    /// Spawns the capture thread
    ///
    /// # Returns
    /// * `Err(SessionError::CaptureNotRunning)` - the session was shut down
    pub fn start_capture(&mut self, events: Sender<CaptureEvent>) -> Result<(), SessionError> {
        if self.shared.shutdown.load(Ordering::Acquire) {
            return Err(SessionError::CaptureNotRunning);
        }
        if self.capture_thread.is_some() {
            self.logger.warn("[SESSION] Capture thread already running");
            return Ok(());
        }

        let shared = self.shared.clone();
        let logger = self.logger.for_component("Capture");
        let handle = thread::Builder::new()
            .name("capture".to_string())
            .spawn(move || run_capture_loop(shared, events, logger))?;

        self.capture_thread = Some(handle);
        self.logger.info("[SESSION] Capture thread started");
        Ok(())
    }

    /// Switches the camera to the catalog entry `name`
    ///
    /// # Returns
    /// * `Ok((w, h))` - the size the device settled on, now in effect
    /// * `Err(SessionError::RecordingActive)` - a recording is running
    /// * `Err(SessionError::Media)` - the device failed or reported an
    ///   unusable size; it is set back to the previous resolution
    pub fn change_resolution(&self, name: &str) -> Result<(u32, u32), SessionError> {
        let resolution = self.catalog.resolution(name)?;

        // Held so a recording cannot start while the format changes.
        let recorder = lock(&self.shared.recorder);
        if recorder.is_active() {
            return Err(SessionError::RecordingActive);
        }

        let (width, height) = resolution.dimensions();
        let mut device = lock(&self.shared.device);
        let mut config = lock(&self.shared.config);

        let applied = device
            .set_format(width, height)
            .and_then(|()| device.format())
            .and_then(|(w, h)| config.with_resolution(w, h));
        let updated = match applied {
            Ok(updated) => updated,
            Err(e) => {
                // Put the device back to the size the config still holds.
                let (old_width, old_height) = config.resolution();
                if let Err(restore) = device.set_format(old_width, old_height) {
                    self.logger.error(&format!(
                        "[SESSION] Cannot restore {}x{}: {}",
                        old_width, old_height, restore
                    ));
                }
                return Err(e.into());
            }
        };
        *config = updated;
        let negotiated = updated.resolution();
        drop(config);
        drop(device);
        drop(recorder);

        self.logger.info(&format!(
            "[SESSION] Resolution {} applied as {}x{}",
            resolution, negotiated.0, negotiated.1
        ));
        Ok(negotiated)
    }

    /// Sets the target frame rate to the catalog entry `name`
    ///
    /// Capture and render pick it up on their next iteration.
    pub fn change_fps(&self, name: &str) -> Result<f64, SessionError> {
        let frame_rate = self.catalog.frame_rate(name)?;

        let mut config = lock(&self.shared.config);
        *config = config.with_fps(frame_rate.fps())?;

        self.logger
            .info(&format!("[SESSION] Target frame rate {} fps", frame_rate));
        Ok(frame_rate.fps())
    }

    /// Stops the running recording, or starts one
    ///
    /// On failure the recording state is unchanged.
    pub fn toggle_recording(&self) -> Result<RecordingToggle, SessionError> {
        if self.is_recording() {
            self.stop_recording().map(RecordingToggle::Stopped)
        } else {
            self.start_recording().map(RecordingToggle::Started)
        }
    }

    /// Starts recording to `<video_folder>/<unix_ts>.avi`
    ///
    /// Uses the current target frame rate and negotiated resolution.
    pub fn start_recording(&self) -> Result<PathBuf, SessionError> {
        if !self.is_capturing() {
            return Err(SessionError::CaptureNotRunning);
        }

        let config = self.capture_config();
        let path = timestamped_path(&self.video_folder, VIDEO_EXTENSION);
        lock(&self.shared.recorder).start(&path, config.target_fps, config.resolution())?;
        Ok(path)
    }

    /// Stops the running recording, if any
    pub fn stop_recording(&self) -> Result<Option<RecordingSummary>, SessionError> {
        Ok(lock(&self.shared.recorder).stop()?)
    }

    /// Writes the latest frame to `<photo_folder>/<unix_ts>.png`
    ///
    /// # Returns
    /// * `Ok(path)` - the image that was written
    /// * `Err(SessionError::NoFrame)` - nothing captured yet
    pub fn take_snapshot(&self) -> Result<PathBuf, SessionError> {
        let latest = self.shared.frames.latest().ok_or(SessionError::NoFrame)?;

        fs::create_dir_all(&self.photo_folder).map_err(|e| {
            MediaError::Filesystem(format!(
                "Cannot create {}: {}",
                self.photo_folder.display(),
                e
            ))
        })?;

        let path = timestamped_path(&self.photo_folder, IMAGE_EXTENSION);
        self.images.write_image(&path, &latest.frame)?;

        self.logger
            .info(&format!("[SESSION] Snapshot saved to {}", path.display()));
        Ok(path)
    }

    /// Stops capturing and releases the device
    ///
    /// Joins the capture thread, which closes any running recording first.
    /// Safe to call more than once.
    pub fn shutdown(&mut self) {
        let first = !self.shared.shutdown.swap(true, Ordering::AcqRel);

        if let Some(handle) = self.capture_thread.take()
            && handle.join().is_err()
        {
            self.logger.error("[SESSION] Capture thread panicked");
        }

        // Covers a session whose capture thread never ran.
        if let Err(e) = lock(&self.shared.recorder).stop() {
            self.logger
                .error(&format!("[SESSION] Recording not closed cleanly: {}", e));
        }
        if let Err(e) = lock(&self.shared.device).release() {
            self.logger.error(&format!("[SESSION] {}", e));
        }

        if first {
            self.logger.info("[SESSION] Session shut down");
        }
    }

    pub fn capture_config(&self) -> CaptureConfig {
        *lock(&self.shared.config)
    }

    pub fn is_recording(&self) -> bool {
        lock(&self.shared.recorder).is_active()
    }

    /// Elapsed recording time; 0 when not recording
    pub fn recording_elapsed_ms(&self) -> f64 {
        lock(&self.shared.recorder).accumulated_ms()
    }

    /// True while the capture thread is alive
    pub fn is_capturing(&self) -> bool {
        self.capture_thread
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    pub fn frame_buffer(&self) -> &Arc<FrameBuffer> {
        &self.shared.frames
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

impl<D: CaptureDevice + 'static> Drop for SessionController<D> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::testing::{
        FailingImageWriter, MemorySinkFactory, SimulatedCamera, test_frame, test_logger,
    };
    use crate::logic::timing::TimingStats;
    use media::ImageFileWriter;
    use std::path::Path;
    use std::sync::mpsc::channel;
    use std::time::{Duration, Instant};
    use tempfile::{TempDir, tempdir};

    const SUPPORTED: [(u32, u32); 3] = [(320, 240), (640, 480), (1280, 720)];

    fn outputs(dir: &TempDir, sinks: MemorySinkFactory) -> SessionOutputs {
        SessionOutputs {
            sinks: Box::new(sinks),
            images: Box::new(ImageFileWriter),
            video_folder: dir.path().join("videos"),
            photo_folder: dir.path().join("photos"),
        }
    }

    fn session_with(
        camera: SimulatedCamera,
        dir: &TempDir,
        sinks: MemorySinkFactory,
        fps: FrameRate,
    ) -> SessionController<SimulatedCamera> {
        SessionController::new(
            camera,
            Catalog::default(),
            (Resolution::Wide480, fps),
            outputs(dir, sinks),
            test_logger(),
        )
        .unwrap()
    }

    fn session(dir: &TempDir) -> SessionController<SimulatedCamera> {
        session_with(
            SimulatedCamera::new(SUPPORTED.to_vec()),
            dir,
            MemorySinkFactory::new(),
            FrameRate::Fps30,
        )
    }

    fn wait_until(condition: impl Fn() -> bool) -> bool {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if condition() {
                return true;
            }
            thread::sleep(Duration::from_millis(5));
        }
        false
    }

    fn files_in(folder: &Path) -> Vec<PathBuf> {
        fs::read_dir(folder)
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect()
    }

    #[test]
    fn test_initial_resolution_is_negotiated() {
        let dir = tempdir().unwrap();
        let session = session(&dir);

        // 853x480 is not supported; 640x480 is the closest
        let config = session.capture_config();
        assert_eq!(config.resolution(), (640, 480));
        assert_eq!(config.target_fps, 30.0);
        assert!(!session.is_recording());
        assert_eq!(session.recording_elapsed_ms(), 0.0);
    }

    #[test]
    fn test_initial_entry_outside_catalog() {
        let dir = tempdir().unwrap();
        let catalog = Catalog::new(vec![Resolution::Wide720], FrameRate::ALL.to_vec());

        let result = SessionController::new(
            SimulatedCamera::new(SUPPORTED.to_vec()),
            catalog,
            (Resolution::Wide480, FrameRate::Fps30),
            outputs(&dir, MemorySinkFactory::new()),
            test_logger(),
        );
        assert!(matches!(result, Err(SessionError::Config(_))));
    }

    #[test]
    fn test_change_resolution_stores_negotiated_size() {
        let dir = tempdir().unwrap();
        let session = session(&dir);

        let applied = session.change_resolution("1080p (16:9)").unwrap();

        assert_eq!(applied, (1280, 720));
        assert_eq!(session.capture_config().resolution(), (1280, 720));
    }

    #[test]
    fn test_rejected_device_size_restores_format() {
        let dir = tempdir().unwrap();
        let session = session_with(
            SimulatedCamera::new(SUPPORTED.to_vec()).unreadable_at((1280, 720)),
            &dir,
            MemorySinkFactory::new(),
            FrameRate::Fps30,
        );

        let result = session.change_resolution("720p (16:9)");

        assert!(matches!(
            result,
            Err(SessionError::Media(MediaError::Config(_)))
        ));
        assert_eq!(session.capture_config().resolution(), (640, 480));
        assert_eq!(lock(&session.shared.device).format().unwrap(), (640, 480));
    }

    #[test]
    fn test_unknown_resolution_changes_nothing() {
        let dir = tempdir().unwrap();
        let session = session(&dir);

        let result = session.change_resolution("4K (16:9)");

        assert!(matches!(result, Err(SessionError::Config(_))));
        assert_eq!(session.capture_config().resolution(), (640, 480));
    }

    #[test]
    fn test_change_fps() {
        let dir = tempdir().unwrap();
        let session = session(&dir);

        assert_eq!(session.change_fps("59.94").unwrap(), 59.94);
        assert_eq!(session.capture_config().target_fps, 59.94);

        assert!(matches!(session.change_fps("31"), Err(SessionError::Config(_))));
        assert_eq!(session.capture_config().target_fps, 59.94);
    }

    #[test]
    fn test_snapshot_without_frame() {
        let dir = tempdir().unwrap();
        let session = session(&dir);

        assert!(matches!(session.take_snapshot(), Err(SessionError::NoFrame)));
        assert!(!dir.path().join("photos").exists());
    }

    #[test]
    fn test_snapshot_creates_folder_and_one_png() {
        let dir = tempdir().unwrap();
        let session = session(&dir);
        session
            .frame_buffer()
            .publish(test_frame(64, 48), TimingStats::default());

        let before = chrono::Utc::now().timestamp();
        let path = session.take_snapshot().unwrap();
        let after = chrono::Utc::now().timestamp();

        let photos = dir.path().join("photos");
        assert!(photos.is_dir());
        assert_eq!(files_in(&photos), vec![path.clone()]);
        assert_eq!(path.extension().unwrap(), "png");
        let stamp: i64 = path.file_stem().unwrap().to_str().unwrap().parse().unwrap();
        assert!((before..=after).contains(&stamp));
    }

    #[test]
    fn test_snapshot_encoder_failure() {
        let dir = tempdir().unwrap();
        let session = SessionController::new(
            SimulatedCamera::new(SUPPORTED.to_vec()),
            Catalog::default(),
            (Resolution::Wide480, FrameRate::Fps30),
            SessionOutputs {
                images: Box::new(FailingImageWriter),
                ..outputs(&dir, MemorySinkFactory::new())
            },
            test_logger(),
        )
        .unwrap();
        session
            .frame_buffer()
            .publish(test_frame(64, 48), TimingStats::default());

        assert!(matches!(
            session.take_snapshot(),
            Err(SessionError::Media(MediaError::Encoder(_)))
        ));
    }

    #[test]
    fn test_snapshot_folder_blocked_by_file() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("photos");
        fs::write(&blocker, b"not a folder").unwrap();
        let session = SessionController::new(
            SimulatedCamera::new(SUPPORTED.to_vec()),
            Catalog::default(),
            (Resolution::Wide480, FrameRate::Fps30),
            SessionOutputs {
                photo_folder: blocker.join("today"),
                ..outputs(&dir, MemorySinkFactory::new())
            },
            test_logger(),
        )
        .unwrap();
        session
            .frame_buffer()
            .publish(test_frame(64, 48), TimingStats::default());

        assert!(matches!(
            session.take_snapshot(),
            Err(SessionError::Media(MediaError::Filesystem(_)))
        ));
        assert_eq!(files_in(dir.path()), vec![blocker.clone()]);
        assert_eq!(fs::read(&blocker).unwrap(), b"not a folder");
    }

    #[test]
    fn test_encoder_failure_keeps_recording_off() {
        let dir = tempdir().unwrap();
        let sinks = MemorySinkFactory::failing();
        let mut session = session_with(
            SimulatedCamera::new(SUPPORTED.to_vec()),
            &dir,
            sinks.clone(),
            FrameRate::Fps120,
        );
        let (tx, _rx) = channel();
        session.start_capture(tx).unwrap();
        assert!(wait_until(|| session.frame_buffer().published_count() >= 2));

        assert!(matches!(
            session.toggle_recording(),
            Err(SessionError::Media(MediaError::Encoder(_)))
        ));
        assert!(!session.is_recording());
        assert_eq!(session.recording_elapsed_ms(), 0.0);

        // the capture thread keeps running without a recording
        let seen = session.frame_buffer().published_count();
        assert!(wait_until(|| session.frame_buffer().published_count() > seen));
        assert_eq!(session.recording_elapsed_ms(), 0.0);
        assert!(sinks.opened().is_empty());
        assert!(sinks.written().is_empty());

        session.shutdown();
    }

    #[test]
    fn test_recording_needs_running_capture() {
        let dir = tempdir().unwrap();
        let session = session(&dir);

        assert!(matches!(
            session.toggle_recording(),
            Err(SessionError::CaptureNotRunning)
        ));
        assert!(!session.is_recording());
    }

    #[test]
    fn test_record_while_capturing() {
        let dir = tempdir().unwrap();
        let sinks = MemorySinkFactory::new();
        let mut session = session_with(
            SimulatedCamera::new(SUPPORTED.to_vec()),
            &dir,
            sinks.clone(),
            FrameRate::Fps120,
        );
        let (tx, rx) = channel();
        session.start_capture(tx).unwrap();
        assert!(session.is_capturing());
        assert!(wait_until(|| session.frame_buffer().published_count() >= 2));

        let path = match session.toggle_recording().unwrap() {
            RecordingToggle::Started(path) => path,
            other => panic!("expected a start, got {:?}", other),
        };
        assert_eq!(path.parent(), Some(dir.path().join("videos").as_path()));
        assert_eq!(path.extension().unwrap(), "avi");
        assert_eq!(sinks.opened(), vec![(path.clone(), 120.0, (640, 480))]);

        assert!(wait_until(|| sinks.written().len() >= 3));
        assert!(matches!(
            session.change_resolution("720p (16:9)"),
            Err(SessionError::RecordingActive)
        ));
        assert!(wait_until(|| session.recording_elapsed_ms() > 0.0));

        match session.toggle_recording().unwrap() {
            RecordingToggle::Stopped(Some(summary)) => {
                assert_eq!(summary.path, path);
                assert!(summary.frames_written >= 3);
            }
            other => panic!("expected a stop, got {:?}", other),
        }
        assert!(!session.is_recording());
        assert_eq!(session.recording_elapsed_ms(), 0.0);

        session.shutdown();
        assert!(!session.is_capturing());
        let events: Vec<CaptureEvent> = rx.try_iter().collect();
        assert!(matches!(
            events.last(),
            Some(CaptureEvent::Stopped { recording: None, .. })
        ));
    }

    #[test]
    fn test_shutdown_closes_recording_and_releases_device() {
        let dir = tempdir().unwrap();
        let sinks = MemorySinkFactory::new();
        let camera = SimulatedCamera::new(SUPPORTED.to_vec());
        let released = camera.released_flag();
        let mut session = session_with(camera, &dir, sinks.clone(), FrameRate::Fps120);
        let (tx, rx) = channel();
        session.start_capture(tx).unwrap();
        session.start_recording().unwrap();

        session.shutdown();
        session.shutdown();

        assert!(released.load(Ordering::SeqCst));
        assert_eq!(sinks.closed(), 1);
        assert!(!session.is_recording());
        assert!(matches!(
            rx.try_iter().last(),
            Some(CaptureEvent::Stopped { recording: Some(_), .. })
        ));
        assert!(matches!(
            session.start_capture(channel().0),
            Err(SessionError::CaptureNotRunning)
        ));
    }

    #[test]
    fn test_device_loss_is_reported() {
        let dir = tempdir().unwrap();
        let mut session = session_with(
            SimulatedCamera::new(SUPPORTED.to_vec()).lose_after(3),
            &dir,
            MemorySinkFactory::new(),
            FrameRate::Fps120,
        );
        let (tx, rx) = channel();
        session.start_capture(tx).unwrap();

        let event = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(matches!(event, CaptureEvent::DeviceLost(_)));
        assert!(wait_until(|| !session.is_capturing()));
        assert!(matches!(
            session.toggle_recording(),
            Err(SessionError::CaptureNotRunning)
        ));
        // the last frame stays available
        assert!(session.take_snapshot().is_ok());
    }
}
