//! Camera Capture Thread
//!
//! Reads frames from the device at the configured rate, feeds the active
//! recording and publishes each frame with its timing to the frame buffer.
//! Runs until the shutdown flag is raised or the device is lost.

use super::frame_buffer::FrameBuffer;
use super::recording::RecordingSink;
use super::timing::FrameTimer;
use super::utils::lock;
use crate::events::CaptureEvent;
use logging::Logger;
use media::{CaptureConfig, CaptureDevice};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

/// Pause after a failed read before trying again
pub const RETRY_DELAY: Duration = Duration::from_millis(500);

/// State shared between the capture thread and the session controller
pub struct CaptureShared<D> {
    pub device: Arc<Mutex<D>>,
    pub config: Arc<Mutex<CaptureConfig>>,
    pub recorder: Arc<Mutex<RecordingSink>>,
    pub frames: Arc<FrameBuffer>,
    pub shutdown: Arc<AtomicBool>,
}

impl<D> Clone for CaptureShared<D> {
    fn clone(&self) -> Self {
        Self {
            device: self.device.clone(),
            config: self.config.clone(),
            recorder: self.recorder.clone(),
            frames: self.frames.clone(),
            shutdown: self.shutdown.clone(),
        }
    }
}

/// Runs the capture loop on the calling thread.
///
/// Recoverable read errors are logged and retried after [`RETRY_DELAY`].
/// A lost device ends the loop with [`CaptureEvent::DeviceLost`]. On exit
/// the running recording is closed before the device is released, then
/// [`CaptureEvent::Stopped`] is sent.
pub fn run_capture_loop<D: CaptureDevice>(
    shared: CaptureShared<D>,
    evt_tx: Sender<CaptureEvent>,
    logger: Logger,
) {
    let mut timer = FrameTimer::new(lock(&shared.config).target_fps);
    let mut cycle_start = Instant::now();
    let mut previous_cycle_ms = 0.0;
    let mut frames: u64 = 0;
    let mut write_failures: u64 = 0;

    logger.info("[CAPTURE] Capture loop started");

    while !shared.shutdown.load(Ordering::Acquire) {
        timer.set_target_fps(lock(&shared.config).target_fps);

        let read = lock(&shared.device).read_frame();
        let frame = match read {
            Ok(frame) => frame,
            Err(e) if e.is_recoverable() => {
                logger.warn(&format!("[CAPTURE] {}, retrying", e));
                thread::sleep(RETRY_DELAY);
                cycle_start = Instant::now();
                continue;
            }
            Err(e) => {
                logger.error(&format!("[CAPTURE] {}", e));
                let _ = evt_tx.send(CaptureEvent::DeviceLost(e.to_string()));
                break;
            }
        };
        frames += 1;

        {
            let mut recorder = lock(&shared.recorder);
            if recorder.is_active() {
                match recorder.write_frame(&frame) {
                    Ok(()) => write_failures = 0,
                    Err(e) => {
                        write_failures += 1;
                        // one line per run of failures, not one per frame
                        if write_failures == 1 {
                            logger.warn(&format!("[CAPTURE] Recording write failed: {}", e));
                        }
                    }
                }
                recorder.advance(previous_cycle_ms);
            }
        }

        let pacing = timer.pace(millis(cycle_start.elapsed()));
        shared.frames.publish(frame, timer.stats());
        if pacing.is_drop() {
            logger.debug(&format!(
                "[CAPTURE] Frame {} over budget ({:.1} ms target)",
                frames,
                timer.target_interval_ms()
            ));
        }
        thread::sleep(pacing.delay());

        let now = Instant::now();
        previous_cycle_ms = millis(now - cycle_start);
        timer.complete_cycle(previous_cycle_ms);
        cycle_start = now;
    }

    let recording = match lock(&shared.recorder).stop() {
        Ok(summary) => summary,
        Err(e) => {
            logger.error(&format!("[CAPTURE] Recording not closed cleanly: {}", e));
            None
        }
    };
    if let Err(e) = lock(&shared.device).release() {
        logger.error(&format!("[CAPTURE] {}", e));
    }

    logger.info(&format!("[CAPTURE] Capture loop stopped after {} frames", frames));
    let _ = evt_tx.send(CaptureEvent::Stopped { frames, recording });
}

fn millis(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}
