//! Frame pacing and rate measurement
//!
//! [`FrameTimer`] decides how long the capture loop sleeps after each
//! frame and keeps the measured rate shown in the overlay. [`RenderTimer`]
//! schedules display refreshes on the UI thread.

use std::time::{Duration, Instant};

/// Length of the window over which the measured frame rate is counted
const FPS_WINDOW_MS: f64 = 1000.0;

/// Shortest pause between two iterations, used when a frame ran late
pub const MIN_YIELD: Duration = Duration::from_millis(1);

/// Snapshot of capture timing for one iteration
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TimingStats {
    /// Duration of the last full capture cycle
    pub current_interval_ms: f64,
    pub target_interval_ms: f64,
    /// Frames counted in the last completed one-second window
    pub current_fps: u32,
    /// This iteration took longer than the target interval
    pub dropped: bool,
}

/// What the capture loop should do after handling a frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pacing {
    /// On time; wait out the rest of the interval
    Sleep(Duration),
    /// Over budget; yield briefly and go straight to the next frame
    Dropped,
}

impl Pacing {
    /// How long to pause before the next iteration
    pub fn delay(&self) -> Duration {
        match self {
            Pacing::Sleep(remaining) => *remaining,
            Pacing::Dropped => MIN_YIELD,
        }
    }

    pub fn is_drop(&self) -> bool {
        matches!(self, Pacing::Dropped)
    }
}

/// Paces the capture loop and measures the achieved frame rate
#[derive(Debug, Clone)]
pub struct FrameTimer {
    target_interval_ms: f64,
    last_cycle_ms: f64,
    window_ms: f64,
    window_frames: u32,
    current_fps: u32,
    dropped: bool,
}

impl FrameTimer {
    /// Creates a timer for `target_fps` (must be positive)
    pub fn new(target_fps: f64) -> Self {
        Self {
            target_interval_ms: 1000.0 / target_fps,
            last_cycle_ms: 0.0,
            window_ms: 0.0,
            window_frames: 0,
            current_fps: 0,
            dropped: false,
        }
    }

    pub fn set_target_fps(&mut self, target_fps: f64) {
        self.target_interval_ms = 1000.0 / target_fps;
    }

    pub fn target_interval_ms(&self) -> f64 {
        self.target_interval_ms
    }

    /// Decides the pause after an iteration that has taken `elapsed_ms` so far
    ///
    /// Below the target interval the remainder is slept; at or above it the
    /// iteration counts as a dropped frame. The sleep is never negative.
    pub fn pace(&mut self, elapsed_ms: f64) -> Pacing {
        let remaining_ms = self.target_interval_ms - elapsed_ms;
        let pacing = if remaining_ms > 0.0 {
            Pacing::Sleep(Duration::from_secs_f64(remaining_ms / 1000.0))
        } else {
            Pacing::Dropped
        };
        self.dropped = pacing.is_drop();
        pacing
    }

    /// Records the full duration of a finished cycle (work plus pause)
    pub fn complete_cycle(&mut self, cycle_ms: f64) {
        let cycle_ms = cycle_ms.max(0.0);
        self.last_cycle_ms = cycle_ms;
        self.window_ms += cycle_ms;
        self.window_frames += 1;

        if self.window_ms > FPS_WINDOW_MS {
            self.current_fps = self.window_frames;
            self.window_ms = 0.0;
            self.window_frames = 0;
        }
    }

    pub fn stats(&self) -> TimingStats {
        TimingStats {
            current_interval_ms: self.last_cycle_ms,
            target_interval_ms: self.target_interval_ms,
            current_fps: self.current_fps,
            dropped: self.dropped,
        }
    }
}

/// Cooperative fixed-rate timer for the render tick
///
/// egui has no timers of its own; the app polls this every `update` and
/// asks for a repaint after [`remaining`](RenderTimer::remaining).
#[derive(Debug, Clone)]
pub struct RenderTimer {
    next_due: Option<Instant>,
}

impl RenderTimer {
    /// Creates a timer that is due immediately
    pub fn new(now: Instant) -> Self {
        Self {
            next_due: Some(now),
        }
    }

    /// True when a tick is due
    pub fn poll(&self, now: Instant) -> bool {
        self.next_due.is_some_and(|due| now >= due)
    }

    /// Schedules the next tick `interval` after `now`; ignored once cancelled
    pub fn rearm(&mut self, now: Instant, interval: Duration) {
        if self.next_due.is_some() {
            self.next_due = Some(now + interval);
        }
    }

    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    /// Time until the next tick, `None` when cancelled
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.next_due
            .map(|due| due.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_only_on_late_iteration() {
        let mut timer = FrameTimer::new(30.0);

        let drops: Vec<bool> = [20.0, 20.0, 50.0, 20.0]
            .into_iter()
            .map(|elapsed| timer.pace(elapsed).is_drop())
            .collect();

        assert_eq!(drops, vec![false, false, true, false]);
    }

    #[test]
    fn test_sleep_fills_remaining_interval() {
        let mut timer = FrameTimer::new(50.0);

        let pacing = timer.pace(5.0);
        assert!(matches!(pacing, Pacing::Sleep(_)));
        assert!((pacing.delay().as_secs_f64() - 0.015).abs() < 1e-6);
    }

    #[test]
    fn test_sleep_never_negative() {
        let mut timer = FrameTimer::new(30.0);

        for elapsed in [33.4, 100.0, 1e9, f64::INFINITY] {
            let pacing = timer.pace(elapsed);
            assert!(pacing.is_drop());
            assert_eq!(pacing.delay(), MIN_YIELD);
        }
        // exactly on target counts as late
        let mut timer = FrameTimer::new(10.0);
        assert!(timer.pace(100.0).is_drop());
    }

    #[test]
    fn test_stats_carry_drop_flag() {
        let mut timer = FrameTimer::new(30.0);

        timer.pace(50.0);
        assert!(timer.stats().dropped);
        timer.pace(10.0);
        assert!(!timer.stats().dropped);
    }

    #[test]
    fn test_fps_counted_per_window() {
        let mut timer = FrameTimer::new(10.0);
        assert_eq!(timer.stats().current_fps, 0);

        // ten 100 ms cycles fill the window exactly; the eleventh exceeds it
        for _ in 0..10 {
            timer.complete_cycle(100.0);
        }
        assert_eq!(timer.stats().current_fps, 0);

        timer.complete_cycle(100.0);
        assert_eq!(timer.stats().current_fps, 11);
        assert_eq!(timer.stats().current_interval_ms, 100.0);
    }

    #[test]
    fn test_target_change() {
        let mut timer = FrameTimer::new(30.0);
        timer.set_target_fps(60.0);

        assert!((timer.target_interval_ms() - 16.666).abs() < 0.01);
        assert!(timer.pace(20.0).is_drop());
    }

    #[test]
    fn test_render_timer_rearm_and_cancel() {
        let start = Instant::now();
        let mut timer = RenderTimer::new(start);
        assert!(timer.poll(start));

        timer.rearm(start, Duration::from_millis(40));
        assert!(!timer.poll(start + Duration::from_millis(39)));
        assert!(timer.poll(start + Duration::from_millis(40)));
        assert_eq!(
            timer.remaining(start + Duration::from_millis(10)),
            Some(Duration::from_millis(30))
        );
        assert_eq!(
            timer.remaining(start + Duration::from_millis(90)),
            Some(Duration::ZERO)
        );

        timer.cancel();
        assert_eq!(timer.remaining(start), None);
        assert!(!timer.poll(start + Duration::from_secs(5)));
        timer.rearm(start, Duration::from_millis(40));
        assert_eq!(timer.remaining(start), None);
    }
}
