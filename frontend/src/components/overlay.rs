//! Capture Metrics Overlay
//!
//! Timing lines in the top-left corner of the preview and, while
//! recording, a red dot with the elapsed time in the top-right corner.

use crate::logic::TimingStats;
use egui::{Align2, Color32, FontId, Painter, Rect, pos2, vec2};

const TEXT_COLOR: Color32 = Color32::from_rgb(149, 175, 192);
const ALERT_COLOR: Color32 = Color32::from_rgb(235, 77, 75);
const FONT_SIZE: f32 = 13.0;
const MARGIN: f32 = 10.0;
const LINE_SPACING: f32 = 16.0;
const DOT_RADIUS: f32 = 5.0;
const BOX_PADDING: f32 = 4.0;

/// Everything the overlay shows for one render tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayData {
    pub stats: TimingStats,
    /// A frame was dropped since the previous tick
    pub drop_flagged: bool,
    pub resolution: (u32, u32),
    pub target_fps: f64,
    /// Elapsed recording time, `None` when not recording
    pub recording_ms: Option<f64>,
}

pub fn current_line(stats: &TimingStats) -> String {
    format!(
        "CURRENT: {:.0}MS   {}FPS",
        stats.current_interval_ms, stats.current_fps
    )
}

pub fn target_line(target_interval_ms: f64, target_fps: f64) -> String {
    format!("TARGET:  {:.0}MS   {}FPS", target_interval_ms, target_fps)
}

pub fn settings_line(resolution: (u32, u32), target_fps: f64) -> String {
    format!("{}x{} {}FPS", resolution.0, resolution.1, target_fps)
}

/// Formats elapsed milliseconds as `HH:MM:SS.ffffff`
pub fn format_record_timer(elapsed_ms: f64) -> String {
    let total_us = (elapsed_ms.max(0.0) * 1000.0).round() as u64;
    let micros = total_us % 1_000_000;
    let total_secs = total_us / 1_000_000;

    format!(
        "{:02}:{:02}:{:02}.{:06}",
        total_secs / 3600,
        (total_secs / 60) % 60,
        total_secs % 60,
        micros
    )
}

/// Paints the overlay over the preview area `rect`
pub fn show(painter: &Painter, rect: Rect, data: &OverlayData) {
    let font = FontId::monospace(FONT_SIZE);
    let current_color = if data.drop_flagged {
        ALERT_COLOR
    } else {
        TEXT_COLOR
    };

    let lines = [
        (current_line(&data.stats), current_color),
        (
            target_line(1000.0 / data.target_fps, data.target_fps),
            TEXT_COLOR,
        ),
        (settings_line(data.resolution, data.target_fps), TEXT_COLOR),
    ];
    for (row, (text, color)) in lines.into_iter().enumerate() {
        let pos = rect.left_top() + vec2(MARGIN, MARGIN + row as f32 * LINE_SPACING);
        painter.text(pos, Align2::LEFT_TOP, text, font.clone(), color);
    }

    if let Some(elapsed_ms) = data.recording_ms {
        show_record_indicator(painter, rect, elapsed_ms, font);
    }
}

fn show_record_indicator(painter: &Painter, rect: Rect, elapsed_ms: f64, font: FontId) {
    let galley = painter.layout_no_wrap(format_record_timer(elapsed_ms), font, ALERT_COLOR);

    let dot_center = pos2(
        rect.right() - MARGIN - DOT_RADIUS,
        rect.top() + MARGIN + galley.size().y / 2.0,
    );
    let text_pos = pos2(
        dot_center.x - DOT_RADIUS - BOX_PADDING * 2.0 - galley.size().x,
        rect.top() + MARGIN,
    );

    let backing = Rect::from_min_max(
        text_pos - vec2(BOX_PADDING, BOX_PADDING),
        pos2(
            dot_center.x + DOT_RADIUS + BOX_PADDING,
            text_pos.y + galley.size().y + BOX_PADDING,
        ),
    );
    painter.rect_filled(backing, 3.0, Color32::BLACK);
    painter.circle_filled(dot_center, DOT_RADIUS, ALERT_COLOR);
    painter.galley(text_pos, galley, ALERT_COLOR);
}
