//! Camera preview and render tick
//!
//! The central panel shows the latest captured frame letterboxed to the
//! display surface. Texture and overlay are refreshed only when the render
//! timer fires, once per target frame interval. A resized surface is picked
//! up on the next tick; until then the old texture is drawn unscaled.

use super::state::App;
use crate::components::{OverlayData, overlay};
use crate::logic::rgb_to_color_image;
use egui::{Color32, ColorImage, Rect, TextureOptions, pos2};
use media::{VideoFrame, frame_to_rgb, letterbox};
use std::time::Instant;

impl App {
    pub(super) fn render_preview(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(Color32::BLACK))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                let pixels_per_point = ctx.pixels_per_point();
                self.capture_viewport(rect, pixels_per_point);

                let now = Instant::now();
                if self.render_timer.poll(now) {
                    self.render_tick(ctx);
                    let interval = self.session.capture_config().target_interval();
                    self.render_timer.rearm(now, interval);
                }

                match &self.preview_texture {
                    Some(texture) => {
                        let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
                        let area = Rect::from_center_size(
                            rect.center(),
                            texture.size_vec2() / pixels_per_point,
                        );
                        ui.painter().image(texture.id(), area, uv, Color32::WHITE);
                    }
                    None => {
                        ui.centered_and_justified(|ui| {
                            ui.label("Waiting for camera...");
                        });
                    }
                }

                if let Some(data) = &self.overlay {
                    overlay::show(ui.painter(), rect, data);
                }
            });
    }

    /// Tracks the display surface size in pixels
    fn capture_viewport(&mut self, rect: Rect, pixels_per_point: f32) {
        let Some(size) = viewport_pixels(rect, pixels_per_point) else {
            return;
        };
        if self.viewport == Some(size) {
            return;
        }
        self.viewport = Some(size);
        // Letterbox the current frame again for the new size.
        self.shown_frame = None;
        self.logger
            .info(&format!("[RENDER] Viewport {}x{}", size.0, size.1));
    }

    /// Uploads the newest frame and refreshes the overlay
    fn render_tick(&mut self, ctx: &egui::Context) {
        let Some(viewport) = self.viewport else {
            return;
        };
        let frames = self.session.frame_buffer().clone();
        let drop_flagged = frames.take_dropped();
        let Some(buffered) = frames.latest() else {
            return;
        };

        if self.shown_frame != Some(buffered.sequence) {
            match display_image(&buffered.frame, viewport) {
                Ok(image) => {
                    match &mut self.preview_texture {
                        Some(texture) => texture.set(image, TextureOptions::LINEAR),
                        None => {
                            self.preview_texture =
                                Some(ctx.load_texture("preview", image, TextureOptions::LINEAR));
                        }
                    }
                    self.shown_frame = Some(buffered.sequence);
                }
                Err(e) => self.logger.warn(&format!("[RENDER] {}", e)),
            }
        }

        let config = self.session.capture_config();
        self.overlay = Some(OverlayData {
            stats: buffered.stats,
            drop_flagged,
            resolution: config.resolution(),
            target_fps: config.target_fps,
            recording_ms: self
                .session
                .is_recording()
                .then(|| self.session.recording_elapsed_ms()),
        });
    }
}

/// Pixel size of `rect`; `None` while minimised or not laid out
pub fn viewport_pixels(rect: Rect, pixels_per_point: f32) -> Option<(u32, u32)> {
    let width = (rect.width() * pixels_per_point).round() as u32;
    let height = (rect.height() * pixels_per_point).round() as u32;
    (width > 0 && height > 0).then_some((width, height))
}

/// Letterboxes `frame` to `viewport` and converts it for upload
pub fn display_image(frame: &VideoFrame, viewport: (u32, u32)) -> media::Result<ColorImage> {
    let fitted = letterbox(frame, viewport)?;
    let rgb = frame_to_rgb(&fitted)?;
    Ok(rgb_to_color_image(rgb))
}
