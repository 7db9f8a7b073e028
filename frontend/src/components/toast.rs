//! Toast notifications
//!
//! Short-lived messages in the bottom-right corner: failed snapshots or
//! recordings, saved files, a lost camera.

use egui::{Align2, Color32, RichText, Stroke, vec2};
use std::time::{Duration, Instant};

const DEFAULT_LIFETIME: Duration = Duration::from_secs(4);

/// Toast notification type
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ToastType {
    Error,
    Warning,
    Success,
    Info,
}

impl ToastType {
    fn accent(&self) -> Color32 {
        match self {
            ToastType::Error => Color32::from_rgb(235, 77, 75),
            ToastType::Warning => Color32::from_rgb(240, 180, 70),
            ToastType::Success => Color32::from_rgb(106, 176, 76),
            ToastType::Info => Color32::from_rgb(72, 126, 176),
        }
    }

    fn title(&self) -> &'static str {
        match self {
            ToastType::Error => "Error",
            ToastType::Warning => "Warning",
            ToastType::Success => "Saved",
            ToastType::Info => "Info",
        }
    }
}

/// Toast notification for displaying messages to users
#[derive(Clone, Debug)]
pub struct Toast {
    pub message: String,
    pub toast_type: ToastType,
    created_at: Instant,
    lifetime: Duration,
}

impl Toast {
    pub fn new(message: String, toast_type: ToastType) -> Self {
        Self {
            message,
            toast_type,
            created_at: Instant::now(),
            lifetime: DEFAULT_LIFETIME,
        }
    }

    pub fn error(message: String) -> Self {
        Self::new(message, ToastType::Error)
    }

    pub fn warning(message: String) -> Self {
        Self::new(message, ToastType::Warning)
    }

    pub fn success(message: String) -> Self {
        Self::new(message, ToastType::Success)
    }

    pub fn info(message: String) -> Self {
        Self::new(message, ToastType::Info)
    }

    /// Keeps the toast on screen until dismissed
    pub fn sticky(mut self) -> Self {
        self.lifetime = Duration::MAX;
        self
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() > self.lifetime
    }

    /// Renders the toast; returns true once it should be removed
    pub fn show(&self, ctx: &egui::Context) -> bool {
        if self.is_expired() {
            return true;
        }

        let accent = self.toast_type.accent();
        let mut dismissed = false;

        egui::Window::new("toast")
            .title_bar(false)
            .resizable(false)
            .collapsible(false)
            .anchor(Align2::RIGHT_BOTTOM, vec2(-16.0, -56.0))
            .fixed_size(vec2(300.0, 0.0))
            .frame(
                egui::Frame::window(&ctx.style())
                    .fill(Color32::from_rgba_premultiplied(20, 20, 20, 235))
                    .stroke(Stroke::new(1.0, accent))
                    .corner_radius(4.0),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(self.toast_type.title()).strong().color(accent));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("x").clicked() {
                            dismissed = true;
                        }
                    });
                });
                ui.label(RichText::new(&self.message).color(Color32::WHITE));
            });

        // keep repainting so expiry is noticed without input
        ctx.request_repaint_after(Duration::from_millis(250));

        dismissed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_toast_is_live() {
        let toast = Toast::error("Camera lost".to_string());
        assert!(!toast.is_expired());
        assert_eq!(toast.toast_type, ToastType::Error);
    }

    #[test]
    fn test_sticky_never_expires() {
        let toast = Toast::info("x".to_string()).sticky();
        assert_eq!(toast.lifetime, Duration::MAX);
        assert!(!toast.is_expired());
    }

    #[test]
    fn test_expiry() {
        let mut toast = Toast::success("photos/1.png".to_string());
        toast.lifetime = Duration::ZERO;
        std::thread::sleep(Duration::from_millis(2));
        assert!(toast.is_expired());
    }
}
