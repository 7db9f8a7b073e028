//! Application State
//!
//! This module defines the main application state and the MVU loop.
//!
//! # MVU Loop
//!
//! The `eframe::App::update()` implementation follows this flow:
//! 1. Process events from the capture thread (non-blocking)
//! 2. Render the control bar and the preview (view)
//! 3. Handle the UI command from the view (session changes)
//! 4. Ask for the next repaint when the render timer is due

use crate::components::{ControlsView, OverlayData, Toast, controls};
use crate::config::{AppConfig, FrameRate, Resolution};
use crate::events::{CaptureEvent, UiCommand};
use crate::logic::{RenderTimer, SessionController};
use egui::TextureHandle;
use logging::Logger;
use media::Camera;
use std::sync::mpsc::Receiver;
use std::time::Instant;

const CONTROLS_HEIGHT: f32 = 44.0;

/// Main application state - MVU Controller
pub struct App {
    // Logger
    pub(super) logger: Logger,

    // Capture session
    pub(super) session: SessionController<Camera>,
    pub(super) capture_evt_rx: Receiver<CaptureEvent>,
    pub(super) camera_lost: bool,

    // Preview
    pub(super) render_timer: RenderTimer,
    /// Display surface size in pixels, updated when the panel resizes
    pub(super) viewport: Option<(u32, u32)>,
    pub(super) preview_texture: Option<TextureHandle>,
    /// Sequence number of the frame currently in the texture
    pub(super) shown_frame: Option<u64>,
    pub(super) overlay: Option<OverlayData>,

    // UI State
    pub(super) selected_resolution: Resolution,
    pub(super) selected_frame_rate: FrameRate,
    pub(super) current_toast: Option<Toast>,
}

impl App {
    /// Creates the app around a session whose capture thread is running
    pub fn new(
        config: &AppConfig,
        logger: Logger,
        session: SessionController<Camera>,
        capture_evt_rx: Receiver<CaptureEvent>,
    ) -> Self {
        logger.info(&format!(
            "[APP] Starting with {} @ {} fps, videos in {}, photos in {}",
            config.initial_resolution,
            config.initial_fps,
            config.video_folder.display(),
            config.photo_folder.display()
        ));

        Self {
            logger,
            session,
            capture_evt_rx,
            camera_lost: false,
            render_timer: RenderTimer::new(Instant::now()),
            viewport: None,
            preview_texture: None,
            shown_frame: None,
            overlay: None,
            selected_resolution: config.initial_resolution,
            selected_frame_rate: config.initial_fps,
            current_toast: None,
        }
    }

    /// Shows an error toast and logs it
    pub(super) fn show_error(&mut self, message: String) {
        self.logger.error(&format!("[UI] {}", message));
        self.current_toast = Some(Toast::error(message));
    }

    fn render_controls(&mut self, ctx: &egui::Context) -> Option<UiCommand> {
        let view = ControlsView {
            catalog: self.session.catalog(),
            recording: self.session.is_recording(),
            capturing: self.session.is_capturing() && !self.camera_lost,
            resolution: self.selected_resolution,
            frame_rate: self.selected_frame_rate,
        };

        egui::TopBottomPanel::bottom("controls")
            .exact_height(CONTROLS_HEIGHT)
            .show(ctx, |ui| controls::show(ui, &view))
            .inner
    }

    fn render_toast(&mut self, ctx: &egui::Context) {
        if let Some(toast) = &self.current_toast
            && toast.show(ctx)
        {
            self.current_toast = None;
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // 1. Process all pending capture events
        while let Ok(event) = self.capture_evt_rx.try_recv() {
            self.handle_capture_event(event);
        }

        // 2. Render the view and collect UI commands
        let ui_command = self.render_controls(ctx);
        self.render_preview(ctx);

        // 3. Process UI command (if any)
        if let Some(command) = ui_command {
            self.handle_ui_command(command);
        }

        // 4. Render toast notification (if any)
        self.render_toast(ctx);

        // 5. Wake up for the next render tick
        if let Some(remaining) = self.render_timer.remaining(Instant::now()) {
            ctx.request_repaint_after(remaining);
        }
    }

    /// Called when the app is about to close
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.logger.info("[APP] Application shutting down...");

        self.render_timer.cancel();
        self.session.shutdown();

        self.logger.info("[APP] Cleanup complete, goodbye!");
    }
}
