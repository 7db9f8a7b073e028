//! Control Bar
//!
//! REC/STOP and PIC buttons plus the resolution and frame-rate selectors.

use super::button::{Button, ButtonVariant};
use crate::config::{Catalog, FrameRate, Resolution};
use crate::events::UiCommand;
use egui::Vec2;

const BUTTON_SIZE: Vec2 = Vec2::new(64.0, 28.0);
const SELECTOR_WIDTH: f32 = 130.0;

/// What the control bar displays
pub struct ControlsView<'a> {
    pub catalog: &'a Catalog,
    pub recording: bool,
    /// Camera is delivering frames
    pub capturing: bool,
    pub resolution: Resolution,
    pub frame_rate: FrameRate,
}

/// Renders the control bar and returns the command the user issued
pub fn show(ui: &mut egui::Ui, view: &ControlsView<'_>) -> Option<UiCommand> {
    let mut command = None;

    ui.horizontal_centered(|ui| {
        let (label, variant) = if view.recording {
            ("STOP", ButtonVariant::Secondary)
        } else {
            ("REC", ButtonVariant::Danger)
        };
        if Button::new(label)
            .variant(variant)
            .min_size(BUTTON_SIZE)
            .enabled(view.capturing || view.recording)
            .show(ui)
            .clicked()
        {
            command = Some(UiCommand::ToggleRecording);
        }

        if Button::new("PIC")
            .variant(ButtonVariant::Primary)
            .min_size(BUTTON_SIZE)
            .show(ui)
            .clicked()
        {
            command = Some(UiCommand::TakeSnapshot);
        }

        ui.add_space(12.0);

        // Resolution is fixed for the length of a recording.
        ui.add_enabled_ui(!view.recording, |ui| {
            let mut resolution = view.resolution;
            egui::ComboBox::from_id_salt("resolution")
                .width(SELECTOR_WIDTH)
                .selected_text(resolution.name())
                .show_ui(ui, |ui| {
                    for entry in view.catalog.resolutions() {
                        ui.selectable_value(&mut resolution, *entry, entry.name());
                    }
                });
            if resolution != view.resolution {
                command = Some(UiCommand::ChangeResolution(resolution));
            }
        });

        let mut frame_rate = view.frame_rate;
        egui::ComboBox::from_id_salt("frame_rate")
            .width(SELECTOR_WIDTH / 2.0)
            .selected_text(format!("{} fps", frame_rate))
            .show_ui(ui, |ui| {
                for entry in view.catalog.frame_rates() {
                    ui.selectable_value(&mut frame_rate, *entry, entry.name());
                }
            });
        if frame_rate != view.frame_rate {
            command = Some(UiCommand::ChangeFrameRate(frame_rate));
        }
    });

    command
}
