//! Button Component
//!
//! Flat, filled buttons for the control bar.

use egui::{Color32, FontId, RichText, Vec2};

/// Button variant styles
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ButtonVariant {
    /// Blue, for snapshots
    Primary,
    /// Grey, for stopping
    Secondary,
    /// Red, for recording
    Danger,
}

impl ButtonVariant {
    fn color(&self) -> Color32 {
        match self {
            ButtonVariant::Primary => Color32::from_rgb(41, 128, 185),
            ButtonVariant::Secondary => Color32::from_rgb(99, 110, 114),
            ButtonVariant::Danger => Color32::from_rgb(235, 77, 75),
        }
    }
}

/// A styled button component with configurable appearance
pub struct Button {
    text: String,
    text_size: f32,
    min_size: Option<Vec2>,
    variant: ButtonVariant,
    enabled: bool,
}

impl Button {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            text: label.into(),
            text_size: 14.0,
            min_size: None,
            variant: ButtonVariant::Primary,
            enabled: true,
        }
    }

    pub fn min_size(mut self, size: Vec2) -> Self {
        self.min_size = Some(size);
        self
    }

    pub fn variant(mut self, variant: ButtonVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Disabled buttons are drawn dimmed and never report clicks
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Renders the button and returns the response
    pub fn show(self, ui: &mut egui::Ui) -> egui::Response {
        let label = RichText::new(&self.text)
            .font(FontId::proportional(self.text_size))
            .color(Color32::WHITE);

        let mut button = egui::Button::new(label)
            .fill(self.variant.color())
            .corner_radius(2.0);
        if let Some(size) = self.min_size {
            button = button.min_size(size);
        }

        ui.add_enabled(self.enabled, button)
    }
}
