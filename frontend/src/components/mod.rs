//! Reusable UI components

mod button;
pub mod controls;
pub mod overlay;
mod toast;

pub use button::{Button, ButtonVariant};
pub use controls::ControlsView;
pub use overlay::OverlayData;
pub use toast::Toast;
