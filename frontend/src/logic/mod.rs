//! Capture session logic
//!
//! The capture thread, the frame buffer it publishes into, the recording
//! sink it feeds, and the session controller the UI drives them through.

mod capture_thread;
mod error;
mod frame_buffer;
mod recording;
mod session;
mod timing;
mod utils;

#[cfg(test)]
mod testing;

pub use error::SessionError;
pub use recording::RecordingSummary;
pub use session::{RecordingToggle, SessionController, SessionOutputs};
pub use timing::{RenderTimer, TimingStats};
pub use utils::rgb_to_color_image;
