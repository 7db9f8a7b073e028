//! Application Module - MVU Controller
//!
//! This module implements the Controller layer of the MVU architecture.
//! It coordinates between the view layer (components) and the capture
//! session running on its own thread.
//!
//! # Structure
//!
//! - `state.rs`: Application state definition and MVU loop
//! - `preview.rs`: Render tick, preview texture and overlay
//! - `ui_handler.rs`: Command dispatcher for UI actions
//! - `capture_handler.rs`: Processes events from the capture thread
//!
//! # Communication Flow
//!
//! ```text
//! View (components) --> UiCommand --> ui_handler --> SessionController
//!
//! Capture thread --> FrameBuffer --> preview (render tick)
//!                \--> CaptureEvent --> capture_handler --> State update
//! ```

mod capture_handler;
mod preview;
mod state;
mod ui_handler;

pub use state::App;
