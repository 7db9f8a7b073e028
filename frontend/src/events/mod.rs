mod capture_event;
mod ui_command;

pub use capture_event::CaptureEvent;
pub use ui_command::UiCommand;
