//! Thread-safe asynchronous file logger shared by the camdeck crates.
//!
//! Every [`Logger`] clone and every component logger derived through
//! [`Logger::for_component`] feeds the same writer thread, so capture,
//! recording and UI messages land in one file in arrival order.

pub mod error;
mod log_level;
mod log_message;
mod log_writer;
mod logger;

pub use error::{LoggingError, Result};
pub use log_level::LogLevel;
pub use logger::Logger;
