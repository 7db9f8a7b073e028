//! Thread-safe asynchronous logger.

use crate::error::Result;
use crate::log_level::LogLevel;
use crate::log_message::LogMessage;
use crate::log_writer::spawn_writer_thread;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{Sender, channel};

/// Non-blocking logger.
///
/// Cheap to clone; all clones and component loggers share one writer thread.
///
/// # Examples
///
/// ```no_run
/// use logging::{Logger, LogLevel};
///
/// let logger = Logger::new("camdeck.log".into(), LogLevel::Info).unwrap();
/// let capture = logger.for_component("Capture");
/// capture.info("[CAPTURE] Loop started");
/// ```
#[derive(Clone)]
pub struct Logger {
    sender: Sender<LogMessage>,
    level: LogLevel,
    component: Option<Arc<str>>,
    console_output: bool,
}

impl Logger {
    /// Creates a logger writing to `log_path` (created if missing).
    ///
    /// # Errors
    ///
    /// Returns error if the log file cannot be created or opened.
    pub fn new(log_path: PathBuf, level: LogLevel) -> Result<Self> {
        let (sender, receiver) = channel();
        spawn_writer_thread(&log_path, receiver)?;
        Ok(Logger {
            sender,
            level,
            component: None,
            console_output: false,
        })
    }

    /// Creates a logger tagged with `component`, optionally echoing to stdout.
    pub fn with_component(
        log_path: PathBuf,
        level: LogLevel,
        component: &str,
        console_output: bool,
    ) -> Result<Self> {
        let mut logger = Self::new(log_path, level)?;
        logger.component = Some(Arc::from(component));
        logger.console_output = console_output;
        Ok(logger)
    }

    /// Derives a logger for another component on the same writer thread.
    pub fn for_component(&self, component: &str) -> Self {
        Logger {
            sender: self.sender.clone(),
            level: self.level,
            component: Some(Arc::from(component)),
            console_output: self.console_output,
        }
    }

    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    pub fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message);
    }

    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }

    fn log(&self, level: LogLevel, message: &str) {
        if level < self.level {
            return;
        }
        let msg = LogMessage::new(level, self.component.clone(), message.to_string());
        if self.console_output {
            print!("{}", msg.format());
        }
        // Writer thread gone means the process is shutting down.
        let _ = self.sender.send(msg);
    }
}
