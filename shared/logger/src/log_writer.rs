//! Background log file writer.

use crate::error::Result;
use crate::log_message::LogMessage;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::mpsc::Receiver;

/// Appends messages to the log file from a dedicated thread.
pub(crate) struct LogWriter {
    out: BufWriter<File>,
}

impl LogWriter {
    /// Opens (or creates) the file in append mode, creating parent folders.
    pub fn new(log_path: &Path) -> Result<Self> {
        if let Some(parent) = log_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;
        Ok(Self {
            out: BufWriter::new(file),
        })
    }

    fn write_message(&mut self, message: &LogMessage) {
        if let Err(e) = self.out.write_all(message.format().as_bytes()) {
            eprintln!("Error writing log: {}", e);
        }
    }

    /// Drains the channel, flushing whenever it runs empty, until every
    /// sender is gone.
    pub fn run(mut self, receiver: Receiver<LogMessage>) {
        while let Ok(message) = receiver.recv() {
            self.write_message(&message);
            for queued in receiver.try_iter() {
                self.write_message(&queued);
            }
            if let Err(e) = self.out.flush() {
                eprintln!("Error flushing log: {}", e);
            }
        }
    }
}

/// Spawns the writer thread for `log_path`.
pub(crate) fn spawn_writer_thread(log_path: &Path, receiver: Receiver<LogMessage>) -> Result<()> {
    let writer = LogWriter::new(log_path)?;
    std::thread::Builder::new()
        .name("log-writer".to_string())
        .spawn(move || writer.run(receiver))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log_level::LogLevel;
    use std::fs;
    use std::sync::mpsc::channel;
    use std::thread;
    use std::time::Duration;
    use tempfile::tempdir;

    #[test]
    fn test_writer_creates_nested_file() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("logs").join("camdeck.log");

        assert!(LogWriter::new(&log_path).is_ok());
        assert!(log_path.exists());
    }

    #[test]
    fn test_spawned_writer_flushes_on_idle() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("test.log");
        let (sender, receiver) = channel();

        spawn_writer_thread(&log_path, receiver).unwrap();

        sender
            .send(LogMessage::new(LogLevel::Debug, None, "frame 1000".to_string()))
            .unwrap();
        thread::sleep(Duration::from_millis(100));

        let content = fs::read_to_string(&log_path).unwrap();
        assert!(content.contains("frame 1000"));
    }
}
