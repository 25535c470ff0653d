use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::{Mutex, OnceLock};

use chrono::Local;

static LOGGER: OnceLock<Logger> = OnceLock::new();

enum LogSink {
    Stdout,
    File(Mutex<File>),
}

pub struct Logger {
    prefix: Option<String>,
    sink: LogSink,
}

impl Logger {
    fn log(&self, message: &str) {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        let line = match self.prefix {
            Some(ref prefix) => format!("[{}][{}] {}", timestamp, prefix, message),
            None => format!("[{}] {}", timestamp, message),
        };

        match &self.sink {
            LogSink::Stdout => println!("{}", line),
            LogSink::File(file) => {
                if let Ok(mut file) = file.lock() {
                    let _ = writeln!(file, "{}", line);
                }
            }
        }
    }
}

pub fn init_logger(prefix: Option<String>) {
    let _ = LOGGER.set(Logger {
        prefix,
        sink: LogSink::Stdout,
    });
}

/// Appends to `path` instead of stdout, for front-ends that own the terminal.
pub fn init_file_logger(prefix: Option<String>, path: &Path) -> Result<(), String> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| format!("Failed to open log file: {}", e))?;

    let _ = LOGGER.set(Logger {
        prefix,
        sink: LogSink::File(Mutex::new(file)),
    });
    Ok(())
}

/// Messages logged before initialization are dropped.
pub fn log(message: &str) {
    if let Some(logger) = LOGGER.get() {
        logger.log(message);
    }
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        $crate::logger::log(&format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_logger_appends_timestamped_lines() {
        let mut path = std::env::temp_dir();
        path.push(format!("snake_engine_log_{}.log", std::process::id()));

        init_file_logger(Some("Test".to_string()), &path).unwrap();
        log("hello from the test");

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("[Test] hello from the test"));
        let _ = std::fs::remove_file(&path);
    }
}
