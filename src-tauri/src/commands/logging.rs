//! Persistent file logging for the mascot host and its webview.
//!
//! One log file per day in the app log directory, rotated at 5MB, with the
//! five most recent files kept. The webview writes into the same file via
//! `write_log`.

use chrono::Local;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tauri::{command, AppHandle, Manager};

use crate::error::{MascotError, MascotResult};

/// Maximum log file size before rotation (5MB)
const MAX_LOG_SIZE: u64 = 5 * 1024 * 1024;

/// Maximum number of log files to keep
const MAX_LOG_FILES: usize = 5;

lazy_static::lazy_static! {
    /// Global log file handle
    static ref LOG_FILE: Mutex<Option<File>> = Mutex::new(None);
    /// Log directory path
    static ref LOG_DIR: Mutex<Option<PathBuf>> = Mutex::new(None);
}

/// Log levels matching the webview's console levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Parse a level name sent by the webview. Unknown names map to `Info`.
    pub fn parse(level: &str) -> Self {
        match level.to_lowercase().as_str() {
            "debug" | "trace" => LogLevel::Debug,
            "warn" | "warning" => LogLevel::Warn,
            "error" => LogLevel::Error,
            _ => LogLevel::Info,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

/// Initialize the logging system
pub fn init_logging(app: &AppHandle) -> MascotResult<()> {
    let log_dir = app
        .path()
        .app_log_dir()
        .map_err(|e| MascotError::Other(format!("Failed to get log directory: {}", e)))?;

    fs::create_dir_all(&log_dir)?;

    {
        let mut dir = LOG_DIR
            .lock()
            .map_err(|_| MascotError::Other("log directory lock poisoned".to_string()))?;
        *dir = Some(log_dir.clone());
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(current_log_path(&log_dir))?;

    {
        let mut log_file = LOG_FILE
            .lock()
            .map_err(|_| MascotError::Other("log file lock poisoned".to_string()))?;
        *log_file = Some(file);
    }

    log_internal(LogLevel::Info, "Mascot", "Logging system initialized");
    log_internal(
        LogLevel::Info,
        "Mascot",
        &format!("Log directory: {:?}", log_dir),
    );

    cleanup_old_logs(&log_dir);

    Ok(())
}

/// Get the path for the current log file (one per day)
fn current_log_path(log_dir: &Path) -> PathBuf {
    let date = Local::now().format("%Y-%m-%d");
    log_dir.join(format!("mascot_{}.log", date))
}

/// Format one log line.
fn format_line(level: LogLevel, source: &str, message: &str) -> String {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
    format!("[{}] [{}] [{}] {}\n", timestamp, level, source, message)
}

/// Clean up old log files, keeping only the most recent MAX_LOG_FILES
fn cleanup_old_logs(log_dir: &Path) {
    if let Ok(entries) = fs::read_dir(log_dir) {
        let mut log_files: Vec<_> = entries
            .filter_map(|e| e.ok())
            .filter(|e| {
                e.path()
                    .extension()
                    .map(|ext| ext == "log")
                    .unwrap_or(false)
            })
            .collect();

        // Newest first
        log_files.sort_by(|a, b| {
            let a_time = a.metadata().and_then(|m| m.modified()).ok();
            let b_time = b.metadata().and_then(|m| m.modified()).ok();
            b_time.cmp(&a_time)
        });

        for file in log_files.into_iter().skip(MAX_LOG_FILES) {
            let _ = fs::remove_file(file.path());
        }
    }
}

/// Check if log rotation is needed and rotate if necessary
fn check_rotation() {
    // Skip rotation rather than panic on a poisoned lock
    let log_dir = {
        let dir = match LOG_DIR.lock() {
            Ok(guard) => guard,
            Err(_) => return,
        };
        match dir.as_ref() {
            Some(d) => d.clone(),
            None => return,
        }
    };

    let current_path = current_log_path(&log_dir);

    if let Ok(metadata) = fs::metadata(&current_path) {
        if metadata.len() > MAX_LOG_SIZE {
            let timestamp = Local::now().format("%Y-%m-%d_%H%M%S");
            let rotated_path = log_dir.join(format!("mascot_{}.log", timestamp));
            let _ = fs::rename(&current_path, &rotated_path);

            if let Ok(file) = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&current_path)
            {
                if let Ok(mut log_file) = LOG_FILE.lock() {
                    *log_file = Some(file);
                }
            }

            cleanup_old_logs(&log_dir);
        }
    }
}

/// Internal logging function
pub fn log_internal(level: LogLevel, source: &str, message: &str) {
    let log_line = format_line(level, source, message);

    if let Ok(mut log_file) = LOG_FILE.lock() {
        if let Some(ref mut file) = *log_file {
            let _ = file.write_all(log_line.as_bytes());
            let _ = file.flush();
        }
    }

    // Mirror into the `log` facade so RUST_LOG filtering still applies
    match level {
        LogLevel::Debug => log::debug!("[{}] {}", source, message),
        LogLevel::Info => log::info!("[{}] {}", source, message),
        LogLevel::Warn => log::warn!("[{}] {}", source, message),
        LogLevel::Error => log::error!("[{}] {}", source, message),
    }

    check_rotation();
}

/// Log from Rust code
#[macro_export]
macro_rules! app_log {
    ($level:expr, $source:expr, $($arg:tt)*) => {
        $crate::commands::logging::log_internal($level, $source, &format!($($arg)*))
    };
}

// ============================================================================
// Tauri Commands
// ============================================================================

/// Write a log message from the webview
#[command]
pub fn write_log(level: String, source: String, message: String) {
    log_internal(LogLevel::parse(&level), &source, &message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_webview_levels() {
        assert_eq!(LogLevel::parse("warning"), LogLevel::Warn);
        assert_eq!(LogLevel::parse("WARN"), LogLevel::Warn);
        assert_eq!(LogLevel::parse("error"), LogLevel::Error);
        assert_eq!(LogLevel::parse("trace"), LogLevel::Debug);
        assert_eq!(LogLevel::parse("verbose"), LogLevel::Info);
    }

    #[test]
    fn line_format() {
        let line = format_line(LogLevel::Warn, "Input", "channel send failed");
        assert!(line.ends_with("[WARN] [Input] channel send failed\n"));
        assert!(line.starts_with('['));
    }

    #[test]
    fn log_path_is_daily() {
        let path = current_log_path(Path::new("/tmp/mascot-logs"));
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("mascot_"));
        assert!(name.ends_with(".log"));
        assert_eq!(name.len(), "mascot_YYYY-MM-DD.log".len());
    }

    #[test]
    fn logging_without_init_is_harmless() {
        log_internal(LogLevel::Info, "Test", "no file yet");
    }
}
