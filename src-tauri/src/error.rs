//! Central error types for the mascot host.
//!
//! Window operations in this crate never surface errors to the webview: the
//! channel handlers log and swallow them. These types exist so the internal
//! helpers can still use `?` and keep the reason for the log line.
//! All errors implement `Serialize` for Tauri IPC compatibility.

use serde::Serialize;
use thiserror::Error;

/// Main error type for mascot host operations.
#[derive(Error, Debug)]
pub enum MascotError {
    /// Window management error reported by the OS/Tauri
    #[error("Window error: {0}")]
    WindowError(String),

    /// Cursor position could not be read
    #[error("Cursor error: {0}")]
    CursorError(String),

    /// Configuration value could not be parsed
    #[error("Config error: {0}")]
    ConfigError(String),

    /// Log file I/O failed
    #[error("Storage error: {0}")]
    StorageError(#[from] std::io::Error),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

/// Implement Serialize for Tauri IPC compatibility.
impl Serialize for MascotError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<tauri::Error> for MascotError {
    fn from(err: tauri::Error) -> Self {
        MascotError::WindowError(err.to_string())
    }
}

/// Extension trait for adding context to Results.
///
/// # Example
/// ```ignore
/// use crate::error::{ResultExt, MascotResult};
///
/// fn outer_origin(window: &tauri::WebviewWindow) -> MascotResult<(i32, i32)> {
///     let pos = window.outer_position().context("failed to read window position")?;
///     Ok((pos.x, pos.y))
/// }
/// ```
pub trait ResultExt<T> {
    /// Add context to an error, converting it to MascotError::WindowError.
    fn context(self, msg: &str) -> MascotResult<T>;

    /// Add context lazily (only evaluated on error).
    fn with_context<F: FnOnce() -> String>(self, f: F) -> MascotResult<T>;
}

impl<T, E: std::fmt::Display> ResultExt<T> for Result<T, E> {
    fn context(self, msg: &str) -> MascotResult<T> {
        self.map_err(|e| MascotError::WindowError(format!("{}: {}", msg, e)))
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> MascotResult<T> {
        self.map_err(|e| MascotError::WindowError(format!("{}: {}", f(), e)))
    }
}

/// Extension trait for adding context to Option types.
pub trait OptionExt<T> {
    /// Convert None to MascotError::Other with the given message.
    fn context(self, msg: &str) -> MascotResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn context(self, msg: &str) -> MascotResult<T> {
        self.ok_or_else(|| MascotError::Other(msg.to_string()))
    }
}

/// Type alias for Results using MascotError.
pub type MascotResult<T> = Result<T, MascotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MascotError::WindowError("mascot is gone".to_string());
        assert_eq!(err.to_string(), "Window error: mascot is gone");
    }

    #[test]
    fn test_error_serialization() {
        let err = MascotError::CursorError("no display".to_string());
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, "\"Cursor error: no display\"");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: MascotError = io_err.into();
        assert!(matches!(err, MascotError::StorageError(_)));
    }

    #[test]
    fn test_result_ext_context() {
        let result: Result<(), &str> = Err("window closed");
        let msg = result
            .context("failed to move window")
            .unwrap_err()
            .to_string();
        assert!(msg.contains("failed to move window"));
        assert!(msg.contains("window closed"));
    }

    #[test]
    fn test_result_ext_with_context() {
        let result: Result<(), &str> = Err("inner");
        let msg = result
            .with_context(|| format!("window {}", "mascot"))
            .unwrap_err()
            .to_string();
        assert!(msg.contains("window mascot"));
        assert!(msg.contains("inner"));
    }

    #[test]
    fn test_result_ext_ok_passthrough() {
        let result: Result<i32, &str> = Ok(42);
        assert_eq!(result.context("should not appear").unwrap(), 42);
    }

    #[test]
    fn test_option_ext_context() {
        let opt: Option<i32> = None;
        let result = opt.context("no primary monitor");
        assert!(matches!(result, Err(MascotError::Other(_))));
        assert_eq!(Some(3).context("unused").unwrap(), 3);
    }
}
