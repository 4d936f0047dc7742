use thiserror::Error;
use tracing::{error, warn};

/// Error severity, used by hosts to decide whether to surface a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Warning, // recoverable, the operation continued with a fallback
    Error,   // the single operation failed
}

/// Failures reported by a session store
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Session file I/O failed for '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse session file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Session store unavailable: {0}")]
    Unavailable(String),
}

/// Domain errors for window lifecycle management
#[derive(Error, Debug)]
pub enum WindowsError {
    #[error("Failed to restore session for window {index}: {source}")]
    Restore {
        index: usize,
        #[source]
        source: SessionError,
    },

    #[error("Failed to persist session for window {index}: {source}")]
    Persist {
        index: usize,
        #[source]
        source: SessionError,
    },

    #[error("Window creation failed: {0}")]
    WindowCreation(#[source] anyhow::Error),

    #[error("Toolkit operation failed: {0}")]
    Toolkit(#[source] anyhow::Error),
}

impl WindowsError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Restore { .. } => ErrorSeverity::Warning,
            Self::Persist { .. } => ErrorSeverity::Warning,
            Self::WindowCreation(_) => ErrorSeverity::Error,
            Self::Toolkit(_) => ErrorSeverity::Error,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::Restore { index, .. } => {
                format!("Could not restore the layout of window {}", index)
            }
            Self::Persist { index, .. } => {
                format!("Could not save the layout of window {}", index)
            }
            Self::WindowCreation(e) => format!("Could not open a window: {}", e),
            Self::Toolkit(e) => format!("Window operation failed: {}", e),
        }
    }
}

pub type Result<T> = std::result::Result<T, WindowsError>;

/// Extension trait for silent error logging with caller location tracking.
/// Use when the operation is recoverable and the user doesn't need to know.
///
/// # Examples
///
/// ```ignore
/// use arc_windows::error::ResultExt;
///
/// // Keep going if the session file can't be written
/// store.update_size(index, size).warn_on_err();
/// ```
pub trait ResultExt<T> {
    /// Log error with caller location and return None. Use for recoverable failures.
    fn log_err(self) -> Option<T>;
    /// Log as warning with caller location and return None. Use for expected failures.
    fn warn_on_err(self) -> Option<T>;
}

impl<T, E: std::fmt::Debug> ResultExt<T> for std::result::Result<T, E> {
    #[track_caller]
    fn log_err(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(error) => {
                let caller = std::panic::Location::caller();
                error!(
                    error = ?error,
                    file = caller.file(),
                    line = caller.line(),
                    "Operation failed"
                );
                None
            }
        }
    }

    #[track_caller]
    fn warn_on_err(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(error) => {
                let caller = std::panic::Location::caller();
                warn!(
                    error = ?error,
                    file = caller.file(),
                    line = caller.line(),
                    "Operation had warning"
                );
                None
            }
        }
    }
}

/// Log an error from an async operation without propagating it.
pub fn log_async_err<T, E: std::fmt::Debug>(
    result: std::result::Result<T, E>,
    operation: &str,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            error!(
                error = ?err,
                operation = operation,
                "Async operation failed"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restore_and_persist_are_warnings() {
        let restore = WindowsError::Restore {
            index: 0,
            source: SessionError::Unavailable("offline".into()),
        };
        let persist = WindowsError::Persist {
            index: 3,
            source: SessionError::Unavailable("offline".into()),
        };
        assert_eq!(restore.severity(), ErrorSeverity::Warning);
        assert_eq!(persist.severity(), ErrorSeverity::Warning);
        assert!(persist.user_message().contains('3'));
    }

    #[test]
    fn test_window_creation_is_error() {
        let err = WindowsError::WindowCreation(anyhow::anyhow!("no display"));
        assert_eq!(err.severity(), ErrorSeverity::Error);
        assert!(err.to_string().contains("no display"));
    }

    #[test]
    fn test_result_ext_returns_none_on_err() {
        let result: std::result::Result<u32, &str> = Err("boom");
        assert_eq!(result.warn_on_err(), None);
        let ok: std::result::Result<u32, &str> = Ok(7);
        assert_eq!(ok.log_err(), Some(7));
    }

    #[test]
    fn test_log_async_err_passes_value_through() {
        let ok: std::result::Result<&str, SessionError> = Ok("done");
        assert_eq!(log_async_err(ok, "record session"), Some("done"));
    }
}
