//! Error types for tracker persistence and chart output

use thiserror::Error;

/// Errors that can occur while saving, loading or rendering tracker data
///
/// Failures raised by wrapped callables never appear here: they are handed
/// back to the caller unchanged by the instrumentation wrapper.
#[derive(Error, Debug)]
pub enum TrackError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Result type for tracker operations
pub type Result<T> = std::result::Result<T, TrackError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_keeps_kind() {
        let err: TrackError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only").into();
        match err {
            TrackError::Io(inner) => {
                assert_eq!(inner.kind(), std::io::ErrorKind::PermissionDenied)
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn test_display_messages() {
        let err = TrackError::Config("chart.width must be > 0".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: chart.width must be > 0"
        );

        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: TrackError = json_err.into();
        assert!(err.to_string().starts_with("Invalid snapshot JSON:"));
    }
}
