//! # Design
//!
//! - `PipelineError` mirrors the user-facing failure taxonomy; every variant is terminal
//!   to the current operation only.
//! - Configuration problems are a separate `ConfigError` raised at construction time.
//! - Adapter failures (browser file reads, clipboard writes) arrive as `HostError` so the
//!   pipeline never depends on a particular platform error type.

use thiserror::Error;
use wadmify_convert::ConvertError;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Result type for configuration construction.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Failures surfaced by the ingestion-and-rendering pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// An input event carried no file. Never shown to the user.
    #[error("no file selected")]
    NoFileSelected,
    /// The selected file could not be read.
    #[error("failed to read {file_name}: {detail}")]
    Read {
        /// Name of the file being read.
        file_name: String,
        /// Platform-provided reason.
        detail: String,
    },
    /// Reading the selected file exceeded the configured deadline.
    #[error("reading {file_name} did not finish within {limit_ms} ms")]
    ReadTimedOut {
        /// Name of the file being read.
        file_name: String,
        /// Deadline in milliseconds.
        limit_ms: u64,
    },
    /// The conversion engine rejected the component.
    #[error("could not convert {file_name}: {source}")]
    Conversion {
        /// Name of the converted file.
        file_name: String,
        /// Engine error.
        #[source]
        source: ConvertError,
    },
    /// Writing to the clipboard failed.
    #[error("failed to copy manifest: {detail}")]
    Clipboard {
        /// Platform-provided reason.
        detail: String,
    },
    /// A copy was requested while no manifest is displayed.
    #[error("no manifest is displayed")]
    NothingToCopy,
}

impl PipelineError {
    /// Whether the failure should be reported to the user.
    #[must_use]
    pub const fn user_visible(&self) -> bool {
        !matches!(self, Self::NoFileSelected)
    }
}

/// Invalid pipeline configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Field contained an invalid value.
    #[error("invalid value for '{field}': {reason}")]
    InvalidField {
        /// Field that failed validation.
        field: &'static str,
        /// Static reason for the failure.
        reason: &'static str,
        /// Offending value when available.
        value: Option<String>,
    },
}

/// Failure reported by a platform adapter (file reader, clipboard).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{detail}")]
pub struct HostError {
    /// Platform-provided reason.
    pub detail: String,
}

impl HostError {
    /// Wrap a platform message.
    #[must_use]
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_missing_file_is_silent() {
        assert!(!PipelineError::NoFileSelected.user_visible());
        assert!(
            PipelineError::Read {
                file_name: "a.wasm".to_string(),
                detail: "denied".to_string(),
            }
            .user_visible()
        );
        assert!(
            PipelineError::Clipboard {
                detail: "denied".to_string()
            }
            .user_visible()
        );
    }

    #[test]
    fn conversion_message_includes_engine_detail() {
        let err = PipelineError::Conversion {
            file_name: "bad.wasm".to_string(),
            source: ConvertError::WitPackageUnsupported,
        };
        let message = err.to_string();
        assert!(message.starts_with("could not convert bad.wasm"));
        assert!(message.contains("WIT packages are not supported"));
    }

    #[test]
    fn config_error_names_field() {
        let err = ConfigError::InvalidField {
            field: "defaults.version",
            reason: "must not be empty",
            value: Some(String::new()),
        };
        assert_eq!(
            err.to_string(),
            "invalid value for 'defaults.version': must not be empty"
        );
    }

    #[test]
    fn host_error_displays_detail() {
        assert_eq!(HostError::new("permission denied").to_string(), "permission denied");
    }
}
