//! # Design
//!
//! - One error enum for the whole conversion path so callers can surface a single message.
//! - Messages carry the decoder's detail; the pipeline shows them to the user verbatim.

use thiserror::Error;

/// Result type for conversion operations.
pub type ConvertResult<T> = Result<T, ConvertError>;

/// Errors produced while turning component bytes into a manifest.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The bytes are not a decodable WebAssembly component.
    #[error("component could not be decoded: {detail}")]
    Decode {
        /// Decoder message, including its cause chain.
        detail: String,
    },
    /// The bytes decode as a binary WIT package rather than a built component.
    #[error("binary-encoded WIT packages are not supported; supply a built component")]
    WitPackageUnsupported,
    /// The decoded resolve does not contain the component's world.
    #[error("component world missing from decoded interface description")]
    WorldMissing,
    /// The manifest could not be serialised to YAML.
    #[error("manifest could not be rendered: {source}")]
    Render {
        /// Underlying YAML serialisation error.
        #[source]
        source: serde_yaml::Error,
    },
}

impl ConvertError {
    /// Short machine-friendly label used in structured logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Decode { .. } => "decode",
            Self::WitPackageUnsupported => "wit_package",
            Self::WorldMissing => "world_missing",
            Self::Render { .. } => "render",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_error_carries_detail_in_message() {
        let err = ConvertError::Decode {
            detail: "unexpected end-of-file".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "component could not be decoded: unexpected end-of-file"
        );
        assert_eq!(err.kind(), "decode");
    }

    #[test]
    fn kinds_are_distinct() {
        assert_ne!(
            ConvertError::WitPackageUnsupported.kind(),
            ConvertError::WorldMissing.kind()
        );
    }
}
