//! Pipeline configuration with named defaults.
//!
//! # Design
//! - Defaults live in one place and are validated when the config is built, never at
//!   call sites.
//! - Fields are private; the only way to obtain a config is through a validating
//!   constructor or `Default`.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{ConfigError, ConfigResult};

/// Version applied when the user leaves the version field empty.
pub const DEFAULT_VERSION: &str = "v0.1.0";
/// Prefix of the image reference synthesised from the file name.
pub const DEFAULT_IMAGE_PREFIX: &str = "file:///path/to/";
/// Deadline for reading a selected file.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(30);

/// Which flavour of the pipeline is deployed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Variant {
    /// Shows file info, converts, and logs the manifest.
    Minimal,
    /// Collects metadata, converts, and renders the manifest.
    #[default]
    Interactive,
}

impl Variant {
    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Minimal => "minimal",
            Self::Interactive => "interactive",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "minimal" => Ok(Self::Minimal),
            "interactive" => Ok(Self::Interactive),
            _ => Err(ConfigError::InvalidField {
                field: "variant",
                reason: "expected `minimal` or `interactive`",
                value: Some(value.to_string()),
            }),
        }
    }
}

/// Defaults applied to empty metadata fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetadataDefaults {
    version: String,
    image_prefix: String,
}

impl MetadataDefaults {
    /// Build validated defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidField`] when the version is empty or contains
    /// whitespace, or when the image prefix is empty.
    pub fn new(version: impl Into<String>, image_prefix: impl Into<String>) -> ConfigResult<Self> {
        let defaults = Self {
            version: version.into(),
            image_prefix: image_prefix.into(),
        };
        defaults.validate()?;
        Ok(defaults)
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.version.is_empty() {
            return Err(ConfigError::InvalidField {
                field: "defaults.version",
                reason: "must not be empty",
                value: None,
            });
        }
        if self.version.chars().any(char::is_whitespace) {
            return Err(ConfigError::InvalidField {
                field: "defaults.version",
                reason: "must not contain whitespace",
                value: Some(self.version.clone()),
            });
        }
        if self.image_prefix.trim().is_empty() {
            return Err(ConfigError::InvalidField {
                field: "defaults.image_prefix",
                reason: "must not be empty",
                value: Some(self.image_prefix.clone()),
            });
        }
        Ok(())
    }

    /// Version used when the field is empty.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Prefix used to synthesise image references.
    #[must_use]
    pub fn image_prefix(&self) -> &str {
        &self.image_prefix
    }

    /// Image reference used when the field is empty.
    #[must_use]
    pub fn image_for(&self, file_name: &str) -> String {
        format!("{}{file_name}", self.image_prefix)
    }
}

impl Default for MetadataDefaults {
    fn default() -> Self {
        Self {
            version: DEFAULT_VERSION.to_string(),
            image_prefix: DEFAULT_IMAGE_PREFIX.to_string(),
        }
    }
}

/// Validated pipeline configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PipelineConfig {
    variant: Variant,
    defaults: MetadataDefaults,
    read_timeout: Option<Duration>,
}

impl PipelineConfig {
    /// Build a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidField`] when `read_timeout` is zero.
    pub fn new(
        variant: Variant,
        defaults: MetadataDefaults,
        read_timeout: Option<Duration>,
    ) -> ConfigResult<Self> {
        let config = Self {
            variant,
            defaults,
            read_timeout,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check every field.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError::InvalidField`] encountered.
    pub fn validate(&self) -> ConfigResult<()> {
        self.defaults.validate()?;
        if self.read_timeout.is_some_and(|limit| limit.is_zero()) {
            return Err(ConfigError::InvalidField {
                field: "read_timeout",
                reason: "must be greater than zero when set",
                value: Some("0".to_string()),
            });
        }
        Ok(())
    }

    /// Default configuration for the given variant.
    #[must_use]
    pub fn for_variant(variant: Variant) -> Self {
        Self {
            variant,
            ..Self::default()
        }
    }

    /// Deployed variant.
    #[must_use]
    pub const fn variant(&self) -> Variant {
        self.variant
    }

    /// Metadata defaults.
    #[must_use]
    pub const fn defaults(&self) -> &MetadataDefaults {
        &self.defaults
    }

    /// Read deadline, if any.
    #[must_use]
    pub const fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            defaults: MetadataDefaults::default(),
            read_timeout: Some(DEFAULT_READ_TIMEOUT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = PipelineConfig::default();
        assert_eq!(config.variant(), Variant::Interactive);
        assert_eq!(config.defaults().version(), "v0.1.0");
        assert_eq!(
            config.defaults().image_for("echo.wasm"),
            "file:///path/to/echo.wasm"
        );
        assert_eq!(config.read_timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn variant_parses_case_insensitively() {
        assert_eq!("Minimal".parse::<Variant>(), Ok(Variant::Minimal));
        assert_eq!(" interactive ".parse::<Variant>(), Ok(Variant::Interactive));
        assert!("batch".parse::<Variant>().is_err());
        assert_eq!(Variant::Minimal.to_string(), "minimal");
    }

    #[test]
    fn empty_or_spaced_version_is_rejected() {
        assert!(matches!(
            MetadataDefaults::new("", DEFAULT_IMAGE_PREFIX),
            Err(ConfigError::InvalidField {
                field: "defaults.version",
                ..
            })
        ));
        assert!(MetadataDefaults::new("v 1", DEFAULT_IMAGE_PREFIX).is_err());
        assert!(MetadataDefaults::new("v1.0.0", "  ").is_err());
        assert!(MetadataDefaults::new("v1.0.0", "oci://registry/").is_ok());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = PipelineConfig::new(
            Variant::Minimal,
            MetadataDefaults::default(),
            Some(Duration::ZERO),
        )
        .expect_err("zero timeout");
        assert!(err.to_string().contains("read_timeout"));
        assert!(PipelineConfig::new(Variant::Minimal, MetadataDefaults::default(), None).is_ok());
    }

    #[test]
    fn default_config_validates() {
        assert_eq!(PipelineConfig::default().validate(), Ok(()));
        assert_eq!(
            PipelineConfig::for_variant(Variant::Minimal).variant(),
            Variant::Minimal
        );
    }
}
