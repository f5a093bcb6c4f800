//! Data carried through the pipeline.

use std::rc::Rc;

use wadmify_convert::AppMetadata;

use crate::config::MetadataDefaults;

/// The artifact chosen by the user, before its bytes are loaded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectedFile {
    /// File name as reported by the platform.
    pub name: String,
    /// Size in bytes as reported by the platform.
    pub byte_size: u64,
}

/// A selected file whose bytes have been fully read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadedFile {
    /// The selection the bytes belong to.
    pub file: SelectedFile,
    /// Complete file contents.
    pub bytes: Rc<[u8]>,
}

/// Raw metadata form values, as typed by the user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MetadataFields {
    /// Application name.
    pub name: String,
    /// Application description.
    pub description: String,
    /// Application version.
    pub version: String,
    /// Component image reference.
    pub image: String,
}

fn provided(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty()).then_some(value)
}

/// Input handed to the conversion engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConversionRequest {
    /// Name of the file the bytes came from.
    pub file_name: String,
    /// Complete component bytes.
    pub bytes: Rc<[u8]>,
    /// Metadata passed alongside the bytes.
    pub metadata: AppMetadata,
}

impl ConversionRequest {
    /// Request carrying user metadata with defaults applied.
    ///
    /// Name and description pass through as typed (empty when unset); version
    /// and image fall back to `defaults`.
    #[must_use]
    pub fn with_metadata(
        file: &LoadedFile,
        fields: &MetadataFields,
        defaults: &MetadataDefaults,
    ) -> Self {
        let version = provided(&fields.version).unwrap_or(defaults.version());
        let image = provided(&fields.image)
            .map_or_else(|| defaults.image_for(&file.file.name), ToString::to_string);
        Self {
            file_name: file.file.name.clone(),
            bytes: Rc::clone(&file.bytes),
            metadata: AppMetadata {
                name: Some(fields.name.trim().to_string()),
                description: Some(fields.description.trim().to_string()),
                version: Some(version.to_string()),
                image: Some(image),
            },
        }
    }

    /// Request carrying only the bytes; the engine applies its own defaults.
    #[must_use]
    pub fn bare(file: &LoadedFile) -> Self {
        Self {
            file_name: file.file.name.clone(),
            bytes: Rc::clone(&file.bytes),
            metadata: AppMetadata::default(),
        }
    }
}

/// Manifest text returned by the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ManifestResult {
    /// Rendered manifest document.
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(name: &str) -> LoadedFile {
        LoadedFile {
            file: SelectedFile {
                name: name.to_string(),
                byte_size: 3,
            },
            bytes: Rc::from(vec![1_u8, 2, 3]),
        }
    }

    #[test]
    fn empty_fields_take_defaults() {
        let request = ConversionRequest::with_metadata(
            &loaded("echo.wasm"),
            &MetadataFields::default(),
            &MetadataDefaults::default(),
        );
        assert_eq!(request.metadata.name.as_deref(), Some(""));
        assert_eq!(request.metadata.description.as_deref(), Some(""));
        assert_eq!(request.metadata.version.as_deref(), Some("v0.1.0"));
        assert_eq!(
            request.metadata.image.as_deref(),
            Some("file:///path/to/echo.wasm")
        );
        assert_eq!(&*request.bytes, &[1, 2, 3]);
    }

    #[test]
    fn typed_fields_override_defaults() {
        let fields = MetadataFields {
            name: " echo ".to_string(),
            description: "demo".to_string(),
            version: "v2.0.0".to_string(),
            image: "ghcr.io/acme/echo:2".to_string(),
        };
        let request = ConversionRequest::with_metadata(
            &loaded("echo.wasm"),
            &fields,
            &MetadataDefaults::default(),
        );
        assert_eq!(request.metadata.name.as_deref(), Some("echo"));
        assert_eq!(request.metadata.version.as_deref(), Some("v2.0.0"));
        assert_eq!(request.metadata.image.as_deref(), Some("ghcr.io/acme/echo:2"));
    }

    #[test]
    fn whitespace_version_counts_as_unset() {
        let fields = MetadataFields {
            version: "   ".to_string(),
            ..MetadataFields::default()
        };
        let request = ConversionRequest::with_metadata(
            &loaded("a.wasm"),
            &fields,
            &MetadataDefaults::default(),
        );
        assert_eq!(request.metadata.version.as_deref(), Some("v0.1.0"));
    }

    #[test]
    fn bare_request_has_no_metadata() {
        let request = ConversionRequest::bare(&loaded("a.wasm"));
        assert_eq!(request.metadata, AppMetadata::default());
        assert_eq!(request.file_name, "a.wasm");
    }
}
