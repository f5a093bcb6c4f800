#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::multiple_crate_versions)]

//! Conversion of WebAssembly components into wadm application manifests.
//!
//! Layout: `decode.rs` (component decoding and the default engine),
//! `interface.rs` (WIT interface classification), `manifest.rs` (manifest
//! assembly), `model.rs` (serialisable OAM types), `error.rs`.

pub mod decode;
pub mod error;
pub mod interface;
pub mod manifest;
pub mod model;

pub use decode::{ComponentEngine, world_interfaces};
pub use error::{ConvertError, ConvertResult};
pub use manifest::{WorldInterfaces, base_manifest, create_manifest};
pub use model::Manifest;

/// Application name used when none is supplied.
pub const DEFAULT_APP_NAME: &str = "wadmify-app";
/// Application description used when none is supplied.
pub const DEFAULT_APP_DESCRIPTION: &str = "A wasmCloud Application";
/// Application version used when none is supplied.
pub const DEFAULT_APP_VERSION: &str = "v0.1.0";
/// Component image used when none is supplied.
pub const DEFAULT_APP_IMAGE: &str = "file://./component.wasm";

/// Something that turns component bytes plus metadata into manifest text.
pub trait ConversionEngine {
    /// Convert `component` into a rendered manifest document.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError`] when the bytes are not an acceptable component
    /// or the manifest cannot be rendered.
    fn convert(&self, component: &[u8], metadata: &AppMetadata) -> ConvertResult<String>;
}

impl<E: ConversionEngine + ?Sized> ConversionEngine for &E {
    fn convert(&self, component: &[u8], metadata: &AppMetadata) -> ConvertResult<String> {
        (**self).convert(component, metadata)
    }
}

impl<E: ConversionEngine + ?Sized> ConversionEngine for std::rc::Rc<E> {
    fn convert(&self, component: &[u8], metadata: &AppMetadata) -> ConvertResult<String> {
        (**self).convert(component, metadata)
    }
}

/// Optional application metadata accompanying a conversion.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppMetadata {
    /// Application name.
    pub name: Option<String>,
    /// Application description.
    pub description: Option<String>,
    /// Application version annotation.
    pub version: Option<String>,
    /// Image reference for the user's component.
    pub image: Option<String>,
}

/// Metadata with every field present.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedMetadata {
    /// Application name.
    pub name: String,
    /// Application description.
    pub description: String,
    /// Application version annotation.
    pub version: String,
    /// Image reference for the user's component.
    pub image: String,
}

impl AppMetadata {
    /// Fill absent or blank fields with the engine defaults.
    ///
    /// A blank name would produce an unnamed application, which wadm rejects,
    /// so blank values are treated as absent here.
    #[must_use]
    pub fn resolved(&self) -> ResolvedMetadata {
        let pick = |value: &Option<String>, default: &str| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .unwrap_or(default)
                .to_string()
        };
        ResolvedMetadata {
            name: pick(&self.name, DEFAULT_APP_NAME),
            description: pick(&self.description, DEFAULT_APP_DESCRIPTION),
            version: pick(&self.version, DEFAULT_APP_VERSION),
            image: pick(&self.image, DEFAULT_APP_IMAGE),
        }
    }
}

/// Serialise a manifest as YAML.
///
/// # Errors
///
/// Returns [`ConvertError::Render`] if serialisation fails.
pub fn render_yaml(manifest: &Manifest) -> ConvertResult<String> {
    serde_yaml::to_string(manifest).map_err(|source| ConvertError::Render { source })
}

/// Convert component bytes with the default engine.
///
/// # Errors
///
/// See [`ConversionEngine::convert`].
pub fn convert_component(component: &[u8], metadata: &AppMetadata) -> ConvertResult<String> {
    ComponentEngine.convert(component, metadata)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolved_keeps_supplied_values() {
        let metadata = AppMetadata {
            name: Some("echo".to_string()),
            description: Some("demo".to_string()),
            version: Some("v2.0.0".to_string()),
            image: Some("ghcr.io/acme/echo:1".to_string()),
        };
        let resolved = metadata.resolved();
        assert_eq!(resolved.name, "echo");
        assert_eq!(resolved.description, "demo");
        assert_eq!(resolved.version, "v2.0.0");
        assert_eq!(resolved.image, "ghcr.io/acme/echo:1");
    }

    #[test]
    fn resolved_replaces_blank_values() {
        let metadata = AppMetadata {
            name: Some("   ".to_string()),
            ..AppMetadata::default()
        };
        let resolved = metadata.resolved();
        assert_eq!(resolved.name, DEFAULT_APP_NAME);
        assert_eq!(resolved.description, DEFAULT_APP_DESCRIPTION);
    }

    #[test]
    fn yaml_uses_camel_case_and_type_tags() {
        let manifest = create_manifest(
            &AppMetadata {
                name: Some("echo".to_string()),
                ..AppMetadata::default()
            },
            &WorldInterfaces {
                imports: Vec::new(),
                exports: vec!["wasi:http/incoming-handler@0.2.0".to_string()],
            },
        );
        let yaml = render_yaml(&manifest).expect("render");
        assert!(yaml.contains("apiVersion: core.oam.dev/v1beta1"));
        assert!(yaml.contains("kind: Application"));
        assert!(yaml.contains("type: component"));
        assert!(yaml.contains("type: capability"));
        assert!(yaml.contains("type: spreadscaler"));
        assert!(yaml.contains("generated-by: wadmify"));

        let value: serde_yaml::Value = serde_yaml::from_str(&yaml).expect("valid yaml");
        assert_eq!(value["metadata"]["name"].as_str(), Some("echo"));
        assert_eq!(
            value["spec"]["components"][1]["traits"][0]["properties"]["target"]["name"].as_str(),
            Some("echo")
        );
    }
}
