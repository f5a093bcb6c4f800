//! Manifest assembly from application metadata and a component's world.

use std::collections::BTreeMap;

use crate::AppMetadata;
use crate::interface::{CombinedInterface, Direction, DirectionalInterface, combine_interfaces};
use crate::model::{
    APPLICATION_KIND, Component, GENERATED_BY_LABEL, Manifest, Metadata, OAM_VERSION,
    Specification, capability_component, link, spreadscaler, user_component,
};

/// Label value identifying manifests produced here.
pub const GENERATOR: &str = "wadmify";

/// Import and export names of a component world, as `namespace:package/interface@version`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WorldInterfaces {
    /// Imported interface names.
    pub imports: Vec<String>,
    /// Exported interface names.
    pub exports: Vec<String>,
}

/// Scaffold an empty application carrying the metadata block.
#[must_use]
pub fn base_manifest(name: &str, description: &str, version: &str) -> Manifest {
    Manifest {
        api_version: OAM_VERSION.to_string(),
        kind: APPLICATION_KIND.to_string(),
        metadata: Metadata {
            name: name.to_string(),
            annotations: BTreeMap::from([
                ("version".to_string(), version.to_string()),
                ("description".to_string(), description.to_string()),
            ]),
            labels: BTreeMap::from([(GENERATED_BY_LABEL.to_string(), GENERATOR.to_string())]),
        },
        spec: Specification {
            components: Vec::new(),
            policies: Vec::new(),
        },
    }
}

/// Build the full manifest for a component.
///
/// The user's component comes first, followed by one capability per imported
/// package and one linked capability per exported package.
#[must_use]
pub fn create_manifest(metadata: &AppMetadata, world: &WorldInterfaces) -> Manifest {
    let metadata = metadata.resolved();
    Manifest {
        spec: Specification {
            components: components_for(&metadata.name, &metadata.image, world),
            policies: Vec::new(),
        },
        ..base_manifest(&metadata.name, &metadata.description, &metadata.version)
    }
}

fn group(names: &[String], direction: Direction) -> Vec<CombinedInterface<'_>> {
    combine_interfaces(
        names
            .iter()
            .filter_map(|name| DirectionalInterface::parse_for_manifest(name, direction)),
    )
}

fn capability(group: &CombinedInterface<'_>) -> Option<Component> {
    group
        .capability_image()
        .map(|image| capability_component(group.name(), image))
}

fn components_for(name: &str, image: &str, world: &WorldInterfaces) -> Vec<Component> {
    let imports = group(&world.imports, Direction::Import);
    let exports = group(&world.exports, Direction::Export);

    let mut traits = vec![spreadscaler(1)];
    traits.extend(
        imports
            .iter()
            .filter_map(|import| import.link_to(&import.name()))
            .map(link),
    );

    let mut components = vec![user_component(name, image, traits)];
    components.extend(imports.iter().filter_map(capability));
    // An export is served by a provider that links back into the component.
    components.extend(exports.iter().filter_map(|export| {
        let back = export.link_to(name)?;
        capability(export).map(|provider| Component {
            traits: Some(vec![link(back)]),
            ..provider
        })
    }));
    components
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LINK_TRAIT, SPREADSCALER_TRAIT, TraitProperty, image_of, traits_of};

    fn metadata() -> AppMetadata {
        AppMetadata {
            name: Some("echo".to_string()),
            description: Some("An Echo Application".to_string()),
            version: Some("v0.1.0".to_string()),
            image: Some("file:///path/to/echo.wasm".to_string()),
        }
    }

    #[test]
    fn base_manifest_records_metadata() {
        let manifest = base_manifest("echo", "An Echo Application", "v0.1.0");
        assert_eq!(manifest.api_version, OAM_VERSION);
        assert_eq!(manifest.kind, APPLICATION_KIND);
        assert_eq!(manifest.metadata.annotations["version"], "v0.1.0");
        assert_eq!(
            manifest.metadata.annotations["description"],
            "An Echo Application"
        );
        assert_eq!(manifest.metadata.labels[GENERATED_BY_LABEL], GENERATOR);
        assert!(manifest.spec.components.is_empty());
    }

    #[test]
    fn component_without_interfaces_has_only_spreadscaler() {
        let manifest = create_manifest(&metadata(), &WorldInterfaces::default());
        assert_eq!(manifest.spec.components.len(), 1);
        let component = &manifest.spec.components[0];
        assert_eq!(component.name, "echo");
        assert_eq!(image_of(component), Some("file:///path/to/echo.wasm"));
        let traits = traits_of(component);
        assert_eq!(traits.len(), 1);
        assert_eq!(traits[0].trait_type, SPREADSCALER_TRAIT);
    }

    #[test]
    fn http_server_component_gets_linked_provider() {
        let world = WorldInterfaces {
            imports: vec![
                "wasi:io/streams@0.2.0".to_string(),
                "wasi:http/types@0.2.0".to_string(),
                "wasi:keyvalue/store@0.2.0-draft".to_string(),
            ],
            exports: vec!["wasi:http/incoming-handler@0.2.0".to_string()],
        };
        let manifest = create_manifest(&metadata(), &world);
        let names: Vec<&str> = manifest
            .spec
            .components
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["echo", "wasi:keyvalue-target", "wasi:http-source"]);

        let echo = &manifest.spec.components[0];
        assert_eq!(traits_of(echo).len(), 2);
        let TraitProperty::Link(link) = &traits_of(echo)[1].properties else {
            panic!("expected link trait on component");
        };
        assert_eq!(link.target.name, "wasi:keyvalue-target");

        let server = &manifest.spec.components[2];
        assert_eq!(
            image_of(server),
            Some("ghcr.io/wasmcloud/http-server:canary")
        );
        assert_eq!(traits_of(server)[0].trait_type, LINK_TRAIT);
        let TraitProperty::Link(link) = &traits_of(server)[0].properties else {
            panic!("expected link trait on provider");
        };
        assert_eq!(link.target.name, "echo");
        assert_eq!(link.interfaces, vec!["incoming-handler".to_string()]);
    }

    #[test]
    fn absent_metadata_falls_back_to_engine_defaults() {
        let manifest = create_manifest(&AppMetadata::default(), &WorldInterfaces::default());
        assert_eq!(manifest.metadata.name, crate::DEFAULT_APP_NAME);
        assert_eq!(
            manifest.metadata.annotations["version"],
            crate::DEFAULT_APP_VERSION
        );
        assert_eq!(
            image_of(&manifest.spec.components[0]),
            Some(crate::DEFAULT_APP_IMAGE)
        );
    }
}
