//! OAM application model emitted by the converter.
//!
//! The schema itself comes from `wadm-types`; this module holds the small
//! constructors the converter needs on top of it.

pub use wadm_types::{
    APPLICATION_KIND, CapabilityProperties, Component, ComponentProperties, LINK_TRAIT,
    LinkProperty, Manifest, Metadata, OAM_VERSION, Properties, SPREADSCALER_TRAIT, Specification,
    SpreadScalerProperty, TargetConfig, Trait, TraitProperty,
};

/// Label recording which tool produced the manifest.
pub const GENERATED_BY_LABEL: &str = "generated-by";

/// Spreadscaler trait with the given instance count.
#[must_use]
pub fn spreadscaler(instances: usize) -> Trait {
    Trait {
        trait_type: SPREADSCALER_TRAIT.to_string(),
        properties: TraitProperty::SpreadScaler(SpreadScalerProperty {
            instances,
            spread: Vec::new(),
        }),
    }
}

/// Link trait wrapping the given properties.
#[must_use]
pub fn link(properties: LinkProperty) -> Trait {
    Trait {
        trait_type: LINK_TRAIT.to_string(),
        properties: TraitProperty::Link(properties),
    }
}

/// Link over `interfaces` of `namespace:package` aimed at the component named `target`.
#[must_use]
#[allow(deprecated)]
pub fn link_property(
    target: &str,
    namespace: &str,
    package: &str,
    interfaces: Vec<String>,
) -> LinkProperty {
    LinkProperty {
        namespace: namespace.to_string(),
        package: package.to_string(),
        interfaces,
        source: None,
        target: TargetConfig {
            name: target.to_string(),
            config: Vec::new(),
            secrets: Vec::new(),
        },
        name: None,
        source_config: None,
        target_config: None,
    }
}

/// The user's component, referenced by image.
#[must_use]
pub fn user_component(name: &str, image: &str, traits: Vec<Trait>) -> Component {
    Component {
        name: name.to_string(),
        properties: Properties::Component {
            properties: ComponentProperties {
                image: Some(image.to_string()),
                application: None,
                id: None,
                config: Vec::new(),
                secrets: Vec::new(),
            },
        },
        traits: (!traits.is_empty()).then_some(traits),
    }
}

/// A capability provider, referenced by image.
#[must_use]
pub fn capability_component(name: String, image: String) -> Component {
    Component {
        name,
        properties: Properties::Capability {
            properties: CapabilityProperties {
                image: Some(image),
                application: None,
                id: None,
                config: Vec::new(),
                secrets: Vec::new(),
            },
        },
        traits: None,
    }
}

/// Image reference of a component or capability entry.
#[must_use]
pub fn image_of(component: &Component) -> Option<&str> {
    match &component.properties {
        Properties::Component { properties } => properties.image.as_deref(),
        Properties::Capability { properties } => properties.image.as_deref(),
    }
}

/// Traits attached to an entry, empty when it has none.
#[must_use]
pub fn traits_of(component: &Component) -> &[Trait] {
    component.traits.as_deref().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_trait_list_is_omitted() {
        let component = user_component("echo", "file:///echo.wasm", Vec::new());
        assert!(component.traits.is_none());
        assert!(traits_of(&component).is_empty());
        assert_eq!(image_of(&component), Some("file:///echo.wasm"));
    }

    #[test]
    fn link_property_targets_named_component() {
        let link = link_property("echo", "wasi", "http", vec!["incoming-handler".to_string()]);
        assert_eq!(link.target.name, "echo");
        assert!(link.target.config.is_empty());
        assert_eq!(link.package, "http");
    }
}
