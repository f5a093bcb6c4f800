//! Component decoding backed by `wit-component`.

use tracing::debug;
use wit_component::DecodedWasm;

use crate::error::{ConvertError, ConvertResult};
use crate::manifest::{WorldInterfaces, create_manifest};
use crate::{AppMetadata, ConversionEngine, render_yaml};

/// Extract the import and export names of a component's world.
///
/// # Errors
///
/// Returns [`ConvertError::Decode`] when the bytes are not a component,
/// [`ConvertError::WitPackageUnsupported`] for binary WIT packages, and
/// [`ConvertError::WorldMissing`] if the decoded world cannot be found.
pub fn world_interfaces(component: &[u8]) -> ConvertResult<WorldInterfaces> {
    let decoded = wit_component::decode(component).map_err(|err| ConvertError::Decode {
        detail: format!("{err:#}"),
    })?;
    let (resolve, world_id) = match decoded {
        DecodedWasm::Component(resolve, world_id) => (resolve, world_id),
        _ => return Err(ConvertError::WitPackageUnsupported),
    };
    let world = resolve
        .worlds
        .get(world_id)
        .ok_or(ConvertError::WorldMissing)?;

    let interfaces = WorldInterfaces {
        imports: world
            .imports
            .keys()
            .map(|key| resolve.name_world_key(key))
            .collect(),
        exports: world
            .exports
            .keys()
            .map(|key| resolve.name_world_key(key))
            .collect(),
    };
    debug!(
        world = %world.name,
        imports = interfaces.imports.len(),
        exports = interfaces.exports.len(),
        "decoded component world"
    );
    Ok(interfaces)
}

/// Engine that decodes real WebAssembly components.
#[derive(Clone, Copy, Debug, Default)]
pub struct ComponentEngine;

impl ConversionEngine for ComponentEngine {
    fn convert(&self, component: &[u8], metadata: &AppMetadata) -> ConvertResult<String> {
        let world = world_interfaces(component)?;
        render_yaml(&create_manifest(metadata, &world))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wit_component::{ComponentEncoder, StringEncoding, dummy_module, embed_component_metadata};
    use wit_parser::{Mangling, Resolve};

    const ECHO_WIT: &str = r#"
package acme:echo@0.1.0;

interface store {
    get: func(key: string) -> option<string>;
}

world echo {
    import wasi:keyvalue/store@0.2.0-draft;
    import store;
    export wasi:http/incoming-handler@0.2.0;
}

package wasi:keyvalue@0.2.0-draft {
    interface store {
        get: func(key: string) -> option<string>;
    }
}

package wasi:http@0.2.0 {
    interface incoming-handler {
        handle: func(request: string) -> string;
    }
}
"#;

    fn echo_component() -> Vec<u8> {
        let mut resolve = Resolve::default();
        let package = resolve.push_str("echo.wit", ECHO_WIT).expect("parse wit");
        let world = resolve
            .select_world(package, Some("echo"))
            .expect("echo world");
        let mut module = dummy_module(&resolve, world, Mangling::Standard32);
        embed_component_metadata(&mut module, &resolve, world, StringEncoding::UTF8)
            .expect("embed metadata");
        ComponentEncoder::default()
            .module(&module)
            .expect("core module")
            .validate(true)
            .encode()
            .expect("encode component")
    }

    fn echo_metadata() -> AppMetadata {
        AppMetadata {
            name: Some("echo".to_string()),
            description: Some("An Echo Application".to_string()),
            version: Some("v0.1.0".to_string()),
            image: Some("file:///path/to/echo.wasm".to_string()),
        }
    }

    #[test]
    fn world_names_are_fully_qualified() {
        let world = world_interfaces(&echo_component()).expect("decode component");
        assert!(
            world
                .imports
                .contains(&"wasi:keyvalue/store@0.2.0-draft".to_string())
        );
        assert!(world.imports.contains(&"acme:echo/store@0.1.0".to_string()));
        assert_eq!(
            world.exports,
            vec!["wasi:http/incoming-handler@0.2.0".to_string()]
        );
    }

    #[test]
    fn real_component_renders_linked_manifest() {
        let yaml = ComponentEngine
            .convert(&echo_component(), &echo_metadata())
            .expect("convert component");
        let value: serde_yaml::Value = serde_yaml::from_str(&yaml).expect("valid yaml");
        let components = value["spec"]["components"]
            .as_sequence()
            .expect("component list");
        let names: Vec<&str> = components
            .iter()
            .filter_map(|component| component["name"].as_str())
            .collect();
        assert_eq!(
            names,
            vec![
                "echo",
                "acme:echo-target",
                "wasi:keyvalue-target",
                "wasi:http-source"
            ]
        );

        let echo = &components[0];
        assert_eq!(echo["type"].as_str(), Some("component"));
        assert_eq!(
            echo["properties"]["image"].as_str(),
            Some("file:///path/to/echo.wasm")
        );
        let traits = echo["traits"].as_sequence().expect("component traits");
        assert_eq!(traits.len(), 3);
        assert_eq!(traits[0]["type"].as_str(), Some("spreadscaler"));
        assert_eq!(traits[0]["properties"]["instances"].as_u64(), Some(1));

        assert_eq!(
            components[1]["properties"]["image"].as_str(),
            Some("REGISTRY-IMAGE/acme-echo-target:0.1.0")
        );
        assert_eq!(
            components[2]["properties"]["image"].as_str(),
            Some("ghcr.io/wasmcloud/keyvalue-redis:canary")
        );

        let server = &components[3];
        assert_eq!(
            server["properties"]["image"].as_str(),
            Some("ghcr.io/wasmcloud/http-server:canary")
        );
        let link = &server["traits"][0];
        assert_eq!(link["type"].as_str(), Some("link"));
        assert_eq!(link["properties"]["target"]["name"].as_str(), Some("echo"));
        assert_eq!(
            link["properties"]["interfaces"][0].as_str(),
            Some("incoming-handler")
        );
    }

    #[test]
    fn empty_input_is_rejected_with_detail() {
        let err = ComponentEngine
            .convert(&[], &AppMetadata::default())
            .expect_err("empty bytes are not a component");
        assert!(matches!(err, ConvertError::Decode { .. }));
        assert!(err.to_string().starts_with("component could not be decoded"));
    }

    #[test]
    fn non_wasm_bytes_are_rejected() {
        let err = world_interfaces(b"definitely not wasm").expect_err("garbage bytes");
        assert_eq!(err.kind(), "decode");
    }
}
