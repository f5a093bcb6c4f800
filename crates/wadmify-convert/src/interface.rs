//! Classification of WIT world imports and exports into manifest entries.
//!
//! # Design
//! - Interfaces the wasmCloud host satisfies itself never reach the manifest.
//! - Interfaces sharing namespace, package, version and direction collapse into one
//!   capability so a single provider serves them all.
//! - Grouping is keyed on an ordered map so the emitted manifest is stable.

use std::collections::BTreeMap;

use crate::model::{LinkProperty, link_property};

/// Interfaces satisfied by the host and omitted from manifests.
const HOST_PROVIDED: &[&str] = &[
    "wasi:logging/logging",
    "wasi:random/random@0.2.0",
    "wasi:http/types@0.2.0",
    "wasmcloud:messaging/types@0.2.0",
    "wasi:blobstore/types@0.2.0-draft",
    "wasi:config/runtime@0.2.0-draft",
    "wasmcloud:bus/lattice@1.0.0",
];

/// Package prefixes satisfied by the host and omitted from manifests.
const HOST_PROVIDED_PREFIXES: &[&str] = &[
    "wasi:io/",
    "wasi:clocks/",
    "wasi:filesystem/",
    "wasi:cli/",
    "wasi:sockets/",
];

/// Direction of an interface relative to the user's component.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Direction {
    /// The component calls the interface; a provider is the link target.
    Import,
    /// The component implements the interface; a provider is the link source.
    Export,
}

impl Direction {
    /// Suffix used when naming the capability serving this direction.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Import => "target",
            Self::Export => "source",
        }
    }
}

/// A single `namespace:package/interface@version` reference with its direction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirectionalInterface<'a> {
    /// WIT namespace (e.g. `wasi`).
    pub namespace: &'a str,
    /// WIT package (e.g. `http`).
    pub package: &'a str,
    /// Interface name (e.g. `incoming-handler`).
    pub interface: &'a str,
    /// Package version, when qualified.
    pub version: Option<&'a str>,
    /// Import or export.
    pub direction: Direction,
}

impl<'a> DirectionalInterface<'a> {
    /// Parse an interface name for inclusion in a manifest.
    ///
    /// Returns `None` for host-provided interfaces and for names lacking a
    /// namespace, package or interface (bare world functions and types).
    #[must_use]
    pub fn parse_for_manifest(name: &'a str, direction: Direction) -> Option<Self> {
        if is_host_provided(name) {
            return None;
        }
        let (namespace, rest) = name.split_once(':')?;
        let (package, rest) = rest.split_once('/')?;
        let (interface, version) = match rest.split_once('@') {
            Some((interface, version)) => (interface, Some(version)),
            None => (rest, None),
        };
        if namespace.is_empty() || package.is_empty() || interface.is_empty() {
            return None;
        }
        Some(Self {
            namespace,
            package,
            interface,
            version,
            direction,
        })
    }
}

fn is_host_provided(name: &str) -> bool {
    HOST_PROVIDED.contains(&name)
        || HOST_PROVIDED_PREFIXES
            .iter()
            .any(|prefix| name.starts_with(prefix))
}

/// Interfaces of one package grouped for a single capability.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CombinedInterface<'a> {
    /// WIT namespace.
    pub namespace: &'a str,
    /// WIT package.
    pub package: &'a str,
    /// Package version, when qualified.
    pub version: Option<&'a str>,
    /// Import or export.
    pub direction: Direction,
    /// Interface names in first-seen order.
    pub interfaces: Vec<&'a str>,
}

type GroupKey<'a> = (&'a str, &'a str, Option<&'a str>, Direction);

/// Group interfaces sharing namespace, package, version and direction.
#[must_use]
pub fn combine_interfaces<'a>(
    interfaces: impl IntoIterator<Item = DirectionalInterface<'a>>,
) -> Vec<CombinedInterface<'a>> {
    let mut groups: BTreeMap<GroupKey<'a>, Vec<&'a str>> = BTreeMap::new();
    for interface in interfaces {
        let entry = groups
            .entry((
                interface.namespace,
                interface.package,
                interface.version,
                interface.direction,
            ))
            .or_default();
        if !entry.contains(&interface.interface) {
            entry.push(interface.interface);
        }
    }

    groups
        .into_iter()
        .map(
            |((namespace, package, version, direction), interfaces)| CombinedInterface {
                namespace,
                package,
                version,
                direction,
                interfaces,
            },
        )
        .collect()
}

impl CombinedInterface<'_> {
    /// Capability name, e.g. `wasi:http-target`.
    #[must_use]
    pub fn name(&self) -> String {
        format!(
            "{}:{}-{}",
            self.namespace,
            self.package,
            self.direction.as_str()
        )
    }

    /// Whether the host handles this group without a capability provider.
    fn host_managed(&self) -> bool {
        let types_only = self.interfaces == ["types"];
        match (self.namespace, self.package) {
            ("wasi", "logging" | "io" | "clocks" | "sockets" | "filesystem" | "cli")
            | ("wasmcloud", "bus") => true,
            ("wasi", "http" | "blobstore" | "random") | ("wasmcloud", "messaging") => types_only,
            ("wasi", "config") => self.interfaces == ["runtime"],
            _ => false,
        }
    }

    /// Provider image for this group, or `None` when the host covers it.
    #[must_use]
    pub fn capability_image(&self) -> Option<String> {
        if self.host_managed() {
            return None;
        }
        let image = match (self.namespace, self.package, self.direction) {
            ("wasi", "blobstore", _) => "ghcr.io/wasmcloud/blobstore-fs:canary".to_string(),
            ("wasi", "http", Direction::Import) => {
                "ghcr.io/wasmcloud/http-client:canary".to_string()
            }
            ("wasi", "http", Direction::Export) => {
                "ghcr.io/wasmcloud/http-server:canary".to_string()
            }
            ("wasi", "keyvalue", _) => "ghcr.io/wasmcloud/keyvalue-redis:canary".to_string(),
            ("wasmcloud", "messaging", _) => "ghcr.io/wasmcloud/messaging-nats:canary".to_string(),
            (namespace, package, direction) => format!(
                "REGISTRY-IMAGE/{namespace}-{package}-{}:{}",
                direction.as_str(),
                self.version.unwrap_or("latest")
            ),
        };
        Some(image)
    }

    /// Link properties pointing at `target`, or `None` when the host covers it.
    #[must_use]
    pub fn link_to(&self, target: &str) -> Option<LinkProperty> {
        if self.host_managed() {
            return None;
        }
        Some(link_property(
            target,
            self.namespace,
            self.package,
            self.interfaces.iter().map(ToString::to_string).collect(),
        ))
    }
}
