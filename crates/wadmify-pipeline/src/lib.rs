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

//! DOM-free ingestion and rendering pipeline.
//! Layout: config.rs (variant + defaults), model.rs (selection/request types),
//! acquisition.rs (drop/picker normalisation), reader.rs (async read + deadline),
//! controller.rs (ticketed state machine), presentation.rs (escaping, region, copy),
//! session.rs (async driver), error.rs (failure taxonomy).

pub mod acquisition;
pub mod config;
pub mod controller;
pub mod error;
pub mod model;
pub mod presentation;
pub mod reader;
pub mod session;

pub use config::{
    DEFAULT_IMAGE_PREFIX, DEFAULT_READ_TIMEOUT, DEFAULT_VERSION, MetadataDefaults,
    PipelineConfig, Variant,
};
pub use controller::{Completion, Controller, PendingRead, ReadOutcome, Ticket};
pub use error::{ConfigError, ConfigResult, HostError, PipelineError, PipelineResult};
pub use model::{ConversionRequest, LoadedFile, ManifestResult, MetadataFields, SelectedFile};
pub use presentation::{
    Clipboard, Notifier, Region, RenderedManifest, copy_displayed, escape_html, unescape_html,
};
pub use reader::{FileSource, Timer, read_with_deadline};
pub use session::Session;
