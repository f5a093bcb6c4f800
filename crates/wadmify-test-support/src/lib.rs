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

//! Shared test helpers used across integration suites.
//! Layout: sources.rs (scripted file sources), engine.rs (fake conversion engine),
//! host.rs (clipboard, notifier and timer fakes).

pub mod engine;
pub mod host;
pub mod sources;

pub use engine::{EngineCall, FakeEngine};
pub use host::{ImmediateTimer, NeverTimer, RecordingClipboard, RecordingNotifier};
pub use sources::{Gate, GatedSource, ScriptedSource, StalledSource};
