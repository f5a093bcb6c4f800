//! Selection state machine.
//!
//! # Design
//! - The controller is the only owner of the current selection, its loaded bytes, the
//!   drop-zone highlight, and the display region. Transitions are plain methods; no
//!   transition awaits.
//! - Every selection is issued a monotonically increasing [`Ticket`]. Completions that
//!   carry anything but the current ticket are discarded, so a slow read of a replaced
//!   file can never overwrite newer output.
//! - Conversion is split into `conversion_request` and `on_conversion_complete` so the
//!   engine is called without the controller borrowed.

use std::fmt;
use std::rc::Rc;

use tracing::{debug, info, warn};
use wadmify_convert::ConvertResult;

use crate::acquisition::first_file;
use crate::config::{PipelineConfig, Variant};
use crate::error::{PipelineError, PipelineResult};
use crate::model::{ConversionRequest, LoadedFile, ManifestResult, MetadataFields, SelectedFile};
use crate::presentation::{Region, RenderedManifest};
use crate::reader::FileSource;

/// Identifies one selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    /// Raw counter value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A selection whose bytes still have to be read.
#[derive(Debug)]
pub struct PendingRead<F> {
    /// Ticket the read completion must present.
    pub ticket: Ticket,
    /// The file to read.
    pub source: F,
}

/// Result of delivering a read completion.
#[derive(Debug)]
pub enum ReadOutcome {
    /// Bytes are stored; conversion may proceed.
    Loaded,
    /// The read failed and the region shows the error.
    Failed(PipelineError),
    /// The selection was superseded; nothing changed.
    Stale,
}

/// Result of delivering a conversion completion.
#[derive(Debug)]
pub enum Completion {
    /// The manifest is displayed (interactive variant).
    Rendered,
    /// The manifest was logged (minimal variant).
    Logged,
    /// Reading or conversion failed and the region shows the error.
    Failed(PipelineError),
    /// The selection was superseded; nothing changed.
    Stale,
}

impl Completion {
    /// Short label for logs and tests.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Rendered => "rendered",
            Self::Logged => "logged",
            Self::Failed(_) => "failed",
            Self::Stale => "stale",
        }
    }
}

/// Pipeline state for one page.
#[derive(Debug)]
pub struct Controller {
    config: PipelineConfig,
    issued: u64,
    current: Option<Ticket>,
    selected: Option<SelectedFile>,
    loaded: Option<LoadedFile>,
    highlighted: bool,
    region: Region,
}

impl Controller {
    /// Fresh controller with an empty region.
    #[must_use]
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            issued: 0,
            current: None,
            selected: None,
            loaded: None,
            highlighted: false,
            region: Region::Empty,
        }
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Current display region.
    #[must_use]
    pub const fn region(&self) -> &Region {
        &self.region
    }

    /// Whether the drop zone is highlighted.
    #[must_use]
    pub const fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    /// The active selection, if any.
    #[must_use]
    pub const fn selected(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    /// Whether the active selection has finished loading.
    #[must_use]
    pub const fn has_loaded_file(&self) -> bool {
        self.loaded.is_some()
    }

    /// Ticket of the active selection.
    #[must_use]
    pub const fn current_ticket(&self) -> Option<Ticket> {
        self.current
    }

    /// A drag entered or moved over the drop zone.
    pub fn on_drag_over(&mut self) {
        self.highlighted = true;
    }

    /// A drag left the drop zone.
    pub fn on_drag_leave(&mut self) {
        self.highlighted = false;
    }

    /// Files were dropped on the drop zone.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::NoFileSelected`] when the payload is empty.
    pub fn on_drop<F: FileSource>(&mut self, files: Vec<F>) -> PipelineResult<PendingRead<F>> {
        self.highlighted = false;
        let source = first_file(files)?;
        Ok(self.select(source))
    }

    /// The file picker reported a change.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::NoFileSelected`] when the picker was cancelled.
    pub fn on_file_change<F: FileSource>(
        &mut self,
        files: Vec<F>,
    ) -> PipelineResult<PendingRead<F>> {
        let source = first_file(files)?;
        Ok(self.select(source))
    }

    fn select<F: FileSource>(&mut self, source: F) -> PendingRead<F> {
        self.issued += 1;
        let ticket = Ticket(self.issued);
        if let Some(previous) = self.current.replace(ticket) {
            debug!(%previous, %ticket, "selection superseded");
        }
        let file = source.describe();
        info!(%ticket, file = %file.name, bytes = file.byte_size, "file selected");
        self.loaded = None;
        self.region = match self.config.variant() {
            Variant::Minimal => Region::FileInfo(file.clone()),
            Variant::Interactive => Region::Processing(file.clone()),
        };
        self.selected = Some(file);
        PendingRead { ticket, source }
    }

    fn is_current(&self, ticket: Ticket, stage: &'static str) -> bool {
        if self.current == Some(ticket) {
            return true;
        }
        debug!(%ticket, current = ?self.current, stage, "stale completion discarded");
        false
    }

    /// The read for `ticket` finished.
    pub fn on_read_complete(
        &mut self,
        ticket: Ticket,
        result: PipelineResult<Vec<u8>>,
    ) -> ReadOutcome {
        if !self.is_current(ticket, "read") {
            return ReadOutcome::Stale;
        }
        let Some(file) = self.selected.clone() else {
            return ReadOutcome::Stale;
        };
        match result {
            Ok(bytes) => {
                self.loaded = Some(LoadedFile {
                    file,
                    bytes: Rc::from(bytes),
                });
                ReadOutcome::Loaded
            }
            Err(err) => {
                self.fail(&err);
                ReadOutcome::Failed(err)
            }
        }
    }

    /// Build the engine input for the loaded selection.
    ///
    /// `fields` is consulted only by the interactive variant; the minimal variant
    /// always sends bare bytes. Returns `None` while nothing is loaded.
    #[must_use]
    pub fn conversion_request(
        &self,
        fields: Option<&MetadataFields>,
    ) -> Option<(Ticket, ConversionRequest)> {
        let ticket = self.current?;
        let loaded = self.loaded.as_ref()?;
        let request = match self.config.variant() {
            Variant::Minimal => ConversionRequest::bare(loaded),
            Variant::Interactive => {
                let empty = MetadataFields::default();
                ConversionRequest::with_metadata(
                    loaded,
                    fields.unwrap_or(&empty),
                    self.config.defaults(),
                )
            }
        };
        Some((ticket, request))
    }

    /// The engine finished converting the selection identified by `ticket`.
    pub fn on_conversion_complete(
        &mut self,
        ticket: Ticket,
        file_name: &str,
        result: ConvertResult<String>,
    ) -> Completion {
        if !self.is_current(ticket, "conversion") {
            return Completion::Stale;
        }
        match result {
            Ok(text) => {
                let manifest = ManifestResult { text };
                match self.config.variant() {
                    Variant::Minimal => {
                        info!(%ticket, file = %file_name, manifest = %manifest.text, "manifest generated");
                        Completion::Logged
                    }
                    Variant::Interactive => {
                        info!(%ticket, file = %file_name, chars = manifest.text.len(), "manifest rendered");
                        self.region = Region::Manifest(RenderedManifest::render(&manifest));
                        Completion::Rendered
                    }
                }
            }
            Err(source) => {
                let err = PipelineError::Conversion {
                    file_name: file_name.to_string(),
                    source,
                };
                self.fail(&err);
                Completion::Failed(err)
            }
        }
    }

    fn fail(&mut self, err: &PipelineError) {
        warn!(error = %err, "pipeline step failed");
        self.region = Region::Failed {
            message: err.to_string(),
        };
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use wadmify_convert::ConvertError;

    use super::*;
    use crate::error::HostError;

    struct Named(&'static str, u64);

    #[async_trait(?Send)]
    impl FileSource for Named {
        fn name(&self) -> String {
            self.0.to_string()
        }

        fn size(&self) -> u64 {
            self.1
        }

        async fn read_bytes(&self) -> Result<Vec<u8>, HostError> {
            Ok(Vec::new())
        }
    }

    fn controller(variant: Variant) -> Controller {
        Controller::new(PipelineConfig::for_variant(variant))
    }

    #[test]
    fn drag_highlight_toggles() {
        let mut controller = controller(Variant::Interactive);
        controller.on_drag_over();
        assert!(controller.is_highlighted());
        controller.on_drag_leave();
        assert!(!controller.is_highlighted());
        controller.on_drag_over();
        let _ = controller.on_drop(vec![Named("a.wasm", 1)]);
        assert!(!controller.is_highlighted());
    }

    #[test]
    fn empty_drop_leaves_state_alone() {
        let mut controller = controller(Variant::Interactive);
        controller.on_drag_over();
        assert!(matches!(
            controller.on_drop(Vec::<Named>::new()),
            Err(PipelineError::NoFileSelected)
        ));
        assert!(!controller.is_highlighted());
        assert_eq!(controller.region(), &Region::Empty);
        assert!(controller.current_ticket().is_none());
    }

    #[test]
    fn selection_region_depends_on_variant() {
        let mut minimal = controller(Variant::Minimal);
        let _ = minimal.on_file_change(vec![Named("a.wasm", 10), Named("b.wasm", 20)]);
        assert_eq!(
            minimal.region(),
            &Region::FileInfo(SelectedFile {
                name: "a.wasm".to_string(),
                byte_size: 10
            })
        );

        let mut interactive = controller(Variant::Interactive);
        let _ = interactive.on_file_change(vec![Named("a.wasm", 10)]);
        assert_eq!(interactive.region().label(), "processing");
    }

    #[test]
    fn tickets_increase_per_selection() {
        let mut controller = controller(Variant::Interactive);
        let first = controller
            .on_file_change(vec![Named("a.wasm", 1)])
            .expect("selection")
            .ticket;
        let second = controller
            .on_drop(vec![Named("b.wasm", 1)])
            .expect("selection")
            .ticket;
        assert!(second > first);
        assert_eq!(controller.current_ticket(), Some(second));
    }

    #[test]
    fn stale_read_is_discarded() {
        let mut controller = controller(Variant::Interactive);
        let first = controller
            .on_file_change(vec![Named("a.wasm", 1)])
            .expect("selection")
            .ticket;
        let _ = controller.on_file_change(vec![Named("b.wasm", 1)]);
        assert!(matches!(
            controller.on_read_complete(first, Ok(vec![1])),
            ReadOutcome::Stale
        ));
        assert!(!controller.has_loaded_file());
        assert!(controller.conversion_request(None).is_none());
    }

    #[test]
    fn read_failure_shows_error() {
        let mut controller = controller(Variant::Minimal);
        let ticket = controller
            .on_file_change(vec![Named("a.wasm", 1)])
            .expect("selection")
            .ticket;
        let outcome = controller.on_read_complete(
            ticket,
            Err(PipelineError::Read {
                file_name: "a.wasm".to_string(),
                detail: "NotReadableError".to_string(),
            }),
        );
        assert!(matches!(outcome, ReadOutcome::Failed(_)));
        match controller.region() {
            Region::Failed { message } => assert!(message.contains("NotReadableError")),
            other => panic!("unexpected region {other:?}"),
        }
    }

    #[test]
    fn minimal_variant_sends_bare_request_and_keeps_file_info() {
        let mut controller = controller(Variant::Minimal);
        let ticket = controller
            .on_file_change(vec![Named("a.wasm", 2)])
            .expect("selection")
            .ticket;
        assert!(matches!(
            controller.on_read_complete(ticket, Ok(vec![0, 1])),
            ReadOutcome::Loaded
        ));
        let fields = MetadataFields {
            version: "v9.9.9".to_string(),
            ..MetadataFields::default()
        };
        let (issued, request) = controller
            .conversion_request(Some(&fields))
            .expect("request");
        assert_eq!(issued, ticket);
        assert!(request.metadata.version.is_none());

        let completion =
            controller.on_conversion_complete(ticket, "a.wasm", Ok("kind: Application".to_string()));
        assert!(matches!(completion, Completion::Logged));
        assert_eq!(controller.region().label(), "file-info");
    }

    #[test]
    fn interactive_conversion_renders_or_fails() {
        let mut controller = controller(Variant::Interactive);
        let ticket = controller
            .on_file_change(vec![Named("a.wasm", 2)])
            .expect("selection")
            .ticket;
        let _ = controller.on_read_complete(ticket, Ok(vec![0, 1]));
        let (_, request) = controller.conversion_request(None).expect("request");
        assert_eq!(request.metadata.version.as_deref(), Some("v0.1.0"));

        let completion =
            controller.on_conversion_complete(ticket, "a.wasm", Ok("name: <a>".to_string()));
        assert_eq!(completion.label(), "rendered");
        let rendered = controller.region().manifest().expect("manifest");
        assert_eq!(rendered.displayed_text(), "name: <a>");

        let completion = controller.on_conversion_complete(
            ticket,
            "a.wasm",
            Err(ConvertError::Decode {
                detail: "bad magic".to_string(),
            }),
        );
        assert_eq!(completion.label(), "failed");
        assert_eq!(controller.region().label(), "failed");
    }

    #[test]
    fn stale_conversion_is_discarded() {
        let mut controller = controller(Variant::Interactive);
        let first = controller
            .on_file_change(vec![Named("a.wasm", 1)])
            .expect("selection")
            .ticket;
        let _ = controller.on_file_change(vec![Named("b.wasm", 1)]);
        let completion = controller.on_conversion_complete(first, "a.wasm", Ok("x".to_string()));
        assert!(matches!(completion, Completion::Stale));
        assert_eq!(controller.region().label(), "processing");
    }
}
