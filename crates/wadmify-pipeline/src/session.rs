//! Async driver that ties the controller to an engine and platform adapters.

use std::cell::RefCell;

use tracing::{debug, info};
use wadmify_convert::ConversionEngine;

use crate::config::{PipelineConfig, Variant};
use crate::controller::{Completion, Controller, PendingRead, ReadOutcome};
use crate::error::{PipelineError, PipelineResult};
use crate::model::{MetadataFields, SelectedFile};
use crate::presentation::{Clipboard, Notifier, Region, copy_displayed};
use crate::reader::{FileSource, Timer, read_with_deadline};

/// One page's pipeline: controller state plus the engine and timer it drives.
///
/// Controller borrows are never held across an await, so several completions may
/// be in flight on the same thread.
pub struct Session<E, T> {
    engine: E,
    timer: T,
    controller: RefCell<Controller>,
}

impl<E, T> Session<E, T>
where
    E: ConversionEngine,
    T: Timer,
{
    /// Create a session with an empty region.
    #[must_use]
    pub fn new(config: PipelineConfig, engine: E, timer: T) -> Self {
        Self {
            engine,
            timer,
            controller: RefCell::new(Controller::new(config)),
        }
    }

    /// Deployed variant.
    #[must_use]
    pub fn variant(&self) -> Variant {
        self.controller.borrow().config().variant()
    }

    /// Snapshot of the display region.
    #[must_use]
    pub fn region(&self) -> Region {
        self.controller.borrow().region().clone()
    }

    /// Whether the drop zone is highlighted.
    #[must_use]
    pub fn is_highlighted(&self) -> bool {
        self.controller.borrow().is_highlighted()
    }

    /// The active selection.
    #[must_use]
    pub fn selected(&self) -> Option<SelectedFile> {
        self.controller.borrow().selected().cloned()
    }

    /// Whether the active selection can be reconverted.
    #[must_use]
    pub fn can_reconvert(&self) -> bool {
        self.controller.borrow().has_loaded_file()
    }

    /// Drag entered the drop zone.
    pub fn drag_over(&self) {
        self.controller.borrow_mut().on_drag_over();
    }

    /// Drag left the drop zone.
    pub fn drag_leave(&self) {
        self.controller.borrow_mut().on_drag_leave();
    }

    /// Files dropped; `None` when the payload held no file.
    pub fn drop_files<F: FileSource>(&self, files: Vec<F>) -> Option<PendingRead<F>> {
        Self::selection(self.controller.borrow_mut().on_drop(files))
    }

    /// Picker changed; `None` when it was cancelled.
    pub fn pick_files<F: FileSource>(&self, files: Vec<F>) -> Option<PendingRead<F>> {
        Self::selection(self.controller.borrow_mut().on_file_change(files))
    }

    fn selection<F>(result: PipelineResult<PendingRead<F>>) -> Option<PendingRead<F>> {
        match result {
            Ok(pending) => Some(pending),
            Err(err) => {
                debug!(error = %err, "selection ignored");
                None
            }
        }
    }

    /// Read the pending file and convert it.
    ///
    /// `collect` reads the metadata form; it runs after the read completes and only
    /// in the interactive variant.
    pub async fn complete<F, C>(&self, pending: PendingRead<F>, collect: C) -> Completion
    where
        F: FileSource,
        C: FnOnce() -> MetadataFields,
    {
        let limit = self.controller.borrow().config().read_timeout();
        let result = read_with_deadline(&pending.source, &self.timer, limit).await;
        let outcome = self
            .controller
            .borrow_mut()
            .on_read_complete(pending.ticket, result);
        match outcome {
            ReadOutcome::Stale => Completion::Stale,
            ReadOutcome::Failed(err) => Completion::Failed(err),
            ReadOutcome::Loaded => {
                let fields = match self.variant() {
                    Variant::Interactive => Some(collect()),
                    Variant::Minimal => None,
                };
                self.convert(fields.as_ref())
            }
        }
    }

    /// Convert the already-loaded selection again with fresh metadata.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::NoFileSelected`] if nothing has finished loading.
    pub fn reconvert(&self, fields: &MetadataFields) -> PipelineResult<Completion> {
        if !self.can_reconvert() {
            return Err(PipelineError::NoFileSelected);
        }
        Ok(self.convert(Some(fields)))
    }

    fn convert(&self, fields: Option<&MetadataFields>) -> Completion {
        let Some((ticket, request)) = self.controller.borrow().conversion_request(fields) else {
            return Completion::Stale;
        };
        info!(
            %ticket,
            file = %request.file_name,
            bytes = request.bytes.len(),
            "converting component"
        );
        let result = self.engine.convert(&request.bytes, &request.metadata);
        self.controller
            .borrow_mut()
            .on_conversion_complete(ticket, &request.file_name, result)
    }

    /// Copy the displayed manifest.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::NothingToCopy`] without a displayed manifest and
    /// [`PipelineError::Clipboard`] when the write fails.
    pub async fn copy_manifest<C, N>(&self, clipboard: &C, notifier: &N) -> PipelineResult<()>
    where
        C: Clipboard + ?Sized,
        N: Notifier + ?Sized,
    {
        let region = self.region();
        copy_displayed(&region, clipboard, notifier).await
    }
}
