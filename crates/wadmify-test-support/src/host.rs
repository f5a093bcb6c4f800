//! Clipboard, notifier, and timer fakes.

use std::cell::RefCell;
use std::time::Duration;

use async_trait::async_trait;
use wadmify_pipeline::{Clipboard, HostError, Notifier, Timer};

/// Clipboard that stores writes or rejects them.
#[derive(Debug, Default)]
pub struct RecordingClipboard {
    failure: Option<String>,
    contents: RefCell<Option<String>>,
    attempts: RefCell<usize>,
}

impl RecordingClipboard {
    /// Clipboard that accepts every write.
    #[must_use]
    pub fn accepting() -> Self {
        Self::default()
    }

    /// Clipboard that fails every write with `detail`.
    #[must_use]
    pub fn rejecting(detail: &str) -> Self {
        Self {
            failure: Some(detail.to_string()),
            ..Self::default()
        }
    }

    /// Text currently on the clipboard.
    #[must_use]
    pub fn contents(&self) -> Option<String> {
        self.contents.borrow().clone()
    }

    /// Number of write attempts.
    #[must_use]
    pub fn attempts(&self) -> usize {
        *self.attempts.borrow()
    }
}

#[async_trait(?Send)]
impl Clipboard for RecordingClipboard {
    async fn write_text(&self, text: &str) -> Result<(), HostError> {
        *self.attempts.borrow_mut() += 1;
        if let Some(detail) = &self.failure {
            return Err(HostError::new(detail.clone()));
        }
        *self.contents.borrow_mut() = Some(text.to_string());
        Ok(())
    }
}

/// Notifier that records what would have been shown.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    successes: RefCell<Vec<String>>,
    alerts: RefCell<Vec<String>>,
}

impl RecordingNotifier {
    /// Non-blocking notices, oldest first.
    #[must_use]
    pub fn successes(&self) -> Vec<String> {
        self.successes.borrow().clone()
    }

    /// Blocking alerts, oldest first.
    #[must_use]
    pub fn alerts(&self) -> Vec<String> {
        self.alerts.borrow().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.successes.borrow_mut().push(message.to_string());
    }

    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }
}

/// Timer whose deadline expires as soon as it is polled.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImmediateTimer;

#[async_trait(?Send)]
impl Timer for ImmediateTimer {
    async fn sleep(&self, _duration: Duration) {}
}

/// Timer that never fires.
#[derive(Debug, Default, Clone, Copy)]
pub struct NeverTimer;

#[async_trait(?Send)]
impl Timer for NeverTimer {
    async fn sleep(&self, _duration: Duration) {
        futures_util::future::pending::<()>().await;
    }
}
