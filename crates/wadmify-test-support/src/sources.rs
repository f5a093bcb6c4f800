//! File sources with scripted read behaviour.

use std::cell::RefCell;

use async_trait::async_trait;
use tokio::sync::oneshot;
use wadmify_pipeline::{FileSource, HostError};

/// Source whose read resolves immediately with a fixed outcome.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    name: String,
    size: u64,
    outcome: Result<Vec<u8>, HostError>,
}

impl ScriptedSource {
    /// Read succeeds with `bytes`.
    #[must_use]
    pub fn ok(name: &str, bytes: impl Into<Vec<u8>>) -> Self {
        let bytes = bytes.into();
        Self {
            name: name.to_string(),
            size: bytes.len() as u64,
            outcome: Ok(bytes),
        }
    }

    /// Read fails with `detail`.
    #[must_use]
    pub fn failing(name: &str, detail: &str) -> Self {
        Self {
            name: name.to_string(),
            size: 0,
            outcome: Err(HostError::new(detail)),
        }
    }
}

#[async_trait(?Send)]
impl FileSource for ScriptedSource {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn size(&self) -> u64 {
        self.size
    }

    async fn read_bytes(&self) -> Result<Vec<u8>, HostError> {
        self.outcome.clone()
    }
}

/// Source whose read never completes.
#[derive(Debug, Clone)]
pub struct StalledSource {
    name: String,
}

impl StalledSource {
    /// Stalled source called `name`.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

#[async_trait(?Send)]
impl FileSource for StalledSource {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn size(&self) -> u64 {
        0
    }

    async fn read_bytes(&self) -> Result<Vec<u8>, HostError> {
        futures_util::future::pending().await
    }
}

/// Releases a [`GatedSource`] read.
#[derive(Debug)]
pub struct Gate {
    sender: oneshot::Sender<Vec<u8>>,
}

impl Gate {
    /// Complete the gated read with `bytes`.
    pub fn release(self, bytes: impl Into<Vec<u8>>) {
        let _ = self.sender.send(bytes.into());
    }
}

/// Source whose read completes when its [`Gate`] is released.
#[derive(Debug)]
pub struct GatedSource {
    name: String,
    receiver: RefCell<Option<oneshot::Receiver<Vec<u8>>>>,
}

impl GatedSource {
    /// Gated source called `name` and the gate that releases it.
    #[must_use]
    pub fn new(name: &str) -> (Self, Gate) {
        let (sender, receiver) = oneshot::channel();
        (
            Self {
                name: name.to_string(),
                receiver: RefCell::new(Some(receiver)),
            },
            Gate { sender },
        )
    }
}

#[async_trait(?Send)]
impl FileSource for GatedSource {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn size(&self) -> u64 {
        0
    }

    async fn read_bytes(&self) -> Result<Vec<u8>, HostError> {
        let receiver = self
            .receiver
            .borrow_mut()
            .take()
            .ok_or_else(|| HostError::new("read already started"))?;
        receiver
            .await
            .map_err(|_| HostError::new("gate dropped before release"))
    }
}
