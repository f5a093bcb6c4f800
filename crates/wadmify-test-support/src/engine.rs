//! Conversion engine fake that records its inputs.

use std::cell::RefCell;

use wadmify_convert::{
    AppMetadata, ConversionEngine, ConvertError, ConvertResult, WorldInterfaces, create_manifest,
    render_yaml,
};

/// One recorded engine invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineCall {
    /// Bytes handed to the engine.
    pub bytes: Vec<u8>,
    /// Metadata handed to the engine.
    pub metadata: AppMetadata,
}

#[derive(Debug, Clone)]
enum Behaviour {
    Manifest,
    Fixed(String),
    Reject(String),
}

/// Engine fake with scripted output.
#[derive(Debug)]
pub struct FakeEngine {
    behaviour: Behaviour,
    calls: RefCell<Vec<EngineCall>>,
}

impl FakeEngine {
    /// Renders a real manifest with no interfaces from the supplied metadata.
    #[must_use]
    pub const fn rendering() -> Self {
        Self::with(Behaviour::Manifest)
    }

    /// Always returns `text`.
    #[must_use]
    pub fn returning(text: &str) -> Self {
        Self::with(Behaviour::Fixed(text.to_string()))
    }

    /// Always fails with a decode error carrying `detail`.
    #[must_use]
    pub fn rejecting(detail: &str) -> Self {
        Self::with(Behaviour::Reject(detail.to_string()))
    }

    const fn with(behaviour: Behaviour) -> Self {
        Self {
            behaviour,
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Recorded invocations, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<EngineCall> {
        self.calls.borrow().clone()
    }

    /// Most recent invocation.
    #[must_use]
    pub fn last_call(&self) -> Option<EngineCall> {
        self.calls.borrow().last().cloned()
    }
}

impl ConversionEngine for FakeEngine {
    fn convert(&self, component: &[u8], metadata: &AppMetadata) -> ConvertResult<String> {
        self.calls.borrow_mut().push(EngineCall {
            bytes: component.to_vec(),
            metadata: metadata.clone(),
        });
        match &self.behaviour {
            Behaviour::Manifest => {
                render_yaml(&create_manifest(metadata, &WorldInterfaces::default()))
            }
            Behaviour::Fixed(text) => Ok(text.clone()),
            Behaviour::Reject(detail) => Err(ConvertError::Decode {
                detail: detail.clone(),
            }),
        }
    }
}
