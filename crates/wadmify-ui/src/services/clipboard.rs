//! Async Clipboard API adapter.

use async_trait::async_trait;
use wadmify_pipeline::{Clipboard, HostError};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

/// Writes through `navigator.clipboard`.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct BrowserClipboard;

#[async_trait(?Send)]
impl Clipboard for BrowserClipboard {
    async fn write_text(&self, text: &str) -> Result<(), HostError> {
        let window = web_sys::window().ok_or_else(|| HostError::new("window unavailable"))?;
        let promise = window.navigator().clipboard().write_text(text);
        JsFuture::from(promise)
            .await
            .map(|_| ())
            .map_err(|err| HostError::new(describe(&err)))
    }
}

fn describe(err: &JsValue) -> String {
    err.dyn_ref::<js_sys::Error>()
        .map(|error| String::from(error.message()))
        .or_else(|| err.as_string())
        .unwrap_or_else(|| "clipboard rejected the write".to_string())
}
