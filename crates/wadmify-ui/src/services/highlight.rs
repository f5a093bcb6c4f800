//! Optional page-provided syntax highlighter.

use js_sys::{Function, Reflect};
use tracing::debug;
use wasm_bindgen::{JsCast, JsValue};

/// Run `Prism.highlightAll()` when the page loaded Prism.
pub(crate) fn highlight_all() {
    let global = js_sys::global();
    let Ok(prism) = Reflect::get(&global, &JsValue::from_str("Prism")) else {
        return;
    };
    if prism.is_undefined() || prism.is_null() {
        return;
    }
    let Some(highlight) = Reflect::get(&prism, &JsValue::from_str("highlightAll"))
        .ok()
        .and_then(|value| value.dyn_into::<Function>().ok())
    else {
        return;
    };
    if let Err(err) = highlight.call0(&prism) {
        debug!(error = ?err, "syntax highlighter failed");
    }
}
