//! Core, DOM-free primitives and helpers for the Web UI.
pub mod display;
pub mod store;
