//! Browser adapters for the pipeline's platform traits.

pub(crate) mod browser_file;
pub(crate) mod clipboard;
pub(crate) mod highlight;
pub(crate) mod notifier;
pub(crate) mod timer;
