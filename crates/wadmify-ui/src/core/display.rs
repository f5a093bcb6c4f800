//! Text shown in the display region.

use wadmify_pipeline::{Region, SelectedFile};

/// Copy button label.
pub const COPY_LABEL: &str = "Copy Manifest to Clipboard";
/// Reconvert button label.
pub const CONVERT_AGAIN_LABEL: &str = "Convert again";
/// Shown while a selection is read and converted.
pub const PROCESSING_LABEL: &str = "Processing";
/// Drop-zone prompt.
pub const DROP_PROMPT: &str = "Drop a component here, or click to choose a file";

/// Size line for the file-info panel.
#[must_use]
pub fn size_line(file: &SelectedFile) -> String {
    format!("Size: {} bytes", file.byte_size)
}

/// Status line while `file` is processing.
#[must_use]
pub fn processing_line(file: &SelectedFile) -> String {
    format!("{PROCESSING_LABEL} {}…", file.name)
}

/// Whether the region shows a "Convert again" control.
///
/// A rendered manifest always shows it (disabled without a loaded file); a failed
/// conversion shows it only when the loaded bytes can be converted again.
#[must_use]
pub const fn shows_reconvert(region: &Region, can_reconvert: bool) -> bool {
    match region {
        Region::Manifest(_) => true,
        Region::Failed { .. } => can_reconvert,
        Region::Empty | Region::FileInfo(_) | Region::Processing(_) => false,
    }
}

/// Whether a `dragleave` really left the drop zone.
///
/// `entered_inside` tells whether the element the pointer moved onto lies within the
/// zone; `None` means the pointer left the page. Moving onto a child of the zone also
/// fires `dragleave` and must keep the highlight.
#[must_use]
pub const fn drag_left_zone(entered_inside: Option<bool>) -> bool {
    !matches!(entered_inside, Some(true))
}

/// Data attribute naming the deployed variant on the mount element.
pub const VARIANT_ATTRIBUTE: &str = "data-variant";
/// Data attribute naming the log format on the mount element.
pub const LOG_FORMAT_ATTRIBUTE: &str = "data-log-format";
