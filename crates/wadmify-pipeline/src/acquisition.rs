//! Normalises drop and picker payloads into a single selection.

use tracing::debug;

use crate::error::{PipelineError, PipelineResult};

/// Keep the first file of a payload; the rest are ignored.
///
/// # Errors
///
/// Returns [`PipelineError::NoFileSelected`] for an empty payload, such as a
/// cancelled picker.
pub fn first_file<F>(files: impl IntoIterator<Item = F>) -> PipelineResult<F> {
    let mut files = files.into_iter();
    let first = files.next().ok_or(PipelineError::NoFileSelected)?;
    let ignored = files.count();
    if ignored > 0 {
        debug!(ignored, "extra files in selection ignored");
    }
    Ok(first)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_payload_is_no_selection() {
        assert!(matches!(
            first_file(Vec::<u8>::new()),
            Err(PipelineError::NoFileSelected)
        ));
    }

    #[test]
    fn only_first_file_is_kept() {
        assert_eq!(first_file(["a.wasm", "b.wasm", "c.wasm"]).ok(), Some("a.wasm"));
    }
}
