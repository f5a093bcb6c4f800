//! Binary reader contract and deadline handling.
//!
//! Reads are the pipeline's suspension point. Platform adapters implement
//! [`FileSource`] and [`Timer`]; futures are `!Send` because browsers run
//! everything on one thread.

use std::time::Duration;

use async_trait::async_trait;
use futures_util::future::{Either, select};
use tracing::{debug, warn};

use crate::error::{HostError, PipelineError, PipelineResult};
use crate::model::SelectedFile;

/// A user-selected file that can be read asynchronously.
#[async_trait(?Send)]
pub trait FileSource {
    /// File name as reported by the platform.
    fn name(&self) -> String;

    /// Size in bytes as reported by the platform.
    fn size(&self) -> u64;

    /// Read the full contents.
    async fn read_bytes(&self) -> Result<Vec<u8>, HostError>;

    /// Name and size snapshot.
    fn describe(&self) -> SelectedFile {
        SelectedFile {
            name: self.name(),
            byte_size: self.size(),
        }
    }
}

/// Source of delays used to bound reads.
#[async_trait(?Send)]
pub trait Timer {
    /// Complete after `duration` has elapsed.
    async fn sleep(&self, duration: Duration);
}

/// Read `source` completely, failing if `limit` elapses first.
///
/// # Errors
///
/// Returns [`PipelineError::Read`] when the platform read fails and
/// [`PipelineError::ReadTimedOut`] when the deadline expires.
pub async fn read_with_deadline<S, T>(
    source: &S,
    timer: &T,
    limit: Option<Duration>,
) -> PipelineResult<Vec<u8>>
where
    S: FileSource + ?Sized,
    T: Timer + ?Sized,
{
    let file_name = source.name();
    let outcome = match limit {
        None => source.read_bytes().await,
        Some(limit) => match select(source.read_bytes(), timer.sleep(limit)).await {
            Either::Left((outcome, _)) => outcome,
            Either::Right(((), _)) => {
                let limit_ms = u64::try_from(limit.as_millis()).unwrap_or(u64::MAX);
                warn!(file = %file_name, limit_ms, "file read timed out");
                return Err(PipelineError::ReadTimedOut {
                    file_name,
                    limit_ms,
                });
            }
        },
    };

    match outcome {
        Ok(bytes) => {
            debug!(file = %file_name, bytes = bytes.len(), "file read complete");
            Ok(bytes)
        }
        Err(err) => {
            warn!(file = %file_name, error = %err, "file read failed");
            Err(PipelineError::Read {
                file_name,
                detail: err.detail,
            })
        }
    }
}
