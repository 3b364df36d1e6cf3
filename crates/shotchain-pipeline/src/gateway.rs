//! Media gateway boundary.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use shotchain_media::{MediaResult, Transcoder};

/// The two transcoder operations the pipeline depends on, as a trait so
/// tests can substitute an in-process stub.
#[async_trait]
pub trait MediaGateway: Send + Sync {
    /// Extract the last frame of a clip; `None` means no continuity frame
    /// is available, which is always recoverable.
    async fn extract_last_frame(&self, clip: &Path) -> Option<PathBuf>;

    /// Concatenate the clips in a directory into `output_name`.
    async fn concatenate(&self, dir: &Path, output_name: &str) -> MediaResult<PathBuf>;
}

#[async_trait]
impl MediaGateway for Transcoder {
    async fn extract_last_frame(&self, clip: &Path) -> Option<PathBuf> {
        Transcoder::extract_last_frame(self, clip).await
    }

    async fn concatenate(&self, dir: &Path, output_name: &str) -> MediaResult<PathBuf> {
        Transcoder::concatenate(self, dir, output_name).await
    }
}
