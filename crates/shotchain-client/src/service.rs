//! Generation service boundary.

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;

use shotchain_models::{JobSnapshot, VideoJobId};

use crate::error::ClientResult;

/// One submission to the generation service, already validated upstream.
#[derive(Debug, Clone, Default)]
pub struct Submission {
    /// Scene description
    pub prompt: String,
    /// Clip length in seconds
    pub seconds: u32,
    /// Output frame size, e.g. "1280x720"
    pub size: Option<String>,
    /// Prior job to remix from
    pub remix_video_id: Option<VideoJobId>,
    /// Reference image anchoring visual continuity
    pub input_reference: Option<PathBuf>,
}

/// The remote video-synthesis service, reduced to the three calls the
/// pipeline needs. Real service semantics (auth, rate limits, quotas) stay
/// behind this boundary.
#[async_trait]
pub trait GenerationService: Send + Sync {
    /// Submit a generation job, returning its initial snapshot.
    async fn submit(&self, submission: &Submission) -> ClientResult<JobSnapshot>;

    /// Fetch the current snapshot of a job.
    async fn poll(&self, id: &VideoJobId) -> ClientResult<JobSnapshot>;

    /// Download the finished output bytes of a job.
    async fn download(&self, id: &VideoJobId) -> ClientResult<Vec<u8>>;
}

#[async_trait]
impl<T: GenerationService + ?Sized> GenerationService for Arc<T> {
    async fn submit(&self, submission: &Submission) -> ClientResult<JobSnapshot> {
        (**self).submit(submission).await
    }

    async fn poll(&self, id: &VideoJobId) -> ClientResult<JobSnapshot> {
        (**self).poll(id).await
    }

    async fn download(&self, id: &VideoJobId) -> ClientResult<Vec<u8>> {
        (**self).download(id).await
    }
}
