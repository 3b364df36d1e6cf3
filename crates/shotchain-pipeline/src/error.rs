//! Pipeline error types.

use thiserror::Error;

use shotchain_client::ClientError;
use shotchain_media::MediaError;
use shotchain_models::{JobStatus, RequestError, VideoJobId};

pub type PipelineResult<T> = Result<T, PipelineError>;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("workspace is not initialized")]
    NotInitialized,

    #[error("prompt must not be empty")]
    InvalidPrompt,

    #[error("duration of {seconds}s is not allowed ({allowed})")]
    InvalidDuration { seconds: u32, allowed: String },

    #[error("remix requested but no prior job exists")]
    NoPriorJob,

    #[error("submission failed: {0}")]
    SubmissionFailed(#[source] ClientError),

    #[error("polling job {job_id} failed: {source}")]
    PollingFailed {
        job_id: VideoJobId,
        #[source]
        source: ClientError,
    },

    #[error("job {job_id} ended as {status}: {message}")]
    JobFailed {
        job_id: VideoJobId,
        status: JobStatus,
        message: String,
    },

    #[error("job {job_id} did not complete within {polls} polls")]
    Timeout { job_id: VideoJobId, polls: u32 },

    #[error("downloading job {job_id} failed: {source}")]
    DownloadFailed {
        job_id: VideoJobId,
        #[source]
        source: ClientError,
    },

    #[error("media error: {0}")]
    Media(#[from] MediaError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<RequestError> for PipelineError {
    fn from(err: RequestError) -> Self {
        match err {
            RequestError::InvalidPrompt => PipelineError::InvalidPrompt,
            RequestError::InvalidDuration { seconds, allowed } => {
                PipelineError::InvalidDuration { seconds, allowed }
            }
        }
    }
}
