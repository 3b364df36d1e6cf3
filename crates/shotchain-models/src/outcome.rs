//! Structured result of one generation call.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::job::VideoJobId;

/// Summary of a completed generation call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationOutcome {
    /// Service-assigned job id, reusable as a remix target
    pub job_id: VideoJobId,

    /// Clip file written inside the workspace
    pub clip_path: PathBuf,

    /// Continuity frame extracted from the clip, when extraction succeeded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_frame: Option<PathBuf>,

    /// Whether this clip was remixed from the previous job
    pub remixed: bool,
}

impl GenerationOutcome {
    /// One-line human summary, mirroring the textual status of older tooling.
    pub fn summary(&self) -> String {
        let note = if self.remixed {
            " (remixed from previous video)"
        } else {
            ""
        };
        format!(
            "Video generation succeeded for job {}{}. Saved: {}",
            self.job_id,
            note,
            self.clip_path.display()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_mentions_remix() {
        let outcome = GenerationOutcome {
            job_id: VideoJobId::from_string("j1"),
            clip_path: PathBuf::from("/tmp/clip.mp4"),
            reference_frame: None,
            remixed: true,
        };
        assert!(outcome.summary().contains("remixed"));
        assert!(outcome.summary().contains("j1"));
    }
}
