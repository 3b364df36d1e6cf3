//! Continuity tracker: what links one clip to the next.

use std::path::{Path, PathBuf};

use shotchain_models::VideoJobId;

/// Continuity information carried between generation calls.
///
/// Holds non-owning references only: recording a new frame supersedes the
/// previous one without deleting it from disk.
#[derive(Debug, Clone, Default)]
pub struct ContinuityState {
    last_job_id: Option<VideoJobId>,
    last_reference_frame: Option<PathBuf>,
}

impl ContinuityState {
    /// Record the most recently completed job.
    pub fn record_job(&mut self, id: VideoJobId) {
        self.last_job_id = Some(id);
    }

    /// Record a freshly extracted reference frame.
    pub fn record_frame(&mut self, frame: PathBuf) {
        self.last_reference_frame = Some(frame);
    }

    /// Clear both fields, e.g. when the workspace changes.
    pub fn clear(&mut self) {
        self.last_job_id = None;
        self.last_reference_frame = None;
    }

    /// Id of the last completed job, the remix target.
    pub fn last_job_id(&self) -> Option<&VideoJobId> {
        self.last_job_id.as_ref()
    }

    /// Most recent reference frame path.
    pub fn reference_frame(&self) -> Option<&Path> {
        self.last_reference_frame.as_deref()
    }

    /// Whether a prior completed job exists to remix from.
    pub fn has_prior_job(&self) -> bool {
        self.last_job_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_empty() {
        let state = ContinuityState::default();
        assert!(!state.has_prior_job());
        assert!(state.reference_frame().is_none());
    }

    #[test]
    fn test_records_supersede() {
        let mut state = ContinuityState::default();
        state.record_job(VideoJobId::from_string("j1"));
        state.record_frame(PathBuf::from("/w/a_last_frame.png"));
        state.record_frame(PathBuf::from("/w/b_last_frame.png"));

        assert_eq!(state.last_job_id().unwrap().as_str(), "j1");
        assert_eq!(
            state.reference_frame().unwrap(),
            Path::new("/w/b_last_frame.png")
        );
    }

    #[test]
    fn test_clear_resets_both_fields() {
        let mut state = ContinuityState::default();
        state.record_job(VideoJobId::from_string("j1"));
        state.record_frame(PathBuf::from("/w/a.png"));
        state.clear();

        assert!(!state.has_prior_job());
        assert!(state.reference_frame().is_none());
    }
}
