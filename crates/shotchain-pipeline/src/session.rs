//! Per-run pipeline session.

use crate::continuity::ContinuityState;
use crate::workspace::ProjectWorkspace;

/// Explicit per-run state: one workspace plus its continuity tracker.
///
/// Each session is independent; callers running sessions
/// concurrently just give each its own workspace. Continuity resets come
/// for free: a new workspace means a new session with empty state.
#[derive(Debug)]
pub struct PipelineSession {
    workspace: ProjectWorkspace,
    continuity: ContinuityState,
}

impl PipelineSession {
    /// Start a session over a workspace.
    pub fn new(workspace: ProjectWorkspace) -> Self {
        Self {
            workspace,
            continuity: ContinuityState::default(),
        }
    }

    pub fn workspace(&self) -> &ProjectWorkspace {
        &self.workspace
    }

    pub fn continuity(&self) -> &ContinuityState {
        &self.continuity
    }

    pub(crate) fn continuity_mut(&mut self) -> &mut ContinuityState {
        &mut self.continuity
    }

    /// Swap in a different workspace, clearing continuity state.
    pub fn switch_workspace(&mut self, workspace: ProjectWorkspace) {
        self.workspace = workspace;
        self.continuity.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shotchain_models::VideoJobId;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_switching_workspace_clears_continuity() {
        let base = TempDir::new().unwrap();
        let first = ProjectWorkspace::at(base.path().join("a")).await.unwrap();
        let second = ProjectWorkspace::at(base.path().join("b")).await.unwrap();

        let mut session = PipelineSession::new(first);
        session
            .continuity_mut()
            .record_job(VideoJobId::from_string("j1"));
        assert!(session.continuity().has_prior_job());

        session.switch_workspace(second);
        assert!(!session.continuity().has_prior_job());
    }
}
