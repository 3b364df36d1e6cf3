//! Project workspace: the directory owning one run's artifacts.

use std::path::{Path, PathBuf};

use crate::error::PipelineResult;

/// Filesystem directory scoped to one pipeline run.
///
/// Owns every clip, extracted frame, the concat manifest, and the final
/// artifact. Created at session start and never torn down; files persist
/// after the process exits.
#[derive(Debug, Clone)]
pub struct ProjectWorkspace {
    root: PathBuf,
}

impl ProjectWorkspace {
    /// Create a timestamped workspace under a base output directory,
    /// `{base}/video_projects/video_project_{UTC timestamp}`.
    pub async fn create(base: impl AsRef<Path>) -> PipelineResult<Self> {
        let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
        let root = base
            .as_ref()
            .join("video_projects")
            .join(format!("video_project_{timestamp}"));
        Self::at(root).await
    }

    /// Open a workspace at an explicit directory, creating it if needed.
    pub async fn at(root: impl Into<PathBuf>) -> PipelineResult<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    /// Workspace directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether the workspace directory still exists on disk.
    pub fn is_initialized(&self) -> bool {
        self.root.is_dir()
    }

    /// Path of a file inside the workspace.
    pub fn file_path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_create_makes_timestamped_directory() {
        let base = TempDir::new().unwrap();
        let workspace = ProjectWorkspace::create(base.path()).await.unwrap();

        assert!(workspace.is_initialized());
        assert!(workspace
            .root()
            .to_string_lossy()
            .contains("video_project_"));
    }

    #[tokio::test]
    async fn test_initialization_tracks_directory_presence() {
        let base = TempDir::new().unwrap();
        let workspace = ProjectWorkspace::at(base.path().join("run")).await.unwrap();
        assert!(workspace.is_initialized());

        tokio::fs::remove_dir_all(workspace.root()).await.unwrap();
        assert!(!workspace.is_initialized());
    }
}
