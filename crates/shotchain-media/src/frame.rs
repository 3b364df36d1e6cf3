//! Last-frame extraction for continuity chaining.

use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::command::FfmpegCommand;
use crate::transcoder::Transcoder;

/// Fallback offset from end-of-stream when the exact frame count is unknown.
const FALLBACK_TAIL_SECONDS: f64 = 1.0;

/// Path of the continuity frame extracted from a clip.
pub fn last_frame_path(clip: &Path) -> PathBuf {
    let stem = clip
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "clip".to_string());
    clip.with_file_name(format!("{stem}_last_frame.png"))
}

impl Transcoder {
    /// Extract the final frame of a clip as a still image.
    ///
    /// Tries an exact extraction first: probe the total frame count and
    /// select frame `count - 1`. When the probe is unavailable or reports
    /// no count, falls back to grabbing a frame from the final second,
    /// which is an approximation rather than frame-exact.
    ///
    /// Every failure here degrades to `None` rather than an error: a
    /// missing tool, a failed probe, or an extraction that produced no
    /// file all mean "no continuity frame available".
    pub async fn extract_last_frame(&self, clip: impl AsRef<Path>) -> Option<PathBuf> {
        let clip = clip.as_ref();
        let output = last_frame_path(clip);

        if let Err(e) = self.check_ffmpeg() {
            warn!("Skipping continuity frame extraction: {e}");
            return None;
        }

        let frame_count = match self.count_frames(clip).await {
            Ok(count) => count,
            Err(e) => {
                debug!("Frame count probe failed for {}: {e}", clip.display());
                None
            }
        };

        let extracted = match frame_count {
            Some(count) if count > 0 => self.extract_exact(clip, &output, count).await,
            _ => self.extract_approximate(clip, &output).await,
        };

        if !extracted {
            // An exact extraction can still fail on streams that lie about
            // their counts; give the tail-offset approach one more chance.
            if frame_count.is_some() && self.extract_approximate(clip, &output).await {
                return Some(output);
            }
            let _ = tokio::fs::remove_file(&output).await;
            warn!("No continuity frame produced for {}", clip.display());
            return None;
        }

        Some(output)
    }

    /// Select the frame at index `count - 1` exactly.
    async fn extract_exact(&self, clip: &Path, output: &Path, count: u64) -> bool {
        let cmd = FfmpegCommand::new(clip, output)
            .video_filter(format!("select=eq(n\\,{})", count - 1))
            .single_frame();

        match self.run_ffmpeg(&cmd).await {
            Ok(()) => output.exists(),
            Err(e) => {
                debug!("Exact last-frame extraction failed: {e}");
                false
            }
        }
    }

    /// Grab a frame from the final second of the stream.
    async fn extract_approximate(&self, clip: &Path, output: &Path) -> bool {
        let cmd = FfmpegCommand::new(clip, output)
            .seek_from_end(FALLBACK_TAIL_SECONDS)
            .single_frame()
            .output_args(["-update", "1"]);

        match self.run_ffmpeg(&cmd).await {
            Ok(()) => output.exists(),
            Err(e) => {
                debug!("Approximate last-frame extraction failed: {e}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_last_frame_path_naming() {
        let path = last_frame_path(Path::new("/work/clip-20250101-abc.mp4"));
        assert_eq!(
            path,
            PathBuf::from("/work/clip-20250101-abc_last_frame.png")
        );
    }

    #[tokio::test]
    async fn test_extraction_without_tool_returns_none_idempotently() {
        let dir = TempDir::new().unwrap();
        let clip = dir.path().join("clip.mp4");
        tokio::fs::write(&clip, b"not a real video").await.unwrap();

        let transcoder = Transcoder::with_binaries("ffmpeg-does-not-exist", "ffprobe-does-not-exist");

        // Both attempts report no frame, neither raises nor leaves files.
        assert!(transcoder.extract_last_frame(&clip).await.is_none());
        assert!(transcoder.extract_last_frame(&clip).await.is_none());
        assert!(!last_frame_path(&clip).exists());
    }
}
