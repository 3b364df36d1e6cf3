//! The capability-checked gateway around ffmpeg/ffprobe.

use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

use crate::command::FfmpegCommand;
use crate::error::{MediaError, MediaResult};

/// Gateway to the external media tools.
///
/// Holds the binary names so tests can point it at nonexistent tools and
/// exercise the degraded paths on hosts that do have ffmpeg installed.
#[derive(Debug, Clone)]
pub struct Transcoder {
    pub(crate) ffmpeg_bin: String,
    pub(crate) ffprobe_bin: String,
}

impl Default for Transcoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Transcoder {
    /// Create a gateway using the standard binary names.
    pub fn new() -> Self {
        Self {
            ffmpeg_bin: "ffmpeg".to_string(),
            ffprobe_bin: "ffprobe".to_string(),
        }
    }

    /// Create a gateway with explicit binary names.
    pub fn with_binaries(ffmpeg: impl Into<String>, ffprobe: impl Into<String>) -> Self {
        Self {
            ffmpeg_bin: ffmpeg.into(),
            ffprobe_bin: ffprobe.into(),
        }
    }

    /// Locate the ffmpeg binary.
    pub fn check_ffmpeg(&self) -> MediaResult<PathBuf> {
        which::which(&self.ffmpeg_bin).map_err(|_| MediaError::FfmpegNotFound)
    }

    /// Locate the ffprobe binary.
    pub fn check_ffprobe(&self) -> MediaResult<PathBuf> {
        which::which(&self.ffprobe_bin).map_err(|_| MediaError::FfprobeNotFound)
    }

    /// Run an FFmpeg command to completion, capturing stderr.
    pub(crate) async fn run_ffmpeg(&self, cmd: &FfmpegCommand) -> MediaResult<()> {
        self.check_ffmpeg()?;

        let args = cmd.build_args();
        debug!("Running FFmpeg: {} {}", self.ffmpeg_bin, args.join(" "));

        let output = Command::new(&self.ffmpeg_bin)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if output.status.success() {
            Ok(())
        } else {
            Err(MediaError::ffmpeg_failed(
                "ffmpeg exited with non-zero status",
                Some(String::from_utf8_lossy(&output.stderr).to_string()),
                output.status.code(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_binaries_are_reported() {
        let transcoder = Transcoder::with_binaries("ffmpeg-does-not-exist", "ffprobe-does-not-exist");
        assert!(matches!(
            transcoder.check_ffmpeg(),
            Err(MediaError::FfmpegNotFound)
        ));
        assert!(matches!(
            transcoder.check_ffprobe(),
            Err(MediaError::FfprobeNotFound)
        ));
    }

    #[tokio::test]
    async fn test_run_with_missing_binary_fails_cleanly() {
        let transcoder = Transcoder::with_binaries("ffmpeg-does-not-exist", "ffprobe-does-not-exist");
        let cmd = FfmpegCommand::new("in.mp4", "out.mp4");
        let err = transcoder.run_ffmpeg(&cmd).await.unwrap_err();
        assert!(err.is_tool_unavailable());
    }
}
