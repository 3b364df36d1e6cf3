//! FFprobe frame counting.

use serde::Deserialize;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

use crate::error::{MediaError, MediaResult};
use crate::transcoder::Transcoder;

/// FFprobe JSON output format for `-count_frames`.
#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    #[serde(default)]
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    nb_read_frames: Option<String>,
}

impl Transcoder {
    /// Count the frames in a clip by decoding its video stream.
    ///
    /// Returns `Ok(None)` when ffprobe ran but reported no usable count,
    /// which some containers do for fragmented or still-open files.
    pub async fn count_frames(&self, path: impl AsRef<Path>) -> MediaResult<Option<u64>> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(MediaError::FileNotFound(path.to_path_buf()));
        }

        self.check_ffprobe()?;

        debug!("Counting frames in {}", path.display());

        let output = Command::new(&self.ffprobe_bin)
            .args([
                "-v",
                "error",
                "-select_streams",
                "v:0",
                "-count_frames",
                "-show_entries",
                "stream=nb_read_frames",
                "-print_format",
                "json",
            ])
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if !output.status.success() {
            return Err(MediaError::ffprobe_failed(
                "ffprobe frame count failed",
                Some(String::from_utf8_lossy(&output.stderr).to_string()),
            ));
        }

        let probe: FfprobeOutput = serde_json::from_slice(&output.stdout)?;

        let count = probe
            .streams
            .first()
            .and_then(|s| s.nb_read_frames.as_ref())
            .and_then(|n| n.parse::<u64>().ok());

        Ok(count)
    }
}
