//! Stream-copy concatenation of ordered clips.

use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::command::FfmpegCommand;
use crate::error::{MediaError, MediaResult};
use crate::transcoder::Transcoder;

/// Default name of the concatenated artifact.
pub const DEFAULT_OUTPUT_NAME: &str = "final_video.mp4";

/// Name of the scratch manifest listing the parts in order.
pub const MANIFEST_NAME: &str = "parts_list.txt";

impl Transcoder {
    /// Concatenate every clip in a workspace into one output file.
    ///
    /// Clips are ordered lexicographically by file name; with the
    /// timestamp-embedded naming used by the pipeline that approximates
    /// chronological order. A single clip is accepted and produces a
    /// stream-copy of itself. The output is overwritten if present.
    pub async fn concatenate(
        &self,
        dir: impl AsRef<Path>,
        output_name: &str,
    ) -> MediaResult<PathBuf> {
        let dir = dir.as_ref();

        // Clips are gathered before the tool check so an empty workspace is
        // reported as such even on hosts without ffmpeg.
        let clips = collect_clips(dir, output_name).await?;
        self.check_ffmpeg()?;

        let manifest = dir.join(MANIFEST_NAME);
        write_manifest(&manifest, &clips).await?;

        let output = dir.join(output_name);
        debug!(
            "Concatenating {} clips from {} into {}",
            clips.len(),
            dir.display(),
            output.display()
        );

        let cmd = FfmpegCommand::new(&manifest, &output)
            .input_args(["-f", "concat", "-safe", "0"])
            .stream_copy();

        self.run_ffmpeg(&cmd).await?;

        info!(
            "Combined {} clips into {}",
            clips.len(),
            output.display()
        );
        Ok(output)
    }
}

/// Gather the mp4 clips in a directory, lexicographic filename order.
///
/// A previously concatenated output of the same name is excluded so a
/// re-run does not fold the prior artifact back into itself.
pub(crate) async fn collect_clips(dir: &Path, output_name: &str) -> MediaResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(MediaError::NoClipsFound(dir.to_path_buf()));
    }

    let mut clips = Vec::new();
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let is_mp4 = path
            .extension()
            .map(|e| e.eq_ignore_ascii_case("mp4"))
            .unwrap_or(false);
        let is_output = path
            .file_name()
            .map(|n| n == output_name)
            .unwrap_or(false);
        if is_mp4 && !is_output {
            clips.push(path);
        }
    }

    if clips.is_empty() {
        return Err(MediaError::NoClipsFound(dir.to_path_buf()));
    }

    clips.sort_by_key(|p| p.file_name().map(|n| n.to_os_string()));
    Ok(clips)
}

/// Write the concat demuxer manifest: one `file '<abs path>'` line per clip.
async fn write_manifest(manifest: &Path, clips: &[PathBuf]) -> MediaResult<()> {
    let mut body = String::new();
    for clip in clips {
        let absolute = if clip.is_absolute() {
            clip.clone()
        } else {
            std::path::absolute(clip)?
        };
        body.push_str(&format!(
            "file '{}'\n",
            escape_manifest_path(&absolute.to_string_lossy())
        ));
    }
    tokio::fs::write(manifest, body).await?;
    Ok(())
}

/// Escape single quotes for the concat demuxer's quoted-path syntax.
fn escape_manifest_path(path: &str) -> String {
    path.replace('\'', "'\\''")
}
