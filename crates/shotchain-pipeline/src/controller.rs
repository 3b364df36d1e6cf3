//! Pipeline controller: one clip's lifecycle plus the combine step.

use std::path::PathBuf;
use tracing::{debug, info, warn};

use shotchain_client::{GenerationService, Submission};
use shotchain_media::DEFAULT_OUTPUT_NAME;
use shotchain_models::{
    clip_filename, ContinuityMode, GenerationOutcome, GenerationRequest, JobSnapshot, VideoJobId,
};

use crate::config::PipelineConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::gateway::MediaGateway;
use crate::session::PipelineSession;

/// Drives generation jobs against a service and a media gateway.
///
/// Stateless itself; all per-run state lives in the [`PipelineSession`]
/// passed into each call, which also serializes calls per session through
/// the `&mut` borrow.
pub struct PipelineController<S, M> {
    service: S,
    media: M,
    config: PipelineConfig,
}

impl<S: GenerationService, M: MediaGateway> PipelineController<S, M> {
    pub fn new(service: S, media: M, config: PipelineConfig) -> Self {
        Self {
            service,
            media,
            config,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Generate one clip: validate, submit, poll to completion, download,
    /// and update the session's continuity state.
    ///
    /// Validation short-circuits before any network call. Service errors
    /// are surfaced verbatim with no automatic retry; callers may re-invoke.
    pub async fn generate(
        &self,
        session: &mut PipelineSession,
        request: &GenerationRequest,
    ) -> PipelineResult<GenerationOutcome> {
        if !session.workspace().is_initialized() {
            return Err(PipelineError::NotInitialized);
        }
        request.validate(&self.config.duration_constraint)?;
        if request.mode.is_remix() && !session.continuity().has_prior_job() {
            return Err(PipelineError::NoPriorJob);
        }

        let submission = self.build_submission(session, request).await;
        let snapshot = self
            .service
            .submit(&submission)
            .await
            .map_err(PipelineError::SubmissionFailed)?;
        let job_id = snapshot.id.clone();
        info!("Generation job {} submitted", job_id);

        let snapshot = self.poll_until_settled(&job_id, snapshot, request).await?;
        debug!(
            "Job {} settled as {} after polling",
            job_id, snapshot.status
        );

        let clip_path = self.download_clip(session, request, &job_id).await?;
        info!("Saved clip for job {} to {}", job_id, clip_path.display());

        let reference_frame = self
            .update_continuity(session, request.mode, &job_id, &clip_path)
            .await;

        Ok(GenerationOutcome {
            job_id,
            clip_path,
            reference_frame,
            remixed: request.mode.is_remix(),
        })
    }

    /// Combine every clip in the session's workspace into one artifact.
    ///
    /// `output_name` defaults to `final_video.mp4`; any prior artifact of
    /// that name is overwritten (and excluded from the inputs).
    pub async fn combine(
        &self,
        session: &PipelineSession,
        output_name: Option<&str>,
    ) -> PipelineResult<PathBuf> {
        if !session.workspace().is_initialized() {
            return Err(PipelineError::NotInitialized);
        }

        let output_name = output_name.unwrap_or(DEFAULT_OUTPUT_NAME);
        let output = self
            .media
            .concatenate(session.workspace().root(), output_name)
            .await?;
        Ok(output)
    }

    /// Assemble the service submission, attaching continuity information
    /// according to the requested mode.
    async fn build_submission(
        &self,
        session: &PipelineSession,
        request: &GenerationRequest,
    ) -> Submission {
        let mut submission = Submission {
            prompt: request.trimmed_prompt().to_string(),
            seconds: request.seconds,
            size: Some(self.config.output_size.clone()),
            remix_video_id: None,
            input_reference: None,
        };

        match request.mode {
            ContinuityMode::None => {}
            ContinuityMode::Remix => {
                // Presence was validated above.
                submission.remix_video_id = session.continuity().last_job_id().cloned();
            }
            ContinuityMode::ReferenceFrame => {
                if let Some(frame) = session.continuity().reference_frame() {
                    // A recorded frame can be missing after a crash between
                    // download and extraction; fall back to no reference.
                    if frame.exists() {
                        submission.input_reference = Some(frame.to_path_buf());
                    } else {
                        warn!(
                            "Tracked reference frame {} is gone, submitting without one",
                            frame.display()
                        );
                    }
                }
            }
        }

        submission
    }

    /// Poll the job until it succeeds, fails, or exhausts the poll budget.
    async fn poll_until_settled(
        &self,
        job_id: &VideoJobId,
        initial: JobSnapshot,
        request: &GenerationRequest,
    ) -> PipelineResult<JobSnapshot> {
        let interval = self.config.clamp_poll_interval(
            request
                .poll_interval
                .unwrap_or(self.config.default_poll_interval),
        );

        let mut snapshot = initial;
        let mut polls: u32 = 0;

        loop {
            if snapshot.status.is_failure() {
                return Err(PipelineError::JobFailed {
                    job_id: job_id.clone(),
                    status: snapshot.status,
                    message: snapshot
                        .error_message()
                        .unwrap_or_else(|| "no additional detail".to_string()),
                });
            }
            if snapshot.is_complete() {
                return Ok(snapshot);
            }
            if polls >= self.config.max_polls {
                return Err(PipelineError::Timeout {
                    job_id: job_id.clone(),
                    polls,
                });
            }

            polls += 1;
            tokio::time::sleep(interval).await;
            snapshot = self
                .service
                .poll(job_id)
                .await
                .map_err(|source| PipelineError::PollingFailed {
                    job_id: job_id.clone(),
                    source,
                })?;
            debug!(
                "Poll {}/{} for job {}: {} ({:?}%)",
                polls, self.config.max_polls, job_id, snapshot.status, snapshot.progress
            );
        }
    }

    /// Download the finished clip into the workspace under a unique name.
    async fn download_clip(
        &self,
        session: &PipelineSession,
        request: &GenerationRequest,
        job_id: &VideoJobId,
    ) -> PipelineResult<PathBuf> {
        let bytes = self
            .service
            .download(job_id)
            .await
            .map_err(|source| PipelineError::DownloadFailed {
                job_id: job_id.clone(),
                source,
            })?;

        let filename = clip_filename(&request.filename_hint, request.mode.is_remix());
        let clip_path = session.workspace().file_path(&filename);
        tokio::fs::write(&clip_path, &bytes).await?;
        Ok(clip_path)
    }

    /// Record the completed job and, under reference-frame chaining, try to
    /// extract the clip's last frame. Extraction failure is non-fatal: the
    /// previous reference (if any) stays in effect.
    async fn update_continuity(
        &self,
        session: &mut PipelineSession,
        mode: ContinuityMode,
        job_id: &VideoJobId,
        clip_path: &std::path::Path,
    ) -> Option<PathBuf> {
        session.continuity_mut().record_job(job_id.clone());

        if mode != ContinuityMode::ReferenceFrame {
            return None;
        }

        match self.media.extract_last_frame(clip_path).await {
            Some(frame) => {
                session.continuity_mut().record_frame(frame.clone());
                Some(frame)
            }
            None => {
                warn!(
                    "No continuity frame for job {}; the next shot will fall back to {}",
                    job_id,
                    session
                        .continuity()
                        .reference_frame()
                        .map(|f| f.display().to_string())
                        .unwrap_or_else(|| "no reference".to_string())
                );
                None
            }
        }
    }
}
