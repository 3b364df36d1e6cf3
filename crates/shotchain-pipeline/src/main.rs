//! Multi-shot generation pipeline binary.
//!
//! Reads a prompt script (one shot per line), generates each clip with
//! reference-frame chaining, then concatenates the results.

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use shotchain_client::{ClientConfig, StaticToken, VideoApiClient};
use shotchain_media::Transcoder;
use shotchain_models::{ContinuityMode, GenerationRequest};
use shotchain_pipeline::{
    script::load_prompts, PipelineConfig, PipelineController, PipelineSession, ProjectWorkspace,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with colored output for dev, JSON for production
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env()
        .add_directive("shotchain=info".parse().unwrap());

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }

    let script_path = std::env::args()
        .nth(1)
        .context("usage: shotchain <prompt-script>")?;
    let prompts = load_prompts(&script_path)
        .await
        .with_context(|| format!("failed to load prompt script {script_path}"))?;
    if prompts.is_empty() {
        anyhow::bail!("prompt script {script_path} contains no prompts");
    }

    let token = StaticToken::from_env("VIDEO_API_TOKEN")
        .context("VIDEO_API_TOKEN must be set")?;
    let client = VideoApiClient::new(ClientConfig::from_env(), token)?;
    let config = PipelineConfig::from_env();
    let controller = PipelineController::new(client, Transcoder::new(), config);

    let base_dir = std::env::var("SHOT_OUTPUT_DIR").unwrap_or_else(|_| ".".to_string());
    let workspace = ProjectWorkspace::create(&base_dir).await?;
    info!("Project workspace: {}", workspace.root().display());
    let mut session = PipelineSession::new(workspace);

    for (index, prompt) in prompts.iter().enumerate() {
        let request = GenerationRequest::new(prompt.clone(), 4)
            .with_mode(ContinuityMode::ReferenceFrame)
            .with_filename_hint(format!("shot_{:02}", index + 1));

        let outcome = controller.generate(&mut session, &request).await?;
        info!("{}", outcome.summary());
        if outcome.reference_frame.is_none() {
            warn!("Shot {} produced no continuity frame", index + 1);
        }
    }

    let artifact = controller.combine(&session, None).await?;
    info!("Final video: {}", artifact.display());

    Ok(())
}
