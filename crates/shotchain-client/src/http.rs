//! HTTP implementation of the generation service boundary.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use tracing::{debug, info};

use shotchain_models::{JobSnapshot, VideoJobId};

use crate::auth::TokenProvider;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::service::{GenerationService, Submission};

/// Header carrying the service API version, when configured.
const API_VERSION_HEADER: &str = "api-version";

/// HTTP client for the video-synthesis service.
pub struct VideoApiClient<T: TokenProvider> {
    http: Client,
    config: ClientConfig,
    tokens: T,
}

impl<T: TokenProvider> VideoApiClient<T> {
    /// Create a new client.
    pub fn new(config: ClientConfig, tokens: T) -> ClientResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ClientError::Network)?;

        Ok(Self {
            http,
            config,
            tokens,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.trimmed_base_url(), path)
    }

    /// Start a request with auth and version headers applied.
    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let builder = builder.bearer_auth(self.tokens.token());
        match &self.config.api_version {
            Some(version) => builder.header(API_VERSION_HEADER, version),
            None => builder,
        }
    }

    /// Build the multipart form for a submission.
    async fn submission_form(&self, submission: &Submission) -> ClientResult<Form> {
        let mut form = Form::new()
            .text("model", self.config.model.clone())
            .text("prompt", submission.prompt.clone())
            .text("seconds", submission.seconds.to_string());

        if let Some(size) = &submission.size {
            form = form.text("size", size.clone());
        }
        if let Some(remix_id) = &submission.remix_video_id {
            form = form.text("remix_video_id", remix_id.as_str().to_string());
        }
        if let Some(reference) = &submission.input_reference {
            let bytes = tokio::fs::read(reference).await?;
            let file_name = reference
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| "reference.png".to_string());
            let part = Part::bytes(bytes)
                .file_name(file_name)
                .mime_str("image/png")
                .map_err(ClientError::Network)?;
            form = form.part("input_reference", part);
        }

        Ok(form)
    }

    /// Parse a snapshot out of a service response body.
    async fn read_snapshot(&self, response: reqwest::Response) -> ClientResult<JobSnapshot> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ClientError::RequestFailed(format!(
                "service returned {status}: {body}"
            )));
        }

        let snapshot: JobSnapshot = serde_json::from_str(&body)
            .map_err(|e| ClientError::InvalidResponse(format!("{e}: {body}")))?;

        if snapshot.id.is_empty() {
            return Err(ClientError::MissingJobId);
        }

        Ok(snapshot)
    }
}

#[async_trait]
impl<T: TokenProvider> GenerationService for VideoApiClient<T> {
    async fn submit(&self, submission: &Submission) -> ClientResult<JobSnapshot> {
        let url = self.url("/videos");
        debug!(
            "Submitting generation job to {} (seconds={}, remix={})",
            url,
            submission.seconds,
            submission.remix_video_id.is_some()
        );

        let form = self.submission_form(submission).await?;
        let response = self.request(self.http.post(&url)).multipart(form).send().await?;
        let snapshot = self.read_snapshot(response).await?;

        info!("Submitted generation job {}", snapshot.id);
        Ok(snapshot)
    }

    async fn poll(&self, id: &VideoJobId) -> ClientResult<JobSnapshot> {
        let url = self.url(&format!("/videos/{id}"));
        let response = self.request(self.http.get(&url)).send().await?;
        self.read_snapshot(response).await
    }

    async fn download(&self, id: &VideoJobId) -> ClientResult<Vec<u8>> {
        let url = self.url(&format!("/videos/{id}/content"));
        debug!("Downloading job {} output from {}", id, url);

        let response = self.request(self.http.get(&url)).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::RequestFailed(format!(
                "download returned {status}: {body}"
            )));
        }

        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticToken;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> VideoApiClient<StaticToken> {
        let config = ClientConfig {
            base_url: server.uri(),
            model: "sora-2".to_string(),
            api_version: Some("preview".to_string()),
            ..Default::default()
        };
        VideoApiClient::new(config, StaticToken::new("secret")).unwrap()
    }

    #[tokio::test]
    async fn test_submit_parses_snapshot() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/videos"))
            .and(header("authorization", "Bearer secret"))
            .and(header("api-version", "preview"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "job-1",
                "status": "pending",
                "progress": 0
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let snapshot = client
            .submit(&Submission {
                prompt: "a cat".to_string(),
                seconds: 4,
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(snapshot.id.as_str(), "job-1");
        assert!(!snapshot.is_complete());
    }

    #[tokio::test]
    async fn test_submit_rejects_blank_job_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/videos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": ""})))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client
            .submit(&Submission {
                prompt: "a cat".to_string(),
                seconds: 4,
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::MissingJobId));
    }

    #[tokio::test]
    async fn test_error_status_surfaces_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/videos/job-9"))
            .respond_with(ResponseTemplate::new(429).set_body_string("quota exhausted"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client
            .poll(&VideoJobId::from_string("job-9"))
            .await
            .unwrap_err();
        match err {
            ClientError::RequestFailed(message) => {
                assert!(message.contains("429"));
                assert!(message.contains("quota exhausted"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_download_returns_bytes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/videos/job-1/content"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"mp4-bytes".to_vec()))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let bytes = client
            .download(&VideoJobId::from_string("job-1"))
            .await
            .unwrap();
        assert_eq!(bytes, b"mp4-bytes");
    }

    #[tokio::test]
    async fn test_submission_form_reads_reference_image() {
        let dir = tempfile::TempDir::new().unwrap();
        let reference = dir.path().join("frame.png");
        tokio::fs::write(&reference, b"png-bytes").await.unwrap();

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/videos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "job-2"})))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let snapshot = client
            .submit(&Submission {
                prompt: "continue the scene".to_string(),
                seconds: 4,
                input_reference: Some(reference),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(snapshot.id.as_str(), "job-2");
    }
}
