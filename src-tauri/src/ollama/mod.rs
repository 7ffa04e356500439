//! Client for a locally running Ollama server, used to expand the short
//! "main ideas" of a note into detailed notes.
//!
//! Nothing here touches the timer; callers run it as an independent task.

#[cfg(feature = "desktop")]
pub mod commands;
pub mod prompt;

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::settings::OllamaSettings;

pub use prompt::expansion_prompt;

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::{log_error, log_info, log_warn};

const STATUS_PROBE_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Debug, Error)]
pub enum NoteExpansionError {
    #[error("enter some main ideas first")]
    EmptyIdeas,
    #[error("Ollama is not running at {0}; start it and try again")]
    Unavailable(String),
    #[error("Ollama returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("request to Ollama failed: {0}")]
    Request(#[from] reqwest::Error),
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

#[derive(Clone)]
pub struct OllamaClient {
    client: Client,
    base_url: String,
    model: String,
    timeout: Duration,
}

impl OllamaClient {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.into(),
            timeout: Duration::from_secs(120),
        }
    }

    pub fn from_settings(settings: &OllamaSettings) -> Self {
        Self::new(settings.base_url.clone(), settings.model.clone())
            .with_timeout(Duration::from_secs(settings.timeout_secs))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// True when `/api/tags` answers with a success status.
    pub async fn is_available(&self) -> bool {
        let url = format!("{}/api/tags", self.base_url);
        match self
            .client
            .get(&url)
            .timeout(STATUS_PROBE_TIMEOUT)
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(err) => {
                log_warn!("Ollama status probe at {} failed: {}", url, err);
                false
            }
        }
    }

    /// Single non-streaming completion; returns the generated text.
    pub async fn generate(&self, prompt: &str) -> Result<String, NoteExpansionError> {
        let url = format!("{}/api/generate", self.base_url);
        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .json(&GenerateRequest {
                model: &self.model,
                prompt,
                stream: false,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log_error!("Ollama generate failed with {}: {}", status, body);
            return Err(NoteExpansionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: GenerateResponse = response.json().await?;
        Ok(body.response)
    }

    /// Expands `main_ideas` for the activity titled `title`.
    pub async fn expand_note(
        &self,
        title: &str,
        main_ideas: &str,
    ) -> Result<String, NoteExpansionError> {
        if main_ideas.trim().is_empty() {
            return Err(NoteExpansionError::EmptyIdeas);
        }
        if !self.is_available().await {
            return Err(NoteExpansionError::Unavailable(self.base_url.clone()));
        }

        log_info!("Expanding note '{}' with model {}", title, self.model);
        let prompt = expansion_prompt(title, main_ideas);
        self.generate(&prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        http::StatusCode,
        routing::{get, post},
        Json, Router,
    };
    use serde_json::{json, Value};

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    async fn closed_port_url() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{addr}")
    }

    fn echo_server() -> Router {
        Router::new()
            .route("/api/tags", get(|| async { Json(json!({ "models": [] })) }))
            .route(
                "/api/generate",
                post(|Json(body): Json<Value>| async move {
                    let prompt = body["prompt"].as_str().unwrap_or_default();
                    Json(json!({
                        "model": body["model"],
                        "response": format!(
                            "model={} stream={} tags-line={}",
                            body["model"].as_str().unwrap_or_default(),
                            body["stream"],
                            prompt.lines().find(|l| l.starts_with("Tags:")).unwrap_or_default(),
                        ),
                        "done": true,
                    }))
                }),
            )
    }

    #[tokio::test]
    async fn expands_note_through_generate() {
        let url = serve(echo_server()).await;
        let client = OllamaClient::new(format!("{url}/"), "llama3.2");

        let text = client.expand_note("Plan #roadmap", "- milestones").await.unwrap();
        assert_eq!(text, "model=llama3.2 stream=false tags-line=Tags: #roadmap");
    }

    #[tokio::test]
    async fn blank_ideas_fail_before_any_request() {
        let client = OllamaClient::new(closed_port_url().await, "llama3.2");
        let err = client.expand_note("Title", "  \n").await.unwrap_err();
        assert!(matches!(err, NoteExpansionError::EmptyIdeas));
    }

    #[tokio::test]
    async fn unreachable_server_is_reported_as_unavailable() {
        let url = closed_port_url().await;
        let client = OllamaClient::new(url.clone(), "llama3.2");

        assert!(!client.is_available().await);
        let err = client.expand_note("Title", "idea").await.unwrap_err();
        assert!(matches!(err, NoteExpansionError::Unavailable(ref at) if *at == url));
    }

    #[tokio::test]
    async fn error_status_carries_the_body() {
        let router = Router::new()
            .route("/api/tags", get(|| async { Json(json!({ "models": [] })) }))
            .route(
                "/api/generate",
                post(|| async { (StatusCode::NOT_FOUND, "model 'llama3.2' not found") }),
            );
        let client = OllamaClient::new(serve(router).await, "llama3.2");

        match client.expand_note("Title", "idea").await {
            Err(NoteExpansionError::Status { status, body }) => {
                assert_eq!(status, 404);
                assert_eq!(body, "model 'llama3.2' not found");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn failing_status_probe_means_unavailable() {
        let router = Router::new().route(
            "/api/tags",
            get(|| async { StatusCode::SERVICE_UNAVAILABLE }),
        );
        let client = OllamaClient::new(serve(router).await, "llama3.2");
        assert!(!client.is_available().await);
    }

    #[test]
    fn settings_configure_the_client() {
        let settings = OllamaSettings {
            base_url: "http://gpu-box:11434/".into(),
            model: "mistral".into(),
            timeout_secs: 5,
        };
        let client = OllamaClient::from_settings(&settings);

        assert_eq!(client.base_url(), "http://gpu-box:11434");
        assert_eq!(client.model(), "mistral");
        assert_eq!(client.timeout, Duration::from_secs(5));
    }
}
