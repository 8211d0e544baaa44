//! Text generation through the Gemini `generateContent` API.
//!
//! Every outbound call goes through one [`Cooldown`], which spaces calls at
//! least `GENERATION_COOLDOWN_MS` apart across the whole process. The client
//! is built once at startup and shared by all requests.

use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

use crate::config::GenerationConfig;
use crate::error::{PlanError, ProviderErrorKind};

pub const MAX_PROMPT_CHARS: usize = 30_000;

/// Reject prompts the provider would refuse before any call is spent on them
pub fn check_prompt(prompt: &str) -> Result<(), PlanError> {
    if prompt.trim().is_empty() || prompt.chars().count() > MAX_PROMPT_CHARS {
        return Err(PlanError::Validation(
            "Invalid prompt: too long or empty".to_string(),
        ));
    }
    Ok(())
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Whether a credential is present. Checked before any work starts.
    fn is_configured(&self) -> bool;

    async fn generate(&self, prompt: &str) -> Result<String, PlanError>;
}

/// Minimum spacing between successive calls. The lock is held while waiting,
/// so concurrent callers queue up and each one sees the timestamp left by the
/// previous caller.
pub struct Cooldown {
    interval: Duration,
    last_call: Mutex<Option<Instant>>,
}

impl Cooldown {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_call: Mutex::new(None),
        }
    }

    pub async fn wait_turn(&self) {
        let mut last_call = self.last_call.lock().await;
        if let Some(previous) = *last_call {
            let elapsed = previous.elapsed();
            if elapsed < self.interval {
                let wait = self.interval - elapsed;
                debug!("Generation cooldown: waiting {} ms", wait.as_millis());
                sleep(wait).await;
            }
        }
        *last_call = Some(Instant::now());
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationParams,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationParams {
    temperature: f32,
    #[serde(rename = "topK")]
    top_k: u32,
    #[serde(rename = "topP")]
    top_p: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: 4000,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Option<Vec<ResponsePart>>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateResponse {
    fn first_text(self) -> Option<String> {
        self.candidates?
            .into_iter()
            .next()?
            .content?
            .parts?
            .into_iter()
            .next()?
            .text
            .filter(|t| !t.is_empty())
    }
}

pub struct GeminiClient {
    http_client: Client,
    api_key: Option<String>,
    endpoint: String,
    cooldown: Cooldown,
}

impl GeminiClient {
    pub fn new(config: &GenerationConfig, timeout: Duration) -> Result<Self, PlanError> {
        let http_client = Client::builder().timeout(timeout).build()?;
        let endpoint = format!(
            "{}/v1beta/models/{}:generateContent",
            config.api_base.trim_end_matches('/'),
            config.model
        );

        Ok(Self {
            http_client,
            api_key: config.api_key.clone(),
            endpoint,
            cooldown: Cooldown::new(config.cooldown),
        })
    }

    fn classify_failure(status: u16, body: &str) -> PlanError {
        let kind = ProviderErrorKind::from_status(status);
        let message = match kind {
            ProviderErrorKind::RateLimited => format!(
                "Gemini API rate limit exceeded. Please wait a few minutes and try again. ({})",
                body
            ),
            ProviderErrorKind::BadRequest => format!("Gemini API bad request: {}", body),
            ProviderErrorKind::AuthError => format!(
                "Gemini API key invalid or quota exceeded. Please check your API key. ({})",
                body
            ),
            ProviderErrorKind::Unknown => format!("Gemini API error: {} - {}", status, body),
        };
        PlanError::Provider { kind, message }
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn generate(&self, prompt: &str) -> Result<String, PlanError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            PlanError::Config(
                "Gemini API key not configured. Please check your environment variables."
                    .to_string(),
            )
        })?;

        check_prompt(prompt)?;

        self.cooldown.wait_turn().await;

        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationParams::default(),
        };

        debug!(
            "Sending request to Gemini API: endpoint={}, prompt_length={}",
            self.endpoint,
            prompt.len()
        );

        let response = self
            .http_client
            .post(&self.endpoint)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                let err = PlanError::from(e);
                error!(
                    "Gemini API call failed: prompt_length={}, error={}",
                    prompt.len(),
                    err
                );
                err
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!(
                "Gemini API error response: status={}, prompt_length={}, body={}",
                status,
                prompt.len(),
                error_text
            );
            return Err(Self::classify_failure(status.as_u16(), &error_text));
        }

        let parsed: GenerateResponse = response.json().await.map_err(|e| {
            PlanError::MalformedResponse(format!("Failed to parse response: {}", e.without_url()))
        })?;

        parsed.first_text().ok_or_else(|| {
            error!("Gemini API returned no text candidate: prompt_length={}", prompt.len());
            PlanError::MalformedResponse("Invalid response from Gemini AI".to_string())
        })
    }
}
