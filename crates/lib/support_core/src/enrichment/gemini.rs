//! Google Gemini `generateContent` client.
//!
//! One long-lived [`GeminiClient`] is built at startup and shared behind an
//! `Arc<dyn Enricher>`. Each operation sends exactly one request; the only
//! time limit is the HTTP client's request timeout.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use super::{Classification, Enricher, EnrichmentError, prompts};
use crate::models::support::Message;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/";
const DEFAULT_API_VERSION: &str = "v1beta";
const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_TEMPERATURE: f32 = 0.7;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Connection settings for the Gemini API.
#[derive(Clone, Debug)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: Url,
    pub api_version: String,
    pub temperature: f32,
    pub request_timeout: Duration,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Result<Self, EnrichmentError> {
        let base_url = Url::parse(DEFAULT_BASE_URL)
            .map_err(|e| EnrichmentError::Config(format!("gemini base url: {e}")))?;
        Ok(Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url,
            api_version: DEFAULT_API_VERSION.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            request_timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Reads configuration from environment variables.
    ///
    /// | Variable                  | Default                                      |
    /// |---------------------------|----------------------------------------------|
    /// | `GEMINI_API_KEY`          | required                                     |
    /// | `GEMINI_MODEL`            | `gemini-2.5-flash`                           |
    /// | `GEMINI_BASE_URL`         | `https://generativelanguage.googleapis.com/` |
    /// | `GEMINI_TIMEOUT_SECS`     | `60`                                         |
    pub fn from_env() -> Result<Self, EnrichmentError> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| EnrichmentError::Config("GEMINI_API_KEY is not set".into()))?;
        let mut config = Self::new(api_key)?;
        if let Ok(model) = std::env::var("GEMINI_MODEL")
            && !model.is_empty()
        {
            config.model = model;
        }
        if let Ok(base) = std::env::var("GEMINI_BASE_URL")
            && !base.is_empty()
        {
            config = config.with_base_url(&base)?;
        }
        if let Ok(raw) = std::env::var("GEMINI_TIMEOUT_SECS")
            && !raw.is_empty()
        {
            config.request_timeout = parse_timeout_secs(&raw)?;
        }
        Ok(config)
    }

    pub fn with_base_url(mut self, base: &str) -> Result<Self, EnrichmentError> {
        self.base_url = Url::parse(base)
            .map_err(|e| EnrichmentError::Config(format!("gemini base url: {e}")))?;
        if !self.base_url.path().ends_with('/') {
            let path = format!("{}/", self.base_url.path().trim_end_matches('/'));
            self.base_url.set_path(&path);
        }
        Ok(self)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn endpoint(&self) -> Result<Url, EnrichmentError> {
        let version = self.api_version.trim_end_matches('/');
        self.base_url
            .join(&format!("{version}/models/{}:generateContent", self.model))
            .map_err(|e| EnrichmentError::Config(format!("gemini endpoint: {e}")))
    }
}

/// Parse a positive whole number of seconds.
fn parse_timeout_secs(raw: &str) -> Result<Duration, EnrichmentError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(EnrichmentError::Config(format!(
            "GEMINI_TIMEOUT_SECS must be a positive integer, got {raw:?}"
        ))),
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Whether the model must answer with a JSON document.
#[derive(Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Json,
    Text,
}

/// Gemini-backed [`Enricher`].
pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, EnrichmentError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let mut key = HeaderValue::from_str(&config.api_key)
            .map_err(|e| EnrichmentError::Config(format!("invalid API key header value: {e}")))?;
        key.set_sensitive(true);
        headers.insert(API_KEY_HEADER, key);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| EnrichmentError::Config(format!("gemini client build failed: {e}")))?;

        Ok(Self { client, config })
    }

    /// Model identifier requests are sent to.
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Send one prompt and return the text of the first part of the first candidate.
    async fn generate(&self, prompt: &str, format: OutputFormat) -> Result<String, EnrichmentError> {
        let request = GenerateContentRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: prompts::SYSTEM_INSTRUCTION,
                }],
            },
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
                response_mime_type: (format == OutputFormat::Json).then_some("application/json"),
            },
        };

        let endpoint = self.config.endpoint()?;
        debug!(model = %self.config.model, prompt_len = prompt.len(), "gemini generateContent");

        let response = self
            .client
            .post(endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| EnrichmentError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            return Err(EnrichmentError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let payload: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| EnrichmentError::Decode(format!("gemini response: {e}")))?;

        payload
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .ok_or(EnrichmentError::EmptyResponse)
    }
}

#[async_trait]
impl Enricher for GeminiClient {
    async fn analyze(&self, content: &str) -> Result<Classification, EnrichmentError> {
        let text = self
            .generate(&prompts::analyze(content), OutputFormat::Json)
            .await?;
        Classification::from_model_text(&text)
    }

    async fn summarize(&self, messages: &[String]) -> Result<String, EnrichmentError> {
        self.generate(&prompts::summarize(messages), OutputFormat::Text)
            .await
    }

    async fn suggest_reply(
        &self,
        content: &str,
        sentiment: &str,
        category: &str,
    ) -> Result<String, EnrichmentError> {
        self.generate(
            &prompts::suggest_reply(content, sentiment, category),
            OutputFormat::Text,
        )
        .await
    }

    async fn sentiment_trends(&self, messages: &[Message]) -> Result<String, EnrichmentError> {
        self.generate(&prompts::sentiment_trends(messages), OutputFormat::Text)
            .await
    }
}
