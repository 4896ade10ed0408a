//! Gemini generateContent client
//!
//! Client for the generative language REST API used by the insight service.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{GenerationError, TextGenerator};
use crate::config::InsightConfig;

/// Client for the Gemini text generation endpoint
#[derive(Clone)]
pub struct GeminiClient {
    api_endpoint: String,
    api_key_env: String,
    http_client: Client,
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GeminiClient {
    /// Create a new client. The API key is not captured here; it is read
    /// from `api_key_env` on every call.
    pub fn new(api_endpoint: String, api_key_env: String) -> Self {
        Self {
            api_endpoint: api_endpoint.trim_end_matches('/').to_string(),
            api_key_env,
            http_client: Client::new(),
        }
    }

    pub fn from_config(config: &InsightConfig) -> Self {
        Self::new(config.api_endpoint.clone(), config.api_key_env.clone())
    }

    fn url_for(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.api_endpoint, model)
    }

    fn api_key(&self) -> Result<String, GenerationError> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| GenerationError::MissingCredential(self.api_key_env.clone()))
    }
}

/// Concatenated text of the first candidate. A response with no candidates
/// or no text parts yields an empty string.
fn extract_text(body: &str) -> Result<String, GenerationError> {
    let response: GenerateContentResponse =
        serde_json::from_str(body).map_err(|e| GenerationError::Malformed(e.to_string()))?;

    let text = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<String>()
        })
        .unwrap_or_default();

    Ok(text)
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, GenerationError> {
        let api_key = self.api_key()?;

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .http_client
            .post(self.url_for(model))
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        extract_text(&body)
    }
}
