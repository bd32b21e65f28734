//! Google Gemini API client.
//!
//! Supports schema-constrained JSON generation via `responseMimeType` +
//! `responseSchema`, which is all the analyzer needs.

use std::env;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Error, Result};

const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Google Gemini client.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiClient {
    /// Create a client from `GEMINI_API_KEY` (fallback: `GOOGLE_API_KEY`).
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("GEMINI_API_KEY")
            .or_else(|_| env::var("GOOGLE_API_KEY"))
            .map_err(|_| Error::InvalidArgument("GEMINI_API_KEY is not set".to_string()))?;
        Self::new(api_key, crate::config::DEFAULT_MODEL)
    }

    /// Create a client with an API key and model.
    pub fn new<S: Into<String>>(api_key: S, model: &str) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(Error::InvalidArgument("GEMINI_API_KEY is empty".to_string()));
        }

        let http = Client::builder()
            .user_agent("voc_analyzer/0.1.0")
            .build()
            .map_err(|e| Error::InvalidArgument(format!("HTTP client error: {}", e)))?;

        Ok(Self {
            http,
            api_key,
            base_url: GEMINI_API_URL.to_string(),
            model: model.to_string(),
        })
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    /// Point the client at a different endpoint (mock servers in tests).
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    /// One structured generation call: the response is constrained to the
    /// given schema and returned as the raw JSON text of the first
    /// candidate.
    pub async fn generate_structured(
        &self,
        prompt: &str,
        system: Option<&str>,
        response_schema: Value,
        temperature: f32,
        max_output_tokens: u32,
    ) -> Result<String> {
        let mut payload = GeminiRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature,
                max_output_tokens,
                response_mime_type: "application/json".to_string(),
                response_schema,
            },
            system_instruction: None,
        };

        if let Some(system) = system {
            payload.system_instruction = Some(SystemInstruction {
                parts: vec![Part {
                    text: system.to_string(),
                }],
            });
        }

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let response = self
            .http
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| Error::GeminiError(format!("request failed: {}", e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| Error::GeminiError(format!("failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(Error::GeminiError(format!("{}: {}", status, text)));
        }

        let gemini_response: GeminiResponse = serde_json::from_str(&text)
            .map_err(|e| Error::GeminiError(format!("invalid response: {}", e)))?;

        gemini_response
            .candidates
            .first()
            .and_then(|candidate| candidate.content.parts.first())
            .map(|part| part.text.clone())
            .ok_or_else(|| Error::GeminiError("empty response".to_string()))
    }
}

// === Request structures ===

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
    #[serde(skip_serializing_if = "Option::is_none", rename = "systemInstruction")]
    system_instruction: Option<SystemInstruction>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
    #[serde(rename = "responseSchema")]
    response_schema: Value,
}

#[derive(Debug, Serialize)]
struct SystemInstruction {
    parts: Vec<Part>,
}

// === Response structures ===

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}
