//! HTTP client for the Gemini `generateContent` endpoint.
//!
//! Requests a JSON response constrained by a schema of the four summary
//! fields and decodes the first candidate's text into a [`Summary`].

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use vibeboard_core::Summary;

use crate::error::SummaryError;
use crate::summarizer::Summarizer;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const TEMPERATURE: f32 = 2.0;

/// Client for the Gemini REST API.
///
/// Use [`GeminiClient::new`] for production or [`GeminiClient::with_base_url`]
/// to point at a mock server in tests.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    endpoint: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
    generation_config: serde_json::Value,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: [RequestPart<'a>; 1],
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
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
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GeminiClient {
    /// Creates a client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`SummaryError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, model: &str, timeout_secs: u64) -> Result<Self, SummaryError> {
        Self::with_base_url(api_key, model, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`SummaryError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, SummaryError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        let endpoint = format!(
            "{}/v1beta/models/{model}:generateContent",
            base_url.trim_end_matches('/')
        );

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            endpoint,
        })
    }

    fn request_body(prompt: &str) -> GenerateRequest<'_> {
        GenerateRequest {
            contents: [Content {
                role: "user",
                parts: [RequestPart { text: prompt }],
            }],
            generation_config: json!({
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "OBJECT",
                    "properties": {
                        "bio": { "type": "STRING" },
                        "tags": { "type": "ARRAY", "items": { "type": "STRING" } },
                        "vibe": { "type": "STRING" },
                        "themeColor": { "type": "STRING" }
                    }
                },
                "temperature": TEMPERATURE
            }),
        }
    }

    /// Extracts the first non-blank text part of the first candidate.
    fn first_text(response: GenerateResponse) -> Option<String> {
        response
            .candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .find_map(|p| p.text.filter(|t| !t.trim().is_empty()))
    }
}

impl Summarizer for GeminiClient {
    /// # Errors
    ///
    /// - [`SummaryError::Http`] on network failure.
    /// - [`SummaryError::Api`] on a non-2xx status.
    /// - [`SummaryError::EmptyResponse`] if no candidate text came back.
    /// - [`SummaryError::Deserialize`] if the envelope or the summary JSON is malformed.
    async fn summarize(&self, prompt: &str) -> Result<Summary, SummaryError> {
        tracing::info!(endpoint = %self.endpoint, "requesting profile summary");

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&Self::request_body(prompt))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(SummaryError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: GenerateResponse =
            serde_json::from_str(&body).map_err(|e| SummaryError::Deserialize {
                context: "generateContent envelope".to_string(),
                source: e,
            })?;
        let text = Self::first_text(envelope).ok_or(SummaryError::EmptyResponse)?;

        let summary: Summary =
            serde_json::from_str(&text).map_err(|e| SummaryError::Deserialize {
                context: "summary JSON".to_string(),
                source: e,
            })?;

        tracing::info!(tags = summary.tags.len(), "summary generated");
        Ok(summary.normalized())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_includes_model_and_strips_trailing_slash() {
        let client = GeminiClient::with_base_url("k", "gemini-2.5-flash", 30, "http://localhost:9/")
            .expect("client construction should not fail");
        assert_eq!(
            client.endpoint,
            "http://localhost:9/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn request_body_shape() {
        let body = serde_json::to_value(GeminiClient::request_body("hello")).unwrap();
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(
            body["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(
            body["generationConfig"]["responseSchema"]["properties"]["tags"]["type"],
            "ARRAY"
        );
        assert_eq!(body["generationConfig"]["temperature"], 2.0);
    }

    #[test]
    fn first_text_skips_missing_parts() {
        let response: GenerateResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{ "content": { "parts": [{}, { "text": "{}" }] } }]
        }))
        .unwrap();
        assert_eq!(GeminiClient::first_text(response).as_deref(), Some("{}"));
    }

    #[test]
    fn first_text_skips_blank_parts() {
        let response: GenerateResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{ "content": { "parts": [{ "text": "  \n" }, { "text": "{\"bio\":\"b\"}" }] } }]
        }))
        .unwrap();
        assert_eq!(
            GeminiClient::first_text(response).as_deref(),
            Some("{\"bio\":\"b\"}")
        );
    }

    #[test]
    fn first_text_none_when_all_parts_blank() {
        let response: GenerateResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{ "content": { "parts": [{ "text": " " }] } }]
        }))
        .unwrap();
        assert!(GeminiClient::first_text(response).is_none());
    }

    #[test]
    fn first_text_none_without_candidates() {
        let response: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert!(GeminiClient::first_text(response).is_none());
    }
}
