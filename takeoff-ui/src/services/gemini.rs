//! Gemini API client
//!
//! One `generateContent` request per uploaded drawing: the fixed takeoff
//! instruction prompt plus the drawing as inline base64 data. The model is
//! treated as an opaque service returning free-form text.

use base64::Engine;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const GEMINI_MODEL: &str = "gemini-1.5-flash";
const REQUEST_TIMEOUT_SECS: u64 = 60;
const RETRY_DELAY_MS: u64 = 500;

/// Instruction prompt sent with every drawing
const TAKEOFF_PROMPT: &str = "You are an expert in quantity surveying from structural drawings. \
From the first sheet of the given structural drawings, identify elements like beams, columns, \
slabs, sunken slabs, plinth beams, staircases, and their measurements in a table format. \
If no elements are present, don't include them in the table. Provide the output as a markdown \
table with columns: Element, Length (m), Width (m), Height/Depth (m), Quantity, Notes.";

/// Gemini client errors
#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("API error {0}: {1}")]
    ApiError(u16, String),

    #[error("Model returned no text")]
    EmptyResponse,

    #[error("Parse error: {0}")]
    ParseError(String),
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

/// Request part: either prompt text or inline binary data.
///
/// Externally tagged serialization matches the API wire shape:
/// `{"text": ...}` and `{"inlineData": {...}}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
enum Part {
    Text(String),
    InlineData(InlineData),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
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

/// Client for the Google Generative Language API
pub struct GeminiClient {
    http_client: reqwest::Client,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Result<Self, GeminiError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| GeminiError::NetworkError(e.to_string()))?;

        Ok(Self {
            http_client,
            api_key,
        })
    }

    /// Send a drawing for analysis, returning the model's text reply.
    ///
    /// Transient failures (network/timeout or 5xx) are retried once after a
    /// short delay; every other failure is returned immediately.
    pub async fn analyze_drawing(
        &self,
        mime_type: &str,
        bytes: &[u8],
    ) -> Result<String, GeminiError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    Part::Text(TAKEOFF_PROMPT.to_string()),
                    Part::InlineData(InlineData {
                        mime_type: mime_type.to_string(),
                        data: base64::engine::general_purpose::STANDARD.encode(bytes),
                    }),
                ],
            }],
        };

        match self.generate_content(&request).await {
            Err(e) if is_transient(&e) => {
                tracing::warn!(error = %e, "Model request failed, retrying once");
                tokio::time::sleep(Duration::from_millis(RETRY_DELAY_MS)).await;
                self.generate_content(&request).await
            }
            result => result,
        }
    }

    async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<String, GeminiError> {
        let url = format!("{}/models/{}:generateContent", GEMINI_BASE_URL, GEMINI_MODEL);

        tracing::debug!(url = %url, "Querying Gemini API");

        // API key travels in a header so it never lands in URLs or logs
        let response = self
            .http_client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| GeminiError::NetworkError(e.to_string()))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(GeminiError::ApiError(status.as_u16(), error_text));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GeminiError::ParseError(e.to_string()))?;

        let text = extract_text(body);

        if text.trim().is_empty() {
            return Err(GeminiError::EmptyResponse);
        }

        tracing::info!(chars = text.len(), "Received model response");

        Ok(text)
    }
}

/// Concatenate the text parts of every candidate, in order
fn extract_text(body: GenerateContentResponse) -> String {
    body.candidates
        .into_iter()
        .filter_map(|c| c.content)
        .flat_map(|c| c.parts)
        .filter_map(|p| p.text)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Network failures and server-side errors are worth one retry
fn is_transient(error: &GeminiError) -> bool {
    match error {
        GeminiError::NetworkError(_) => true,
        GeminiError::ApiError(status, _) => *status >= 500,
        _ => false,
    }
}
