use async_trait::async_trait;
use reviewer_core::config::ForwarderConfig;
use reviewer_core::error::{Result, ReviewerError};
use reviewer_core::ports::Generator;
use serde::{Deserialize, Serialize};

/// Finish reasons that mean the candidate was withheld rather than empty
const BLOCKING_FINISH_REASONS: &[&str] =
    &["SAFETY", "RECITATION", "BLOCKLIST", "PROHIBITED_CONTENT", "SPII", "OTHER"];

/// Gemini `generateContent` client
#[derive(Debug, Clone)]
pub struct GeminiClient {
    /// HTTP client
    client: reqwest::Client,
}

impl GeminiClient {
    /// Create a client, applying the configured timeout
    pub fn new(config: &ForwarderConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| ReviewerError::ConfigInvalid {
            key: "http_client".to_string(),
            reason: format!("Failed to build HTTP client: {}", e),
        })?;

        Ok(Self { client })
    }

    /// Create with a preconfigured HTTP client
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Generator for GeminiClient {
    async fn submit(&self, prompt: &str, config: &ForwarderConfig) -> Result<String> {
        let request = GenerateContentRequest::new(prompt, &config.system_instruction);

        tracing::debug!(
            model = %config.model,
            prompt_chars = prompt.chars().count(),
            "Submitting generateContent request"
        );

        let response = self
            .client
            .post(config.endpoint())
            .header("x-goog-api-key", config.api_key.expose())
            .json(&request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            return Err(ReviewerError::RemoteRejection {
                status: status.as_u16(),
                message: rejection_message(status, &body),
            });
        }

        let text = extract_text(&body)?;
        tracing::debug!(model = %config.model, response_chars = text.chars().count(), "Received candidate");

        Ok(text)
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

/// Extract the text of the first candidate from a `generateContent` response body
///
/// Text parts are concatenated in order. A response without any text is an
/// error, never an empty success.
pub fn extract_text(body: &str) -> Result<String> {
    let response: GenerateContentResponse =
        serde_json::from_str(body).map_err(|e| ReviewerError::MalformedResponse {
            reason: format!("Failed to parse response JSON: {}", e),
        })?;

    let Some(candidate) = response.candidates.into_iter().next() else {
        let block_reason = response.prompt_feedback.and_then(|feedback| feedback.block_reason);
        return Err(match block_reason {
            Some(reason) => ReviewerError::Blocked { reason: format!("prompt blocked: {}", reason) },
            None => ReviewerError::MalformedResponse {
                reason: "response contained no candidates".to_string(),
            },
        });
    };

    let text: String = candidate
        .content
        .map(|content| content.parts)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|part| part.text)
        .collect();

    if !text.is_empty() {
        return Ok(text);
    }

    match candidate.finish_reason.as_deref() {
        Some(reason) if BLOCKING_FINISH_REASONS.contains(&reason) => Err(ReviewerError::Blocked {
            reason: format!("candidate finished with {}", reason),
        }),
        _ => Err(ReviewerError::MalformedResponse {
            reason: "first candidate contained no text".to_string(),
        }),
    }
}

fn transport_error(err: reqwest::Error) -> ReviewerError {
    let reason = if err.is_timeout() {
        format!("request timed out: {}", err)
    } else if err.is_connect() {
        format!("connection failed: {}", err)
    } else {
        err.to_string()
    };
    ReviewerError::Transport { reason }
}

/// Prefer the API's own `error.message`, fall back to the raw body
fn rejection_message(status: reqwest::StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.error.message)
        .unwrap_or_else(|| format!("HTTP {}: {}", status, body))
}

/// Request body for the `generateContent` API
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
}

impl<'a> GenerateContentRequest<'a> {
    fn new(prompt: &'a str, system_instruction: &'a str) -> Self {
        Self {
            system_instruction: Content { role: None, parts: vec![Part { text: system_instruction }] },
            contents: vec![Content { role: Some("user"), parts: vec![Part { text: prompt }] }],
        }
    }
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

/// Response from the `generateContent` API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
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

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

/// Error body returned with non-2xx statuses
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_request_body_shape() {
        let request = GenerateContentRequest::new("review this", "be strict");
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "be strict");
        assert!(body["systemInstruction"].get("role").is_none());
        assert_eq!(body["contents"].as_array().unwrap().len(), 1);
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "review this");
    }

    #[test]
    fn test_extract_text_concatenates_parts() {
        let body = r#"{
            "candidates": [
                {"content": {"role": "model", "parts": [{"text": "Looks "}, {"text": "good."}]},
                 "finishReason": "STOP"},
                {"content": {"parts": [{"text": "ignored"}]}}
            ]
        }"#;

        assert_eq!(extract_text(body).unwrap(), "Looks good.");
    }

    #[test]
    fn test_extract_text_without_candidates_is_malformed() {
        let err = extract_text(r#"{"candidates": []}"#).unwrap_err();
        assert!(matches!(err, ReviewerError::MalformedResponse { .. }));

        let err = extract_text("{}").unwrap_err();
        assert!(matches!(err, ReviewerError::MalformedResponse { .. }));
    }

    #[test]
    fn test_extract_text_blocked_prompt() {
        let body = r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#;
        let err = extract_text(body).unwrap_err();
        assert!(matches!(err, ReviewerError::Blocked { ref reason } if reason.contains("SAFETY")));
    }

    #[test]
    fn test_extract_text_blocked_candidate() {
        let body = r#"{"candidates": [{"finishReason": "RECITATION"}]}"#;
        let err = extract_text(body).unwrap_err();
        assert!(matches!(err, ReviewerError::Blocked { .. }));
    }

    #[test]
    fn test_extract_text_empty_text_is_malformed() {
        let body = r#"{"candidates": [{"content": {"parts": [{"text": ""}]}, "finishReason": "STOP"}]}"#;
        let err = extract_text(body).unwrap_err();
        assert!(matches!(err, ReviewerError::MalformedResponse { .. }));
    }

    #[test]
    fn test_extract_text_invalid_json() {
        let err = extract_text("<html>bad gateway</html>").unwrap_err();
        assert!(matches!(err, ReviewerError::MalformedResponse { .. }));
    }

    #[test]
    fn test_rejection_message_prefers_api_message() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT"}}"#;
        assert_eq!(rejection_message(reqwest::StatusCode::BAD_REQUEST, body), "API key not valid.");

        let raw = rejection_message(reqwest::StatusCode::SERVICE_UNAVAILABLE, "upstream down");
        assert!(raw.contains("503"));
        assert!(raw.contains("upstream down"));
    }

    #[test]
    fn test_client_construction_with_timeout() {
        let config = ForwarderConfig::new(reviewer_core::ApiKey::new("k").unwrap())
            .with_timeout(std::time::Duration::from_secs(3));
        let client = GeminiClient::new(&config).unwrap();
        assert_eq!(client.name(), "gemini");
    }

    proptest! {
        #[test]
        fn prop_prompt_is_sent_verbatim_as_user_content(prompt in "\\PC{1,200}") {
            let request = GenerateContentRequest::new(&prompt, "instruction");
            let body = serde_json::to_value(&request).unwrap();

            prop_assert_eq!(body["contents"][0]["parts"][0]["text"].as_str(), Some(prompt.as_str()));
            prop_assert_eq!(body["systemInstruction"]["parts"][0]["text"].as_str(), Some("instruction"));
        }
    }
}
