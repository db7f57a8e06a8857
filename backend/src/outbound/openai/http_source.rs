//! Reqwest-backed chat-completions adapter.
//!
//! This adapter owns transport details only: request serialisation, timeout
//! and HTTP error mapping, and unwrapping the reply envelope down to the
//! raw text the domain validates.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use thiserror::Error;

use crate::domain::ports::{CompletionRequest, QuestionModel, QuestionModelError};

use super::dto::{ChatCompletionRequestDto, ChatCompletionResponseDto, ChatMessageDto};

/// Fixed sampling temperature for question generation.
const TEMPERATURE: f32 = 0.7;
/// Fixed output-length cap.
const MAX_TOKENS: u32 = 1000;

/// Errors raised while constructing the adapter.
#[derive(Debug, Error)]
pub enum OpenAiModelBuildError {
    /// The base URL could not be extended with the completions path.
    #[error("invalid completions endpoint: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// The reqwest client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Chat-completions adapter performing HTTP POST requests against one
/// OpenAI-compatible endpoint.
pub struct OpenAiHttpModel {
    client: Client,
    endpoint: Url,
    api_key: String,
    model: String,
}

impl OpenAiHttpModel {
    /// Build an adapter with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the endpoint URL cannot be derived from
    /// `base_url` or the reqwest client cannot be constructed.
    pub fn new(
        base_url: Url,
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, OpenAiModelBuildError> {
        let endpoint = completions_endpoint(base_url)?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            api_key: api_key.into(),
            model: model.into(),
        })
    }
}

#[async_trait]
impl QuestionModel for OpenAiHttpModel {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, QuestionModelError> {
        let body = ChatCompletionRequestDto {
            model: self.model.as_str(),
            messages: vec![
                ChatMessageDto {
                    role: "system",
                    content: request.system.as_str(),
                },
                ChatMessageDto {
                    role: "user",
                    content: request.user.as_str(),
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(self.api_key.as_str())
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, bytes.as_ref()));
        }

        let decoded: ChatCompletionResponseDto = serde_json::from_slice(&bytes).map_err(|err| {
            QuestionModelError::transport(format!("invalid completion payload: {err}"))
        })?;
        decoded.into_content().map_err(QuestionModelError::transport)
    }
}

/// Derive the `chat/completions` endpoint from the configured base URL.
fn completions_endpoint(mut base_url: Url) -> Result<Url, url::ParseError> {
    if !base_url.path().ends_with('/') {
        let path = format!("{}/", base_url.path());
        base_url.set_path(&path);
    }
    base_url.join("chat/completions")
}

fn map_transport_error(error: reqwest::Error) -> QuestionModelError {
    if error.is_timeout() {
        QuestionModelError::timeout(error.to_string())
    } else {
        QuestionModelError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> QuestionModelError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        preview
    };

    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            QuestionModelError::timeout(message)
        }
        _ => QuestionModelError::status(status.as_u16(), message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    //! Coverage for the non-network mapping helpers.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::with_trailing_slash("https://api.openai.com/v1/")]
    #[case::without_trailing_slash("https://api.openai.com/v1")]
    fn endpoint_is_derived_from_either_base_form(#[case] base: &str) {
        let url = completions_endpoint(base.parse().expect("valid base")).expect("joins");
        assert_eq!(url.as_str(), "https://api.openai.com/v1/chat/completions");
    }

    #[rstest]
    #[case::request_timeout(StatusCode::REQUEST_TIMEOUT)]
    #[case::gateway_timeout(StatusCode::GATEWAY_TIMEOUT)]
    fn timeout_statuses_map_to_timeout_errors(#[case] status: StatusCode) {
        let error = map_status_error(status, b"");
        assert!(matches!(error, QuestionModelError::Timeout { .. }));
    }

    #[rstest]
    #[case::unauthorised(StatusCode::UNAUTHORIZED)]
    #[case::rate_limited(StatusCode::TOO_MANY_REQUESTS)]
    #[case::server_error(StatusCode::INTERNAL_SERVER_ERROR)]
    fn other_statuses_map_to_status_errors(#[case] status: StatusCode) {
        let error = map_status_error(status, b"{\"error\":{\"message\":\"nope\"}}");
        let QuestionModelError::Status {
            status: code,
            message,
        } = error
        else {
            panic!("expected Status error");
        };
        assert_eq!(code, status.as_u16());
        assert!(message.contains("nope"));
    }

    #[test]
    fn body_preview_truncates_long_bodies() {
        let body = "x".repeat(500);
        let preview = body_preview(body.as_bytes());
        assert!(preview.ends_with("..."));
        assert!(preview.chars().count() <= 163);
    }

    #[test]
    fn reply_content_is_unwrapped_from_the_first_choice() {
        let body = r#"{
            "choices": [
                { "message": { "role": "assistant", "content": "[{\"q\":1}]" } }
            ]
        }"#;
        let decoded: ChatCompletionResponseDto =
            serde_json::from_str(body).expect("payload decodes");
        assert_eq!(decoded.into_content().expect("has content"), "[{\"q\":1}]");
    }

    #[test]
    fn empty_choice_list_is_a_transport_failure() {
        let decoded: ChatCompletionResponseDto =
            serde_json::from_str(r#"{"choices": []}"#).expect("payload decodes");
        assert!(decoded.into_content().is_err());
    }
}
