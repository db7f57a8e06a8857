//! DTOs for the chat-completions wire format.
//!
//! The adapter encodes requests from and decodes replies into these
//! transport DTOs, then hands the raw reply text to the domain for
//! validation.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(super) struct ChatCompletionRequestDto<'a> {
    pub(super) model: &'a str,
    pub(super) messages: Vec<ChatMessageDto<'a>>,
    pub(super) temperature: f32,
    pub(super) max_tokens: u32,
}

#[derive(Debug, Serialize)]
pub(super) struct ChatMessageDto<'a> {
    pub(super) role: &'a str,
    pub(super) content: &'a str,
}

#[derive(Debug, Deserialize)]
pub(super) struct ChatCompletionResponseDto {
    #[serde(default)]
    pub(super) choices: Vec<ChatChoiceDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ChatChoiceDto {
    pub(super) message: ChatChoiceMessageDto,
}

#[derive(Debug, Deserialize)]
pub(super) struct ChatChoiceMessageDto {
    #[serde(default)]
    pub(super) content: String,
}

impl ChatCompletionResponseDto {
    /// Extract the text of the first choice, the only one requested.
    pub(super) fn into_content(self) -> Result<String, String> {
        self.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| "completion reply contained no choices".to_owned())
    }
}
