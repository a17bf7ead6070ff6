//! Response parsing for the OpenAI wire format

use crate::error;
use folio_core::{
    ContentDelta, Error, FinishReason, MetadataDelta, Response, ResponseMetadata, StreamEvent,
    Usage,
};
use serde::Deserialize;
use serde_json::Value;

/// Parses OpenAI-wire responses
#[derive(Clone, Copy)]
pub(crate) struct OpenAIParser {
    pub(crate) provider: &'static str,
}

impl OpenAIParser {
    pub(crate) fn parse_response(&self, value: Value) -> Result<Response, Error> {
        let response: OpenAIResponse =
            serde_json::from_value(value).map_err(error::serialization_error)?;

        if let Some(choice) = response.choices.into_iter().next() {
            let metadata = ResponseMetadata {
                model: Some(response.model),
                id: Some(response.id),
                usage: response.usage.map(|u| Usage {
                    prompt_tokens: u.prompt_tokens,
                    completion_tokens: u.completion_tokens,
                    total_tokens: u.total_tokens,
                }),
                finish_reason: choice.finish_reason.as_deref().map(parse_finish_reason),
            };

            Ok(Response {
                content: choice.message.content.unwrap_or_default(),
                metadata,
            })
        } else {
            Err(error::provider_error(
                self.provider,
                "No choices in response",
                None,
            ))
        }
    }

    /// Parse one SSE data payload into an event
    ///
    /// Returns `Ok(None)` for payloads that carry no event (keep-alives,
    /// role-only deltas). A payload with an `error` object becomes an `Err`
    /// whose message keeps the provider's wording, so failure classifiers
    /// see the original quota/rate-limit text.
    pub(crate) fn parse_event(&self, data: &str) -> Result<Option<StreamEvent>, Error> {
        if data == "[DONE]" {
            return Ok(Some(StreamEvent::Done));
        }

        let value: Value = serde_json::from_str(data).map_err(error::serialization_error)?;

        if let Some(err) = value.get("error") {
            let message = err
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| err.to_string());
            return Err(error::provider_error(self.provider, message, None));
        }

        let chunk: StreamChunk =
            serde_json::from_value(value).map_err(error::serialization_error)?;

        if let Some(choice) = chunk.choices.first() {
            if let Some(content) = &choice.delta.content {
                if !content.is_empty() {
                    return Ok(Some(StreamEvent::Content(ContentDelta {
                        text: content.clone(),
                    })));
                }
            }
        }

        if !chunk.id.is_empty() || !chunk.model.is_empty() {
            return Ok(Some(StreamEvent::Metadata(MetadataDelta {
                model: Some(chunk.model),
                id: Some(chunk.id),
            })));
        }

        Ok(None)
    }
}

fn parse_finish_reason(reason: &str) -> FinishReason {
    match reason {
        "length" => FinishReason::Length,
        "content_filter" => FinishReason::ContentFilter,
        _ => FinishReason::Stop,
    }
}

// Response structures
#[derive(Deserialize)]
struct OpenAIResponse {
    id: String,
    model: String,
    choices: Vec<Choice>,
    usage: Option<UsageInfo>,
}

#[derive(Deserialize)]
struct Choice {
    message: MessageResponse,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct MessageResponse {
    content: Option<String>,
}

#[derive(Deserialize)]
struct UsageInfo {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

// Streaming structures
#[derive(Deserialize)]
struct StreamChunk {
    #[serde(default)]
    id: String,
    #[serde(default)]
    model: String,
    #[serde(default)]
    choices: Vec<StreamChoice>,
}

#[derive(Deserialize)]
struct StreamChoice {
    delta: DeltaContent,
}

#[derive(Deserialize)]
struct DeltaContent {
    content: Option<String>,
}
