//! Request conversion for the OpenAI wire format

use folio_core::{Error, Message, Request, Role};
use serde_json::{json, Value};

/// Converts generic requests to the chat-completions body
#[derive(Clone, Copy)]
pub(crate) struct OpenAIConverter;

impl OpenAIConverter {
    pub(crate) fn convert_request(&self, request: &Request) -> Result<Value, Error> {
        if request.messages.is_empty() {
            return Err(Error::Validation(
                "Request must contain at least one message".to_string(),
            ));
        }

        let mut body = json!({
            "model": request.model.to_string(),
            "messages": self.convert_messages(&request.messages),
            "stream": false,
        });

        if let Some(max_tokens) = request.parameters.max_tokens {
            body["max_tokens"] = json!(max_tokens);
        }
        if let Some(temperature) = request.parameters.temperature {
            body["temperature"] = json!(temperature);
        }
        if let Some(top_p) = request.parameters.top_p {
            body["top_p"] = json!(top_p);
        }
        if let Some(stop) = &request.parameters.stop {
            body["stop"] = json!(stop);
        }
        if let Some(seed) = request.parameters.seed {
            body["seed"] = json!(seed);
        }

        Ok(body)
    }

    fn convert_messages(&self, messages: &[Message]) -> Vec<Value> {
        messages
            .iter()
            .map(|msg| {
                let role = match msg.role {
                    Role::System => "system",
                    Role::User => "user",
                    Role::Assistant => "assistant",
                    _ => "user",
                };
                json!({ "role": role, "content": msg.content })
            })
            .collect()
    }
}
