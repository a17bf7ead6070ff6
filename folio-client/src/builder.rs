//! Request builder for fluent API

use folio_core::{Message, Model, Parameters, Request, Role};

/// Builder for constructing requests with a fluent API
///
/// # Examples
///
/// ```
/// use folio_client::RequestBuilder;
///
/// let request = RequestBuilder::new()
///     .system("Answer using only the attached document")
///     .user("What does section 3 cover?")
///     .temperature(0.0)
///     .max_tokens(400)
///     .build();
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestBuilder {
    messages: Vec<Message>,
    model: Option<Model>,
    parameters: Parameters,
}

impl RequestBuilder {
    /// Create a new request builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a system message
    pub fn system(self, content: impl Into<String>) -> Self {
        self.message(Role::System, content)
    }

    /// Add a user message
    pub fn user(self, content: impl Into<String>) -> Self {
        self.message(Role::User, content)
    }

    /// Add an assistant message
    pub fn assistant(self, content: impl Into<String>) -> Self {
        self.message(Role::Assistant, content)
    }

    /// Add a message with a specific role
    pub fn message(mut self, role: Role, content: impl Into<String>) -> Self {
        self.messages.push(Message::text(role, content));
        self
    }

    /// Add multiple messages
    pub fn messages(mut self, messages: impl IntoIterator<Item = Message>) -> Self {
        self.messages.extend(messages);
        self
    }

    /// Set the model
    pub fn model(mut self, model: impl Into<Model>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the temperature (0.0 to 2.0)
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.parameters.temperature = Some(temperature);
        self
    }

    /// Set the maximum number of tokens
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.parameters.max_tokens = Some(max_tokens);
        self
    }

    /// Set the top_p parameter
    pub fn top_p(mut self, top_p: f32) -> Self {
        self.parameters.top_p = Some(top_p);
        self
    }

    /// Set stop sequences
    pub fn stop(mut self, stop: impl Into<Vec<String>>) -> Self {
        self.parameters.stop = Some(stop.into());
        self
    }

    /// Set custom parameters
    pub fn parameters(mut self, parameters: Parameters) -> Self {
        self.parameters = parameters;
        self
    }

    /// Build the request
    ///
    /// # Panics
    ///
    /// Panics if no messages have been added to the request.
    pub fn build(self) -> Request {
        if self.messages.is_empty() {
            panic!("Request must contain at least one message");
        }

        Request {
            messages: self.messages,
            model: self.model.unwrap_or_else(|| Model::new("gpt-4o-mini")),
            parameters: self.parameters,
        }
    }

    /// Try to build the request, returning an error if validation fails
    pub fn try_build(self) -> Result<Request, BuilderError> {
        if self.messages.is_empty() {
            return Err(BuilderError::NoMessages);
        }

        Ok(Request {
            messages: self.messages,
            model: self.model.unwrap_or_else(|| Model::new("gpt-4o-mini")),
            parameters: self.parameters,
        })
    }
}

/// Errors that can occur when building a request
#[derive(Debug, thiserror::Error)]
pub enum BuilderError {
    /// Request must contain at least one message
    #[error("Request must contain at least one message")]
    NoMessages,
}
