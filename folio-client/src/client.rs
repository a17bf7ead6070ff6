//! High-level client implementation

use crate::RequestBuilder;
use folio_core::{Error, Message, Model, Parameters, Provider, Request, Response, StreamEvent};
use futures::{Stream, StreamExt};
use std::pin::Pin;

/// High-level client for chat completions
///
/// Wraps any `Provider` - including a failover pair - behind convenience
/// methods for one-shot and streaming chat.
///
/// # Examples
///
/// ```no_run
/// use folio_client::Client;
/// # use folio_core::{Provider, Request, Response, Result, StreamEvent, BoxEventStream};
/// # async fn example<P: Provider>(provider: P) -> Result<()>
/// # where P::Stream: 'static {
/// use futures::StreamExt;
///
/// let client = Client::new(provider).with_model("gpt-4o-mini");
///
/// // Simple chat
/// let response = client.chat("Summarize the document").await?;
///
/// // Streaming chat
/// let mut stream = client.stream_chat("Tell me more").await?;
/// while let Some(chunk) = stream.next().await {
///     print!("{}", chunk?);
/// }
/// # Ok(())
/// # }
/// ```
pub struct Client<P: Provider> {
    pub(crate) provider: P,
    pub(crate) default_model: Model,
    pub(crate) default_parameters: Parameters,
}

impl<P: Provider> Client<P> {
    /// Create a new client with a provider
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            default_model: Model::new("gpt-4o-mini"),
            default_parameters: Parameters::default(),
        }
    }

    /// Set the default model for requests
    pub fn with_model(mut self, model: impl Into<Model>) -> Self {
        self.default_model = model.into();
        self
    }

    /// Set default parameters for requests
    pub fn with_parameters(mut self, parameters: Parameters) -> Self {
        self.default_parameters = parameters;
        self
    }

    /// Simple chat interface
    ///
    /// Accepts either a single message or a vector of messages.
    pub async fn chat(&self, messages: impl Into<MessageInput>) -> Result<String, Error> {
        let request = Request {
            messages: messages.into().into_messages(),
            model: self.default_model.clone(),
            parameters: self.default_parameters.clone(),
        };

        let response = self.provider.request(request).await?;
        Ok(response.content)
    }

    /// Streaming chat interface
    ///
    /// Returns a stream of text chunks that can be processed as they arrive.
    pub async fn stream_chat(
        &self,
        messages: impl Into<MessageInput>,
    ) -> Result<Pin<Box<dyn Stream<Item = Result<String, Error>> + Send + 'static>>, Error>
    where
        P::Stream: 'static,
    {
        let request = Request {
            messages: messages.into().into_messages(),
            model: self.default_model.clone(),
            parameters: self.default_parameters.clone(),
        };

        let stream = self.provider.stream(request).await?;
        Ok(Box::pin(stream.filter_map(|event| async move {
            match event {
                Ok(StreamEvent::Content(delta)) => Some(Ok(delta.text)),
                Ok(_) => None,
                Err(e) => Some(Err(e)),
            }
        })))
    }

    /// Create a request builder preloaded with this client's defaults
    pub fn request(&self) -> RequestBuilder {
        RequestBuilder::new()
            .model(self.default_model.clone())
            .parameters(self.default_parameters.clone())
    }

    /// Get a reference to the underlying provider
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Execute a pre-built request
    pub async fn execute(&self, request: Request) -> Result<Response, Error> {
        self.provider.request(request).await
    }

    /// Execute a pre-built request with streaming
    pub async fn execute_stream(&self, request: Request) -> Result<P::Stream, Error> {
        self.provider.stream(request).await
    }
}

/// Helper enum for accepting different message inputs
#[doc(hidden)]
pub enum MessageInput {
    Single(String),
    Multiple(Vec<Message>),
}

impl From<&str> for MessageInput {
    fn from(s: &str) -> Self {
        MessageInput::Single(s.to_string())
    }
}

impl From<String> for MessageInput {
    fn from(s: String) -> Self {
        MessageInput::Single(s)
    }
}

impl From<Vec<Message>> for MessageInput {
    fn from(messages: Vec<Message>) -> Self {
        MessageInput::Multiple(messages)
    }
}

impl MessageInput {
    pub(crate) fn into_messages(self) -> Vec<Message> {
        match self {
            MessageInput::Single(text) => vec![Message::user(text)],
            MessageInput::Multiple(messages) => messages,
        }
    }
}
