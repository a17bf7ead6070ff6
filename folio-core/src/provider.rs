//! Core provider trait for chat-completion backends

use crate::error::Result;
use crate::types::request::Request;
use crate::types::response::Response;
use crate::types::stream::StreamEvent;
use async_trait::async_trait;
use std::pin::Pin;

/// A type-erased stream of completion events
///
/// Used where the concrete stream type cannot be named, e.g. when a wrapper
/// may hand back either of two underlying backend streams.
pub type BoxEventStream = Pin<Box<dyn futures_core::Stream<Item = Result<StreamEvent>> + Send>>;

/// The fundamental trait for chat-completion backends
///
/// A provider is one endpoint/credential pair. It supports both
/// request/response and incremental streaming interactions.
#[async_trait]
pub trait Provider: Send + Sync {
    /// The stream type returned by this provider
    type Stream: futures_core::Stream<Item = Result<StreamEvent>> + Send + Unpin;

    /// Send a request and get a complete response
    async fn request(&self, request: Request) -> Result<Response>;

    /// Send a request and get a lazy sequence of events
    ///
    /// Chunks are produced on demand: nothing is pulled from the backend
    /// until the caller asks for the next event.
    async fn stream(&self, request: Request) -> Result<Self::Stream>;
}
