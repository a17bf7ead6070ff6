//! High-level client API for chat completions
//!
//! This crate provides a simplified interface for common operations - a
//! fluent request builder, a thin client over any `Provider`, and the
//! retrieval-grounded conversation flow used by document-chat callers.

#![warn(missing_docs)]

mod builder;
mod chat;
mod client;
mod history;
mod retrieval;

pub use builder::{BuilderError, RequestBuilder};
pub use chat::{Answer, AnswerStream, RetrievalChat};
pub use client::Client;
pub use history::MessageHistory;
pub use retrieval::{Passage, Retriever};

/// Prelude module for convenient imports
pub mod prelude {
    pub use super::{Answer, Client, Passage, RequestBuilder, RetrievalChat, Retriever};
    pub use folio_core::{Message, Role};
}
