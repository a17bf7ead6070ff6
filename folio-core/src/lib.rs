//! Core traits and types for the folio chat-completion library
//!
//! This crate provides the fundamental abstractions shared by the folio
//! workspace: conversation messages, completion requests and responses,
//! streaming events, the `Provider` trait, and the error type.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod provider;
pub mod types;

// Re-export commonly used items
pub use error::{Error, Result};
pub use provider::{BoxEventStream, Provider};
pub use types::{
    message::{Message, Role},
    request::{Model, Parameters, ParametersBuilder, Request},
    response::{FinishReason, Response, ResponseMetadata, Usage},
    stream::{ContentDelta, MetadataDelta, StreamAccumulator, StreamEvent},
};
