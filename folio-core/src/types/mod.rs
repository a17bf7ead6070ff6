//! Type definitions for requests, responses, and streaming

pub mod message;
pub mod request;
pub mod response;
pub mod stream;
