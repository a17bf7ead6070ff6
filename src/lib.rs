//! Folio - retrieval-grounded chat completions with transparent failover
//!
//! This crate bundles the folio workspace behind one dependency: core types,
//! backend implementations with primary/secondary failover, and the
//! high-level client with the retrieval-grounded conversation flow.
//!
//! # Quick Start
//!
//! ```no_run
//! use folio::prelude::*;
//! use folio::providers::Failover;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), folio::Error> {
//! folio::logging::init();
//!
//! // Primary (OpenAI) with a lazily-built DeepSeek secondary. If the
//! // primary reports quota exhaustion, calls switch over transparently.
//! let provider = Failover::from_env()?;
//! let client = Client::new(provider);
//!
//! let response = client.chat("Summarize the uploaded document").await?;
//! println!("{}", response);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod logging;

// Re-export core types
pub use folio_core::*;

/// Backend implementations and failover
pub mod providers {
    pub use folio_providers::*;
}

/// High-level client API
pub mod client {
    pub use folio_client::*;
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use folio_client::{Answer, Client, Passage, RequestBuilder, RetrievalChat, Retriever};
    pub use folio_core::{
        Error, Message, Model, Parameters, Provider, Request, Response, Role, StreamAccumulator,
        StreamEvent,
    };
    pub use folio_providers::{Backend, Failover, FailoverConfig, OpenAI};
}
