//! Retrieval seam
//!
//! The vector index lives outside this library; callers hand in anything
//! that can turn a query into an ordered sequence of passages.

use async_trait::async_trait;
use folio_core::Result;

/// One passage of source material backing an answer
#[derive(Debug, Clone, PartialEq)]
pub struct Passage {
    /// The passage text
    pub text: String,
    /// Identifier of the document the passage came from
    pub document_id: String,
    /// Page number within the document, when known
    pub page: Option<u32>,
    /// Similarity score reported by the index, when available
    pub score: Option<f32>,
}

impl Passage {
    /// Create a passage with just text and a document id
    pub fn new(text: impl Into<String>, document_id: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            document_id: document_id.into(),
            page: None,
            score: None,
        }
    }
}

/// An opaque retrieval capability
///
/// Implementations typically wrap a vector-index similarity search; this
/// library only cares that the result is ordered, most relevant first.
#[async_trait]
pub trait Retriever: Send + Sync {
    /// Fetch the passages most relevant to `query`, ordered by relevance
    async fn retrieve(&self, query: &str) -> Result<Vec<Passage>>;
}
