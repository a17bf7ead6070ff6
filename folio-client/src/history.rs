//! Conversation history seam

use async_trait::async_trait;
use folio_core::{Message, Result};

/// Access to a conversation's prior turns
///
/// Persistence is a collaborator concern; the only contract here is that
/// turns come back oldest first.
#[async_trait]
pub trait MessageHistory: Send + Sync {
    /// Fetch the prior turns of a conversation, oldest first
    async fn turns(&self, conversation_id: &str) -> Result<Vec<Message>>;
}
