//! Conversation API trait

use async_trait::async_trait;

use crate::client::models::{ChatTurn, FeedbackOutcome, Generation};
use crate::error::Result;

/// Chat operations; every call requires a session token
#[async_trait]
pub trait ConversationApi: Send + Sync {
    /// Generate a reply for `query`
    async fn generate(&self, query: &str) -> Result<Generation>;

    /// Send a corrected reply for an earlier turn
    async fn submit_feedback(&self, turn: &ChatTurn, correction: &str) -> Result<FeedbackOutcome>;

    /// Fetch the stored transcript, oldest first
    async fn chat_history(&self) -> Result<Vec<ChatTurn>>;
}
