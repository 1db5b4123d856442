//! Mock chat API client for testing
//!
//! Provides a mock implementation of the API traits for unit testing the
//! flows without making real API calls.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::api::{AuthApi, ConversationApi};
use super::models::{AccessToken, ChatTurn, Credentials, FeedbackOutcome, Generation};
use crate::error::{ApiError, Result};

/// Mock API client for testing.
///
/// # Example
/// ```ignore
/// let mock = MockChatClient::new().with_reply("hi").await;
/// let generation = mock.generate("hello").await?;
/// assert_eq!(generation.response, "hi");
/// ```
#[derive(Default)]
pub struct MockChatClient {
    /// Token returned from login
    token: Arc<Mutex<Option<String>>>,
    /// Replies returned from generate, in order; echoes the query when empty
    replies: Arc<Mutex<VecDeque<String>>>,
    /// Transcript returned from chat_history
    history: Arc<Mutex<Vec<ChatTurn>>>,
    /// Outcome returned from submit_feedback
    feedback_outcome: Arc<Mutex<FeedbackOutcome>>,
    /// Error to return (if any) - consumed on first use
    error: Arc<Mutex<Option<ApiError>>>,
    /// Track number of calls for verification
    call_count: Arc<Mutex<CallCounts>>,
    /// Feedback submissions, for asserting on what was sent
    feedback_sent: Arc<Mutex<Vec<(ChatTurn, String)>>>,
}

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub login: usize,
    pub register: usize,
    pub generate: usize,
    pub submit_feedback: usize,
    pub chat_history: usize,
}

impl CallCounts {
    /// Get total number of API calls made.
    pub fn total(&self) -> usize {
        self.login + self.register + self.generate + self.submit_feedback + self.chat_history
    }
}

impl MockChatClient {
    /// Create a new mock client with default (empty) responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the token returned from login.
    pub async fn with_token(self, token: &str) -> Self {
        *self.token.lock().await = Some(token.to_string());
        self
    }

    /// Queue a reply for the next generate call.
    pub async fn with_reply(self, reply: &str) -> Self {
        self.replies.lock().await.push_back(reply.to_string());
        self
    }

    /// Configure the transcript returned from chat_history.
    pub async fn with_history(self, history: Vec<ChatTurn>) -> Self {
        *self.history.lock().await = history;
        self
    }

    /// Configure the outcome returned from submit_feedback.
    pub async fn with_feedback_outcome(self, outcome: FeedbackOutcome) -> Self {
        *self.feedback_outcome.lock().await = outcome;
        self
    }

    /// Configure an error to return on the next API call.
    /// The error is consumed after one use.
    pub async fn with_error(self, error: ApiError) -> Self {
        *self.error.lock().await = Some(error);
        self
    }

    /// Get the call counts for verification in tests.
    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    /// Get every (turn, correction) pair submitted as feedback.
    pub async fn feedback_sent(&self) -> Vec<(ChatTurn, String)> {
        self.feedback_sent.lock().await.clone()
    }

    /// Check if there's a pending error and consume it.
    async fn check_error(&self) -> Result<()> {
        let mut error = self.error.lock().await;
        if let Some(e) = error.take() {
            return Err(e.into());
        }
        Ok(())
    }
}

#[async_trait]
impl AuthApi for MockChatClient {
    async fn login(&self, _credentials: &Credentials) -> Result<AccessToken> {
        self.call_count.lock().await.login += 1;
        self.check_error().await?;

        let token = self.token.lock().await;
        Ok(AccessToken {
            access_token: token.clone().unwrap_or_else(|| "mock-token".to_string()),
            token_type: Some("bearer".to_string()),
        })
    }

    async fn register(&self, _credentials: &Credentials) -> Result<()> {
        self.call_count.lock().await.register += 1;
        self.check_error().await
    }
}

#[async_trait]
impl ConversationApi for MockChatClient {
    async fn generate(&self, query: &str) -> Result<Generation> {
        self.call_count.lock().await.generate += 1;
        self.check_error().await?;

        let response = self
            .replies
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| format!("echo: {}", query));
        Ok(Generation { response })
    }

    async fn submit_feedback(&self, turn: &ChatTurn, correction: &str) -> Result<FeedbackOutcome> {
        self.call_count.lock().await.submit_feedback += 1;
        self.check_error().await?;

        self.feedback_sent
            .lock()
            .await
            .push((turn.clone(), correction.to_string()));
        Ok(self.feedback_outcome.lock().await.clone())
    }

    async fn chat_history(&self) -> Result<Vec<ChatTurn>> {
        self.call_count.lock().await.chat_history += 1;
        self.check_error().await?;

        Ok(self.history.lock().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_counts_calls() {
        let mock = MockChatClient::new();
        mock.chat_history().await.unwrap();
        mock.generate("x").await.unwrap();

        let counts = mock.call_counts().await;
        assert_eq!(counts.chat_history, 1);
        assert_eq!(counts.generate, 1);
        assert_eq!(counts.total(), 2);
    }

    #[tokio::test]
    async fn test_mock_error_consumed_once() {
        let mock = MockChatClient::new().with_error(ApiError::Forbidden(String::new())).await;

        assert!(mock.chat_history().await.is_err());
        assert!(mock.chat_history().await.is_ok());
    }

    #[tokio::test]
    async fn test_mock_replies_in_order() {
        let mock = MockChatClient::new()
            .with_reply("one")
            .await
            .with_reply("two")
            .await;

        assert_eq!(mock.generate("a").await.unwrap().response, "one");
        assert_eq!(mock.generate("b").await.unwrap().response, "two");
        assert_eq!(mock.generate("c").await.unwrap().response, "echo: c");
    }
}
