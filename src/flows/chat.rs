//! Chat flow: transcript, generation and feedback

use log::debug;

use super::{GENERIC_FAILURE, failure_message};
use crate::app::{App, View};
use crate::client::models::{ChatTurn, FeedbackOutcome};
use crate::error::{Error, Result};

/// Shown after feedback is accepted
pub const FEEDBACK_SUBMITTED: &str = "Feedback submitted successfully.";

/// Shown when feedback is attempted before any exchange
pub const NOTHING_TO_CORRECT: &str = "There is no response to correct yet.";

/// Fallback for failed feedback submissions
pub const FEEDBACK_FAILED: &str = "Feedback submission failed.";

/// A message for the user left by the last action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
}

/// Chat view state.
///
/// The transcript is replaced by [`mount`], appended to by
/// [`handle_generate`] and emptied on logout. Nothing else changes it.
///
/// [`mount`]: ChatFlow::mount
/// [`handle_generate`]: ChatFlow::handle_generate
#[derive(Debug, Default)]
pub struct ChatFlow {
    transcript: Vec<ChatTurn>,
    input: String,
    feedback: String,
    generating: bool,
    sending_feedback: bool,
    notice: Option<Notice>,
}

impl ChatFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transcript(&self) -> &[ChatTurn] {
        &self.transcript
    }

    pub fn last_turn(&self) -> Option<&ChatTurn> {
        self.transcript.last()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    pub fn feedback(&self) -> &str {
        &self.feedback
    }

    pub fn set_feedback(&mut self, feedback: impl Into<String>) {
        self.feedback = feedback.into();
    }

    /// Whether a generate request is in flight
    #[cfg(test)]
    pub fn is_generating(&self) -> bool {
        self.generating
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Take the pending notice, leaving none
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    /// Enter the chat view and hydrate the transcript from the backend.
    ///
    /// Fails with [`Error::NotAuthenticated`] when the guard redirects away
    /// from chat; no request is made in that case.
    pub async fn mount(&mut self, app: &mut App) -> Result<()> {
        if app.navigate(View::Chat)? != View::Chat {
            return Err(Error::NotAuthenticated);
        }

        let result = app.client().chat_history().await;
        match app.intercept(result) {
            Ok(history) => {
                debug!("Loaded {} turns of history", history.len());
                self.transcript = history;
            }
            Err(err) => self.report(err, GENERIC_FAILURE)?,
        }
        Ok(())
    }

    /// Send the current input for generation.
    ///
    /// Returns the new turn on success. Blank input and a request already in
    /// flight are no-ops.
    pub async fn handle_generate(&mut self, app: &mut App) -> Result<Option<ChatTurn>> {
        Self::require_chat(app)?;
        if self.generating {
            debug!("Generate already in flight; ignoring");
            return Ok(None);
        }
        if self.input.trim().is_empty() {
            return Ok(None);
        }
        // Sent as typed
        let query = self.input.clone();

        self.notice = None;
        self.generating = true;
        let result = app.client().generate(&query).await;
        self.generating = false;

        match app.intercept(result) {
            Ok(generation) => {
                let turn = ChatTurn::new(query, generation.response);
                self.transcript.push(turn.clone());
                self.input.clear();
                Ok(Some(turn))
            }
            Err(err) => {
                self.report(err, GENERIC_FAILURE)?;
                Ok(None)
            }
        }
    }

    /// Submit the feedback field as a correction of the latest turn.
    ///
    /// The transcript is left untouched.
    pub async fn handle_feedback(&mut self, app: &mut App) -> Result<Option<FeedbackOutcome>> {
        Self::require_chat(app)?;
        if self.sending_feedback {
            debug!("Feedback already in flight; ignoring");
            return Ok(None);
        }
        let correction = self.feedback.trim().to_string();
        if correction.is_empty() {
            return Ok(None);
        }
        let Some(turn) = self.last_turn().cloned() else {
            self.notice = Some(Notice::Error(NOTHING_TO_CORRECT.to_string()));
            return Ok(None);
        };

        self.notice = None;
        self.sending_feedback = true;
        let result = app.client().submit_feedback(&turn, &correction).await;
        self.sending_feedback = false;

        match app.intercept(result) {
            Ok(outcome) => {
                self.feedback.clear();
                let message = if outcome.status.is_empty() {
                    FEEDBACK_SUBMITTED.to_string()
                } else {
                    format!("{} ({})", FEEDBACK_SUBMITTED, outcome.status)
                };
                self.notice = Some(Notice::Info(message));
                Ok(Some(outcome))
            }
            Err(err) => {
                self.report(err, FEEDBACK_FAILED)?;
                Ok(None)
            }
        }
    }

    /// Sign out and leave the chat view
    pub fn logout(&mut self, app: &mut App) -> Result<()> {
        self.transcript.clear();
        self.input.clear();
        self.feedback.clear();
        self.notice = None;
        app.logout()
    }

    fn require_chat(app: &App) -> Result<()> {
        if app.view() == View::Chat {
            Ok(())
        } else {
            Err(Error::NotAuthenticated)
        }
    }

    /// Record a failed call. A rejected token was already handled by the
    /// interceptor, so it leaves no message here.
    fn report(&mut self, err: Error, fallback: &str) -> Result<()> {
        if err.is_unauthorized() {
            self.notice = None;
            return Ok(());
        }
        self.notice = Some(Notice::Error(failure_message(err, fallback)?));
        Ok(())
    }
}
