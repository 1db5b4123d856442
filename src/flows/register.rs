//! Registration flow

use log::debug;

use super::login::MISSING_CREDENTIALS;
use super::{FormState, failure_message};
use crate::app::{App, View};
use crate::client::models::Credentials;
use crate::error::Result;

/// Shown when the backend gives no reason
pub const REGISTRATION_FAILED: &str = "Registration failed. Please try again.";

/// Shown after the account is created
pub const REGISTRATION_SUCCEEDED: &str = "Registration successful. Please login.";

/// Account creation form. A new account does not start a session.
#[derive(Debug, Default)]
pub struct RegisterFlow {
    state: FormState,
    notice: Option<String>,
}

impl RegisterFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Confirmation left by the last successful registration
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Submit the form and return the view now presented.
    ///
    /// Success sends the user to the login view without storing anything.
    pub async fn submit(&mut self, app: &mut App, credentials: &Credentials) -> Result<View> {
        if self.state.is_submitting() {
            debug!("Registration already in flight; ignoring submit");
            return Ok(app.view());
        }
        self.notice = None;
        if !credentials.is_complete() {
            self.state = FormState::Error(MISSING_CREDENTIALS.to_string());
            return Ok(app.view());
        }

        self.state = FormState::Submitting;
        let result = app.client().register(credentials).await;
        self.state = FormState::Idle;

        match app.intercept(result) {
            Ok(()) => {
                self.notice = Some(REGISTRATION_SUCCEEDED.to_string());
                app.navigate(View::Login)
            }
            Err(err) => {
                self.state = FormState::Error(failure_message(err, REGISTRATION_FAILED)?);
                Ok(app.view())
            }
        }
    }
}
