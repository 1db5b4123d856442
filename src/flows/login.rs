//! Login flow

use log::debug;

use super::{FormState, failure_message};
use crate::app::{App, View};
use crate::client::models::Credentials;
use crate::error::Result;

/// Shown when the backend gives no reason
pub const LOGIN_FAILED: &str = "Login failed. Please try again.";

/// Shown when a field is left blank
pub const MISSING_CREDENTIALS: &str = "Email and password are required.";

/// Credentials form that exchanges email/password for a session token
#[derive(Debug, Default)]
pub struct LoginFlow {
    state: FormState,
}

impl LoginFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Submit the form and return the view now presented.
    ///
    /// On success the token is stored and the app moves to chat. On failure
    /// the form stays up with an error message.
    pub async fn submit(&mut self, app: &mut App, credentials: &Credentials) -> Result<View> {
        if self.state.is_submitting() {
            debug!("Login already in flight; ignoring submit");
            return Ok(app.view());
        }
        if !credentials.is_complete() {
            self.state = FormState::Error(MISSING_CREDENTIALS.to_string());
            return Ok(app.view());
        }

        self.state = FormState::Submitting;
        let result = app.client().login(credentials).await;
        self.state = FormState::Idle;

        match app.intercept(result) {
            Ok(token) => {
                app.session().sign_in(&token.access_token)?;
                app.navigate(View::Chat)
            }
            Err(err) => {
                self.state = FormState::Error(failure_message(err, LOGIN_FAILED)?);
                Ok(app.view())
            }
        }
    }
}
