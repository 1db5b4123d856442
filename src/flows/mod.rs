//! User-facing flows driven by the front end
//!
//! Each flow owns its form state and talks to the backend only through
//! [`App`](crate::app::App), so a rejected token is handled the same way
//! wherever it shows up.
//!
//! API failures end up as messages on the flow. Local failures (config file,
//! token store) are returned as errors.

mod chat;
mod login;
mod register;

pub use chat::{ChatFlow, Notice};
pub use login::LoginFlow;
pub use register::RegisterFlow;

use crate::error::{Error, Result};

/// Generic message for generation and history failures
pub const GENERIC_FAILURE: &str = "An error occurred.";

/// State of a credentials form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormState {
    #[default]
    Idle,
    Submitting,
    Error(String),
}

impl FormState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, FormState::Submitting)
    }

    /// Message to show under the form, if any
    pub fn error(&self) -> Option<&str> {
        match self {
            FormState::Error(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Turn an API failure into the text shown to the user.
///
/// Server-provided detail wins; transport and decoding failures get
/// `fallback`. Errors that did not come from the API are handed back.
fn failure_message(err: Error, fallback: &str) -> Result<String> {
    match err {
        Error::Api(api) => Ok(api
            .detail()
            .map(str::to_string)
            .unwrap_or_else(|| fallback.to_string())),
        other => Err(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;

    #[test]
    fn test_failure_message_prefers_detail() {
        let err: Error = ApiError::BadRequest("Incorrect email or password".to_string()).into();
        assert_eq!(
            failure_message(err, "fallback").unwrap(),
            "Incorrect email or password"
        );
    }

    #[test]
    fn test_failure_message_fallback() {
        let err: Error = ApiError::Network("refused".to_string()).into();
        assert_eq!(failure_message(err, "fallback").unwrap(), "fallback");
    }

    #[test]
    fn test_failure_message_propagates_local_errors() {
        let err = Error::Other("disk".to_string());
        assert!(failure_message(err, "fallback").is_err());
    }

    #[test]
    fn test_form_state_helpers() {
        assert!(FormState::Submitting.is_submitting());
        assert!(!FormState::Idle.is_submitting());
        assert_eq!(FormState::Error("x".to_string()).error(), Some("x"));
        assert_eq!(FormState::Idle.error(), None);
    }
}
