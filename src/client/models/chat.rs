//! Chat models

use serde::{Deserialize, Serialize};

/// One query/response pair in the transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    /// What the user asked
    pub user_input: String,

    /// What the model answered
    #[serde(alias = "model_response", alias = "response")]
    pub ai_response: String,
}

impl ChatTurn {
    pub fn new(user_input: impl Into<String>, ai_response: impl Into<String>) -> Self {
        Self {
            user_input: user_input.into(),
            ai_response: ai_response.into(),
        }
    }
}

/// Body of a successful `POST /generate`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Generation {
    pub response: String,
}

/// Body of a successful `POST /feedback`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedbackOutcome {
    /// e.g. "Model fine-tuned" or "No fine-tuning needed"
    #[serde(default)]
    pub status: String,

    /// Training loss, only present when the model was updated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loss: Option<f64>,
}
