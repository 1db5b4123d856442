//! Transcript display model

use colored::Colorize;
use serde::Serialize;
use tabled::Tabled;

use crate::client::models::ChatTurn;
use crate::output::Pretty;

/// One transcript entry for table/JSON/pretty output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct TurnDisplay {
    /// 1-based position in the transcript
    #[tabled(rename = "#")]
    pub index: usize,

    #[tabled(rename = "YOU")]
    pub user_input: String,

    #[tabled(rename = "ASSISTANT")]
    pub ai_response: String,
}

impl From<(usize, &ChatTurn)> for TurnDisplay {
    fn from((position, turn): (usize, &ChatTurn)) -> Self {
        Self {
            index: position + 1,
            user_input: turn.user_input.clone(),
            ai_response: turn.ai_response.clone(),
        }
    }
}

impl Pretty for TurnDisplay {
    fn pretty(&self) -> String {
        format!(
            "{} {}\n{} {}",
            "you:".bold().cyan(),
            self.user_input,
            "ai: ".bold().green(),
            self.ai_response
        )
    }
}
