//! Chat backend data models

mod auth;
mod chat;

pub use auth::{AccessToken, Credentials};
pub use chat::{ChatTurn, FeedbackOutcome, Generation};
