//! API trait definitions split by responsibility
//!
//! - [`AuthApi`] - Login and registration
//! - [`ConversationApi`] - Generation, feedback and history
//!
//! The [`ChatApi`](super::ChatApi) super-trait combines both.

mod auth;
mod conversation;

pub use auth::AuthApi;
pub use conversation::ConversationApi;
