//! Chat backend API client

pub mod api;
pub mod backend;
#[cfg(test)]
pub mod mock;
pub mod models;

pub use api::{AuthApi, ConversationApi};
pub use backend::ChatClient;
#[cfg(test)]
pub use mock::MockChatClient;

/// Everything the flows need from the backend.
///
/// Automatically implemented for any type providing both halves.
pub trait ChatApi: AuthApi + ConversationApi {}

impl<T: AuthApi + ConversationApi> ChatApi for T {}
