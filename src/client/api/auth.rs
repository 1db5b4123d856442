//! Authentication API trait

use async_trait::async_trait;

use crate::client::models::{AccessToken, Credentials};
use crate::error::Result;

/// Account operations; neither call requires a session
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange credentials for a bearer token
    async fn login(&self, credentials: &Credentials) -> Result<AccessToken>;

    /// Create a new account. Does not start a session.
    async fn register(&self, credentials: &Credentials) -> Result<()>;
}
