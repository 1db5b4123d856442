//! Authenticated session state
//!
//! [`Session`] is the only writer of the token store. The API client reads
//! the same store to attach bearer credentials, so both share it through an
//! `Arc`.

use std::sync::Arc;

use log::info;

use crate::error::Result;

mod store;

pub use store::{ConfigTokenStore, MemoryTokenStore, TokenStore};

/// Explicit session handle passed to everything that needs auth state
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn TokenStore>,
}

impl Session {
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self { store }
    }

    /// Shared handle to the underlying store, for the API client
    pub fn store(&self) -> Arc<dyn TokenStore> {
        Arc::clone(&self.store)
    }

    /// Whether a token is currently stored
    pub fn is_authenticated(&self) -> Result<bool> {
        Ok(self.store.get()?.is_some())
    }

    /// Record a freshly issued token
    pub fn sign_in(&self, token: &str) -> Result<()> {
        self.store.set(token)?;
        info!("Session started");
        Ok(())
    }

    /// Drop the current token
    pub fn sign_out(&self) -> Result<()> {
        self.store.clear()?;
        info!("Session cleared");
        Ok(())
    }
}
