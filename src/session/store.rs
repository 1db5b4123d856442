//! Token storage backends
//!
//! A token store is a single slot holding the bearer token. Presence of a
//! token is the only authentication signal the client has; nothing here
//! tracks expiry.

use std::path::PathBuf;
use std::sync::Mutex;

use crate::config::Config;
use crate::error::{Error, Result};

/// A single-slot bearer token store
pub trait TokenStore: Send + Sync {
    /// Read the stored token, if any
    fn get(&self) -> Result<Option<String>>;

    /// Replace the stored token
    fn set(&self, token: &str) -> Result<()>;

    /// Remove the stored token
    fn clear(&self) -> Result<()>;
}

/// Token store persisted in the `token` key of the YAML config file.
///
/// Every write reloads the file first so that other keys survive.
pub struct ConfigTokenStore {
    path: PathBuf,
}

impl ConfigTokenStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Location of the backing config file
    #[cfg(test)]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn update(&self, token: Option<&str>) -> Result<()> {
        let mut config = match Config::load_from(&self.path) {
            Ok(config) => config,
            Err(Error::Config(crate::error::ConfigError::NotFound)) => Config::default(),
            Err(e) => return Err(e),
        };
        config.token = token.map(str::to_string);
        config.save_to(&self.path)
    }
}

impl TokenStore for ConfigTokenStore {
    fn get(&self) -> Result<Option<String>> {
        match Config::load_from(&self.path) {
            Ok(config) => Ok(config.token.filter(|t| !t.is_empty())),
            Err(Error::Config(crate::error::ConfigError::NotFound)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn set(&self, token: &str) -> Result<()> {
        self.update(Some(token))
    }

    fn clear(&self) -> Result<()> {
        if !self.path.exists() {
            return Ok(());
        }
        self.update(None)
    }
}

/// Token store that lives only as long as the process
#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds a token
    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(token.to_string())),
        }
    }

    fn slot(&self) -> Result<std::sync::MutexGuard<'_, Option<String>>> {
        self.token
            .lock()
            .map_err(|_| Error::Other("token store lock poisoned".to_string()))
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Result<Option<String>> {
        Ok(self.slot()?.clone())
    }

    fn set(&self, token: &str) -> Result<()> {
        *self.slot()? = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.slot()? = None;
        Ok(())
    }
}
