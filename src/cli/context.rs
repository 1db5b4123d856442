//! Command execution context
//!
//! Loads config, picks the token store, and wires the API client, session
//! and router into an [`App`] so each command starts from the same place.

use std::path::PathBuf;
use std::sync::Arc;

use log::debug;

use crate::app::App;
use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::client::ChatClient;
use crate::config::Config;
use crate::error::Result;
use crate::session::{ConfigTokenStore, MemoryTokenStore, Session, TokenStore};

/// Context for command execution containing config, app state, and runtime options.
pub struct CommandContext {
    /// Resolved config file path
    pub config_path: PathBuf,
    /// Resolved backend base URL
    pub api_host: String,
    /// App state (client, session, current view)
    pub app: App,
    /// Output format preference
    pub format: OutputFormat,
}

impl CommandContext {
    /// Create a new command context.
    ///
    /// # Errors
    /// Returns error if the config file exists but cannot be read.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let config_path = Config::resolve_path(opts.config_ref())?;
        let config = Config::load_at(opts.config_ref())?;

        let store: Arc<dyn TokenStore> = if opts.ephemeral {
            Arc::new(MemoryTokenStore::new())
        } else {
            Arc::new(ConfigTokenStore::new(config_path.clone()))
        };
        let session = Session::new(store);

        let api_host = config.api_host(opts.api_host_ref());
        let client = Arc::new(ChatClient::new(api_host.clone(), session.store())?);
        debug!("Using backend {}", client.base_url());

        let app = App::new(client, session)?;
        let format = OutputFormat::resolve(opts.format, config.preferences.format.as_deref());

        Ok(Self {
            config_path,
            api_host,
            app,
            format,
        })
    }
}
