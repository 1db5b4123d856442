//! CLI command definitions and handlers

use clap::{Parser, Subcommand};

pub mod account;
pub mod args;
pub mod chat;
pub mod context;
pub mod interactive;
pub mod progress;
pub mod status;

pub use args::OutputFormat;
pub use context::CommandContext;

/// memchat - terminal client for the memory-augmented chat service
#[derive(Parser, Debug)]
#[command(name = "memchat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, table, json)
    #[arg(
        long,
        global = true,
        env = "MEMCHAT_FORMAT",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: Option<OutputFormat>,

    /// Override config file location
    #[arg(long, global = true, env = "MEMCHAT_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Chat backend base URL
    #[arg(long, global = true, env = "MEMCHAT_API_HOST", hide_env = true)]
    pub api_host: Option<String>,

    /// Keep the session in memory instead of the config file
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// Enable debug logging
    #[arg(long, global = true, env = "MEMCHAT_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create an account
    Register(CredentialArgs),

    /// Log in and store the session token
    Login(CredentialArgs),

    /// Forget the stored session token
    Logout,

    /// Show configuration and session status
    Status,

    /// Send one query and print the reply
    Ask {
        /// The query to send
        query: String,
    },

    /// Correct the most recent reply
    Feedback {
        /// The corrected reply
        correction: String,
    },

    /// Show the conversation so far
    History,

    /// Start an interactive chat session
    Chat,

    /// Display version information
    Version,
}

/// Credentials given on the command line; missing values are prompted for
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CredentialArgs {
    /// Account email
    #[arg(long, short = 'e')]
    pub email: Option<String>,

    /// Account password (prompted when omitted)
    #[arg(long, env = "MEMCHAT_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}
