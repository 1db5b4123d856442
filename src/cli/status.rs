//! Status command implementation

use colored::Colorize;
use serde::Serialize;

use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, OutputFormat};
use crate::error::Result;
use crate::output::json;

/// Machine-readable status
#[derive(Debug, Serialize)]
struct StatusReport {
    config_path: String,
    config_exists: bool,
    api_host: String,
    logged_in: bool,
    ephemeral: bool,
}

/// Run the status command to display configuration and session status
pub fn run(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let report = StatusReport {
        config_path: ctx.config_path.display().to_string(),
        config_exists: ctx.config_path.exists(),
        api_host: ctx.api_host.clone(),
        logged_in: ctx.app.session().is_authenticated()?,
        ephemeral: opts.ephemeral,
    };

    if ctx.format == OutputFormat::Json {
        println!("{}", json::format_json(&report)?);
        return Ok(());
    }

    println!("{}\n", "memchat Status".bold());
    println!("Config file: {}", report.config_path.cyan());
    if !report.config_exists {
        println!("  {}", "(not created yet)".dimmed());
    }
    println!("Backend: {}", report.api_host.cyan());
    println!();

    if report.logged_in {
        println!("{} Logged in", "✓".green());
    } else {
        println!("{} Not logged in", "✗".red());
        println!("  → Run 'memchat login' to sign in");
    }
    if report.ephemeral {
        println!("{} Session kept in memory only", "○".dimmed());
    }
    println!();

    Ok(())
}
