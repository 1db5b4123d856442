//! memchat - terminal client for a memory-augmented chat service

use clap::Parser;
use env_logger::Env;

mod app;
mod cli;
mod client;
mod config;
mod error;
mod flows;
mod models;
mod output;
mod session;

use cli::args::GlobalOptions;
use cli::{Cli, Commands};
use error::Result;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut logger = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));
    if cli.debug {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.format_timestamp(None).init();

    let opts = GlobalOptions::from_cli(&cli);

    match &cli.command {
        Commands::Register(args) => cli::account::register(&opts, args).await,
        Commands::Login(args) => cli::account::login(&opts, args).await,
        Commands::Logout => cli::account::logout(&opts),
        Commands::Status => cli::status::run(&opts),
        Commands::Ask { query } => cli::chat::ask(&opts, query).await,
        Commands::Feedback { correction } => cli::chat::feedback(&opts, correction).await,
        Commands::History => cli::chat::history(&opts).await,
        Commands::Chat => cli::interactive::run(&opts).await,
        Commands::Version => {
            println!("memchat version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
