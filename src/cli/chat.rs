//! One-shot chat commands: ask, feedback, history

use colored::Colorize;
use log::debug;

use crate::app::View;
use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, OutputFormat, progress};
use crate::client::models::ChatTurn;
use crate::error::{ApiError, Error, Result};
use crate::flows::{ChatFlow, Notice};
use crate::models::TurnDisplay;
use crate::output::{Formattable, json};

/// Convert whatever the flow left behind into the command's result.
///
/// A redirect to login means the backend rejected the token.
fn settle(flow: &mut ChatFlow, ctx: &CommandContext) -> Result<()> {
    if ctx.app.view() != View::Chat {
        return Err(ApiError::Unauthorized.into());
    }
    match flow.take_notice() {
        Some(Notice::Error(msg)) => Err(Error::Other(msg)),
        Some(Notice::Info(msg)) => {
            println!("{} {}", "✓".green(), msg);
            Ok(())
        }
        None => Ok(()),
    }
}

/// Run the ask command
pub async fn ask(opts: &GlobalOptions, query: &str) -> Result<()> {
    if query.trim().is_empty() {
        debug!("Empty query; nothing sent");
        return Ok(());
    }
    let mut ctx = CommandContext::new(opts)?;
    let mut flow = ChatFlow::new();
    flow.set_input(query);

    let pb = progress::spinner("Generating...");
    let result = flow.handle_generate(&mut ctx.app).await;
    pb.finish_and_clear();
    let turn = result?;

    settle(&mut flow, &ctx)?;
    if let Some(turn) = turn {
        print_turn(&turn, ctx.format)?;
    }
    Ok(())
}

/// Run the feedback command against the latest turn in the history
pub async fn feedback(opts: &GlobalOptions, correction: &str) -> Result<()> {
    if correction.trim().is_empty() {
        debug!("Empty correction; nothing sent");
        return Ok(());
    }
    let mut ctx = CommandContext::new(opts)?;
    let mut flow = ChatFlow::new();

    let pb = progress::spinner("Loading conversation...");
    let result = flow.mount(&mut ctx.app).await;
    pb.finish_and_clear();
    result?;
    settle(&mut flow, &ctx)?;

    flow.set_feedback(correction);
    let pb = progress::spinner("Submitting feedback...");
    let result = flow.handle_feedback(&mut ctx.app).await;
    pb.finish_and_clear();
    let outcome = result?;

    if ctx.format == OutputFormat::Json {
        settle_quietly(&mut flow, &ctx)?;
        if let Some(outcome) = outcome {
            println!("{}", json::format_json(&outcome)?);
        }
        return Ok(());
    }

    settle(&mut flow, &ctx)?;
    if let Some(loss) = outcome.and_then(|o| o.loss) {
        println!("  Training loss: {:.4}", loss);
    }
    Ok(())
}

/// Run the history command
pub async fn history(opts: &GlobalOptions) -> Result<()> {
    let mut ctx = CommandContext::new(opts)?;
    let mut flow = ChatFlow::new();

    let pb = progress::spinner("Loading conversation...");
    let result = flow.mount(&mut ctx.app).await;
    pb.finish_and_clear();
    result?;
    settle(&mut flow, &ctx)?;

    let display: Vec<TurnDisplay> = flow
        .transcript()
        .iter()
        .enumerate()
        .map(TurnDisplay::from)
        .collect();
    display.print(ctx.format)
}

/// Like [`settle`] but without printing informational notices
fn settle_quietly(flow: &mut ChatFlow, ctx: &CommandContext) -> Result<()> {
    if let Some(Notice::Info(_)) = flow.notice() {
        flow.take_notice();
    }
    settle(flow, ctx)
}

/// Print a single exchange in the requested format
pub fn print_turn(turn: &ChatTurn, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Pretty => {
            println!("{}", turn.ai_response);
            Ok(())
        }
        _ => vec![TurnDisplay::from((0, turn))].print(format),
    }
}
