//! Interactive chat session
//!
//! The loop asks the app which view is current and shows the matching
//! screen. Any screen can move the app to another view; a rejected token
//! lands the user back on the login menu.

use colored::Colorize;
use dialoguer::{Input, Select, theme::ColorfulTheme};

use crate::app::View;
use crate::cli::account::prompt_credentials;
use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, CredentialArgs, progress};
use crate::error::Result;
use crate::flows::{ChatFlow, LoginFlow, Notice, RegisterFlow};
use crate::models::TurnDisplay;
use crate::output::{Formattable, Pretty};

/// What the user typed at the chat prompt
#[derive(Debug, PartialEq, Eq)]
enum ChatCommand {
    Send(String),
    Feedback(Option<String>),
    History,
    Logout,
    Quit,
    Help,
}

impl ChatCommand {
    fn parse(raw: &str) -> Self {
        let line = raw.trim();
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };
        match head {
            "/quit" | "/exit" => ChatCommand::Quit,
            "/logout" => ChatCommand::Logout,
            "/history" => ChatCommand::History,
            "/help" => ChatCommand::Help,
            "/feedback" if rest.is_empty() => ChatCommand::Feedback(None),
            "/feedback" => ChatCommand::Feedback(Some(rest.to_string())),
            _ => ChatCommand::Send(raw.to_string()),
        }
    }
}

/// Whether the loop keeps going
enum Step {
    Continue,
    Quit,
}

/// Run the interactive chat command
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    let mut ctx = CommandContext::new(opts)?;
    let mut chat = ChatFlow::new();
    let mut mounted = false;

    println!("{}", "memchat".bold().green());
    println!("Connected to {}\n", ctx.api_host.cyan());

    loop {
        let step = match ctx.app.view() {
            View::Login => {
                mounted = false;
                login_screen(&mut ctx).await?
            }
            View::Register => register_screen(&mut ctx).await?,
            View::Chat => {
                if !mounted {
                    chat = ChatFlow::new();
                    mount(&mut chat, &mut ctx).await?;
                    mounted = ctx.app.view() == View::Chat;
                    continue;
                }
                chat_screen(&mut chat, &mut ctx).await?
            }
        };
        if let Step::Quit = step {
            break;
        }
    }

    Ok(())
}

async fn login_screen(ctx: &mut CommandContext) -> Result<Step> {
    let choice = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Welcome")
        .items(&["Log in", "Create an account", "Quit"])
        .default(0)
        .interact_opt()?;

    match choice {
        Some(0) => {
            let credentials = prompt_credentials(&CredentialArgs::default(), false)?;
            let mut flow = LoginFlow::new();

            let pb = progress::spinner("Logging in...");
            let result = flow.submit(&mut ctx.app, &credentials).await;
            pb.finish_and_clear();
            result?;

            match flow.state().error() {
                Some(msg) => println!("{} {}\n", "✗".red(), msg),
                None => println!("{} Login successful.\n", "✓".green()),
            }
            Ok(Step::Continue)
        }
        Some(1) => {
            ctx.app.navigate(View::Register)?;
            Ok(Step::Continue)
        }
        _ => Ok(Step::Quit),
    }
}

async fn register_screen(ctx: &mut CommandContext) -> Result<Step> {
    println!("{}", "Create an account".bold());
    let credentials = prompt_credentials(&CredentialArgs::default(), true)?;
    let mut flow = RegisterFlow::new();

    let pb = progress::spinner("Creating account...");
    let result = flow.submit(&mut ctx.app, &credentials).await;
    pb.finish_and_clear();
    result?;

    if let Some(msg) = flow.state().error() {
        println!("{} {}\n", "✗".red(), msg);
        // Back to the menu rather than re-prompting forever
        ctx.app.navigate(View::Login)?;
    } else if let Some(notice) = flow.notice() {
        println!("{} {}\n", "✓".green(), notice);
    }
    Ok(Step::Continue)
}

async fn mount(chat: &mut ChatFlow, ctx: &mut CommandContext) -> Result<()> {
    let pb = progress::spinner("Loading conversation...");
    let result = chat.mount(&mut ctx.app).await;
    pb.finish_and_clear();
    result?;

    show_notice(chat, ctx);
    for (i, turn) in chat.transcript().iter().enumerate() {
        println!("{}\n", TurnDisplay::from((i, turn)).pretty());
    }
    if ctx.app.view() == View::Chat {
        println!(
            "{}",
            "Type a message, or /help for commands.".dimmed()
        );
    }
    Ok(())
}

async fn chat_screen(chat: &mut ChatFlow, ctx: &mut CommandContext) -> Result<Step> {
    let line: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("you")
        .allow_empty(true)
        .interact_text()?;

    match ChatCommand::parse(&line) {
        ChatCommand::Quit => return Ok(Step::Quit),
        ChatCommand::Help => print_help(),
        ChatCommand::Logout => {
            chat.logout(&mut ctx.app)?;
            println!("{} Logged out.\n", "✓".green());
        }
        ChatCommand::History => {
            let display: Vec<TurnDisplay> =
                chat.transcript().iter().enumerate().map(TurnDisplay::from).collect();
            display.print(ctx.format)?;
        }
        ChatCommand::Feedback(text) => {
            let correction = match text {
                Some(text) => text,
                None => Input::<String>::with_theme(&ColorfulTheme::default())
                    .with_prompt("Corrected response")
                    .allow_empty(true)
                    .interact_text()?,
            };
            chat.set_feedback(correction);

            let pb = progress::spinner("Submitting feedback...");
            let result = chat.handle_feedback(&mut ctx.app).await;
            pb.finish_and_clear();
            result?;
            show_notice(chat, ctx);
        }
        ChatCommand::Send(query) => {
            chat.set_input(query);

            let pb = progress::spinner("Generating...");
            let result = chat.handle_generate(&mut ctx.app).await;
            pb.finish_and_clear();

            if let Some(turn) = result? {
                println!("{} {}\n", "ai:".bold().green(), turn.ai_response);
            }
            show_notice(chat, ctx);
        }
    }
    Ok(Step::Continue)
}

/// Print the flow's pending message, or explain a forced sign-out
fn show_notice(chat: &mut ChatFlow, ctx: &CommandContext) {
    if ctx.app.view() != View::Chat {
        println!(
            "{} Your session has expired. Please log in again.\n",
            "⚠".yellow()
        );
        return;
    }
    match chat.take_notice() {
        Some(Notice::Error(msg)) => println!("{} {}\n", "✗".red(), msg),
        Some(Notice::Info(msg)) => println!("{} {}\n", "✓".green(), msg),
        None => {}
    }
}

fn print_help() {
    println!("  {}            show the conversation so far", "/history".cyan());
    println!(
        "  {}  correct the last reply",
        "/feedback [text]".cyan()
    );
    println!("  {}             end the session", "/logout".cyan());
    println!("  {}               leave memchat\n", "/quit".cyan());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_message() {
        assert_eq!(
            ChatCommand::parse("  what is rust?  "),
            ChatCommand::Send("  what is rust?  ".to_string())
        );
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(ChatCommand::parse("/quit"), ChatCommand::Quit);
        assert_eq!(ChatCommand::parse("/exit"), ChatCommand::Quit);
        assert_eq!(ChatCommand::parse("/logout"), ChatCommand::Logout);
        assert_eq!(ChatCommand::parse("/history"), ChatCommand::History);
        assert_eq!(ChatCommand::parse("/help"), ChatCommand::Help);
    }

    #[test]
    fn test_parse_feedback() {
        assert_eq!(ChatCommand::parse("/feedback"), ChatCommand::Feedback(None));
        assert_eq!(
            ChatCommand::parse("/feedback  a better answer "),
            ChatCommand::Feedback(Some("a better answer".to_string()))
        );
    }

    #[test]
    fn test_parse_empty_is_blank_send() {
        assert_eq!(ChatCommand::parse(""), ChatCommand::Send(String::new()));
    }
}
