//! Account commands: register, login, logout

use colored::Colorize;
use dialoguer::{Input, Password, theme::ColorfulTheme};

use crate::app::View;
use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, CredentialArgs, progress};
use crate::client::models::Credentials;
use crate::error::{Error, Result};
use crate::flows::{LoginFlow, RegisterFlow};

/// Fill in whatever the command line left out by prompting
pub fn prompt_credentials(args: &CredentialArgs, confirm_password: bool) -> Result<Credentials> {
    let theme = ColorfulTheme::default();

    let email = match &args.email {
        Some(email) => email.clone(),
        None => Input::<String>::with_theme(&theme)
            .with_prompt("Email")
            .interact_text()?,
    };

    let password = match &args.password {
        Some(password) => password.clone(),
        None => {
            let prompt = Password::with_theme(&theme).with_prompt("Password");
            if confirm_password {
                prompt
                    .with_confirmation("Confirm password", "Passwords do not match")
                    .interact()?
            } else {
                prompt.interact()?
            }
        }
    };

    Ok(Credentials::new(email, password))
}

/// Run the register command
pub async fn register(opts: &GlobalOptions, args: &CredentialArgs) -> Result<()> {
    let mut ctx = CommandContext::new(opts)?;
    if ctx.app.navigate(View::Register)? != View::Register {
        println!("Already logged in. Run {} first.", "memchat logout".cyan());
        return Ok(());
    }

    let credentials = prompt_credentials(args, true)?;
    let mut flow = RegisterFlow::new();

    let pb = progress::spinner("Creating account...");
    let result = flow.submit(&mut ctx.app, &credentials).await;
    pb.finish_and_clear();
    result?;

    if let Some(msg) = flow.state().error() {
        return Err(Error::Other(msg.to_string()));
    }
    if let Some(notice) = flow.notice() {
        println!("{} {}", "✓".green(), notice);
    }
    println!("  → Run {} to sign in", "memchat login".cyan());
    Ok(())
}

/// Run the login command
pub async fn login(opts: &GlobalOptions, args: &CredentialArgs) -> Result<()> {
    let mut ctx = CommandContext::new(opts)?;
    if ctx.app.navigate(View::Login)? != View::Login {
        println!("Already logged in. Run {} first.", "memchat logout".cyan());
        return Ok(());
    }

    let credentials = prompt_credentials(args, false)?;
    let mut flow = LoginFlow::new();

    let pb = progress::spinner("Logging in...");
    let result = flow.submit(&mut ctx.app, &credentials).await;
    pb.finish_and_clear();
    let view = result?;

    if let Some(msg) = flow.state().error() {
        return Err(Error::Other(msg.to_string()));
    }
    if view == View::Chat {
        println!("{} Login successful.", "✓".green());
        if opts.ephemeral {
            println!(
                "{} --ephemeral: the session ends when this command exits",
                "⚠".yellow()
            );
        }
    }
    Ok(())
}

/// Run the logout command
pub fn logout(opts: &GlobalOptions) -> Result<()> {
    let mut ctx = CommandContext::new(opts)?;
    let was_logged_in = ctx.app.session().is_authenticated()?;
    ctx.app.logout()?;

    if was_logged_in {
        println!("{} Logged out.", "✓".green());
    } else {
        println!("{} Not logged in.", "○".dimmed());
    }
    Ok(())
}
