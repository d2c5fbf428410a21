//! Command-line interface for Postern.
//!
//! Running without a subcommand opens the interactive account panel.
//! `status` and `signout` cover non-interactive use over the same
//! session store the panel uses.

use std::io::Write;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use postern_core::config::Config;
use postern_core::session::{SessionProvider, SessionStore};

#[derive(Parser)]
#[command(
    name = "postern",
    version,
    about = "Session panel for the Postern account service"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the current session state.
    Status,
    /// End the current session.
    #[command(name = "signout")]
    SignOut {
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;
    let _log_guard = postern_core::logging::init().context("Failed to initialize logging")?;

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    match cli.command {
        None => runtime.block_on(postern_tui::run_account_panel(config)),
        Some(Commands::Status) => runtime.block_on(status(&config)),
        Some(Commands::SignOut { yes }) => runtime.block_on(sign_out(&config, yes)),
    }
}

async fn status(config: &Config) -> Result<()> {
    let store = SessionStore::from_config(config);
    match store.load().await? {
        Some(session) => {
            println!("Signed in as {}", session.account);
            if let Some(since) = session.signed_in_since() {
                println!("Since {}", since.format("%Y-%m-%d %H:%M UTC"));
            }
        }
        None => println!("Not signed in."),
    }
    Ok(())
}

async fn sign_out(config: &Config, yes: bool) -> Result<()> {
    let store = SessionStore::from_config(config);
    if store.load().await?.is_none() {
        println!("Not signed in.");
        return Ok(());
    }

    if !yes && !confirm_on_stdin("End the current session?")? {
        println!("Cancelled.");
        return Ok(());
    }

    store.end_session().await?;
    tracing::info!("session ended via cli");
    println!("Signed out.");
    Ok(())
}

fn confirm_on_stdin(prompt: &str) -> Result<bool> {
    print!("{prompt} [y/N] ");
    std::io::stdout().flush().context("Failed to flush stdout")?;

    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .context("Failed to read confirmation")?;
    Ok(matches!(line.trim(), "y" | "Y" | "yes"))
}
