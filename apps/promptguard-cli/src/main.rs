//! # promptguard
//!
//! `UserPromptSubmit` hook that checks each prompt against the project's
//! rules and hands the agent an advisory.
//!
//! - `promptguard` (or `promptguard hook`): read the hook request on stdin,
//!   write the reply on stdout. Always exits 0.
//! - `promptguard check <PROMPT>`: show which rules a prompt trips.
//! - `promptguard rules`: list the rules in evaluation order.
//! - `promptguard install`: register the hook in `.claude/settings.json`.

mod commands;

use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (e.g. `promptguard=debug`).
const LOG_ENV: &str = "PROMPTGUARD_LOG";

/// Check user prompts against project rules.
#[derive(Parser)]
#[command(name = "promptguard", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run as a UserPromptSubmit hook (the default).
    Hook,
    /// Evaluate a prompt and show the outcome of every rule.
    Check {
        /// The prompt to evaluate.
        prompt: String,
        /// Print the evaluation trace as JSON.
        #[arg(long)]
        json: bool,
    },
    /// List the built-in rules in evaluation order.
    Rules,
    /// Register the hook in the project's Claude settings.
    Install {
        /// Project root directory (defaults to current directory).
        #[arg(long, default_value = ".")]
        project_root: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they don't interfere with the JSON reply on stdout.
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("error"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();

    let command = match Cli::try_parse() {
        Ok(cli) => cli.command.unwrap_or(Commands::Hook),
        Err(e) if !falls_back_to_hook(&e) => e.exit(),
        Err(e) => {
            tracing::warn!("ignoring unrecognized arguments: {}", e.kind());
            Commands::Hook
        }
    };

    match command {
        Commands::Hook => {
            commands::hook::execute();
            Ok(())
        }
        Commands::Check { prompt, json } => commands::check::execute(&prompt, json),
        Commands::Rules => commands::rules::execute(),
        Commands::Install { project_root } => commands::install::execute(&project_root),
    }
}

/// Bad arguments must not block the host: unless the user asked for help or
/// named a subcommand other than `hook`, run in hook mode anyway.
fn falls_back_to_hook(error: &clap::Error) -> bool {
    if matches!(
        error.kind(),
        ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
    ) {
        return false;
    }
    match std::env::args_os().nth(1) {
        Some(first) if first != "hook" => Cli::command().find_subcommand(&first).is_none(),
        _ => true,
    }
}
