// src/main.rs
mod cli;
mod client;
mod commands;
mod config;
mod error;
mod git;
mod prompts;
mod types;

use std::process;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::Parser;
use colored::Colorize;

use cli::{note_text, Cli, Commands};
use client::OpenAiClient;
use commands::{Outcome, Terminal};
use config::Config;
use error::Error;
use git::{Git, SystemRunner};

// =============================================================================
// MAIN
// =============================================================================
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    dotenvy::dotenv().ok();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => {
                eprintln!("{}", e.to_string().trim_end().red());
                process::exit(1);
            }
        },
    };

    match run(cli).await {
        Ok(outcome) => {
            if let Some(notice) = outcome.notice() {
                println!("{}", notice.yellow());
            }
        }
        Err(e) => {
            eprintln!("{}", e.to_string().red());
            for cause in e.chain().skip(1) {
                eprintln!("{}", format!("  Caused by: {}", cause).red());
            }
            process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> Result<Outcome> {
    if let Commands::Version = cli.command {
        return Ok(commands::cmd_version());
    }

    let config = Config::load(cli.overrides())?;

    if let Commands::Config = cli.command {
        return Ok(commands::cmd_config(&config));
    }

    let git = Git::new(SystemRunner);
    if !git.is_repository() {
        return Err(Error::NotARepository.into());
    }

    let outcome = match cli.command {
        Commands::Generate { review, note } => {
            let client = OpenAiClient::new(&config)?;
            let note = note_text(&note);
            commands::cmd_generate(&git, &client, &Terminal, note.as_deref(), review).await?
        }
        Commands::Branch { review, slug, note } => {
            let client = OpenAiClient::new(&config)?;
            let note = note_text(&note);
            commands::cmd_branch(&git, &client, &Terminal, note.as_deref(), review, slug).await?
        }
        Commands::Pr => commands::cmd_pr(&git)?,
        Commands::Config | Commands::Version => unreachable!(),
    };

    Ok(outcome)
}
