// src/cli.rs
use clap::{Parser, Subcommand};

use crate::config::Overrides;

#[derive(Parser)]
#[command(
    name = "gitpilotai",
    version,
    about = "AI-drafted commit messages and branch names for your git workflow",
    after_help = "EXAMPLES:
    gitpilotai generate                       # Stage, commit with an AI message, push
    gitpilotai generate closes issue 42       # Same, with extra context for the model
    gitpilotai generate m                     # Ask for the extra context interactively
    gitpilotai generate --review              # Status preview and confirm before staging

    gitpilotai branch                         # From main: new branch, commit, push
    gitpilotai branch --slug                  # Branch name slugified from the message

    gitpilotai pr                             # Open a compare page for the current branch
    gitpilotai config                         # Bootstrap ~/.gitpilotai.env"
)]
pub struct Cli {
    #[arg(long, env = "OPENAI_MODEL", global = true)]
    pub model: Option<String>,
    #[arg(long, global = true)]
    pub max_tokens: Option<u32>,
    #[arg(long, env = "OPENAI_BASE_URL", global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a commit message from the diff, commit and push
    ///
    /// Stages all changes, asks the model for a commit message, commits and
    /// pushes the current branch. Any words given become extra context for
    /// the model; a lone `m` asks for that context interactively.
    Generate {
        /// Show a status preview (`git status --short`) and confirm before staging
        #[arg(short = 'r', long)]
        review: bool,

        /// Extra context for the commit message
        #[arg(value_name = "MESSAGE")]
        note: Vec<String>,
    },

    /// Create a branch off main with a generated name, commit and push
    ///
    /// Must be run from `main` or `master`.
    Branch {
        /// Show a status preview (`git status --short`) and confirm before staging
        #[arg(short = 'r', long)]
        review: bool,

        /// Derive the branch name by slugifying the commit message instead of asking the model
        #[arg(long)]
        slug: bool,

        /// Extra context for the commit message
        #[arg(value_name = "MESSAGE")]
        note: Vec<String>,
    },

    /// Open a pull request compare page for the current branch
    Pr,

    /// Create or sync ~/.gitpilotai.env with OPENAI_API_KEY
    Config,

    /// Print the gitpilotai version
    Version,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            base_url: self.base_url.clone(),
        }
    }
}

/// Joins positional words into the note passed to the model.
pub fn note_text(words: &[String]) -> Option<String> {
    let note = words.join(" ");
    let note = note.trim();
    (!note.is_empty()).then(|| note.to_string())
}
