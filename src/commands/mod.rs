// src/commands/mod.rs
mod branch;
mod config;
mod generate;
mod pr;
mod version;

pub use branch::cmd_branch;
pub use config::cmd_config;
pub use generate::cmd_generate;
pub use pr::cmd_pr;
pub use version::cmd_version;

use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Confirm, Input};

use crate::client::CompletionClient;
use crate::error::{Error, Result};
use crate::git::{CommandRunner, Git, PushMode};
use crate::prompts::{commit_prompt, strip_quotes};

/// How a command finished when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Done,
    NoChanges,
    EmptyDiff,
    Aborted,
}

impl Outcome {
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            Self::Done => None,
            Self::NoChanges => Some("No changes detected in the Git repository."),
            Self::EmptyDiff => Some("No diff found."),
            Self::Aborted => Some("Canceled."),
        }
    }
}

// =============================================================================
// INTERACTIVE PROMPTS
// =============================================================================
pub trait Prompter {
    fn confirm(&self, question: &str) -> Result<bool>;
    fn input(&self, question: &str) -> Result<String>;
}

pub struct Terminal;

impl Prompter for Terminal {
    fn confirm(&self, question: &str) -> Result<bool> {
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(question)
            .default(false)
            .interact()
            .map_err(|e| Error::Prompt(e.to_string()))
    }

    fn input(&self, question: &str) -> Result<String> {
        Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt(question)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| Error::Prompt(e.to_string()))
    }
}

// =============================================================================
// SHARED PIPELINE
// =============================================================================
/// Note value that asks for the context interactively.
pub const ASK_FOR_NOTE: &str = "m";

pub(crate) enum Draft {
    Message(String),
    Stop(Outcome),
}

/// CheckChanges -> (Review) -> Stage -> Diff -> Complete.
pub(crate) async fn draft_commit<R, C>(
    git: &Git<R>,
    client: &C,
    prompter: &dyn Prompter,
    note: Option<&str>,
    review: bool,
) -> Result<Draft>
where
    R: CommandRunner,
    C: CompletionClient,
{
    if !git.has_changes()? {
        return Ok(Draft::Stop(Outcome::NoChanges));
    }

    if review {
        println!("{}", git.status_preview()?);
        if !prompter.confirm("Stage all of these changes?")? {
            return Ok(Draft::Stop(Outcome::Aborted));
        }
    }

    git.stage_all()?;
    println!("{}", "Files staged successfully.".green());

    let diff = git.diff()?;
    if diff.is_empty() {
        return Ok(Draft::Stop(Outcome::EmptyDiff));
    }

    let note = match note {
        Some(ASK_FOR_NOTE) => Some(prompter.input("Context for the commit message")?),
        other => other.map(str::to_string),
    };

    println!("Generating commit message with {}...", client.model());
    let reply = client.complete(&commit_prompt(&diff, note.as_deref())).await?;
    let message = strip_quotes(&reply).trim().to_string();
    if message.is_empty() {
        return Err(Error::EmptyResponse);
    }

    println!("{}", message.cyan());
    Ok(Draft::Message(message))
}

pub(crate) fn commit<R: CommandRunner>(git: &Git<R>, message: &str) -> Result<()> {
    git.commit(message)?;
    println!("{}", "Changes committed successfully.".green());
    Ok(())
}

pub(crate) fn push<R: CommandRunner>(git: &Git<R>, branch: &str) -> Result<()> {
    let mode = git.push(branch)?;
    let suffix = match mode {
        PushMode::Plain => "",
        PushMode::SetUpstream => " (upstream set)",
    };
    println!(
        "{}",
        format!("Changes pushed successfully to branch {}{}.", branch, suffix).green()
    );
    Ok(())
}


// =============================================================================
// MODULE TESTS
// =============================================================================
#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use crate::git::tests::FakeRunner;

    #[tokio::test]
    async fn draft_stops_on_clean_tree() {
        let git = Git::new(FakeRunner::new().ok("git status --porcelain", ""));
        let client = FakeClient::new();

        let draft = draft_commit(&git, &client, &FakePrompter::no(), None, false).await.unwrap();
        assert!(matches!(draft, Draft::Stop(Outcome::NoChanges)));
        assert!(client.prompts().is_empty());
    }

    #[tokio::test]
    async fn draft_review_declined_does_not_stage() {
        let git = Git::new(
            FakeRunner::new()
                .ok("git status --porcelain", " M a.rs\n")
                .ok("git status --short", " M a.rs\n"),
        );
        let prompter = FakePrompter::no();

        let draft = draft_commit(&git, &FakeClient::new(), &prompter, None, true).await.unwrap();
        assert!(matches!(draft, Draft::Stop(Outcome::Aborted)));
        assert!(git.runner().exhausted());
        assert_eq!(prompter.questions.borrow().len(), 1);
    }

    #[tokio::test]
    async fn draft_review_accepted_stages() {
        let git = Git::new(
            FakeRunner::new()
                .ok("git status --porcelain", " M a.rs\n")
                .ok("git status --short", " M a.rs\n")
                .ok("git add -A", "")
                .ok("git diff --staged", "+a\n")
                .ok("git diff", ""),
        );
        let client = FakeClient::new().reply("Update a");

        let draft = draft_commit(&git, &client, &FakePrompter::yes(), None, true).await.unwrap();
        assert!(matches!(draft, Draft::Message(ref m) if m == "Update a"));
    }

    #[tokio::test]
    async fn draft_stops_on_empty_diff() {
        let git = Git::new(
            FakeRunner::new()
                .ok("git status --porcelain", "?? empty-dir/\n")
                .ok("git add -A", "")
                .ok("git diff --staged", "")
                .ok("git diff", ""),
        );
        let client = FakeClient::new();

        let draft = draft_commit(&git, &client, &FakePrompter::no(), None, false).await.unwrap();
        assert!(matches!(draft, Draft::Stop(Outcome::EmptyDiff)));
        assert!(client.prompts().is_empty());
    }

    #[tokio::test]
    async fn draft_asks_for_note_on_m() {
        let git = Git::new(
            FakeRunner::new()
                .ok("git status --porcelain", " M a.rs\n")
                .ok("git add -A", "")
                .ok("git diff --staged", "+a\n")
                .ok("git diff", ""),
        );
        let client = FakeClient::new().reply("Update a");
        let prompter = FakePrompter::typing("hotfix for release");

        draft_commit(&git, &client, &prompter, Some("m"), false).await.unwrap();
        assert!(client.prompts()[0].contains("hotfix for release"));
    }

    #[tokio::test]
    async fn draft_rejects_reply_of_only_quotes() {
        let git = Git::new(
            FakeRunner::new()
                .ok("git status --porcelain", " M a.rs\n")
                .ok("git add -A", "")
                .ok("git diff --staged", "+a\n")
                .ok("git diff", ""),
        );
        let client = FakeClient::new().reply("\"\"\n");

        let result = draft_commit(&git, &client, &FakePrompter::no(), None, false).await;
        assert!(matches!(result, Err(Error::EmptyResponse)));
    }

    #[test]
    fn outcome_notices() {
        assert!(Outcome::Done.notice().is_none());
        assert_eq!(Outcome::NoChanges.notice(), Some("No changes detected in the Git repository."));
        assert_eq!(Outcome::EmptyDiff.notice(), Some("No diff found."));
    }
}
