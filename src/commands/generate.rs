// src/commands/generate.rs
use crate::client::CompletionClient;
use crate::error::Result;
use crate::git::{CommandRunner, Git};

use super::{commit, draft_commit, push, Draft, Outcome, Prompter};

pub async fn cmd_generate<R, C>(
    git: &Git<R>,
    client: &C,
    prompter: &dyn Prompter,
    note: Option<&str>,
    review: bool,
) -> Result<Outcome>
where
    R: CommandRunner,
    C: CompletionClient,
{
    let message = match draft_commit(git, client, prompter, note, review).await? {
        Draft::Message(m) => m,
        Draft::Stop(outcome) => return Ok(outcome),
    };

    commit(git, &message)?;

    let branch = git.current_branch()?;
    push(git, &branch)?;

    Ok(Outcome::Done)
}
