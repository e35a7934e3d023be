// src/commands/branch.rs
use colored::Colorize;

use crate::client::CompletionClient;
use crate::error::{Error, Result};
use crate::git::{CommandRunner, Git};
use crate::prompts::{branch_prompt, slugify};

use super::{commit, draft_commit, push, Draft, Outcome, Prompter};

const TRUNK_BRANCHES: &[&str] = &["main", "master"];

pub async fn cmd_branch<R, C>(
    git: &Git<R>,
    client: &C,
    prompter: &dyn Prompter,
    note: Option<&str>,
    review: bool,
    slug: bool,
) -> Result<Outcome>
where
    R: CommandRunner,
    C: CompletionClient,
{
    let current = git.current_branch()?;
    if !TRUNK_BRANCHES.contains(&current.as_str()) {
        return Err(Error::WrongBranch(current));
    }

    let message = match draft_commit(git, client, prompter, note, review).await? {
        Draft::Message(m) => m,
        Draft::Stop(outcome) => return Ok(outcome),
    };

    // The model's reply is used as-is; git rejects names it cannot store.
    let name = if slug {
        slugify(&message)
    } else {
        client.complete(&branch_prompt(&message)).await?.trim().to_string()
    };
    if name.is_empty() {
        return Err(Error::EmptyResponse);
    }

    git.checkout_new_branch(&name)?;
    println!("{}", format!("Switched to new branch {}", name).green());

    commit(git, &message)?;
    push(git, &name)?;

    Ok(Outcome::Done)
}
