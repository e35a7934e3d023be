// src/git.rs
use std::process::Command;

use tracing::debug;

use crate::error::{Error, Result};

// =============================================================================
// COMMAND RUNNER
// =============================================================================
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
}

/// Runs an external program to completion.
///
/// A spawn failure is an error; a non-zero exit is reported through
/// [`CommandOutput::success`] so callers can treat it as a probe result.
pub trait CommandRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput>;
}

pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        debug!(program, ?args, "running command");
        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|e| Error::git(describe(program, args), format!("failed to execute: {}", e)))?;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
        })
    }
}

fn describe(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

// =============================================================================
// GIT SHIM
// =============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushMode {
    /// Remote branch already existed.
    Plain,
    /// Remote branch was missing, pushed with `--set-upstream`.
    SetUpstream,
}

pub struct Git<R> {
    runner: R,
}

impl<R: CommandRunner> Git<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    fn probe(&self, args: &[&str]) -> Result<CommandOutput> {
        self.runner.run("git", args)
    }

    /// Runs git and fails on a non-zero exit.
    fn run_git(&self, args: &[&str]) -> Result<String> {
        let out = self.probe(args)?;
        if !out.success {
            let detail = if out.stderr.trim().is_empty() {
                out.stdout.trim().to_string()
            } else {
                out.stderr.trim().to_string()
            };
            return Err(Error::git(describe("git", args), detail));
        }
        Ok(out.stdout)
    }

    pub fn is_repository(&self) -> bool {
        self.probe(&["rev-parse", "--git-dir"])
            .map(|o| o.success)
            .unwrap_or(false)
    }

    pub fn has_changes(&self) -> Result<bool> {
        let out = self.run_git(&["status", "--porcelain"])?;
        Ok(!out.trim().is_empty())
    }

    /// Short status listing shown before staging in review mode.
    pub fn status_preview(&self) -> Result<String> {
        Ok(self.run_git(&["status", "--short"])?.trim_end().to_string())
    }

    pub fn stage_all(&self) -> Result<()> {
        self.run_git(&["add", "-A"])?;
        Ok(())
    }

    /// Staged and unstaged diff text, joined and trimmed.
    pub fn diff(&self) -> Result<String> {
        let staged = self.run_git(&["diff", "--staged"])?;
        let unstaged = self.run_git(&["diff"])?;
        let joined = format!("{}\n{}", staged.trim(), unstaged.trim());
        Ok(joined.trim().to_string())
    }

    pub fn current_branch(&self) -> Result<String> {
        Ok(self.run_git(&["rev-parse", "--abbrev-ref", "HEAD"])?.trim().to_string())
    }

    pub fn commit(&self, message: &str) -> Result<()> {
        self.run_git(&["commit", "-m", message])?;
        Ok(())
    }

    pub fn checkout_new_branch(&self, name: &str) -> Result<()> {
        self.run_git(&["checkout", "-b", name])?;
        Ok(())
    }

    /// Pushes `branch` to origin, setting upstream only when the remote
    /// branch does not exist yet.
    pub fn push(&self, branch: &str) -> Result<PushMode> {
        let local = self.probe(&["rev-parse", "--verify", branch])?;
        if !local.success {
            return Err(Error::git(
                format!("git rev-parse --verify {}", branch),
                format!("branch {} does not exist locally", branch),
            ));
        }

        let remote = self.probe(&["ls-remote", "--exit-code", "--heads", "origin", branch])?;
        let mode = if remote.success {
            PushMode::Plain
        } else {
            PushMode::SetUpstream
        };
        debug!(branch, ?mode, "pushing");

        match mode {
            PushMode::Plain => self.run_git(&["push", "origin", branch])?,
            PushMode::SetUpstream => self.run_git(&["push", "--set-upstream", "origin", branch])?,
        };
        Ok(mode)
    }

    pub fn remote_url(&self) -> Result<String> {
        let raw = self.run_git(&["config", "--get", "remote.origin.url"])?;
        Ok(web_url(&raw))
    }
}

/// Turns a remote URL into the repository's HTTPS web address.
pub fn web_url(remote: &str) -> String {
    let url = remote.trim().trim_end_matches('/');
    let url = url.strip_suffix(".git").unwrap_or(url);

    if let Some(rest) = url.strip_prefix("git@") {
        return format!("https://{}", rest.replacen(':', "/", 1));
    }

    if let Some(rest) = url.strip_prefix("ssh://") {
        let rest = rest.split_once('@').map_or(rest, |(_, host)| host);
        // ssh://host:2222/owner/repo carries a port, not a path separator.
        let (host, path) = rest.split_once('/').unwrap_or((rest, ""));
        let host = host.split(':').next().unwrap_or(host);
        return format!("https://{}/{}", host, path);
    }

    for scheme in ["https://", "http://"] {
        if let Some(rest) = url.strip_prefix(scheme) {
            let rest = match rest.split_once('/') {
                Some((authority, path)) => {
                    let host = authority.rsplit('@').next().unwrap_or(authority);
                    format!("{}/{}", host, path)
                }
                None => rest.to_string(),
            };
            return format!("{}{}", scheme, rest);
        }
    }

    url.to_string()
}
