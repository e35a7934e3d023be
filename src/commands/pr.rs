// src/commands/pr.rs
use colored::Colorize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::git::{CommandRunner, Git};

use super::Outcome;

pub fn cmd_pr<R: CommandRunner>(git: &Git<R>) -> Result<Outcome> {
    let repo = git.remote_url()?;
    let branch = git.current_branch()?;
    let url = compare_url(&repo, &branch);

    println!("Opening {}", url.cyan());
    open_in_browser(git.runner(), &url)?;
    Ok(Outcome::Done)
}

pub fn compare_url(repo_url: &str, branch: &str) -> String {
    format!("{}/compare/{}?expand=1", repo_url.trim_end_matches('/'), branch)
}

#[cfg(target_os = "macos")]
const OPENER: (&str, &[&str]) = ("open", &[]);
#[cfg(windows)]
const OPENER: (&str, &[&str]) = ("cmd", &["/C", "start", ""]);
#[cfg(not(any(target_os = "macos", windows)))]
const OPENER: (&str, &[&str]) = ("xdg-open", &[]);

pub fn open_in_browser<R: CommandRunner>(runner: &R, url: &str) -> Result<()> {
    let (program, base_args) = OPENER;
    let mut args = base_args.to_vec();
    args.push(url);
    debug!(program, url, "opening browser");

    let out = runner.run(program, &args).map_err(|e| Error::Opener {
        url: url.to_string(),
        detail: e.to_string(),
    })?;
    if !out.success {
        return Err(Error::Opener {
            url: url.to_string(),
            detail: out.stderr.trim().to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::tests::FakeRunner;

    fn open_line(url: &str) -> String {
        let (program, args) = OPENER;
        let mut parts = vec![program];
        parts.extend_from_slice(args);
        parts.push(url);
        parts.join(" ")
    }

    #[test]
    fn compare_url_format() {
        assert_eq!(
            compare_url("https://github.com/acme/widgets", "feat/login"),
            "https://github.com/acme/widgets/compare/feat/login?expand=1"
        );
    }

    #[test]
    fn pr_opens_compare_page() {
        let url = "https://github.com/acme/widgets/compare/fix/io?expand=1";
        let git = Git::new(
            FakeRunner::new()
                .ok("git config --get remote.origin.url", "git@github.com:acme/widgets.git\n")
                .ok("git rev-parse --abbrev-ref HEAD", "fix/io\n")
                .ok(&open_line(url), ""),
        );

        assert_eq!(cmd_pr(&git).unwrap(), Outcome::Done);
        assert!(git.runner().exhausted());
    }

    #[test]
    fn pr_without_remote_fails() {
        let git = Git::new(FakeRunner::new().fail("git config --get remote.origin.url"));
        assert!(matches!(cmd_pr(&git), Err(Error::GitExec { .. })));
    }

    #[test]
    fn opener_failure_is_reported() {
        let url = "https://example.org/x";
        let runner = FakeRunner::new().fail(&open_line(url));
        let err = open_in_browser(&runner, url).unwrap_err();
        assert!(matches!(err, Error::Opener { .. }));
    }
}
