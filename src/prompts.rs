// src/prompts.rs

pub const COMMIT_PROMPT: &str = r#"Generate a git commit message based on the output of a diff command. The commit message should be a detailed but brief overview of the changes. Return only the text for the commit message.
{note}
Here is the diff output:

{diff}

Commit message:"#;

pub const NOTE_LINE: &str = "\nAdditional context from the developer: {note}\n";

pub const BRANCH_PROMPT: &str = r#"Generate a git branch name from a commit message.
The branch name must start with exactly one of these prefixes: {prefixes}
followed by a short lowercase slug using hyphens, e.g. feat/add-user-login.
Return only the branch name, nothing else.

Here is the commit message:
{message}"#;

pub const BRANCH_PREFIXES: &[&str] = &[
    "feat/", "fix/", "perf/", "docs/", "style/", "refactor/", "test/", "chore/", "bug/",
];

/// Prompt asking for a commit message. The diff is inserted last and verbatim.
pub fn commit_prompt(diff: &str, note: Option<&str>) -> String {
    let note_line = match note.map(str::trim).filter(|n| !n.is_empty()) {
        Some(n) => NOTE_LINE.replace("{note}", n),
        None => String::new(),
    };
    COMMIT_PROMPT
        .replace("{note}", &note_line)
        .replace("{diff}", diff)
}

pub fn branch_prompt(commit_message: &str) -> String {
    BRANCH_PROMPT
        .replace("{prefixes}", &BRANCH_PREFIXES.join(", "))
        .replace("{message}", commit_message)
}

pub fn strip_quotes(text: &str) -> String {
    text.replace('"', "")
}

/// Lowercases and collapses every run of non-alphanumeric characters into a
/// single hyphen, trimming hyphens at both ends.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

// =============================================================================
// MODULE TESTS
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_DIFF: &str = "diff --git a/src/lib.rs b/src/lib.rs\n+fn added() {}\n-{note} literal\n";

    #[test]
    fn commit_prompt_contains_diff_verbatim() {
        let prompt = commit_prompt(SAMPLE_DIFF, None);
        assert!(prompt.contains(SAMPLE_DIFF));
        assert!(prompt.ends_with("Commit message:"));
    }

    #[test]
    fn commit_prompt_includes_note() {
        let prompt = commit_prompt("+x", Some("closes ticket 42"));
        assert!(prompt.contains("Additional context from the developer: closes ticket 42"));
        assert!(prompt.contains("+x"));
    }

    #[test]
    fn commit_prompt_ignores_blank_note() {
        let prompt = commit_prompt("+x", Some("   "));
        assert!(!prompt.contains("Additional context"));
        assert!(!prompt.contains("{note}"));
    }

    #[test]
    fn commit_prompt_note_with_placeholder_keeps_diff_intact() {
        let diff = "+let s = \"{diff}\";";
        let prompt = commit_prompt(diff, Some("see {diff}"));
        assert!(prompt.contains(diff));
    }

    #[test]
    fn branch_prompt_lists_all_prefixes() {
        let prompt = branch_prompt("Add login form");
        for prefix in BRANCH_PREFIXES {
            assert!(prompt.contains(prefix), "missing {}", prefix);
        }
        assert!(prompt.ends_with("Add login form"));
    }

    #[test]
    fn strip_quotes_removes_all_double_quotes() {
        assert_eq!(strip_quotes("\"Fix bug\""), "Fix bug");
        assert_eq!(strip_quotes("Use \"strict\" mode"), "Use strict mode");
        assert_eq!(strip_quotes("it's fine"), "it's fine");
    }

    #[test]
    fn slugify_long_commit_message() {
        let message = "Refactored the main.go file to include a more detailed implementation of the loop logic. This increases performance and gives us better error handling. Also amended the way we write files to disk, improving this and removing potential locks.";
        assert_eq!(
            slugify(message),
            "refactored-the-main-go-file-to-include-a-more-detailed-implementation-of-the-loop-logic-this-increases-performance-and-gives-us-better-error-handling-also-amended-the-way-we-write-files-to-disk-improving-this-and-removing-potential-locks"
        );
    }

    #[test]
    fn slugify_trims_and_collapses() {
        assert_eq!(slugify("  --Hello,   World!!  "), "hello-world");
        assert_eq!(slugify("feat/Add OAuth2"), "feat-add-oauth2");
    }

    #[test]
    fn slugify_without_alphanumerics_is_empty() {
        assert_eq!(slugify("!!! ... ???"), "");
        assert_eq!(slugify(""), "");
    }
}
