// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("OPENAI_API_KEY is not set. Add it to {} or export it in your shell.", .path.display())]
    MissingCredential { path: PathBuf },

    #[error("`{command}` failed: {detail}")]
    GitExec { command: String, detail: String },

    #[error("Not a git repository")]
    NotARepository,

    #[error("You must be on the main branch to create a new branch (current: {0}).")]
    WrongBranch(String),

    #[error("Request to the completion API failed")]
    Network(#[from] reqwest::Error),

    #[error("Error from API: {0}")]
    Api(String),

    #[error("No response from API")]
    EmptyResponse,

    #[error("Failed to decode API response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Could not open {url} in a browser: {detail}")]
    Opener { url: String, detail: String },

    #[error("Interactive prompt failed: {0}")]
    Prompt(String),
}

impl Error {
    pub fn git(command: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::GitExec {
            command: command.into(),
            detail: detail.into(),
        }
    }
}
