// src/config.rs
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write;
#[cfg(unix)]
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Error, Result};

// =============================================================================
// DEFAULTS
// =============================================================================
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const DOTFILE_NAME: &str = ".gitpilotai.env";
pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_MAX_TOKENS: u32 = 1000;
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

// =============================================================================
// CREDENTIAL
// =============================================================================
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    /// First eight characters followed by `...`, safe to print.
    pub fn masked(&self) -> String {
        let head: String = self.0.chars().take(8).collect();
        format!("{}...", head)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Credential").field(&self.masked()).finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    Environment,
    Dotfile,
}

impl fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Environment => write!(f, "environment ({})", API_KEY_VAR),
            Self::Dotfile => write!(f, "dotfile"),
        }
    }
}

/// Resolves the API key and reconciles the dotfile with the environment.
///
/// The environment always wins: when it carries a key the dotfile is rewritten
/// to match. Without either, a placeholder dotfile is created and
/// [`Error::MissingCredential`] is returned.
pub fn resolve_credential(
    env_value: Option<&str>,
    dotfile: &Path,
) -> Result<(Credential, CredentialSource)> {
    let env_value = env_value.map(str::trim).filter(|v| !v.is_empty());

    match (dotfile.exists(), env_value) {
        (_, Some(key)) => {
            write_dotfile(dotfile, key)?;
            info!(path = %dotfile.display(), "credential taken from environment, dotfile synced");
            Ok((Credential::new(key), CredentialSource::Environment))
        }
        (false, None) => {
            write_dotfile(dotfile, "")?;
            info!(path = %dotfile.display(), "created placeholder dotfile");
            Err(Error::MissingCredential {
                path: dotfile.to_path_buf(),
            })
        }
        (true, None) => match read_dotfile_key(dotfile)? {
            Some(key) => {
                info!(path = %dotfile.display(), "credential taken from dotfile");
                Ok((Credential::new(key), CredentialSource::Dotfile))
            }
            None => Err(Error::MissingCredential {
                path: dotfile.to_path_buf(),
            }),
        },
    }
}

fn read_dotfile_key(path: &Path) -> Result<Option<String>> {
    let entries = dotenvy::from_path_iter(path)
        .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;

    for entry in entries {
        let (key, value) =
            entry.map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        if key == API_KEY_VAR {
            let value = value.trim();
            return Ok((!value.is_empty()).then(|| value.to_string()));
        }
    }

    debug!(path = %path.display(), "no {} entry in dotfile", API_KEY_VAR);
    Ok(None)
}

/// Writes the dotfile owner-only before any key material reaches it.
fn write_dotfile(path: &Path, key: &str) -> Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(0o600);
    let mut file = options.open(path)?;

    // mode() only applies on creation; tighten an existing file too.
    #[cfg(unix)]
    file.set_permissions(fs::Permissions::from_mode(0o600))?;

    file.write_all(format!("{}={}\n", API_KEY_VAR, key).as_bytes())?;
    Ok(())
}

// =============================================================================
// RESOLVED CONFIG
// =============================================================================
/// Values supplied on the command line (or through their env fallbacks).
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub model: Option<String>,
    pub max_tokens: Option<u32>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub credential: Credential,
    pub source: CredentialSource,
    pub dotfile: PathBuf,
    pub model: String,
    pub max_tokens: u32,
    pub base_url: String,
}

impl Config {
    pub fn dotfile_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(DOTFILE_NAME))
    }

    /// Runs the credential bootstrap against the real home directory and
    /// process environment. Called once at start-up.
    pub fn load(overrides: Overrides) -> Result<Self> {
        let dotfile = Self::dotfile_path()
            .ok_or_else(|| Error::Config("Could not determine home directory".into()))?;
        let env_value = std::env::var(API_KEY_VAR).ok();
        Self::resolve(env_value.as_deref(), dotfile, overrides)
    }

    pub fn resolve(env_value: Option<&str>, dotfile: PathBuf, overrides: Overrides) -> Result<Self> {
        let (credential, source) = resolve_credential(env_value, &dotfile)?;

        Ok(Self {
            credential,
            source,
            dotfile,
            model: overrides.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            max_tokens: overrides.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            base_url: overrides
                .base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
        })
    }
}
