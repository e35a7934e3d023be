// src/commands/version.rs
use super::Outcome;

pub fn version_line() -> String {
    format!("gitpilotai {}", env!("CARGO_PKG_VERSION"))
}

pub fn cmd_version() -> Outcome {
    println!("{}", version_line());
    Outcome::Done
}
