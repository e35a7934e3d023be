// src/commands/config.rs
use colored::Colorize;

use crate::config::Config;

use super::Outcome;

pub fn cmd_config(config: &Config) -> Outcome {
    println!("{}", "Config initialized.".green());
    println!("Config file: {}", config.dotfile.display());
    println!("api_key:     {} (from {})", config.credential.masked(), config.source);
    println!("model:       {}", config.model);
    println!("max_tokens:  {}", config.max_tokens);
    println!("base_url:    {}", config.base_url);
    Outcome::Done
}
