//! CLI command implementations

use anyhow::Result;
use clap::Subcommand;

use crate::config::CliConfig;

pub mod profile;
pub mod tokenize;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Segment text into graphemes, optionally mapping them through a profile column
    Tokenize(tokenize::TokenizeArgs),

    /// Create an orthography profile from the graphemes of a text
    Profile(profile::ProfileArgs),

    /// Check that an orthography profile and its rules load
    Validate(validate::ValidateArgs),
}

impl Commands {
    /// Execute the selected command
    pub fn execute(&self, config: &CliConfig, quiet: bool) -> Result<()> {
        match self {
            Commands::Tokenize(args) => args.execute(config, quiet),
            Commands::Profile(args) => args.execute(config, quiet),
            Commands::Validate(args) => args.execute(config),
        }
    }
}
