//! Validate command implementation

use anyhow::Result;
use clap::Args;
use segments_core::config::defaults;
use std::path::PathBuf;

use crate::config::{CliConfig, Normalization};
use crate::input::ProfileReader;

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Orthography profile to validate
    #[arg(short, long, value_name = "FILE", required = true)]
    pub profile: PathBuf,

    /// Rules file (default: <profile stem>.rules next to the profile)
    #[arg(short, long, value_name = "FILE")]
    pub rules: Option<PathBuf>,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self, config: &CliConfig) -> Result<()> {
        println!("Validating orthography profile: {}", self.profile.display());

        let reader = ProfileReader::new(
            config
                .profile
                .null_sentinel
                .as_deref()
                .unwrap_or(defaults::NULL_SENTINEL),
            config.tokenize.normalize.unwrap_or(Normalization::None),
        );

        match reader.load(&self.profile, self.rules.as_deref()) {
            Ok(profile) => {
                println!("✓ Profile is valid!");
                println!("  Graphemes: {}", profile.graphemes().len());
                println!(
                    "  Longest grapheme: {} characters",
                    profile.table().max_pattern_chars()
                );
                println!("  Columns: {}", profile.columns().join(", "));
                println!("  Rules: {}", profile.rules().len());
                Ok(())
            }
            Err(e) => {
                println!("✗ Profile is invalid!");
                println!("  Error: {e:#}");
                Err(anyhow::anyhow!("Validation failed: {e:#}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_validate_args_debug() {
        let args = ValidateArgs {
            profile: PathBuf::from("test.prf"),
            rules: None,
        };

        let debug_str = format!("{:?}", args);
        assert!(debug_str.contains("ValidateArgs"));
        assert!(debug_str.contains("test.prf"));
    }

    #[test]
    fn test_validate_valid_profile() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ok.prf");
        fs::write(&path, "Grapheme\tIPA\naa\taː\nch\ttʃ\n").unwrap();

        let args = ValidateArgs {
            profile: path,
            rules: None,
        };
        assert!(args.execute(&CliConfig::default()).is_ok());
    }

    #[test]
    fn test_validate_invalid_rules() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.prf");
        fs::write(&path, "Grapheme\tIPA\na\ta\n").unwrap();
        fs::write(dir.path().join("bad.rules"), "(unclosed,x\n").unwrap();

        let args = ValidateArgs {
            profile: path,
            rules: None,
        };
        let err = args.execute(&CliConfig::default()).unwrap_err();
        assert!(err.to_string().contains("invalid rule 1"));
    }
}
