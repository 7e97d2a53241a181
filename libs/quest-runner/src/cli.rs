//! Command-line interface for the Quest runner.

use clap::Parser;
use config::constants::{QuestConfig, DEFAULT_MAX_NESTING_DEPTH};
use std::path::PathBuf;

/// Quest - lower a directory of Quest scripts into JSON statement trees
#[derive(Debug, Parser)]
#[command(name = "quest")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory searched recursively for `.quest` and `.ql` scripts
    pub script_dir: PathBuf,

    /// Write one `<script>.json` per script here instead of printing to stdout
    #[arg(short, long, value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Render invocations as call text instead of leaving them out
    #[arg(long)]
    pub source: bool,

    /// Log filter, e.g. `info` or `quest_ast=debug`
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Pad `:` and `.` tokens with a space on both sides
    #[arg(long)]
    pub pad_double_space: bool,

    /// Maximum statement and expression nesting depth
    #[arg(long, default_value_t = DEFAULT_MAX_NESTING_DEPTH)]
    pub max_depth: usize,

    /// Exit with an error when any script fails
    #[arg(long)]
    pub strict: bool,
}

impl Cli {
    /// Settings shared by every script of the run.
    pub fn quest_config(&self) -> anyhow::Result<QuestConfig> {
        Ok(QuestConfig::new(self.pad_double_space, self.max_depth)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["quest", "scripts"]);
        assert_eq!(cli.script_dir, PathBuf::from("scripts"));
        assert!(cli.out.is_none());
        assert!(!cli.source);
        assert_eq!(cli.log_level, "info");
        assert_eq!(cli.quest_config().expect("config"), QuestConfig::default());
    }

    #[test]
    fn test_flags() {
        let cli = Cli::parse_from(["quest", "scripts", "--out", "build", "--source", "--log-level", "debug", "--strict"]);
        assert_eq!(cli.out, Some(PathBuf::from("build")));
        assert!(cli.source);
        assert!(cli.strict);
        assert_eq!(cli.log_level, "debug");
    }

    #[test]
    fn test_invalid_depth_is_rejected() {
        let cli = Cli::parse_from(["quest", "scripts", "--max-depth", "0"]);
        assert!(cli.quest_config().is_err());
    }
}
