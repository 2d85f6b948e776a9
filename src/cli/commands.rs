//! CLI commands

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Temporal-KV CLI
#[derive(Parser)]
#[command(name = "temporal-kv")]
#[command(about = "In-memory time-indexed key-value store")]
pub struct Cli {
    /// JSON store configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter, overrides RUST_LOG (e.g. "debug", "temporal_kv=trace")
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Execute a script of commands
    Run {
        /// Script file (reads stdin when omitted)
        script: Option<PathBuf>,
    },
    /// Execute statements given on the command line
    Exec {
        /// One statement per argument, e.g. "SET k v 1"
        #[arg(required = true)]
        statements: Vec<String>,
    },
    /// Parse a script without executing it
    Check {
        /// Script file (reads stdin when omitted)
        script: Option<PathBuf>,
    },
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_exec() {
        let cli = Cli::try_parse_from([
            "temporal-kv",
            "--log-format",
            "json",
            "exec",
            "SET k v 1",
            "GET k 1",
        ])
        .unwrap();

        assert_eq!(cli.log_format, LogFormat::Json);
        match cli.command {
            Commands::Exec { statements } => assert_eq!(statements.len(), 2),
            _ => panic!("expected exec"),
        }
    }

    #[test]
    fn test_exec_requires_statements() {
        assert!(Cli::try_parse_from(["temporal-kv", "exec"]).is_err());
    }
}
