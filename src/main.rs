//! Temporal-KV: Main entry point

use anyhow::Context;
use clap::Parser;
use std::io::{self, Read, Write};
use std::path::Path;
use temporal_kv::cli::{Cli, Commands, LogFormat};
use temporal_kv::config::StoreConfig;
use temporal_kv::query::{parse_script, Executor};
use temporal_kv::storage::VersionedStore;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref(), cli.log_format);

    let config = match &cli.config {
        Some(path) => StoreConfig::from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => StoreConfig::default(),
    };
    tracing::debug!(?config, "store configured");

    match cli.command {
        Commands::Run { script } => {
            let source = read_script(script.as_deref())?;
            execute(config, &source)
        }
        Commands::Exec { statements } => execute(config, &statements.join("\n")),
        Commands::Check { script } => {
            let source = read_script(script.as_deref())?;
            let statements = parse_script(&source)?;
            println!("{} commands OK", statements.len());
            Ok(())
        }
    }
}

fn execute(config: StoreConfig, source: &str) -> anyhow::Result<()> {
    let mut executor = Executor::new(VersionedStore::with_config(config));
    let outcomes = executor.run_script(source)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for outcome in outcomes {
        writeln!(out, "{}", outcome)?;
    }
    Ok(())
}

fn read_script(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading script {}", path.display())),
        None => {
            let mut source = String::new();
            io::stdin()
                .read_to_string(&mut source)
                .context("reading script from stdin")?;
            Ok(source)
        }
    }
}

fn init_tracing(level: Option<&str>, format: LogFormat) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);

    match format {
        LogFormat::Text => subscriber.init(),
        LogFormat::Json => subscriber.json().init(),
    }
}
