//! Command executor

use crate::core::version::Version;
use crate::error::Result;
use crate::query::parser::{parse_script, Command};
use crate::storage::{StoreStats, VersionedKv};
use std::fmt;
use tracing::debug;

/// Result of executing one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A write or delete was applied
    Ok,
    /// A read; `None` means not found
    Value(Option<String>),
    /// The full log of a key
    History(Vec<Version>),
    /// Store counters
    Stats(StoreStats),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Ok => write!(f, "OK"),
            Outcome::Value(Some(value)) => write!(f, "{}", value),
            Outcome::Value(None) => write!(f, "(nil)"),
            Outcome::History(versions) if versions.is_empty() => write!(f, "(empty)"),
            Outcome::History(versions) => {
                for (i, version) in versions.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    let json = serde_json::to_string(version).map_err(|_| fmt::Error)?;
                    write!(f, "{}", json)?;
                }
                Ok(())
            }
            Outcome::Stats(stats) => write!(
                f,
                "keys={} versions={} tombstones={}",
                stats.keys, stats.versions, stats.tombstones
            ),
        }
    }
}

/// Runs commands against a store
pub struct Executor<S> {
    store: S,
}

impl<S: VersionedKv<String>> Executor<S> {
    /// Wrap a store
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Execute a single command
    pub fn execute(&mut self, command: &Command) -> Outcome {
        debug!(?command, "execute");
        match command {
            Command::Set {
                key,
                value,
                timestamp,
                ttl,
            } => {
                self.store.write(key, value.clone(), *timestamp, *ttl);
                Outcome::Ok
            }
            Command::Get { key, timestamp } => {
                Outcome::Value(self.store.read_current(key, *timestamp))
            }
            Command::GetAt { key, timestamp } => Outcome::Value(self.store.read_at(key, *timestamp)),
            Command::Delete { key, timestamp } => {
                self.store.delete(key, *timestamp);
                Outcome::Ok
            }
            Command::History { key } => Outcome::History(self.store.history(key)),
            Command::Stats => Outcome::Stats(self.store.stats()),
        }
    }

    /// Parse and execute a whole script.
    ///
    /// The script is parsed up front, so a syntax error anywhere means no
    /// command runs at all.
    pub fn run_script(&mut self, script: &str) -> Result<Vec<Outcome>> {
        let statements = parse_script(script)?;
        debug!(commands = statements.len(), "running script");
        Ok(statements
            .iter()
            .map(|statement| self.execute(&statement.command))
            .collect())
    }

    /// Get the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Unwrap the underlying store
    pub fn into_inner(self) -> S {
        self.store
    }
}
