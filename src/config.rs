//! Store configuration

use crate::core::history::DeletePolicy;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::error::Category;
use std::path::Path;

/// Configuration shared by both store flavours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// How deletes are turned into tombstones
    pub delete_policy: DeletePolicy,
}

impl StoreConfig {
    /// Parse a configuration from a JSON document.
    ///
    /// Malformed JSON is a serialization error; well-formed JSON with
    /// unknown fields or bad values is a configuration error.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| match e.classify() {
            Category::Data => Error::Configuration(e.to_string()),
            _ => Error::from(e),
        })
    }

    /// Load a configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Set the delete policy
    pub fn with_delete_policy(mut self, policy: DeletePolicy) -> Self {
        self.delete_policy = policy;
        self
    }
}
