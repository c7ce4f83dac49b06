//! Canonical topic names across data sources.
//!
//! Topics of the second loaded source carry a fixed prefix (`/webviz_bag_2/foo`).
//! Stripping it yields the canonical name used to match the same channel
//! across sources.

use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Topic prefix used by the player for the second data source.
pub const DEFAULT_SOURCE_PREFIX: &str = "/webviz_bag_2";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourcePrefix(String);

impl Default for SourcePrefix {
    fn default() -> Self {
        Self(DEFAULT_SOURCE_PREFIX.to_string())
    }
}

impl SourcePrefix {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self(prefix.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if the topic belongs to the secondary source.
    pub fn is_secondary(&self, name: &str) -> bool {
        !self.0.is_empty() && name.starts_with(&self.0)
    }

    /// Canonical form of a single topic name.
    pub fn strip<'a>(&self, name: &'a str) -> &'a str {
        if self.0.is_empty() {
            return name;
        }
        name.strip_prefix(self.0.as_str()).unwrap_or(name)
    }

    /// Canonical names of all inputs, deduplicated in first-seen order.
    pub fn strip_source_prefix<I, S>(&self, names: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .map(|name| self.strip(name.as_ref()).to_string())
            .unique()
            .collect()
    }

    /// Topic name as published by the secondary source.
    pub fn apply(&self, topic: &str) -> String {
        format!("{}{}", self.0, topic)
    }
}
