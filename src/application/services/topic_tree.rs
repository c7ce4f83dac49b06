//! Topic tree service
//!
//! Loads base trees and topic lists through the filesystem boundary and
//! wires settings into the tree builder.

use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::{BaseTree, Topic, TopicNode, TreeConfigBuilder};
use crate::infrastructure::traits::FileSystem;
use crate::util::path::{FileFormat, PathExt};

/// Entry of a JSON topic list: either `"/foo"` or `{"name": "/foo"}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum TopicEntry {
    Name(String),
    Topic(Topic),
}

impl From<TopicEntry> for Topic {
    fn from(entry: TopicEntry) -> Self {
        match entry {
            TopicEntry::Name(name) => Topic::new(name),
            TopicEntry::Topic(topic) => topic,
        }
    }
}

/// Service for loading topic tree inputs.
pub struct TopicTreeService {
    fs: Arc<dyn FileSystem>,
}

impl TopicTreeService {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Load and validate a base tree from a `.toml` or `.json` file.
    #[instrument(level = "debug", skip(self))]
    pub fn load_base_tree(&self, path: &Path) -> ApplicationResult<TopicNode> {
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read base tree", path)?;

        let root: TopicNode = match path.file_format() {
            FileFormat::Toml => toml::from_str(&content).map_err(|e| parse_err(path, e))?,
            FileFormat::Json => serde_json::from_str(&content).map_err(|e| parse_err(path, e))?,
            FileFormat::Text => return Err(ApplicationError::UnsupportedFormat(path.to_path_buf())),
        };
        root.validate()?;
        debug!("loaded base tree '{}' with {} nodes", root.name, root.node_count());
        Ok(root)
    }

    /// Load the base tree named in the settings.
    pub fn load_configured_base_tree(&self, settings: &Settings) -> ApplicationResult<TopicNode> {
        let path = settings
            .base_tree
            .as_deref()
            .ok_or(ApplicationError::BaseTreeMissing)?;
        self.load_base_tree(path)
    }

    /// Load the topics advertised by the loaded data sources.
    ///
    /// JSON files hold an array of names or `{name}` objects. Any other file
    /// holds one topic per line; blank lines and `#` comments are skipped.
    #[instrument(level = "debug", skip(self))]
    pub fn load_topics(&self, path: &Path) -> ApplicationResult<Vec<Topic>> {
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read topics", path)?;

        let topics: Vec<Topic> = match path.file_format() {
            FileFormat::Json => serde_json::from_str::<Vec<TopicEntry>>(&content)
                .map_err(|e| parse_err(path, e))?
                .into_iter()
                .map(Topic::from)
                .collect(),
            FileFormat::Toml => return Err(ApplicationError::UnsupportedFormat(path.to_path_buf())),
            FileFormat::Text => parse_topic_lines(&content),
        };
        debug!("loaded {} topics", topics.len());
        Ok(topics)
    }

    /// Tree builder configured with the source prefix, groups and aux node of the settings.
    pub fn builder<'b>(&self, base: &'b BaseTree, settings: &Settings) -> TreeConfigBuilder<'b> {
        TreeConfigBuilder::new(base)
            .with_groups(settings.source_groups())
            .with_aux_node(settings.aux_node.as_str())
    }
}

fn parse_topic_lines(content: &str) -> Vec<Topic> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(Topic::from)
        .collect()
}

fn parse_err(path: &Path, e: impl std::fmt::Display) -> ApplicationError {
    ApplicationError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_text_with_comments_when_parsing_lines_then_skips_them() {
        let topics = parse_topic_lines("# recorded\n/a\n\n  /b  \n#/c\n");
        assert_eq!(topics, vec![Topic::new("/a"), Topic::new("/b")]);
    }
}
