//! Domain entities: topic tree nodes, loaded topics and display modes

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::{DomainError, DomainResult};

/// Node of the hand-authored topic tree.
///
/// A node is either a *group* (has `children`, no `topic`/`extension`) or a
/// *leaf* (has `topic` and/or `extension`, no `children`). Extension nodes may
/// carry children in the base tree; those are dropped when flattening.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicNode {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<TopicNode>>,
}

impl TopicNode {
    pub fn group(name: impl Into<String>, children: Vec<TopicNode>) -> Self {
        Self {
            name: name.into(),
            children: Some(children),
            ..Default::default()
        }
    }

    pub fn topic(name: impl Into<String>, topic: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            topic: Some(topic.into()),
            ..Default::default()
        }
    }

    pub fn extension(name: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extension: Some(extension.into()),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Node without a name, identified by its topic only.
    pub fn unnamed_topic(topic: impl Into<String>) -> Self {
        Self::topic("", topic)
    }

    /// Minimal node synthesized for a topic the base tree does not mention.
    pub fn uncategorized(topic: &str) -> Self {
        Self::topic(topic, topic)
    }

    pub fn children(&self) -> &[TopicNode] {
        self.children.as_deref().unwrap_or(&[])
    }

    pub fn has_children(&self) -> bool {
        self.children.is_some()
    }

    /// Copy of this node without its children.
    pub fn without_children(&self) -> Self {
        Self {
            name: self.name.clone(),
            topic: self.topic.clone(),
            extension: self.extension.clone(),
            description: self.description.clone(),
            children: None,
        }
    }

    /// Checks the group/leaf invariant for this node and all descendants.
    pub fn validate(&self) -> DomainResult<()> {
        if self.has_children() && self.topic.is_some() {
            return Err(DomainError::InvalidNode {
                name: self.label().to_string(),
                reason: "a group node cannot carry a topic".to_string(),
            });
        }
        self.children().iter().try_for_each(TopicNode::validate)
    }

    /// Name for display, falling back to the topic for unnamed nodes.
    pub fn label(&self) -> &str {
        if self.name.is_empty() {
            self.topic.as_deref().unwrap_or_default()
        } else {
            &self.name
        }
    }

    /// Number of nodes in this subtree, including self.
    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(TopicNode::node_count).sum::<usize>()
    }
}

/// A topic advertised by a loaded data source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Topic {
    pub name: String,
}

impl Topic {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl AsRef<str> for Topic {
    fn as_ref(&self) -> &str {
        &self.name
    }
}

impl From<&str> for Topic {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Policy used to derive the displayed tree from the base tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TopicDisplayMode {
    /// Base tree as authored, no filtering.
    #[default]
    ShowTree,
    ShowAll,
    ShowSelected,
    ShowAvailable,
}

impl TopicDisplayMode {
    pub const ALL: [TopicDisplayMode; 4] = [
        TopicDisplayMode::ShowTree,
        TopicDisplayMode::ShowAll,
        TopicDisplayMode::ShowSelected,
        TopicDisplayMode::ShowAvailable,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TopicDisplayMode::ShowTree => "SHOW_TREE",
            TopicDisplayMode::ShowAll => "SHOW_ALL",
            TopicDisplayMode::ShowSelected => "SHOW_SELECTED",
            TopicDisplayMode::ShowAvailable => "SHOW_AVAILABLE",
        }
    }

    /// Human readable label as shown in the mode picker.
    pub fn label(&self) -> &'static str {
        match self {
            TopicDisplayMode::ShowTree => "List by folder",
            TopicDisplayMode::ShowAll => "List all",
            TopicDisplayMode::ShowSelected => "List selected",
            TopicDisplayMode::ShowAvailable => "List available",
        }
    }
}

impl fmt::Display for TopicDisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TopicDisplayMode {
    type Err = DomainError;

    /// Accepts the wire form (`SHOW_ALL`) as well as kebab-case (`show-all`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('-', "_").to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == normalized)
            .ok_or_else(|| DomainError::UnknownDisplayMode(s.to_string()))
    }
}
