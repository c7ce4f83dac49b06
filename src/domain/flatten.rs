//! Flattening of the nested base tree into addressable leaves.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::domain::entities::TopicNode;

/// Leaf or extension node of the base tree, named by its full path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatNode {
    /// Path of ancestor names joined by ` / `
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FlatNode {
    fn at_path(node: &TopicNode, path: &str) -> Self {
        let name = if path.is_empty() { node.label() } else { path };
        Self {
            name: name.to_string(),
            topic: node.topic.clone(),
            extension: node.extension.clone(),
            description: node.description.clone(),
        }
    }
}

impl From<FlatNode> for TopicNode {
    fn from(flat: FlatNode) -> Self {
        TopicNode {
            name: flat.name,
            topic: flat.topic,
            extension: flat.extension,
            description: flat.description,
            children: None,
        }
    }
}

impl From<&FlatNode> for TopicNode {
    fn from(flat: &FlatNode) -> Self {
        TopicNode::from(flat.clone())
    }
}

/// Depth-first, children in order.
///
/// A node is emitted when it has no children or carries an extension; the
/// root's own name is not part of any path.
#[instrument(level = "debug", skip(root), fields(root = %root.name))]
pub fn flatten(root: &TopicNode) -> Vec<FlatNode> {
    let mut flat = Vec::new();
    flatten_into(root, "", &mut flat);
    debug!("flattened {} nodes into {} leaves", root.node_count(), flat.len());
    flat
}

fn flatten_into(node: &TopicNode, path: &str, out: &mut Vec<FlatNode>) {
    if !node.has_children() || node.extension.is_some() {
        out.push(FlatNode::at_path(node, path));
        return;
    }
    for child in node.children() {
        let child_path = child_path(path, child);
        flatten_into(child, &child_path, out);
    }
}

fn child_path(parent: &str, child: &TopicNode) -> String {
    match (child.name.is_empty(), child.topic.as_deref()) {
        (false, _) => join(parent, " / ", &child.name),
        (true, Some(topic)) => join(parent, " ", topic),
        (true, None) => parent.to_string(),
    }
}

fn join(parent: &str, separator: &str, segment: &str) -> String {
    if parent.is_empty() {
        segment.to_string()
    } else {
        format!("{parent}{separator}{segment}")
    }
}

/// The static base tree together with its flattened form.
///
/// The flattened list is computed on first use and never invalidated: the
/// base tree cannot be mutated once wrapped.
#[derive(Debug)]
pub struct BaseTree {
    root: TopicNode,
    flattened: OnceLock<Vec<FlatNode>>,
}

impl BaseTree {
    pub fn new(root: TopicNode) -> Self {
        Self {
            root,
            flattened: OnceLock::new(),
        }
    }

    pub fn root(&self) -> &TopicNode {
        &self.root
    }

    pub fn flattened(&self) -> &[FlatNode] {
        self.flattened.get_or_init(|| {
            debug!("Flattening base tree '{}'", self.root.name);
            flatten(&self.root)
        })
    }

    pub fn is_flattened(&self) -> bool {
        self.flattened.get().is_some()
    }
}

impl From<TopicNode> for BaseTree {
    fn from(root: TopicNode) -> Self {
        Self::new(root)
    }
}
