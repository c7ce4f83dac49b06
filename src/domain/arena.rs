use generational_arena::{Arena, Index};
use std::fmt;
use tracing::instrument;

use crate::domain::entities::TopicNode;

/// Data payload for nodes of a rendered topic tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeData {
    /// Display name (path name for flattened nodes)
    pub name: String,
    pub topic: Option<String>,
    pub extension: Option<String>,
    /// Whether the node is currently drawn
    pub visible: bool,
}

impl NodeData {
    pub fn from_topic_node(node: &TopicNode) -> Self {
        Self {
            name: node.label().to_string(),
            topic: node.topic.clone(),
            extension: node.extension.clone(),
            visible: true,
        }
    }
}

impl fmt::Display for NodeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.topic {
            Some(topic) if topic != &self.name => write!(f, "{} ({})", self.name, topic),
            _ => write!(f, "{}", self.name),
        }
    }
}

/// Tree node in the arena-based hierarchy structure.
#[derive(Debug, Clone)]
pub struct TreeNode {
    pub data: NodeData,
    /// Index of parent node in the arena, None for the root
    pub parent: Option<Index>,
    /// Indices of child nodes in the arena, in display order
    pub children: Vec<Index>,
}

/// Live model of a topic tree as held by the rendering layer.
///
/// Uses generational arena for memory-safe node references and O(1) lookups.
/// Mutation requires `&mut`, so a tree is never updated concurrently.
#[derive(Debug, Clone)]
pub struct LiveTree {
    arena: Arena<TreeNode>,
    root: Option<Index>,
}

impl Default for LiveTree {
    fn default() -> Self {
        Self::new()
    }
}

impl LiveTree {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Builds a live model mirroring a topic tree, all nodes visible.
    #[instrument(level = "debug", skip(node), fields(root = %node.name))]
    pub fn from_topic_node(node: &TopicNode) -> Self {
        let mut tree = Self::new();
        let mut stack = vec![(node, None)];
        while let Some((current, parent)) = stack.pop() {
            let idx = tree.insert_node(NodeData::from_topic_node(current), parent);
            // Reverse so that children are inserted left to right
            for child in current.children().iter().rev() {
                stack.push((child, Some(idx)));
            }
        }
        tree
    }

    #[instrument(level = "trace", skip(self))]
    pub fn insert_node(&mut self, data: NodeData, parent: Option<Index>) -> Index {
        let node = TreeNode {
            data,
            parent,
            children: Vec::new(),
        };
        let node_idx = self.arena.insert(node);

        if let Some(parent_idx) = parent {
            if let Some(parent) = self.arena.get_mut(parent_idx) {
                parent.children.push(node_idx);
            }
        } else {
            self.root = Some(node_idx);
        }

        node_idx
    }

    pub fn get_node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    pub fn get_node_mut(&mut self, idx: Index) -> Option<&mut TreeNode> {
        self.arena.get_mut(idx)
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self)
    }

    /// First node carrying the topic, in pre-order.
    pub fn find_by_topic(&self, topic: &str) -> Option<&TreeNode> {
        self.iter()
            .map(|(_, node)| node)
            .find(|node| node.data.topic.as_deref() == Some(topic))
    }

    /// Topics of all nodes currently marked visible, in pre-order.
    pub fn visible_topics(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, node)| node.data.visible)
            .filter_map(|(_, node)| node.data.topic.as_deref())
            .collect()
    }

    pub fn depth(&self) -> usize {
        self.root
            .map(|root| self.calculate_depth(root))
            .unwrap_or(0)
    }

    fn calculate_depth(&self, node_idx: Index) -> usize {
        if let Some(node) = self.get_node(node_idx) {
            1 + node
                .children
                .iter()
                .map(|&child| self.calculate_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }
}

/// Pre-order iterator, children left to right.
pub struct TreeIterator<'a> {
    tree: &'a LiveTree,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(tree: &'a LiveTree) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = tree.root() {
            stack.push(root);
        }
        Self { tree, stack }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        let current_idx = self.stack.pop()?;
        let node = self.tree.get_node(current_idx)?;
        // Push children in reverse order for left-to-right traversal
        for &child in node.children.iter().rev() {
            self.stack.push(child);
        }
        Some((current_idx, node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_topic_tree_when_converting_then_preserves_shape_and_order() {
        let node = TopicNode::group(
            "root",
            vec![
                TopicNode::group("A", vec![TopicNode::topic("x", "/x")]),
                TopicNode::topic("y", "/y"),
            ],
        );

        let tree = LiveTree::from_topic_node(&node);

        assert_eq!(tree.len(), 4);
        assert_eq!(tree.depth(), 3);
        let names: Vec<&str> = tree.iter().map(|(_, n)| n.data.name.as_str()).collect();
        assert_eq!(names, vec!["root", "A", "x", "y"]);
        assert_eq!(tree.visible_topics(), vec!["/x", "/y"]);
    }

    #[test]
    fn given_empty_tree_when_iterating_then_yields_nothing() {
        let tree = LiveTree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.depth(), 0);
        assert_eq!(tree.iter().count(), 0);
    }
}
