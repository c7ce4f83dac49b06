//! Visibility of topic nodes in a live tree, driven by the hidden-topic list.

use std::collections::HashSet;

use generational_arena::Index;
use tracing::{debug, instrument};

use crate::domain::arena::LiveTree;

/// Marks every topic-bearing child node visible unless its topic is hidden.
///
/// Nodes without a topic and the root keep their current flag. Returns the
/// number of nodes updated.
#[instrument(level = "debug", skip_all, fields(hidden = hidden_topics.len()))]
pub fn propagate<S: AsRef<str>>(tree: &mut LiveTree, hidden_topics: &[S]) -> usize {
    let hidden: HashSet<&str> = hidden_topics.iter().map(|t| t.as_ref()).collect();

    let children: Vec<Index> = tree
        .iter()
        .flat_map(|(_, node)| node.children.iter().copied())
        .collect();

    let mut updated = 0;
    for idx in children {
        let Some(node) = tree.get_node_mut(idx) else {
            continue;
        };
        if let Some(topic) = node.data.topic.as_deref() {
            node.data.visible = !hidden.contains(topic);
            updated += 1;
        }
    }
    debug!("visibility set on {} topic nodes", updated);
    updated
}

/// Copy of `tree` with visibility applied; the input is left untouched.
pub fn with_visibility<S: AsRef<str>>(tree: &LiveTree, hidden_topics: &[S]) -> LiveTree {
    let mut annotated = tree.clone();
    propagate(&mut annotated, hidden_topics);
    annotated
}
