//! Text rendering of topic trees via `termtree`.

use generational_arena::Index;
use termtree::Tree;

use crate::domain::{LiveTree, TopicNode};

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

fn topic_label(node: &TopicNode) -> String {
    let mut label = node.label().to_string();
    if let Some(topic) = &node.topic {
        if topic != label.as_str() {
            label.push_str(&format!(" ({topic})"));
        }
    }
    if let Some(extension) = &node.extension {
        label.push_str(&format!(" [{extension}]"));
    }
    label
}

impl TreeNodeConvert for TopicNode {
    fn to_tree_string(&self) -> Tree<String> {
        let leaves: Vec<_> = self.children().iter().map(|c| c.to_tree_string()).collect();
        Tree::new(topic_label(self)).with_leaves(leaves)
    }
}

impl TreeNodeConvert for LiveTree {
    fn to_tree_string(&self) -> Tree<String> {
        fn build_tree(tree: &LiveTree, node_idx: Index, parent_tree: &mut Tree<String>) {
            if let Some(node) = tree.get_node(node_idx) {
                for &child_idx in &node.children {
                    if let Some(child) = tree.get_node(child_idx) {
                        let mut child_tree = Tree::new(live_label(&child.data));
                        build_tree(tree, child_idx, &mut child_tree);
                        parent_tree.push(child_tree);
                    }
                }
            }
        }

        let Some(root_idx) = self.root() else {
            return Tree::new("Empty tree".to_string());
        };
        let Some(root) = self.get_node(root_idx) else {
            return Tree::new("Empty tree".to_string());
        };
        let mut tree = Tree::new(live_label(&root.data));
        build_tree(self, root_idx, &mut tree);
        tree
    }
}

fn live_label(data: &crate::domain::NodeData) -> String {
    if data.visible {
        data.to_string()
    } else {
        format!("{data} (hidden)")
    }
}
