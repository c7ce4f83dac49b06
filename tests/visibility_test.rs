//! Tests for visibility propagation over live trees

use topictree::domain::{
    propagate, with_visibility, BaseTree, BuildRequest, LiveTree, Topic, TopicDisplayMode,
    TopicNode, TreeConfigBuilder,
};
use topictree::tree_traits::TreeNodeConvert;

fn visible(tree: &LiveTree, topic: &str) -> Option<bool> {
    tree.find_by_topic(topic).map(|node| node.data.visible)
}

#[test]
fn given_hidden_topic_when_propagating_then_only_it_is_invisible() {
    // Arrange
    let mut tree = LiveTree::from_topic_node(&TopicNode::group(
        "root",
        vec![
            TopicNode::group("A", vec![TopicNode::topic("a", "/a")]),
            TopicNode::topic("b", "/b"),
            TopicNode::extension("Grid", "Grid"),
        ],
    ));
    let grid = tree
        .iter()
        .find(|(_, node)| node.data.name == "Grid")
        .map(|(idx, _)| idx)
        .expect("grid node");
    if let Some(node) = tree.get_node_mut(grid) {
        node.data.visible = false;
    }

    // Act
    let updated = propagate(&mut tree, &["/a"]);

    // Assert
    assert_eq!(updated, 2);
    assert_eq!(visible(&tree, "/a"), Some(false));
    assert_eq!(visible(&tree, "/b"), Some(true));
    let grid_visible = tree.get_node(grid).map(|node| node.data.visible);
    assert_eq!(grid_visible, Some(false), "non-topic nodes keep their flag");
}

#[test]
fn given_two_source_tree_when_hiding_secondary_topic_then_primary_stays_visible() {
    // Arrange
    let base = BaseTree::new(TopicNode::group(
        "root",
        vec![TopicNode::group("A", vec![TopicNode::topic("x", "/x")])],
    ));
    let available = vec![Topic::new("/x"), Topic::new("/webviz_bag_2/x")];
    let built = TreeConfigBuilder::new(&base).build(BuildRequest {
        checked_ids: &[],
        display_mode: TopicDisplayMode::ShowAll,
        available_topics: &available,
    });
    let mut live = LiveTree::from_topic_node(&built.tree);

    // Act
    propagate(&mut live, &["/webviz_bag_2/x"]);

    // Assert
    assert_eq!(visible(&live, "/x"), Some(true));
    assert_eq!(visible(&live, "/webviz_bag_2/x"), Some(false));
    assert_eq!(live.visible_topics(), vec!["/x"]);
}

#[test]
fn given_hidden_list_changes_when_propagating_again_then_flags_follow_latest_list() {
    let mut tree = LiveTree::from_topic_node(&TopicNode::group(
        "root",
        vec![TopicNode::topic("a", "/a"), TopicNode::topic("b", "/b")],
    ));

    propagate(&mut tree, &["/a", "/b"]);
    propagate(&mut tree, &["/b"]);

    assert_eq!(visible(&tree, "/a"), Some(true));
    assert_eq!(visible(&tree, "/b"), Some(false));
}

#[test]
fn given_live_tree_when_annotating_copy_then_renders_hidden_marker() {
    let tree = LiveTree::from_topic_node(&TopicNode::group(
        "root",
        vec![TopicNode::topic("a", "/a"), TopicNode::unnamed_topic("/b")],
    ));

    let annotated = with_visibility(&tree, &["/b"]);

    assert_eq!(
        annotated.to_tree_string().to_string(),
        "root\n├── a (/a)\n└── /b (hidden)\n"
    );
    assert_eq!(visible(&tree, "/b"), Some(true));
}
