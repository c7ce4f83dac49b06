//! Tests for selection ids and canonical topic names

use rstest::rstest;

use topictree::domain::{
    parse_selection, DomainError, SelectionId, SourceGroups, SourcePrefix,
};

fn ids(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|id| id.to_string()).collect()
}

// ============================================================
// parse_selection
// ============================================================

#[rstest]
#[case(&[])]
#[case(&["t:/a"])]
#[case(&["t:/a", "x:Grid", "name:Bag"])]
#[case(&["name:TF", "garbage", "y:/nope", "t:/b", "t:/a"])]
#[case(&["x:Grid", "x:Map", "t:/webviz_bag_2/a", "t:/a"])]
fn given_ids_when_parsing_and_retagging_then_recovers_topic_and_extension_subset(
    #[case] raw: &[&str],
) {
    // Arrange
    let ids = ids(raw);
    let mut expected: Vec<&str> = raw
        .iter()
        .copied()
        .filter(|id| id.starts_with("t:") || id.starts_with("x:"))
        .collect();
    expected.sort_unstable();

    // Act
    let mut recovered = parse_selection(&ids).to_ids();
    recovered.sort_unstable();

    // Assert
    assert_eq!(recovered, expected);
}

#[test]
fn given_group_ids_when_parsing_selection_then_they_are_not_topics() {
    let selection = parse_selection(&["name:Bag", "name:/a", "t:/b"]);

    assert!(!selection.selected_topics.contains("/a"));
    assert!(!selection.selected_extensions.contains("Bag"));
    assert_eq!(selection.selected_topics.len(), 1);
}

#[test]
fn given_tag_with_colon_in_topic_when_parsing_then_keeps_remainder() {
    let id: SelectionId = "t:/ns:topic".parse().expect("valid id");

    assert_eq!(id, SelectionId::Topic("/ns:topic".into()));
    assert_eq!(id.encode(), "t:/ns:topic");
}

#[test]
fn given_untagged_id_when_parsing_strictly_then_reports_it() {
    let result = "/lidar".parse::<SelectionId>();

    assert_eq!(result, Err(DomainError::InvalidSelectionId("/lidar".into())));
}

// ============================================================
// strip_source_prefix
// ============================================================

#[rstest]
#[case(&["/a", "/webviz_bag_2/a", "/b"])]
#[case(&["/x/webviz_bag_2/a", "/webviz_bag_2"])]
#[case(&[])]
fn given_names_when_stripping_twice_then_equals_stripping_once(#[case] names: &[&str]) {
    let prefix = SourcePrefix::default();

    let once = prefix.strip_source_prefix(names);
    let twice = prefix.strip_source_prefix(&once);

    assert_eq!(once, twice);
}

#[test]
fn given_custom_prefix_when_grouping_then_secondary_label_uses_it() {
    let groups = SourceGroups::for_prefix(SourcePrefix::new("/bag_b"));
    let available = ["/a", "/bag_b/a"];
    let current = ids(&["t:/a"]);

    let checked = groups.ensure_group_selected(&available, &current);

    assert_eq!(
        &checked[..],
        &ids(&["t:/a", "name:Bag", "name:Bag 2 /bag_b"])[..]
    );
}
