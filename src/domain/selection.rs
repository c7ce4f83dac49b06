//! Selection ids: the checked state of the topic tree.
//!
//! Wire format (shared with the UI and saved panel configs):
//! - `t:<topic>` a checked topic
//! - `x:<extension>` a checked extension
//! - `name:<group>` a checked group node

use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::domain::error::DomainError;
use crate::domain::prefix::SourcePrefix;

pub const TOPIC_TAG: &str = "t:";
pub const EXTENSION_TAG: &str = "x:";
pub const GROUP_TAG: &str = "name:";

/// One checked node of the tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SelectionId {
    Topic(String),
    Extension(String),
    GroupName(String),
}

impl SelectionId {
    /// Parses an id, returning None for unknown tags.
    pub fn parse(id: &str) -> Option<Self> {
        if let Some(topic) = id.strip_prefix(TOPIC_TAG) {
            Some(Self::Topic(topic.to_string()))
        } else if let Some(extension) = id.strip_prefix(EXTENSION_TAG) {
            Some(Self::Extension(extension.to_string()))
        } else {
            id.strip_prefix(GROUP_TAG)
                .map(|name| Self::GroupName(name.to_string()))
        }
    }

    pub fn group(name: impl Into<String>) -> Self {
        Self::GroupName(name.into())
    }

    /// Encoded form, as stored in the checked node list.
    pub fn encode(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SelectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionId::Topic(topic) => write!(f, "{TOPIC_TAG}{topic}"),
            SelectionId::Extension(extension) => write!(f, "{EXTENSION_TAG}{extension}"),
            SelectionId::GroupName(name) => write!(f, "{GROUP_TAG}{name}"),
        }
    }
}

impl FromStr for SelectionId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| DomainError::InvalidSelectionId(s.to_string()))
    }
}

/// Checked topics and extensions, with group ids dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub selected_topics: BTreeSet<String>,
    pub selected_extensions: BTreeSet<String>,
}

impl Selection {
    /// Re-encodes the selection as `t:`/`x:` ids.
    pub fn to_ids(&self) -> Vec<String> {
        self.selected_topics
            .iter()
            .map(|t| SelectionId::Topic(t.clone()).encode())
            .chain(
                self.selected_extensions
                    .iter()
                    .map(|x| SelectionId::Extension(x.clone()).encode()),
            )
            .collect()
    }
}

/// Splits checked ids into topics and extensions.
///
/// Group ids and ids with an unknown tag are ignored.
pub fn parse_selection<S: AsRef<str>>(ids: &[S]) -> Selection {
    let mut selection = Selection::default();
    for id in ids {
        match SelectionId::parse(id.as_ref()) {
            Some(SelectionId::Topic(topic)) => {
                selection.selected_topics.insert(topic);
            }
            Some(SelectionId::Extension(extension)) => {
                selection.selected_extensions.insert(extension);
            }
            Some(SelectionId::GroupName(_)) | None => {}
        }
    }
    selection
}

/// Names of the per-source group nodes used when two sources are loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceGroups {
    pub prefix: SourcePrefix,
    pub primary: String,
    pub secondary: String,
}

impl Default for SourceGroups {
    fn default() -> Self {
        Self::for_prefix(SourcePrefix::default())
    }
}

impl SourceGroups {
    pub const PRIMARY_GROUP: &'static str = "Bag";

    /// Default group names for the given prefix: `Bag` and `Bag 2 <prefix>`.
    pub fn for_prefix(prefix: SourcePrefix) -> Self {
        let secondary = format!("Bag 2 {}", prefix.as_str());
        Self {
            prefix,
            primary: Self::PRIMARY_GROUP.to_string(),
            secondary,
        }
    }

    pub fn primary_id(&self) -> String {
        SelectionId::group(self.primary.as_str()).encode()
    }

    pub fn secondary_id(&self) -> String {
        SelectionId::group(self.secondary.as_str()).encode()
    }

    /// Checks the group node of every source that has available topics.
    ///
    /// Returns the input borrowed when nothing had to be added, so callers can
    /// detect that the checked state did not change.
    pub fn ensure_group_selected<'a, T, S>(
        &self,
        available_topics: &[T],
        checked_ids: &'a [S],
    ) -> Cow<'a, [S]>
    where
        T: AsRef<str>,
        S: AsRef<str> + Clone + From<String>,
    {
        let has_primary = available_topics
            .iter()
            .any(|t| !self.prefix.is_secondary(t.as_ref()));
        let has_secondary = available_topics
            .iter()
            .any(|t| self.prefix.is_secondary(t.as_ref()));
        let is_checked = |id: &str| checked_ids.iter().any(|c| c.as_ref() == id);

        let mut missing = Vec::new();
        let primary_id = self.primary_id();
        if has_primary && !is_checked(&primary_id) {
            missing.push(primary_id);
        }
        let secondary_id = self.secondary_id();
        if has_secondary && !is_checked(&secondary_id) {
            missing.push(secondary_id);
        }

        if missing.is_empty() {
            return Cow::Borrowed(checked_ids);
        }
        let mut ids = checked_ids.to_vec();
        ids.extend(missing.into_iter().map(S::from));
        Cow::Owned(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("t:/foo", SelectionId::Topic("/foo".into()))]
    #[case("x:Grid", SelectionId::Extension("Grid".into()))]
    #[case("name:Bag", SelectionId::GroupName("Bag".into()))]
    #[case("t:", SelectionId::Topic("".into()))]
    fn given_tagged_id_when_parsing_then_returns_variant(
        #[case] id: &str,
        #[case] expected: SelectionId,
    ) {
        let parsed: SelectionId = id.parse().unwrap();
        assert_eq!(parsed, expected);
        assert_eq!(parsed.encode(), id);
    }

    #[rstest]
    #[case("/foo")]
    #[case("topic:/foo")]
    #[case("")]
    fn given_unknown_tag_when_parsing_strictly_then_errors(#[case] id: &str) {
        let err = id.parse::<SelectionId>().unwrap_err();
        assert_eq!(err, DomainError::InvalidSelectionId(id.to_string()));
    }

    #[test]
    fn given_mixed_ids_when_parsing_selection_then_groups_and_garbage_are_ignored() {
        let ids = ["t:/a", "x:Grid", "name:Bag", "garbage", "t:/b", "t:/a"];

        let selection = parse_selection(&ids);

        assert_eq!(
            selection.selected_topics.iter().collect::<Vec<_>>(),
            vec!["/a", "/b"]
        );
        assert_eq!(
            selection.selected_extensions.iter().collect::<Vec<_>>(),
            vec!["Grid"]
        );
    }

    #[test]
    fn given_selection_when_retagging_then_recovers_topic_and_extension_ids() {
        let ids = vec!["name:Group", "t:/x", "x:Grid", "t:/y", "bogus"];

        let recovered: BTreeSet<String> = parse_selection(&ids).to_ids().into_iter().collect();

        let expected: BTreeSet<String> = ["t:/x", "x:Grid", "t:/y"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(recovered, expected);
    }

    #[test]
    fn given_only_primary_topics_when_ensuring_groups_then_adds_primary_group() {
        let groups = SourceGroups::default();
        let checked = vec!["t:/x".to_string()];

        let result = groups.ensure_group_selected(&["/x"], &checked);

        assert_eq!(&result[..], ["t:/x", "name:Bag"]);
    }

    #[test]
    fn given_both_sources_when_ensuring_groups_then_adds_both_in_order() {
        let groups = SourceGroups::default();
        let checked: Vec<String> = vec![];

        let result = groups.ensure_group_selected(&["/webviz_bag_2/x", "/x"], &checked);

        assert_eq!(&result[..], ["name:Bag", "name:Bag 2 /webviz_bag_2"]);
    }

    #[test]
    fn given_groups_already_checked_when_ensuring_then_returns_borrowed_input() {
        let groups = SourceGroups::default();
        let checked = vec![
            "name:Bag 2 /webviz_bag_2".to_string(),
            "name:Bag".to_string(),
        ];

        let result = groups.ensure_group_selected(&["/x", "/webviz_bag_2/x"], &checked);

        assert!(matches!(result, Cow::Borrowed(_)));
        assert!(std::ptr::eq(&result[..], checked.as_slice()));
    }

    #[test]
    fn given_no_topics_when_ensuring_groups_then_unchanged() {
        let groups = SourceGroups::default();
        let checked = vec!["t:/x".to_string()];
        let none: [&str; 0] = [];

        let result = groups.ensure_group_selected(&none, &checked);

        assert!(matches!(result, Cow::Borrowed(_)));
    }
}
