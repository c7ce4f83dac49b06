//! Builds the displayed topic tree from the base tree, the loaded topics and
//! the checked state.

use std::borrow::Cow;
use std::collections::HashSet;

use tracing::{debug, instrument};

use crate::domain::entities::{Topic, TopicDisplayMode, TopicNode};
use crate::domain::flatten::{BaseTree, FlatNode};
use crate::domain::selection::{parse_selection, Selection, SelectionId, SourceGroups};

/// Name of the transform-tree pseudo node.
pub const DEFAULT_AUX_NODE: &str = "TF";

/// Inputs of a single tree build.
#[derive(Debug, Clone, Copy)]
pub struct BuildRequest<'a> {
    pub checked_ids: &'a [String],
    pub display_mode: TopicDisplayMode,
    pub available_topics: &'a [Topic],
}

/// Result of a build.
///
/// Both fields borrow from their inputs when unchanged: the base tree in
/// `SHOW_TREE` mode, the checked ids unless a source group had to be added.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltTree<'a> {
    pub tree: Cow<'a, TopicNode>,
    pub checked_ids: Cow<'a, [String]>,
}

impl BuiltTree<'_> {
    pub fn checked_ids_changed(&self) -> bool {
        matches!(self.checked_ids, Cow::Owned(_))
    }

    pub fn into_owned(self) -> (TopicNode, Vec<String>) {
        (self.tree.into_owned(), self.checked_ids.into_owned())
    }
}

/// Canonical topic sets derived from one request.
struct Availability<'r> {
    names: Vec<&'r str>,
    canonical: Vec<String>,
    selected_canonical: Vec<String>,
    has_secondary: bool,
}

/// Hashed views of the canonical sets, for filtering the flattened nodes.
struct Lookup<'r> {
    canonical: HashSet<&'r str>,
    selected_canonical: HashSet<&'r str>,
}

/// Derives the displayed tree for a base tree.
#[derive(Debug, Clone)]
pub struct TreeConfigBuilder<'b> {
    base: &'b BaseTree,
    groups: SourceGroups,
    aux_node: String,
}

impl<'b> TreeConfigBuilder<'b> {
    pub fn new(base: &'b BaseTree) -> Self {
        Self {
            base,
            groups: SourceGroups::default(),
            aux_node: DEFAULT_AUX_NODE.to_string(),
        }
    }

    pub fn with_groups(mut self, groups: SourceGroups) -> Self {
        self.groups = groups;
        self
    }

    pub fn with_aux_node(mut self, name: impl Into<String>) -> Self {
        self.aux_node = name.into();
        self
    }

    #[instrument(level = "debug", skip_all, fields(mode = %request.display_mode))]
    pub fn build<'a>(&self, request: BuildRequest<'a>) -> BuiltTree<'a>
    where
        'b: 'a,
    {
        let mode = request.display_mode;
        if mode == TopicDisplayMode::ShowTree {
            return BuiltTree {
                tree: Cow::Borrowed(self.base.root()),
                checked_ids: Cow::Borrowed(request.checked_ids),
            };
        }

        let selection = parse_selection(request.checked_ids);
        let availability = self.availability(request.available_topics, &selection);
        let lookup = Lookup {
            canonical: availability.canonical.iter().map(String::as_str).collect(),
            selected_canonical: availability
                .selected_canonical
                .iter()
                .map(String::as_str)
                .collect(),
        };

        let mut children: Vec<TopicNode> = self
            .base
            .flattened()
            .iter()
            .filter(|node| self.keep(mode, node, &selection, &lookup))
            .map(TopicNode::from)
            .collect();
        debug!("{} of {} flattened nodes kept", children.len(), self.base.flattened().len());

        // Topics unknown to the base tree. Selected mode only offers the
        // selected ones so that switching sources keeps the selection.
        let candidates = if mode == TopicDisplayMode::ShowSelected {
            &availability.selected_canonical
        } else {
            &availability.canonical
        };
        let uncategorized = self.uncategorized(&children, candidates);
        debug!("{} uncategorized topics", uncategorized.len());
        children.extend(uncategorized);

        if self.include_aux_node(mode, request.checked_ids, &availability) {
            children.push(self.aux_node());
        }

        let root = self.base.root();
        if !availability.has_secondary {
            return BuiltTree {
                tree: Cow::Owned(TopicNode {
                    children: Some(children),
                    ..root.without_children()
                }),
                checked_ids: Cow::Borrowed(request.checked_ids),
            };
        }

        let secondary_children = self.secondary_children(&children);
        let tree = TopicNode {
            children: Some(vec![
                TopicNode::group(self.groups.primary.as_str(), children),
                TopicNode::group(self.groups.secondary.as_str(), secondary_children),
            ]),
            ..root.without_children()
        };
        let checked_ids = self
            .groups
            .ensure_group_selected(&availability.names, request.checked_ids);
        if matches!(checked_ids, Cow::Owned(_)) {
            debug!("Source groups added to checked ids");
        }

        BuiltTree {
            tree: Cow::Owned(tree),
            checked_ids,
        }
    }

    fn availability<'r>(&self, topics: &'r [Topic], selection: &Selection) -> Availability<'r> {
        let prefix = &self.groups.prefix;
        let names: Vec<&str> = topics.iter().map(|t| t.name.as_str()).collect();
        let selected_available: Vec<&str> = names
            .iter()
            .copied()
            .filter(|name| selection.selected_topics.contains(*name))
            .collect();

        Availability {
            has_secondary: names.iter().any(|name| prefix.is_secondary(name)),
            canonical: prefix.strip_source_prefix(&names),
            selected_canonical: prefix.strip_source_prefix(&selected_available),
            names,
        }
    }

    fn keep(
        &self,
        mode: TopicDisplayMode,
        node: &FlatNode,
        selection: &Selection,
        lookup: &Lookup<'_>,
    ) -> bool {
        let prefix = &self.groups.prefix;
        match mode {
            TopicDisplayMode::ShowSelected => match (&node.topic, &node.extension) {
                (Some(topic), _) => lookup.selected_canonical.contains(prefix.strip(topic)),
                (None, Some(extension)) => selection.selected_extensions.contains(extension),
                (None, None) => false,
            },
            TopicDisplayMode::ShowAvailable => node
                .topic
                .as_deref()
                .map_or(true, |topic| lookup.canonical.contains(prefix.strip(topic))),
            TopicDisplayMode::ShowAll | TopicDisplayMode::ShowTree => true,
        }
    }

    fn uncategorized(&self, kept: &[TopicNode], candidates: &[String]) -> Vec<TopicNode> {
        let prefix = &self.groups.prefix;
        let covered: HashSet<&str> = kept
            .iter()
            .filter_map(|node| node.topic.as_deref())
            .map(|topic| prefix.strip(topic))
            .collect();
        candidates
            .iter()
            .filter(|topic| !covered.contains(topic.as_str()))
            .map(|topic| TopicNode::uncategorized(topic))
            .collect()
    }

    fn include_aux_node(
        &self,
        mode: TopicDisplayMode,
        checked_ids: &[String],
        availability: &Availability<'_>,
    ) -> bool {
        match mode {
            TopicDisplayMode::ShowAll => true,
            TopicDisplayMode::ShowAvailable => !availability.canonical.is_empty(),
            TopicDisplayMode::ShowSelected => {
                let aux_id = SelectionId::group(self.aux_node.as_str()).encode();
                checked_ids.iter().any(|id| *id == aux_id)
            }
            TopicDisplayMode::ShowTree => false,
        }
    }

    fn aux_node(&self) -> TopicNode {
        TopicNode {
            name: self.aux_node.clone(),
            description: Some("Transform tree".to_string()),
            ..Default::default()
        }
    }

    /// Topic nodes of the primary group, republished under the source prefix.
    fn secondary_children(&self, children: &[TopicNode]) -> Vec<TopicNode> {
        children
            .iter()
            .filter_map(|node| {
                let topic = node.topic.as_deref()?;
                Some(TopicNode {
                    topic: Some(self.groups.prefix.apply(topic)),
                    ..node.clone()
                })
            })
            .collect()
    }
}
