//! topictree: derives the displayed topic tree of a visualization panel from a
//! static base tree, the topics of the loaded data sources and the checked
//! selection.
//!
//! Layers, innermost first:
//! - `domain`: tree model, flattening, selection ids, prefix handling, the
//!   tree builder and visibility propagation. No I/O.
//! - `application`: base tree installation and loading services.
//! - `infrastructure`: filesystem boundary and service wiring.
//! - `cli`: argument parsing and command dispatch.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod tree_traits;
pub mod util;

pub use domain::{
    flatten, parse_selection, propagate, BaseTree, BuildRequest, BuiltTree, DomainError,
    LiveTree, Selection, SelectionId, SourceGroups, SourcePrefix, Topic, TopicDisplayMode,
    TopicNode, TreeConfigBuilder,
};
