//! Domain layer: entities and business logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod entities;
pub mod error;
pub mod flatten;
pub mod prefix;
pub mod selection;
pub mod visibility;

pub use arena::{LiveTree, NodeData, TreeNode};
pub use builder::{BuildRequest, BuiltTree, TreeConfigBuilder, DEFAULT_AUX_NODE};
pub use entities::*;
pub use error::{DomainError, DomainResult};
pub use flatten::{flatten, BaseTree, FlatNode};
pub use prefix::{SourcePrefix, DEFAULT_SOURCE_PREFIX};
pub use selection::{parse_selection, Selection, SelectionId, SourceGroups};
pub use visibility::{propagate, with_visibility};
