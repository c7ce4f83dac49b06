//! Process-wide base tree, installed once at startup.

use std::sync::OnceLock;

use tracing::{debug, warn};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{BaseTree, TopicNode};

static BASE_TREE: OnceLock<BaseTree> = OnceLock::new();

/// Installs the base tree for the lifetime of the process.
///
/// The first installation wins; later calls keep the installed tree and log a
/// warning.
pub fn install_base_tree(root: TopicNode) -> ApplicationResult<&'static BaseTree> {
    root.validate()?;
    match BASE_TREE.set(BaseTree::new(root)) {
        Ok(()) => debug!("Base tree installed"),
        Err(rejected) => warn!(
            "Base tree already installed, ignoring '{}'",
            rejected.root().name
        ),
    }
    installed_base_tree()
}

/// The installed base tree.
pub fn installed_base_tree() -> ApplicationResult<&'static BaseTree> {
    BASE_TREE.get().ok_or(ApplicationError::BaseTreeMissing)
}
