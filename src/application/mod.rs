//! Application layer: services and use cases
//!
//! This layer orchestrates domain logic and depends on I/O boundary traits.

pub mod base_tree;
pub mod error;
pub mod error_ext;
pub mod services;

pub use base_tree::{install_base_tree, installed_base_tree};
pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
