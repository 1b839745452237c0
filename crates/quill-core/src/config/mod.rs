//! Scoped configuration resolution: path computation, nested-directory
//! discovery, and document loading/merging.

pub mod discover;
pub mod loader;
pub mod paths;

pub use discover::{DISCOVERY_EXCLUDES, DirectoryDiscoverer};
pub use loader::{ConfigLoader, PROJECT_OVERRIDE_HEADER, merge_contents};
pub use paths::{CONFIG_DIR_NAME, QuillPaths};

pub use crate::types::ConfigScope;
