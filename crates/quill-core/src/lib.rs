//! Quill Core Library
//!
//! Workspace configuration resolution and write-protection classification
//! for the quill coding agent: scoped `.quill` directory lookup, nested
//! directory discovery, instruction loading/merging, and classification of
//! paths against the fixed protected-pattern set.

pub mod config;
pub mod fs;
pub mod protect;
pub mod types;

/// Re-exports of commonly used types
pub mod prelude {
    // Configuration
    pub use crate::config::{
        CONFIG_DIR_NAME, ConfigLoader, DirectoryDiscoverer, PROJECT_OVERRIDE_HEADER, QuillPaths,
    };

    // Filesystem
    pub use crate::fs::search::{EntryKind, FileSearch, SearchEntry, WalkSearch};
    pub use crate::fs::{EntryStat, Filesystem, FsError, RealFilesystem};

    // Protection
    pub use crate::protect::{PROTECTED_PATTERNS, ProtectionMatcher};

    // Shared types
    pub use crate::types::{
        ConfigDirectory, ConfigDocument, ConfigScope, MergedConfig, ProtectionRecord,
    };
}
