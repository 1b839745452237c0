//! Shared core types for workspace configuration resolution.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Configuration scope levels, ordered from least to most specific.
///
/// `Global` precedes `ProjectRoot`, which precedes every `Subfolder` entry;
/// `Subfolder` entries order lexicographically by their relative path. The
/// derived `Ord` encodes exactly that.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConfigScope {
    /// The single per-user configuration directory under the home directory.
    Global,
    /// The configuration directory at the workspace root.
    ProjectRoot,
    /// A configuration directory nested below the root, keyed by its
    /// root-relative path.
    Subfolder(PathBuf),
}

/// A resolved configuration directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigDirectory {
    pub scope: ConfigScope,
    pub path: PathBuf,
}

/// One configuration document read from a single scope.
///
/// Absent content is a valid, non-error state: the file simply does not
/// exist at that scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDocument {
    pub scope: ConfigScope,
    pub relative_path: PathBuf,
    pub content: Option<String>,
}

/// Result of loading one relative path from the global and project scopes.
///
/// `merged` is derived from the two sources on every load and is never
/// stored anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MergedConfig {
    pub global: Option<String>,
    pub project: Option<String>,
    pub merged: String,
}

/// Protection classification for a single candidate path.
///
/// `path` is the caller's original string, not a normalized form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtectionRecord {
    pub path: String,
    pub is_protected: bool,
}
