//! Discovery of configuration directories nested below the workspace root.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::fs::search::FileSearch;
use crate::types::{ConfigDirectory, ConfigScope};

use super::paths::{CONFIG_DIR_NAME, QuillPaths};

/// Directory names never descended into during discovery.
pub const DISCOVERY_EXCLUDES: &[&str] = &[".git", "node_modules", "target"];

/// Finds `.quill` directories anywhere below a workspace root.
///
/// Discovery is an enhancement, not a required path: every failure of the
/// search collaborator degrades to an empty subfolder list so the rest of
/// resolution keeps working.
#[derive(Debug, Clone)]
pub struct DirectoryDiscoverer<S> {
    paths: QuillPaths,
    search: S,
}

impl<S: FileSearch> DirectoryDiscoverer<S> {
    pub fn new(paths: QuillPaths, search: S) -> Self {
        Self { paths, search }
    }

    pub fn paths(&self) -> &QuillPaths {
        &self.paths
    }

    /// Configuration directories nested below `root`, deduplicated, never
    /// containing the project-root directory, sorted ascending by absolute
    /// path string.
    pub fn discover_subfolder_dirs(&self, root: &Path) -> Vec<PathBuf> {
        match self.try_discover(root) {
            Ok(dirs) => dirs,
            Err(err) => {
                tracing::warn!(
                    root = %root.display(),
                    error = %format!("{err:#}"),
                    "subfolder discovery failed, continuing without nested config directories"
                );
                Vec::new()
            }
        }
    }

    fn try_discover(&self, root: &Path) -> anyhow::Result<Vec<PathBuf>> {
        let include = format!("**/{CONFIG_DIR_NAME}/**");
        let entries = self
            .search
            .search(root, &[include.as_str()], DISCOVERY_EXCLUDES)?;

        let project_dir = self.paths.project_dir(root).to_string_lossy().to_string();
        let mut found = BTreeSet::new();
        for entry in entries {
            let text = entry.path.to_string_lossy();
            if let Some(candidate) = candidate_config_dir(&text)
                && candidate != project_dir
            {
                found.insert(candidate);
            }
        }

        Ok(found.into_iter().map(PathBuf::from).collect())
    }

    /// The total resolution order: global, project root, then every
    /// discovered subfolder directory. Later entries are more specific.
    pub fn all_dirs(&self, root: &Path) -> Vec<PathBuf> {
        let mut dirs = self.paths.ordered_dirs(root);
        dirs.extend(self.discover_subfolder_dirs(root));
        dirs
    }

    /// `all_dirs` paired with its scope, per the data-model invariants:
    /// exactly one `Global` and one `ProjectRoot` entry regardless of disk
    /// existence, then deduplicated `Subfolder` entries.
    pub fn resolve_directories(&self, root: &Path) -> Vec<ConfigDirectory> {
        let mut dirs = vec![
            ConfigDirectory {
                scope: ConfigScope::Global,
                path: self.paths.global_dir(),
            },
            ConfigDirectory {
                scope: ConfigScope::ProjectRoot,
                path: self.paths.project_dir(root),
            },
        ];
        for path in self.discover_subfolder_dirs(root) {
            let relative = path.strip_prefix(root).unwrap_or(&path).to_path_buf();
            dirs.push(ConfigDirectory {
                scope: ConfigScope::Subfolder(relative),
                path,
            });
        }
        dirs
    }

    /// Directories that may carry agent instruction files: the root itself,
    /// always first, then the parent of each discovered `.quill` directory
    /// in discovery order.
    pub fn agents_dirs(&self, root: &Path) -> Vec<PathBuf> {
        let mut dirs = vec![root.to_path_buf()];
        for dir in self.discover_subfolder_dirs(root) {
            if let Some(parent) = dir.parent() {
                dirs.push(parent.to_path_buf());
            }
        }
        dirs
    }
}

/// Extract the configuration directory from a path that contains the
/// reserved name as a segment, accepting both slash and backslash
/// separators.
fn candidate_config_dir(path: &str) -> Option<String> {
    for (idx, _) in path.match_indices(CONFIG_DIR_NAME) {
        let before = &path[..idx];
        let after = &path[idx + CONFIG_DIR_NAME.len()..];
        let segment_start = before.is_empty() || before.ends_with('/') || before.ends_with('\\');
        let segment_end = after.is_empty() || after.starts_with('/') || after.starts_with('\\');
        if segment_start && segment_end {
            return Some(format!("{before}{CONFIG_DIR_NAME}"));
        }
    }
    None
}
