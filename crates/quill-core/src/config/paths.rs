//! Scoped configuration path resolution.

use std::path::{Path, PathBuf};

/// Reserved configuration directory name used at every scope.
pub const CONFIG_DIR_NAME: &str = ".quill";

/// Resolves the canonical configuration directories for a workspace.
///
/// The home directory is injected at construction so tests can substitute a
/// deterministic value; it is treated as immutable for the process lifetime.
#[derive(Debug, Clone)]
pub struct QuillPaths {
    home_dir: PathBuf,
}

impl QuillPaths {
    /// Resolve against the host home directory.
    pub fn new() -> anyhow::Result<Self> {
        let home_dir = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?;
        Ok(Self { home_dir })
    }

    /// Resolve against an explicit home directory (for testing).
    pub fn with_home_dir(home_dir: PathBuf) -> Self {
        Self { home_dir }
    }

    pub fn home_dir(&self) -> &Path {
        &self.home_dir
    }

    /// Per-user configuration directory (`~/.quill`). No I/O is performed.
    pub fn global_dir(&self) -> PathBuf {
        self.home_dir.join(CONFIG_DIR_NAME)
    }

    /// Project-root configuration directory (`<root>/.quill`).
    ///
    /// No existence check; callers decide whether the directory is present.
    pub fn project_dir(&self, root: &Path) -> PathBuf {
        root.join(CONFIG_DIR_NAME)
    }

    /// Global then project, the fixed two-element resolution order.
    pub fn ordered_dirs(&self, root: &Path) -> Vec<PathBuf> {
        vec![self.global_dir(), self.project_dir(root)]
    }
}
