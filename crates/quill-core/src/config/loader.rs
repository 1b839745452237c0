//! Loading and merging of scoped instruction documents.

use std::path::Path;

use anyhow::Context;

use crate::fs::{Filesystem, RealFilesystem, directory_exists, file_exists};
use crate::types::{ConfigDocument, ConfigScope, MergedConfig};

use super::paths::QuillPaths;

/// Annotation inserted between global and project content when both are
/// present. The label describes reading order for the consuming agent;
/// global content is retained verbatim, not replaced.
pub const PROJECT_OVERRIDE_HEADER: &str = "\n\n# Project-specific rules (override global):\n\n";

/// Reads one relative document from the global and project scopes and
/// produces their textual merge.
///
/// Exactly two sources are consulted; aggregation over subfolder scopes is
/// composed by callers through repeated loads.
#[derive(Debug, Clone)]
pub struct ConfigLoader<F = RealFilesystem> {
    paths: QuillPaths,
    fs: F,
}

impl ConfigLoader<RealFilesystem> {
    pub fn new(paths: QuillPaths) -> Self {
        Self::with_filesystem(paths, RealFilesystem)
    }
}

impl<F: Filesystem> ConfigLoader<F> {
    pub fn with_filesystem(paths: QuillPaths, fs: F) -> Self {
        Self { paths, fs }
    }

    /// Load `relative` from the global and project configuration
    /// directories.
    ///
    /// A missing file, a file standing in for a directory component, or a
    /// directory where a file was expected all count as absence for that
    /// source. Any other failure aborts the whole call; no partial result
    /// is ever returned.
    pub fn load(&self, relative: impl AsRef<Path>, root: &Path) -> anyhow::Result<MergedConfig> {
        let relative = relative.as_ref();
        let global = self.read_document(ConfigScope::Global, &self.paths.global_dir(), relative)?;
        let project = self.read_document(
            ConfigScope::ProjectRoot,
            &self.paths.project_dir(root),
            relative,
        )?;

        let merged = merge_contents(global.content.as_deref(), project.content.as_deref());
        Ok(MergedConfig {
            global: global.content,
            project: project.content,
            merged,
        })
    }

    fn read_document(
        &self,
        scope: ConfigScope,
        dir: &Path,
        relative: &Path,
    ) -> anyhow::Result<ConfigDocument> {
        let path = dir.join(relative);
        let content = match self.fs.read_text(&path) {
            Ok(text) => Some(text),
            Err(err) if err.is_benign() => None,
            Err(err) => {
                return Err(err).with_context(|| {
                    format!("Failed to read config file: {}", path.display())
                });
            }
        };
        Ok(ConfigDocument {
            scope,
            relative_path: relative.to_path_buf(),
            content,
        })
    }

    /// Whether `path` exists and is a directory; benign conditions are
    /// `false`, other errors propagate.
    pub fn directory_exists(&self, path: &Path) -> anyhow::Result<bool> {
        directory_exists(&self.fs, path)
    }

    /// Whether `path` exists and is a regular file; benign conditions are
    /// `false`, other errors propagate.
    pub fn file_exists(&self, path: &Path) -> anyhow::Result<bool> {
        file_exists(&self.fs, path)
    }
}

/// The fixed merge rule over the two optional sources.
pub fn merge_contents(global: Option<&str>, project: Option<&str>) -> String {
    match (global, project) {
        (Some(g), Some(p)) => format!("{g}{PROJECT_OVERRIDE_HEADER}{p}"),
        (Some(g), None) => g.to_string(),
        (None, Some(p)) => p.to_string(),
        (None, None) => String::new(),
    }
}
