//! Recursive file-search collaborator.
//!
//! Discovery treats search as a best-effort external dependency: the trait
//! raises on any tool failure and callers decide how to degrade.

use std::path::{Path, PathBuf};

use anyhow::Context;
use globset::{Glob, GlobSet, GlobSetBuilder};
use walkdir::WalkDir;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// One entry returned by a recursive search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchEntry {
    pub path: PathBuf,
    pub kind: EntryKind,
}

/// Recursive file enumeration scoped to a root directory.
///
/// Implementations must include hidden entries and follow symlinks, and must
/// skip anything below a directory whose name appears in `exclude_dirs`.
pub trait FileSearch {
    fn search(
        &self,
        root: &Path,
        include: &[&str],
        exclude_dirs: &[&str],
    ) -> anyhow::Result<Vec<SearchEntry>>;
}

/// Default search collaborator backed by a directory walk.
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkSearch;

impl FileSearch for WalkSearch {
    fn search(
        &self,
        root: &Path,
        include: &[&str],
        exclude_dirs: &[&str],
    ) -> anyhow::Result<Vec<SearchEntry>> {
        let include = compile_globs(include)?;
        let mut entries = Vec::new();

        let walker = WalkDir::new(root)
            .follow_links(true)
            .into_iter()
            .filter_entry(|entry| !is_excluded_dir(entry, exclude_dirs));

        for entry in walker {
            let entry = entry.with_context(|| {
                format!("File search failed under: {}", root.display())
            })?;
            let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
            if !include.is_match(relative) {
                continue;
            }
            let kind = if entry.file_type().is_dir() {
                EntryKind::Directory
            } else {
                EntryKind::File
            };
            entries.push(SearchEntry {
                path: entry.path().to_path_buf(),
                kind,
            });
        }

        Ok(entries)
    }
}

fn compile_globs(patterns: &[&str]) -> anyhow::Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(
            Glob::new(pattern)
                .with_context(|| format!("Invalid search pattern: {pattern}"))?,
        );
    }
    builder.build().context("Failed to compile search patterns")
}

fn is_excluded_dir(entry: &walkdir::DirEntry, exclude_dirs: &[&str]) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| exclude_dirs.contains(&name))
}
