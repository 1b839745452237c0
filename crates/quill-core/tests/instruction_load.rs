use std::collections::HashMap;
use std::path::{Path, PathBuf};

use quill_core::config::{ConfigLoader, QuillPaths};
use quill_core::fs::{EntryStat, Filesystem, FsError};

/// Deterministic in-memory filesystem keyed by absolute path.
#[derive(Default)]
struct MapFilesystem {
    files: HashMap<PathBuf, String>,
    denied: Vec<PathBuf>,
}

impl MapFilesystem {
    fn with_file(mut self, path: &str, content: &str) -> Self {
        self.files.insert(PathBuf::from(path), content.to_string());
        self
    }

    fn with_denied(mut self, path: &str) -> Self {
        self.denied.push(PathBuf::from(path));
        self
    }
}

impl Filesystem for MapFilesystem {
    fn stat(&self, path: &Path) -> Result<EntryStat, FsError> {
        if self.denied.iter().any(|p| p == path) {
            return Err(FsError::PermissionDenied(path.display().to_string()));
        }
        if self.files.contains_key(path) {
            return Ok(EntryStat {
                is_dir: false,
                is_file: true,
            });
        }
        if self.files.keys().any(|p| p.starts_with(path)) {
            return Ok(EntryStat {
                is_dir: true,
                is_file: false,
            });
        }
        Err(FsError::NotFound(path.display().to_string()))
    }

    fn read_text(&self, path: &Path) -> Result<String, FsError> {
        if self.denied.iter().any(|p| p == path) {
            return Err(FsError::PermissionDenied(path.display().to_string()));
        }
        match self.files.get(path) {
            Some(content) => Ok(content.clone()),
            None => Err(FsError::NotFound(path.display().to_string())),
        }
    }
}

fn loader(fs: MapFilesystem) -> ConfigLoader<MapFilesystem> {
    ConfigLoader::with_filesystem(QuillPaths::with_home_dir(PathBuf::from("/mock/home")), fs)
}

const ROOT: &str = "/project/path";

#[test]
fn load_merges_global_and_project_with_annotation() {
    let loader = loader(
        MapFilesystem::default()
            .with_file("/mock/home/.quill/rules/rules.md", "global content")
            .with_file("/project/path/.quill/rules/rules.md", "project content"),
    );

    let merged = loader.load("rules/rules.md", Path::new(ROOT)).unwrap();

    assert_eq!(merged.global.as_deref(), Some("global content"));
    assert_eq!(merged.project.as_deref(), Some("project content"));
    assert_eq!(
        merged.merged,
        "global content\n\n# Project-specific rules (override global):\n\nproject content"
    );
}

#[test]
fn load_with_only_global_is_verbatim() {
    let loader = loader(
        MapFilesystem::default().with_file("/mock/home/.quill/rules/rules.md", "global content"),
    );

    let merged = loader.load("rules/rules.md", Path::new(ROOT)).unwrap();

    assert_eq!(merged.global.as_deref(), Some("global content"));
    assert_eq!(merged.project, None);
    assert_eq!(merged.merged, "global content");
}

#[test]
fn load_with_only_project_is_verbatim() {
    let loader = loader(
        MapFilesystem::default().with_file("/project/path/.quill/rules/rules.md", "project content"),
    );

    let merged = loader.load("rules/rules.md", Path::new(ROOT)).unwrap();

    assert_eq!(merged.global, None);
    assert_eq!(merged.project.as_deref(), Some("project content"));
    assert_eq!(merged.merged, "project content");
}

#[test]
fn load_with_neither_source_is_empty() {
    let loader = loader(MapFilesystem::default());

    let merged = loader.load("rules/rules.md", Path::new(ROOT)).unwrap();

    assert_eq!(merged.global, None);
    assert_eq!(merged.project, None);
    assert_eq!(merged.merged, "");
}

#[test]
fn unexpected_error_aborts_without_partial_result() {
    let loader = loader(
        MapFilesystem::default()
            .with_file("/mock/home/.quill/rules/rules.md", "global content")
            .with_denied("/project/path/.quill/rules/rules.md"),
    );

    assert!(loader.load("rules/rules.md", Path::new(ROOT)).is_err());
}

#[test]
fn exists_helpers_map_benign_errors_to_false() {
    let loader = loader(
        MapFilesystem::default().with_file("/project/path/.quill/rules/rules.md", "content"),
    );

    assert!(loader
        .directory_exists(Path::new("/project/path/.quill"))
        .unwrap());
    assert!(loader
        .file_exists(Path::new("/project/path/.quill/rules/rules.md"))
        .unwrap());
    assert!(!loader.file_exists(Path::new("/project/path/missing")).unwrap());
    assert!(!loader
        .directory_exists(Path::new("/project/path/.quill/rules/rules.md"))
        .unwrap());
}

#[test]
fn exists_helpers_propagate_unexpected_errors() {
    let loader = loader(MapFilesystem::default().with_denied("/project/path/secret"));

    assert!(loader.file_exists(Path::new("/project/path/secret")).is_err());
    assert!(loader
        .directory_exists(Path::new("/project/path/secret"))
        .is_err());
}

#[test]
fn load_against_real_filesystem() {
    let home = tempfile::tempdir().unwrap();
    let project = tempfile::tempdir().unwrap();

    let global_file = home.path().join(".quill/rules/rules.md");
    std::fs::create_dir_all(global_file.parent().unwrap()).unwrap();
    std::fs::write(&global_file, "global content").unwrap();

    let project_file = project.path().join(".quill/rules/rules.md");
    std::fs::create_dir_all(project_file.parent().unwrap()).unwrap();
    std::fs::write(&project_file, "project content").unwrap();

    let loader = ConfigLoader::new(QuillPaths::with_home_dir(home.path().to_path_buf()));
    let merged = loader.load("rules/rules.md", project.path()).unwrap();

    assert_eq!(
        merged.merged,
        "global content\n\n# Project-specific rules (override global):\n\nproject content"
    );
}
