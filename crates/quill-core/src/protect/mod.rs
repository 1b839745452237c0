//! Write-protection classification for configuration paths.
//!
//! Classification only: callers decide whether a protected path blocks an
//! edit or triggers an approval prompt.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

use crate::types::ProtectionRecord;

/// Glob patterns identifying write-protected configuration files.
///
/// The set is fixed and not user-configurable at this layer. Patterns
/// without a leading separator match their trailing segments at any depth.
pub const PROTECTED_PATTERNS: [&str; 10] = [
    ".quillignore",
    ".quillmodes",
    ".quillrules*",
    ".agentrules*",
    ".quill/**",
    ".vscode/**",
    "*.code-workspace",
    ".quillprotected",
    "AGENTS.md",
    "AGENT.md",
];

/// Fixed explanatory string for approval prompts.
const PROTECTION_MESSAGE: &str =
    "This is a write-protected quill configuration file and requires explicit approval before modification.";

// Compiled once for the process; the pattern set never changes, so a
// compile failure here is a programming error, not a runtime condition.
static PROTECTED_GLOBS: LazyLock<GlobSet> =
    LazyLock::new(|| compile_patterns().expect("fixed protection patterns compile"));

fn compile_patterns() -> Result<GlobSet, globset::Error> {
    let mut builder = GlobSetBuilder::new();
    for pattern in PROTECTED_PATTERNS {
        // `*` stays within one segment; `**` crosses directory boundaries.
        builder.add(GlobBuilder::new(pattern).literal_separator(true).build()?);
        // Unanchored patterns also match below the root.
        let anywhere = format!("**/{pattern}");
        builder.add(GlobBuilder::new(&anywhere).literal_separator(true).build()?);
    }
    builder.build()
}

/// Classifies candidate paths against the fixed protection pattern set.
///
/// Pure classification over an immutable workspace root; never errors, and
/// malformed or empty paths classify as not protected.
#[derive(Debug, Clone)]
pub struct ProtectionMatcher {
    workspace_root: PathBuf,
}

impl ProtectionMatcher {
    pub fn new(workspace_root: impl Into<PathBuf>) -> Self {
        Self {
            workspace_root: workspace_root.into(),
        }
    }

    /// Whether `path` matches any protection pattern.
    ///
    /// Separators are normalized to forward slashes, and absolute paths
    /// under the workspace root are rewritten root-relative before
    /// matching.
    pub fn is_protected(&self, path: impl AsRef<Path>) -> bool {
        let candidate = self.normalize(path.as_ref());
        if candidate.is_empty() {
            return false;
        }
        PROTECTED_GLOBS.is_match(Path::new(&candidate))
    }

    /// The subset of `paths` that is protected, as the original strings.
    pub fn protected_files<I, S>(&self, paths: I) -> HashSet<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        paths
            .into_iter()
            .filter(|p| self.is_protected(p.as_ref()))
            .map(|p| p.as_ref().to_string())
            .collect()
    }

    /// Classify every path, preserving input order and length.
    pub fn annotate_paths<I, S>(&self, paths: I) -> Vec<ProtectionRecord>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        paths
            .into_iter()
            .map(|p| ProtectionRecord {
                path: p.as_ref().to_string(),
                is_protected: self.is_protected(p.as_ref()),
            })
            .collect()
    }

    pub fn protection_message(&self) -> &'static str {
        PROTECTION_MESSAGE
    }

    /// Multi-line instruction text enumerating every protected pattern.
    pub fn instructions(&self) -> String {
        let patterns = PROTECTED_PATTERNS
            .iter()
            .map(|p| format!("- {p}"))
            .collect::<Vec<_>>()
            .join("\n");
        format!(
            "\u{1F512} # Protected Files\n\nThe following patterns are write-protected. \
             Files matching them require explicit approval before any modification:\n{patterns}"
        )
    }

    /// The exact fixed pattern list, for introspection and testing.
    pub fn patterns(&self) -> &'static [&'static str] {
        &PROTECTED_PATTERNS
    }

    fn normalize(&self, path: &Path) -> String {
        let text = path.to_string_lossy().replace('\\', "/");
        let root = self.workspace_root.to_string_lossy().replace('\\', "/");
        let root = root.trim_end_matches('/');

        if !root.is_empty()
            && let Some(rest) = text.strip_prefix(root)
        {
            // Only strip at a segment boundary so a sibling like
            // `/project/pathological` is not relativized against
            // `/project/path`.
            if rest.is_empty() {
                return String::new();
            }
            if let Some(relative) = rest.strip_prefix('/') {
                return relative.to_string();
            }
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> ProtectionMatcher {
        ProtectionMatcher::new("/project/path")
    }

    #[test]
    fn exact_names_do_not_match_by_prefix() {
        let m = matcher();
        assert!(m.is_protected(".quillignore"));
        assert!(!m.is_protected(".quillignorex"));
        assert!(!m.is_protected(".quillignore.bak"));
    }

    #[test]
    fn prefix_families_match_variants() {
        let m = matcher();
        assert!(m.is_protected(".quillrules"));
        assert!(m.is_protected(".quillrules-code"));
        assert!(m.is_protected(".agentrules-legacy"));
        assert!(!m.is_protected(".quillrule"));
    }

    #[test]
    fn recursive_directory_patterns_cross_boundaries() {
        let m = matcher();
        assert!(m.is_protected(".quill/config.json"));
        assert!(m.is_protected(".quill/rules/nested/deep.md"));
        assert!(m.is_protected("packages/api/.vscode/settings.json"));
        assert!(!m.is_protected(".quill"));
    }

    #[test]
    fn suffix_wildcard_stays_within_a_segment() {
        let m = matcher();
        assert!(m.is_protected("project.code-workspace"));
        assert!(m.is_protected("nested/dir/project.code-workspace"));
        assert!(!m.is_protected("project.code-workspace/readme.md"));
    }

    #[test]
    fn unanchored_patterns_match_at_any_depth() {
        let m = matcher();
        assert!(m.is_protected("packages/api/.quillignore"));
        assert!(m.is_protected("a/b/c/AGENTS.md"));
        assert!(m.is_protected("AGENT.md"));
    }

    #[test]
    fn ordinary_sources_are_not_protected() {
        let m = matcher();
        assert!(!m.is_protected("src/index.ts"));
        assert!(!m.is_protected("docs/AGENTS.txt"));
        assert!(!m.is_protected(""));
    }

    #[test]
    fn absolute_paths_under_root_match_like_relative() {
        let m = matcher();
        assert_eq!(
            m.is_protected("/project/path/.quillignore"),
            m.is_protected(".quillignore")
        );
        assert_eq!(
            m.is_protected("/project/path/packages/api/.quill/x.md"),
            m.is_protected("packages/api/.quill/x.md")
        );
    }

    #[test]
    fn sibling_root_prefix_is_not_relativized() {
        let m = matcher();
        // `/project/pathological` shares a string prefix with the root but
        // is a different directory.
        assert!(!m.is_protected("/project/pathological/src/main.ts"));
        assert!(m.is_protected("/project/pathological/AGENTS.md"));
    }

    #[test]
    fn backslash_separators_normalize() {
        let m = matcher();
        assert!(m.is_protected(r"packages\api\.quillignore"));
        assert!(m.is_protected(r".quill\rules\r.md"));
    }

    #[test]
    fn protected_files_preserves_original_strings() {
        let m = matcher();
        let input = [
            ".quillignore",
            "src/index.ts",
            "/project/path/.quillmodes",
            ".quillignore",
        ];
        let protected = m.protected_files(input);

        assert_eq!(protected.len(), 2);
        assert!(protected.contains(".quillignore"));
        assert!(protected.contains("/project/path/.quillmodes"));
    }

    #[test]
    fn annotate_paths_preserves_order_and_length() {
        let m = matcher();
        let input = ["src/index.ts", ".quillignore", "README.md"];
        let records = m.annotate_paths(input);

        assert_eq!(records.len(), input.len());
        for (record, path) in records.iter().zip(input) {
            assert_eq!(record.path, path);
            assert_eq!(record.is_protected, m.is_protected(path));
        }
    }

    #[test]
    fn instructions_enumerate_every_pattern() {
        let m = matcher();
        let text = m.instructions();

        assert!(text.starts_with('\u{1F512}'));
        assert!(text.contains("# Protected Files"));
        assert!(text.contains("write-protected"));
        for pattern in PROTECTED_PATTERNS {
            assert!(text.contains(pattern), "missing pattern: {pattern}");
        }
    }

    #[test]
    fn patterns_expose_the_fixed_set() {
        assert_eq!(matcher().patterns(), &PROTECTED_PATTERNS[..]);
    }
}
