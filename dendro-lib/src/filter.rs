// --- FILE: dendro-lib/src/filter.rs ---

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use log::debug;

use crate::normalize::normalize_path;

/// Exact-match path exclusion.
///
/// Every configured path is normalized once up front; candidates are
/// normalized on each query. A directory entry in the set does not match its
/// descendants, the walker simply never opens it.
#[derive(Debug, Clone)]
pub(crate) struct ExclusionFilter {
    excluded: HashSet<PathBuf>,
}

impl ExclusionFilter {
    pub(crate) fn new(exclude_paths: &[PathBuf]) -> Self {
        let excluded: HashSet<PathBuf> = exclude_paths
            .iter()
            .map(|p| normalize_path(p))
            .collect();
        debug!("Exclusion set: {:?}", excluded);
        Self { excluded }
    }

    pub(crate) fn is_excluded(&self, path: &Path) -> bool {
        if self.excluded.is_empty() {
            return false;
        }
        self.excluded.contains(&normalize_path(path))
    }
}

/// Allow/deny filtering on file extensions.
///
/// Tokens carry their leading dot (`".rs"`); a name without an extension
/// yields the empty token. The deny list wins over the allow list.
#[derive(Debug, Clone)]
pub(crate) struct ExtensionFilter {
    allowed: HashSet<String>,
    excluded: HashSet<String>,
}

impl ExtensionFilter {
    pub(crate) fn new(allowed: &[String], excluded: &[String]) -> Self {
        Self {
            allowed: allowed.iter().cloned().collect(),
            excluded: excluded.iter().cloned().collect(),
        }
    }

    pub(crate) fn passes(&self, extension: &str) -> bool {
        if !self.excluded.is_empty() && self.excluded.contains(extension) {
            return false;
        }
        if !self.allowed.is_empty() && !self.allowed.contains(extension) {
            return false;
        }
        true
    }
}

/// Extension token for `path`: `".ext"`, `"."` for a trailing dot, or `""`.
pub(crate) fn extension_token(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::fs;
    use tempfile::tempdir;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn extension_tokens_keep_the_dot() {
        assert_eq!(extension_token(Path::new("main.rs")), ".rs");
        assert_eq!(extension_token(Path::new("archive.tar.gz")), ".gz");
        assert_eq!(extension_token(Path::new("Makefile")), "");
        assert_eq!(extension_token(Path::new(".gitignore")), "");
        assert_eq!(extension_token(Path::new("odd.")), ".");
    }

    #[test]
    fn empty_lists_pass_everything() {
        let filter = ExtensionFilter::new(&[], &[]);
        assert!(filter.passes(".rs"));
        assert!(filter.passes(""));
    }

    #[test]
    fn deny_list_takes_precedence_over_allow_list() {
        let filter = ExtensionFilter::new(&strings(&[".rs", ".md"]), &strings(&[".rs"]));
        assert!(!filter.passes(".rs"));
        assert!(filter.passes(".md"));
        assert!(!filter.passes(".txt"));
    }

    #[test]
    fn allow_list_rejects_extensionless_unless_listed() {
        let filter = ExtensionFilter::new(&strings(&[".toml"]), &[]);
        assert!(!filter.passes(""));

        let filter = ExtensionFilter::new(&strings(&[".toml", ""]), &[]);
        assert!(filter.passes(""));
    }

    #[test]
    fn matching_is_case_sensitive() {
        let filter = ExtensionFilter::new(&[], &strings(&[".log"]));
        assert!(filter.passes(".LOG"));
    }

    #[test]
    fn exclusion_matches_exact_normalized_path_only() -> Result<()> {
        let dir = tempdir()?;
        let target = dir.path().join("target");
        fs::create_dir_all(target.join("debug"))?;

        let filter = ExclusionFilter::new(&[dir.path().join("./target/")]);
        assert!(filter.is_excluded(&target));
        assert!(!filter.is_excluded(&target.join("debug")));
        assert!(!filter.is_excluded(dir.path()));
        Ok(())
    }

    #[test]
    fn exclusion_matches_missing_paths() -> Result<()> {
        let dir = tempdir()?;
        let ghost = dir.path().join("ghost.txt");

        let filter = ExclusionFilter::new(&[ghost.clone()]);
        assert!(filter.is_excluded(&ghost));
        Ok(())
    }
}
