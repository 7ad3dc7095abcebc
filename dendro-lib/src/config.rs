// --- FILE: dendro-lib/src/config.rs ---

use std::path::PathBuf;

use log::debug;

use crate::errors::{TreeError, TreeResult};
use crate::normalize::normalize_path;

/// Configuration for a single structure render.
///
/// This struct holds everything the generator needs to decide which entries
/// appear in the tree and how they are drawn. It is typically constructed by
/// the calling application (e.g., the CLI) from user input and then passed,
/// unchanged, to [`generate_structure`](crate::generate_structure).
#[derive(Debug, Clone)]
pub struct TreeConfig {
    /// Directories to render, each as its own labelled root, in order.
    /// When empty, a single root (`root_path` or the current directory) is used.
    pub include_dirs: Vec<PathBuf>,

    /// Directories or files to leave out. Matching is exact after
    /// normalization; a directory's children disappear only because the
    /// directory itself is never opened.
    pub exclude_paths: Vec<PathBuf>,

    /// File extensions to keep, including the leading dot (`".rs"`).
    /// Empty means every extension is allowed.
    pub allowed_extensions: Vec<String>,

    /// File extensions to drop. Checked before `allowed_extensions`.
    pub excluded_extensions: Vec<String>,

    /// Explicit root directory. Must also appear in `include_dirs` or
    /// `exclude_paths`; see [`TreeConfig::validate`].
    pub root_path: Option<PathBuf>,

    /// Draw with UTF-8 box-drawing glyphs when true, legacy single-byte
    /// console glyphs otherwise.
    pub use_utf8: bool,

    /// Print the root directory's own name in single-root mode.
    /// Multi-root renders always label each root.
    pub show_root: bool,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            include_dirs: Vec::new(),
            exclude_paths: Vec::new(),
            allowed_extensions: Vec::new(),
            excluded_extensions: Vec::new(),
            root_path: None,
            use_utf8: true,
            show_root: false,
        }
    }
}

impl TreeConfig {
    /// Checks that `root_path`, when set, is one of the include or exclude
    /// entries (compared in normalized form).
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::RootPathNotListed`] when the check fails.
    pub fn validate(&self) -> TreeResult<()> {
        let Some(root_path) = self.root_path.as_ref() else {
            return Ok(());
        };

        let normalized_root = normalize_path(root_path);
        debug!("Validating root path {:?} ({:?})", root_path, normalized_root);

        let listed = self
            .include_dirs
            .iter()
            .chain(self.exclude_paths.iter())
            .any(|candidate| normalize_path(candidate) == normalized_root);

        if listed {
            Ok(())
        } else {
            Err(TreeError::RootPathNotListed {
                root_path: root_path.clone(),
            })
        }
    }

    /// True when the render labels each of several include directories.
    pub(crate) fn is_multi_root(&self) -> bool {
        !self.include_dirs.is_empty()
    }
}
