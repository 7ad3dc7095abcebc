// --- FILE: dendro-lib/src/errors.rs ---

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during `dendro` library operations.
///
/// Only setup problems are reported here. Filesystem trouble met while
/// walking (unreadable directories, vanished entries) is logged and the
/// affected subtree is skipped instead.
#[derive(Error, Debug)]
pub enum TreeError {
    /// `root_path` was set in the `TreeConfig` but does not match any entry of
    /// `include_dirs` or `exclude_paths` after normalization.
    #[error("The specified root path '{root_path}' is not found in the included or excluded paths")]
    RootPathNotListed { root_path: PathBuf },

    /// An I/O error occurred while resolving a path needed before traversal
    /// (e.g., reading the current working directory).
    #[error("IO error accessing path '{path}': {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A convenience type alias for `Result<T, TreeError>`.
pub type TreeResult<T> = Result<T, TreeError>;
