// --- FILE: dendro-lib/src/normalize.rs ---

use std::env;
use std::path::{Component, Path, PathBuf};

use log::{debug, trace};

/// Returns a canonical absolute form of `path` suitable for equality checks.
///
/// Existing paths are fully canonicalized (symlinks resolved). For paths that
/// do not exist, the longest existing ancestor is canonicalized and the
/// remaining components are appended after lexical cleanup (`.` dropped, `..`
/// pops the previous component). Relative paths are resolved against the
/// current working directory.
///
/// This never fails: when the filesystem cannot answer, the best-effort
/// absolute path is returned. The result is only meant for comparisons and is
/// never shown to the user.
pub fn normalize_path(path: &Path) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }

    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        match env::current_dir() {
            Ok(cwd) => cwd.join(path),
            Err(e) => {
                debug!(
                    "Cannot read current directory while normalizing {:?}: {}",
                    path, e
                );
                path.to_path_buf()
            }
        }
    };

    let components: Vec<Component<'_>> = absolute.components().collect();
    for split in (1..components.len()).rev() {
        let head: PathBuf = components[..split].iter().collect();
        if let Ok(canonical) = head.canonicalize() {
            trace!(
                "Weakly canonicalized {:?} via existing ancestor {:?}",
                path,
                canonical
            );
            return append_lexically(canonical, &components[split..]);
        }
    }

    append_lexically(PathBuf::new(), &components)
}

fn append_lexically(mut base: PathBuf, tail: &[Component<'_>]) -> PathBuf {
    for component in tail {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                base.pop();
            }
            other => base.push(other.as_os_str()),
        }
    }
    base
}
