// --- FILE: dendro-lib/src/walker.rs ---

use std::path::{Path, PathBuf};

use log::{debug, trace, warn};
use walkdir::WalkDir;

use crate::config::TreeConfig;
use crate::filter::{extension_token, ExclusionFilter, ExtensionFilter};
use crate::normalize::normalize_path;
use crate::render::TreeRenderer;

/// Pending work on the traversal stack.
///
/// Children are pushed in reverse enumeration order, so popping yields the
/// same depth-first order a recursive walk would produce.
#[derive(Debug)]
enum Frame {
    Enter {
        path: PathBuf,
        indent: Vec<u8>,
        is_last: bool,
        is_root: bool,
    },
    File {
        name: String,
        indent: Vec<u8>,
        is_last: bool,
    },
}

#[derive(Debug)]
struct Child {
    path: PathBuf,
    name: String,
    is_dir: bool,
}

/// Depth-first directory walker that renders while it goes.
///
/// Nothing is collected into a tree: each directory's filtered children are
/// scheduled on an explicit stack and drawn as they are popped.
pub(crate) struct DirectoryWalker<'a> {
    config: &'a TreeConfig,
    exclusions: ExclusionFilter,
    extensions: ExtensionFilter,
}

impl<'a> DirectoryWalker<'a> {
    pub(crate) fn new(config: &'a TreeConfig) -> Self {
        Self {
            config,
            exclusions: ExclusionFilter::new(&config.exclude_paths),
            extensions: ExtensionFilter::new(
                &config.allowed_extensions,
                &config.excluded_extensions,
            ),
        }
    }

    /// Renders the tree under `root` into `renderer`.
    ///
    /// `display_base` is the directory relative paths are measured against.
    /// Filesystem errors never abort the walk; affected entries are skipped.
    pub(crate) fn walk(&self, root: &Path, display_base: &Path, renderer: &mut TreeRenderer) {
        debug!("Walking root {:?} (display base {:?})", root, display_base);
        let base = normalize_path(display_base);

        let mut stack = vec![Frame::Enter {
            path: root.to_path_buf(),
            indent: Vec::new(),
            is_last: false,
            is_root: true,
        }];

        while let Some(frame) = stack.pop() {
            match frame {
                Frame::File {
                    name,
                    indent,
                    is_last,
                } => renderer.entry_line(&indent, is_last, &name, false),
                Frame::Enter {
                    path,
                    indent,
                    is_last,
                    is_root,
                } => self.enter(&path, &indent, is_last, is_root, &base, renderer, &mut stack),
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn enter(
        &self,
        path: &Path,
        indent: &[u8],
        is_last: bool,
        is_root: bool,
        base: &Path,
        renderer: &mut TreeRenderer,
        stack: &mut Vec<Frame>,
    ) {
        if self.exclusions.is_excluded(path) {
            debug!("Pruning excluded directory: {:?}", path);
            return;
        }
        if !path.is_dir() {
            debug!("Skipping missing or non-directory path: {:?}", path);
            return;
        }

        let name = display_name(path);
        if is_root {
            if self.config.show_root || self.config.is_multi_root() {
                renderer.root_line(&name);
            }
        } else if differs_from_base(path, base) {
            renderer.entry_line(indent, is_last, &name, true);
        }

        let children = self.list_children(path);
        // Root children start at column zero.
        let child_indent = if is_root {
            Vec::new()
        } else {
            renderer.child_indent(indent, is_last)
        };

        let count = children.len();
        for (index, child) in children.into_iter().enumerate().rev() {
            let last = index + 1 == count;
            let frame = if child.is_dir {
                Frame::Enter {
                    path: child.path,
                    indent: child_indent.clone(),
                    is_last: last,
                    is_root: false,
                }
            } else {
                Frame::File {
                    name: child.name,
                    indent: child_indent.clone(),
                    is_last: last,
                }
            };
            stack.push(frame);
        }
    }

    /// Enumerates `dir` in directory order, keeping entries that survive the
    /// exclusion check and, for files, the extension filter.
    fn list_children(&self, dir: &Path) -> Vec<Child> {
        let mut children = Vec::new();

        for entry_result in WalkDir::new(dir).min_depth(1).max_depth(1) {
            let entry = match entry_result {
                Ok(entry) => entry,
                Err(e) => {
                    let path_display = e
                        .path()
                        .map_or_else(|| dir.display().to_string(), |p| p.display().to_string());
                    warn!(
                        "Skipping entry due to error while listing {}: {}",
                        path_display, e
                    );
                    continue;
                }
            };

            let entry_path = entry.path();
            if self.exclusions.is_excluded(entry_path) {
                debug!("Excluding entry: {:?}", entry_path);
                continue;
            }

            // Follows symlinks, so a link to a directory is descended into.
            let is_dir = entry_path.is_dir();
            if !is_dir {
                let extension = extension_token(entry_path);
                if !self.extensions.passes(&extension) {
                    trace!(
                        "Excluding file by extension {:?}: {:?}",
                        extension,
                        entry_path
                    );
                    continue;
                }
            }

            children.push(Child {
                path: entry_path.to_path_buf(),
                name: entry.file_name().to_string_lossy().into_owned(),
                is_dir,
            });
        }

        debug!("Listed {} entries in {:?}", children.len(), dir);
        children
    }
}

/// Name printed for a directory: its final component, or the final component
/// of its normalized form for spellings like `.` or `..`.
fn display_name(path: &Path) -> String {
    if let Some(name) = path.file_name() {
        return name.to_string_lossy().into_owned();
    }
    normalize_path(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn differs_from_base(path: &Path, base: &Path) -> bool {
    pathdiff::diff_paths(normalize_path(path), base)
        .is_some_and(|relative| !relative.as_os_str().is_empty())
}
