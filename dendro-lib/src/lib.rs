// --- FILE: dendro-lib/src/lib.rs ---

#![doc = include_str!("../README.md")]

use std::env;
use std::path::PathBuf;

use log::{debug, info};

// Declare modules
mod config;
mod errors;
mod filter;
mod normalize;
mod render;
mod symbols;
mod walker;

// Public API
pub use config::TreeConfig;
pub use errors::{TreeError, TreeResult};
pub use normalize::normalize_path;
pub use symbols::{legacy_to_unicode, SymbolSet};

use render::TreeRenderer;
use walker::DirectoryWalker;

/// Renders the directory structure described by `config`.
///
/// This is the primary entry point into the `dendro-lib` core. The
/// configuration is validated first; nothing is read from disk if it is
/// invalid. Then:
///
/// * with `include_dirs` set, each include directory is rendered as its own
///   labelled root, in order, into one continuous output. Relative paths are
///   measured against `root_path`, or the current directory when unset;
/// * otherwise the single root is `root_path` (or the current directory), and
///   its label is printed only when `show_root` is set.
///
/// The result is raw bytes: UTF-8 text when `use_utf8` is set, otherwise text
/// containing single-byte code page 437 line glyphs. Rendering the same
/// configuration twice with only `use_utf8` flipped yields structurally
/// identical output.
///
/// Unreadable directories and entries are logged at `WARN` and left out; they
/// never fail the call.
///
/// # Errors
///
/// * [`TreeError::RootPathNotListed`]: `root_path` is set but is not one of the
///   include or exclude entries.
/// * [`TreeError::IoError`]: the current directory was needed as a root or
///   display base and could not be read.
///
/// # Examples
///
/// ```no_run
/// use dendro_lib::{generate_structure, TreeConfig, TreeError};
/// use std::path::PathBuf;
///
/// fn render_sources() -> Result<String, TreeError> {
///     let config = TreeConfig {
///         include_dirs: vec![PathBuf::from("src")],
///         exclude_paths: vec![PathBuf::from("src/generated")],
///         allowed_extensions: vec![".rs".to_string()],
///         ..TreeConfig::default()
///     };
///     let bytes = generate_structure(&config)?;
///     Ok(String::from_utf8_lossy(&bytes).into_owned())
/// }
/// ```
pub fn generate_structure(config: &TreeConfig) -> TreeResult<Vec<u8>> {
    info!("Starting dendro render with config: {:?}", config);
    config.validate()?;

    let walker = DirectoryWalker::new(config);
    let mut renderer = TreeRenderer::new(SymbolSet::for_utf8(config.use_utf8));

    if config.is_multi_root() {
        let display_base = match config.root_path.as_ref() {
            Some(root_path) => root_path.clone(),
            None => current_dir()?,
        };
        info!(
            "Rendering {} include directories relative to {:?}",
            config.include_dirs.len(),
            display_base
        );
        for dir in &config.include_dirs {
            walker.walk(dir, &display_base, &mut renderer);
        }
    } else {
        let root = match config.root_path.as_ref() {
            Some(root_path) => root_path.clone(),
            None => current_dir()?,
        };
        info!("Rendering single root {:?}", root);
        walker.walk(&root, &root, &mut renderer);
    }

    let output = renderer.into_bytes();
    debug!("Rendered {} bytes", output.len());
    Ok(output)
}

fn current_dir() -> TreeResult<PathBuf> {
    env::current_dir().map_err(|e| TreeError::IoError {
        path: PathBuf::from("."),
        source: e,
    })
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::fs;
    use std::path::Path;
    use tempfile::{tempdir, TempDir};

    // Builds a small project:
    //   src/lib.rs
    //   docs/guide.md
    //   target/debug/app
    fn setup_test_dir() -> Result<(TempDir, PathBuf)> {
        let dir = tempdir()?;
        let path = dir.path().to_path_buf();

        fs::create_dir(path.join("src"))?;
        fs::write(path.join("src").join("lib.rs"), "pub fn it() {}")?;
        fs::create_dir(path.join("docs"))?;
        fs::write(path.join("docs").join("guide.md"), "# Guide")?;
        fs::create_dir_all(path.join("target").join("debug"))?;
        fs::write(path.join("target").join("debug").join("app"), [0x7f, 0x45])?;

        Ok((dir, path))
    }

    fn as_text(bytes: Vec<u8>) -> String {
        String::from_utf8(bytes).expect("utf8 render")
    }

    #[test]
    fn multi_root_renders_each_root_in_order() -> Result<()> {
        let (_dir, path) = setup_test_dir()?;
        let config = TreeConfig {
            include_dirs: vec![path.join("src"), path.join("docs")],
            ..TreeConfig::default()
        };

        let output = as_text(generate_structure(&config)?);
        assert_eq!(output, "src/\n└── lib.rs\ndocs/\n└── guide.md\n");
        Ok(())
    }

    #[test]
    fn multi_root_with_explicit_root_path() -> Result<()> {
        let (_dir, path) = setup_test_dir()?;
        let config = TreeConfig {
            include_dirs: vec![path.join("docs"), path.join("src")],
            root_path: Some(path.join("src")),
            ..TreeConfig::default()
        };

        let output = as_text(generate_structure(&config)?);
        assert_eq!(output, "docs/\n└── guide.md\nsrc/\n└── lib.rs\n");
        Ok(())
    }

    #[test]
    fn multi_root_skips_excluded_and_missing_roots() -> Result<()> {
        let (_dir, path) = setup_test_dir()?;
        let config = TreeConfig {
            include_dirs: vec![
                path.join("target"),
                path.join("nowhere"),
                path.join("src"),
            ],
            exclude_paths: vec![path.join("target")],
            ..TreeConfig::default()
        };

        let output = as_text(generate_structure(&config)?);
        assert_eq!(output, "src/\n└── lib.rs\n");
        Ok(())
    }

    #[test]
    fn unlisted_root_path_fails_before_traversal() {
        let config = TreeConfig {
            include_dirs: vec![PathBuf::from("/tmp/y")],
            root_path: Some(PathBuf::from("/tmp/x")),
            ..TreeConfig::default()
        };

        let result = generate_structure(&config);
        assert!(matches!(
            result,
            Err(TreeError::RootPathNotListed { ref root_path }) if root_path == Path::new("/tmp/x")
        ));
    }

    #[test]
    fn root_path_listed_as_exclusion_renders_nothing() -> Result<()> {
        let (_dir, path) = setup_test_dir()?;
        let config = TreeConfig {
            exclude_paths: vec![path.clone()],
            root_path: Some(path.clone()),
            show_root: true,
            ..TreeConfig::default()
        };

        assert!(generate_structure(&config)?.is_empty());
        Ok(())
    }

    #[test]
    fn repeated_runs_are_byte_identical() -> Result<()> {
        let (_dir, path) = setup_test_dir()?;
        let config = TreeConfig {
            include_dirs: vec![path.clone()],
            exclude_paths: vec![path.join("target").join("debug")],
            ..TreeConfig::default()
        };

        let first = generate_structure(&config)?;
        let second = generate_structure(&config)?;
        assert_eq!(first, second);

        let text = as_text(first);
        assert!(text.lines().any(|line| line.ends_with(" target/")));
        assert!(!text.lines().any(|line| line.ends_with(" debug/")));
        assert!(!text.lines().any(|line| line.ends_with(" app")));
        Ok(())
    }

    #[test]
    fn first_line_rule_spans_all_roots() -> Result<()> {
        let (_dir, path) = setup_test_dir()?;
        fs::write(path.join("src").join("main.rs"), "fn main() {}")?;

        // Root labels are always written first in multi-root mode, so no
        // entry can be the first line of the output.
        let config = TreeConfig {
            include_dirs: vec![path.join("src"), path.join("docs")],
            ..TreeConfig::default()
        };
        let output = as_text(generate_structure(&config)?);
        assert!(!output.contains("┌── "), "got {:?}", output);
        assert!(output.starts_with("src/\n├── "), "got {:?}", output);
        Ok(())
    }

    #[test]
    fn dual_render_differs_only_in_glyphs() -> Result<()> {
        let (_dir, path) = setup_test_dir()?;
        let mut config = TreeConfig {
            include_dirs: vec![path.clone()],
            ..TreeConfig::default()
        };

        let utf8 = as_text(generate_structure(&config)?);
        config.use_utf8 = false;
        let legacy = generate_structure(&config)?;

        assert!(String::from_utf8(legacy.clone()).is_err());
        let translated = String::from_utf8_lossy(&legacy).replace('\u{FFFD}', "");
        let stripped: String = utf8
            .chars()
            .filter(|c| !matches!(c, '└' | '┌' | '├' | '│' | '─'))
            .collect();
        assert_eq!(translated, stripped);
        Ok(())
    }
}
