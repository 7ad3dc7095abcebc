use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::BaseDirs;
use log::debug;
use serde::Deserialize;

use dendro_lib::{normalize_path, TreeConfig};

use crate::Cli;

pub const DEFAULT_OUTPUT_FILE: &str = "structure.txt";

#[derive(Debug, Clone)]
pub struct RunSettings {
    pub tree_config: TreeConfig,
    pub output: OutputTarget,
}

/// Where the persisted render goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    File(PathBuf),
    Clipboard,
}

/// Merges global config, project config, an explicit `--config` file and the
/// command line (in that order of precedence) into validated run settings.
pub fn build_run_settings(cli: &Cli, working_dir: &Path) -> Result<RunSettings> {
    let mut flags = Flags::default();
    let mut lists = Lists::default();

    if !cli.no_config {
        if let Some(base_dirs) = BaseDirs::new() {
            let config_dir = base_dirs.config_dir().join("dendro");
            apply_config_file(&config_dir.join("config.toml"), &mut flags, &mut lists)?;
            apply_ignore_file(&config_dir.join("ignore"), &mut lists.excludes)?;
        } else {
            debug!("No base directories available; skipping global config search");
        }

        apply_config_file(&working_dir.join(".dendro.toml"), &mut flags, &mut lists)?;
        apply_ignore_file(&working_dir.join(".dendroignore"), &mut lists.excludes)?;

        if let Some(explicit_path) = cli.config_path.as_ref() {
            apply_config_file(explicit_path, &mut flags, &mut lists)?;
        }
    } else if let Some(explicit_path) = cli.config_path.as_ref() {
        debug!(
            "--no-config specified; skipping explicitly requested config file {:?}",
            explicit_path
        );
    }

    // CLI overrides (highest precedence)
    for part in split_values(&cli.include_dirs) {
        lists.includes.push(part);
    }
    for part in split_values(&cli.exclude_paths) {
        lists.excludes.push(part);
    }
    for part in split_values(&cli.allowed_extensions) {
        lists.allowed.push(part);
    }
    for part in split_values(&cli.excluded_extensions) {
        lists.denied.push(part);
    }
    if let Some(root_path) = cli.root_path.as_ref() {
        flags.root_path = Some(root_path.clone());
    }
    if cli.show_root {
        flags.show_root = true;
    }
    if cli.clipboard {
        flags.clipboard = true;
        flags.output = None;
    }
    if let Some(output) = cli.output.as_ref() {
        flags.clipboard = false;
        flags.output = Some(output.clone());
    }

    let output = if flags.clipboard {
        OutputTarget::Clipboard
    } else {
        let path = flags
            .output
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_FILE));
        // Keep a previous result out of the listing
        lists.excludes.push(path.to_string_lossy());
        OutputTarget::File(path)
    };

    let tree_config = TreeConfig {
        include_dirs: lists.includes.into_vec(),
        exclude_paths: lists.excludes.into_vec(),
        allowed_extensions: lists.allowed.into_vec(),
        excluded_extensions: lists.denied.into_vec(),
        root_path: flags.root_path,
        use_utf8: true,
        show_root: flags.show_root,
    };

    tree_config.validate()?;

    Ok(RunSettings {
        tree_config,
        output,
    })
}

/// Splits repeated, comma-separated CLI values (e.g. `-e "target,*.log"`).
fn split_values(raw_values: &[String]) -> impl Iterator<Item = &str> {
    raw_values
        .iter()
        .flat_map(|raw| raw.split(','))
        .map(str::trim)
        .filter(|part| !part.is_empty())
}

#[derive(Debug, Default)]
struct Flags {
    root_path: Option<PathBuf>,
    output: Option<PathBuf>,
    show_root: bool,
    clipboard: bool,
}

#[derive(Debug, Default)]
struct Lists {
    includes: IncludeList,
    excludes: PathAccumulator,
    allowed: ExtensionAccumulator,
    denied: ExtensionAccumulator,
}

/// Include roots in the order given. A repeated root is rendered again.
#[derive(Debug, Default)]
struct IncludeList {
    paths: Vec<PathBuf>,
}

impl IncludeList {
    fn push<S: AsRef<str>>(&mut self, raw: S) {
        let candidate = raw.as_ref().trim();
        if !candidate.is_empty() {
            debug!("Adding include: {:?}", candidate);
            self.paths.push(PathBuf::from(candidate));
        }
    }

    fn merge<I>(&mut self, iter: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for item in iter {
            self.push(item);
        }
    }

    fn into_vec(self) -> Vec<PathBuf> {
        self.paths
    }
}

/// Ordered path list, de-duplicated by normalized form.
#[derive(Debug, Default)]
struct PathAccumulator {
    paths: Vec<PathBuf>,
    seen: HashSet<PathBuf>,
}

impl PathAccumulator {
    fn push<S: AsRef<str>>(&mut self, raw: S) {
        let candidate = raw.as_ref().trim();
        if candidate.is_empty() {
            return;
        }
        let path = PathBuf::from(candidate);
        if self.seen.insert(normalize_path(&path)) {
            debug!("Adding path: {:?}", path);
            self.paths.push(path);
        } else {
            debug!("Skipping duplicate path: {:?}", path);
        }
    }

    fn merge<I>(&mut self, iter: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for item in iter {
            self.push(item);
        }
    }

    fn into_vec(self) -> Vec<PathBuf> {
        self.paths
    }
}

#[derive(Debug, Default)]
struct ExtensionAccumulator {
    extensions: Vec<String>,
    seen: HashSet<String>,
}

impl ExtensionAccumulator {
    // An empty token is kept: it selects files without an extension.
    fn push<S: AsRef<str>>(&mut self, raw: S) {
        let candidate = raw.as_ref().trim();
        if self.seen.insert(candidate.to_string()) {
            debug!("Adding extension: {}", candidate);
            self.extensions.push(candidate.to_string());
        }
    }

    fn merge<I>(&mut self, iter: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for item in iter {
            self.push(item);
        }
    }

    fn into_vec(self) -> Vec<String> {
        self.extensions
    }
}

fn apply_config_file(path: &Path, flags: &mut Flags, lists: &mut Lists) -> Result<()> {
    if !path.exists() {
        debug!("Config file {:?} not found; skipping", path);
        return Ok(());
    }

    debug!("Loading config from {:?}", path);
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {:?}", path))?;

    let parsed: FileConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file {:?}", path))?;

    if let Some(section) = parsed.dendro {
        apply_dendro_section(section, flags, lists);
    }

    Ok(())
}

fn apply_dendro_section(section: DendroSection, flags: &mut Flags, lists: &mut Lists) {
    if let Some(values) = section.include {
        lists.includes.merge(values);
    }
    if let Some(values) = section.exclude {
        lists.excludes.merge(values);
    }
    if let Some(values) = section.allow_ext {
        lists.allowed.merge(values);
    }
    if let Some(values) = section.exclude_ext {
        lists.denied.merge(values);
    }
    if let Some(value) = section.root_path {
        flags.root_path = Some(value);
    }
    if let Some(value) = section.show_root {
        flags.show_root = value;
    }
    if let Some(value) = section.output {
        flags.output = Some(value);
    }
    if let Some(value) = section.clipboard {
        flags.clipboard = value;
    }
}

fn apply_ignore_file(path: &Path, excludes: &mut PathAccumulator) -> Result<()> {
    if !path.exists() {
        debug!("Ignore file {:?} not found; skipping", path);
        return Ok(());
    }

    debug!("Loading exclude paths from {:?}", path);
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read ignore file {:?}", path))?;

    for line in contents.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        excludes.push(trimmed);
    }

    Ok(())
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    dendro: Option<DendroSection>,
}

#[derive(Debug, Deserialize)]
struct DendroSection {
    include: Option<Vec<String>>,
    exclude: Option<Vec<String>>,
    allow_ext: Option<Vec<String>>,
    exclude_ext: Option<Vec<String>>,
    root_path: Option<PathBuf>,
    show_root: Option<bool>,
    output: Option<PathBuf>,
    clipboard: Option<bool>,
}
