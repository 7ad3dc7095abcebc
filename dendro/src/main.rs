use anyhow::{Context, Result}; // Use anyhow for easy error handling in the binary
use arboard::Clipboard;
use clap::{Parser, ValueEnum};
use dendro_lib::{generate_structure, legacy_to_unicode, TreeConfig}; // Import from our library
use log::{debug, error, info, warn, LevelFilter};
use std::env;
use std::fs::File;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

mod config_loader;

use config_loader::{build_run_settings, OutputTarget};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Generates a directory structure tree.",
    long_about = "Dendro walks one or more directories and renders their structure as a tree, leaving out excluded paths and filtered file extensions.\n\nThe UTF-8 tree is written to a file (structure.txt by default) or copied to the clipboard. A second render is echoed to the console, using legacy console glyphs on Windows and UTF-8 elsewhere unless --console says otherwise."
)]
pub struct Cli {
    /// Directories to include. Each is rendered as its own labelled root.
    /// Can be repeated or comma-separated: -i src -i docs, or -i src,docs
    #[arg(short = 'i', long = "include", value_name = "DIR")]
    pub(crate) include_dirs: Vec<String>,

    /// Directories or files to exclude (exact paths). Can be repeated or comma-separated.
    #[arg(short = 'e', long = "exclude", value_name = "PATH")]
    pub(crate) exclude_paths: Vec<String>,

    /// Output file path [default: structure.txt].
    #[arg(short = 'o', long, value_name = "FILE", conflicts_with = "clipboard")]
    pub(crate) output: Option<PathBuf>,

    /// Copy result to the clipboard instead of writing a file.
    #[arg(short = 'c', long, conflicts_with = "output")]
    pub(crate) clipboard: bool,

    /// File extensions to include, with the leading dot (comma-separated), e.g. --allow-ext .rs,.toml
    #[arg(long = "allow-ext", value_name = "EXT")]
    pub(crate) allowed_extensions: Vec<String>,

    /// File extensions to exclude, with the leading dot (comma-separated).
    #[arg(long = "exclude-ext", value_name = "EXT")]
    pub(crate) excluded_extensions: Vec<String>,

    /// Root directory for structure generation. Must also be given to --include or --exclude.
    #[arg(long, value_name = "DIR")]
    pub(crate) root_path: Option<PathBuf>,

    /// Display the root directory in the output.
    #[arg(long)]
    pub(crate) show_root: bool,

    /// Glyphs used when echoing the tree to the console.
    #[arg(long, value_enum, default_value_t = ConsoleMode::platform_default())]
    pub(crate) console: ConsoleMode,

    /// Apply an additional TOML config file after the global and local ones.
    #[arg(long = "config", value_name = "FILE")]
    pub(crate) config_path: Option<PathBuf>,

    /// Ignore global and project config and ignore files.
    #[arg(long)]
    pub(crate) no_config: bool,

    /// Enable verbose output. Use -v for info, -vv for debug, -vvv for trace.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub(crate) verbose: u8,
}

/// How the tree is echoed to the console.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConsoleMode {
    /// UTF-8 box-drawing glyphs.
    Utf8,
    /// Single-byte code page 437 glyphs for legacy consoles.
    Legacy,
    /// Do not echo the tree.
    Off,
}

impl ConsoleMode {
    fn platform_default() -> Self {
        if cfg!(windows) {
            ConsoleMode::Legacy
        } else {
            ConsoleMode::Utf8
        }
    }
}

#[cfg(test)]
impl Cli {
    pub(crate) fn test_default() -> Self {
        Self {
            include_dirs: Vec::new(),
            exclude_paths: Vec::new(),
            output: None,
            clipboard: false,
            allowed_extensions: Vec::new(),
            excluded_extensions: Vec::new(),
            root_path: None,
            show_root: false,
            console: ConsoleMode::Off,
            config_path: None,
            no_config: false,
            verbose: 0,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // --- Initialize Logging ---
    let log_level = match cli.verbose {
        0 => LevelFilter::Warn,  // Default: Show warnings and errors
        1 => LevelFilter::Info,  // -v: Show info, warnings, errors
        2 => LevelFilter::Debug, // -vv: Show debug, info, warnings, errors
        _ => LevelFilter::Trace, // -vvv and more: Show everything
    };

    env_logger::Builder::new().filter_level(log_level).init();

    info!("Log level set to: {}", log_level);
    debug!("Parsed arguments: {:?}", cli);

    let working_dir = env::current_dir().context("Failed to get current working directory")?;
    let settings = build_run_settings(&cli, &working_dir)?;

    // --- Persisted render (always UTF-8) ---
    let mut config = settings.tree_config;
    config.use_utf8 = true;
    let structure = render(&config)?;

    if structure.is_empty() {
        info!("No entries were rendered (everything excluded, filtered, or unreadable).");
    }

    // --- Handle Output ---
    match settings.output {
        OutputTarget::Clipboard => {
            info!("Copying structure to clipboard...");
            let text = String::from_utf8(structure).context("Rendered structure is not UTF-8")?;
            let mut clipboard = Clipboard::new().context("Failed to initialize clipboard")?;
            clipboard
                .set_text(text)
                .context("Failed to copy structure to clipboard")?;
            info!("Successfully copied structure to clipboard.");
        }
        OutputTarget::File(output_path) => {
            info!("Writing structure to file: {:?}", output_path);
            let mut file = File::create(&output_path)
                .with_context(|| format!("Failed to create output file: {:?}", output_path))?;
            file.write_all(&structure)
                .with_context(|| format!("Failed to write structure to file: {:?}", output_path))?;
            info!("Successfully wrote structure to {:?}", output_path);
        }
    }

    // --- Console echo (independent second render, never fatal) ---
    if cli.console != ConsoleMode::Off {
        config.use_utf8 = cli.console == ConsoleMode::Utf8;
        match render(&config) {
            Ok(echo) => {
                if let Err(e) = echo_to_console(&echo, cli.console) {
                    warn!("Failed to echo structure to the console: {}", e);
                }
            }
            Err(e) => warn!("Skipping console echo: {:#}", e),
        }
    }

    Ok(())
}

fn echo_to_console(echo: &[u8], mode: ConsoleMode) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    // The Windows console API only takes Unicode text
    if mode == ConsoleMode::Legacy && cfg!(windows) && stdout.is_terminal() {
        stdout.write_all(legacy_to_unicode(echo).as_bytes())?;
    } else {
        stdout.write_all(echo)?;
    }
    stdout.flush()
}

fn render(config: &TreeConfig) -> Result<Vec<u8>> {
    match generate_structure(config) {
        Ok(structure) => Ok(structure),
        Err(e) => {
            error!("Error during dendro render: {}", e);
            Err(e.into()) // Convert TreeError to anyhow::Error
        }
    }
}
