// Declare modules
pub mod cli;
pub mod config;
pub mod formatter;
pub mod installer;
pub mod metadata;
pub mod models;
pub mod scanner;

use anyhow::{Context, Result};
use clap::Parser;
use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::process::ExitCode;

use self::cli::Cli;
use self::config::resolve_config;
use self::formatter::OutputFile;
use self::metadata::{PubspecSummary, PUBSPEC_FILE, PYTHON_METADATA_FILES};
use self::models::{Configuration, ProjectMode};
use self::scanner::Scanner;

/// Parses arguments and dispatches to installation or collection.
pub fn run() -> Result<ExitCode> {
    // 1. Parse Args (help and usage errors stop here)
    let args = match Cli::try_parse() {
        Ok(args) => args,
        Err(err) => return Ok(cli::report_parse_error(err)),
    };

    // 2. Install is its own path and never collects
    if args.install {
        let target = installer::install_self()?;
        println!("Script installed successfully to {}", target.display());
        return Ok(ExitCode::SUCCESS);
    }

    // 3. Resolve Configuration
    let current_dir = env::current_dir().context("Failed to get current directory")?;
    let project_name = current_dir.file_name().and_then(|n| n.to_str());
    let config = resolve_config(args, project_name)?;
    log::debug!("Resolved configuration: {:?}", config);

    // 4. Gather into the output file
    let count = collect(&current_dir, &config)?;
    log::info!("Collected {} files", count);

    println!("Output written to: {}", config.output_filename.display());
    Ok(ExitCode::SUCCESS)
}

/// Writes metadata and every matching file under `root` into the output file.
///
/// A relative `output_filename` is taken relative to `root`. Returns the
/// number of walked files written.
pub fn collect(root: &Path, config: &Configuration) -> Result<usize> {
    let output_path = root.join(&config.output_filename);
    let output = OutputFile::create(&output_path)?;

    match config.mode {
        ProjectMode::Dart => write_pubspec(root, &output)?,
        ProjectMode::Python => write_python_metadata(root, &output)?,
    }

    let entries = Scanner::new(root.to_path_buf(), config)?
        .skipping(output.path())
        .scan();

    for entry in &entries {
        log::debug!("Adding {}", entry.display_path);
        let content = fs::read_to_string(&entry.path)
            .with_context(|| format!("Failed to read {}", entry.path.display()))?;
        output.append_block(&entry.display_path, &content)?;
    }

    Ok(entries.len())
}

fn write_pubspec(root: &Path, output: &OutputFile) -> Result<()> {
    let content = match fs::read_to_string(root.join(PUBSPEC_FILE)) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            anyhow::bail!("Cannot find pubspec.yaml. Are you in a Dart project directory?")
        }
        Err(e) => return Err(e).context("Failed to read pubspec.yaml"),
    };

    let summary = PubspecSummary::scan(&content);
    output.append_text(&summary.header())?;
    output.append_block(PUBSPEC_FILE, &content)
}

fn write_python_metadata(root: &Path, output: &OutputFile) -> Result<()> {
    for file_name in PYTHON_METADATA_FILES {
        match fs::read_to_string(root.join(file_name)) {
            Ok(content) => {
                log::debug!("Adding metadata file {}", file_name);
                output.append_block(file_name, &content)?;
            }
            Err(e) if e.kind() == ErrorKind::NotFound => continue,
            Err(e) => return Err(e).with_context(|| format!("Failed to read {}", file_name)),
        }
    }
    Ok(())
}
