use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Gather project files and metadata for analysis",
    after_help = "Run this from your project's root directory."
)]
pub struct Cli {
    /// Name the output file (default: project_files.txt)
    #[arg(short, long, value_name = "FILE", allow_hyphen_values = true)]
    pub name: Option<PathBuf>,

    /// Include Firebase config files
    #[arg(short, long)]
    pub firebase: bool,

    /// Analyze a Dart project instead of Python
    #[arg(short, long)]
    pub dart: bool,

    /// Use a predefined set of options from presets.toml
    #[arg(short, long, value_name = "NAME")]
    pub preset: Option<String>,

    /// Install this binary to ~/.local/bin or /usr/local/bin (requires root)
    #[arg(short, long)]
    pub install: bool,
}

/// Prints a clap error or help text to stdout and picks the exit code.
///
/// Help and version requests succeed; every other parse failure is a usage
/// error and exits with 1 instead of clap's default of 2.
pub fn report_parse_error(err: clap::Error) -> ExitCode {
    print!("{}", render_parse_error(&err));
    if is_usage_error(err.kind()) {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// The error text, with the usage line appended when clap left it out.
pub fn render_parse_error(err: &clap::Error) -> String {
    let mut text = err.to_string();
    if is_usage_error(err.kind()) && !text.contains("Usage:") {
        text.push_str(&format!("\n{}\n", Cli::command().render_usage()));
    }
    text
}

pub fn is_usage_error(kind: ErrorKind) -> bool {
    !matches!(
        kind,
        ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
    )
}
