use std::path::PathBuf;

pub const DEFAULT_OUTPUT_FILENAME: &str = "project_files.txt";

/// Which kind of project is being gathered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectMode {
    #[default]
    Python,
    Dart,
}

impl ProjectMode {
    /// Glob matching the source files of this mode.
    pub fn source_glob(self) -> &'static str {
        match self {
            ProjectMode::Python => "*.py",
            ProjectMode::Dart => "*.dart",
        }
    }

    /// Dart projects also pick up files with no extension at all.
    pub fn includes_extensionless(self) -> bool {
        matches!(self, ProjectMode::Dart)
    }
}

/// The final configuration after merging presets and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    pub output_filename: PathBuf,
    pub include_firebase: bool,
    pub mode: ProjectMode,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            output_filename: PathBuf::from(DEFAULT_OUTPUT_FILENAME),
            include_firebase: false,
            mode: ProjectMode::Python,
        }
    }
}

/// A single file selected for the output during the scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    pub display_path: String,
}
