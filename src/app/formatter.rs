use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Header line written before each file's content.
pub fn block_header(path: &str) -> String {
    format!("---- {} ----\n", path)
}

/// The single text file everything is gathered into.
///
/// Each append opens the file in append mode and closes it again.
pub struct OutputFile {
    path: PathBuf,
}

impl OutputFile {
    /// Creates the parent directory if needed and truncates the file.
    pub fn create(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        fs::File::create(path)
            .with_context(|| format!("Failed to create output file {}", path.display()))?;

        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append_text(&self, text: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open output file {}", self.path.display()))?;
        file.write_all(text.as_bytes())
            .with_context(|| format!("Failed to write to {}", self.path.display()))
    }

    /// Appends `---- <label> ----` followed by `content` as-is.
    pub fn append_block(&self, label: &str, content: &str) -> Result<()> {
        let mut block = block_header(label);
        block.push_str(content);
        self.append_text(&block)
    }
}
