//! Project metadata files embedded at the top of the output.

pub const PUBSPEC_FILE: &str = "pubspec.yaml";

/// Python metadata files, appended in this order when present.
pub const PYTHON_METADATA_FILES: &[&str] = &["requirements.txt", "setup.py", "pyproject.toml"];

/// The two header fields pulled out of `pubspec.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PubspecSummary {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl PubspecSummary {
    /// Line-prefix scan, not a YAML parser: multi-line and quoted values
    /// come through as written on the first line.
    pub fn scan(content: &str) -> Self {
        Self {
            name: first_value(content, "name:"),
            description: first_value(content, "description:"),
        }
    }

    pub fn header(&self) -> String {
        format!(
            "Project Name: {}\nDescription: {}\n",
            self.name.as_deref().unwrap_or_default(),
            self.description.as_deref().unwrap_or_default()
        )
    }
}

fn first_value(content: &str, prefix: &str) -> Option<String> {
    content
        .lines()
        .find(|line| line.starts_with(prefix))
        .and_then(|line| line.split_once(':'))
        .map(|(_, value)| value.trim().to_string())
}
