use crate::app::models::{Configuration, FileEntry, ProjectMode};
use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::{DirEntry, WalkBuilder};
use pathdiff::diff_paths;
use std::fs;
use std::path::{Path, PathBuf};

/// Substrings that mark a Firebase config file anywhere in a path.
pub const FIREBASE_MARKERS: &[&str] = &["firebase.json", ".firebase."];

pub struct Scanner {
    root: PathBuf,
    mode: ProjectMode,
    include_firebase: bool,
    source_set: GlobSet,
    skip: Option<PathBuf>,
}

impl Scanner {
    pub fn new(root: PathBuf, config: &Configuration) -> Result<Self> {
        Ok(Self {
            root,
            mode: config.mode,
            include_firebase: config.include_firebase,
            source_set: build_globset(&[config.mode.source_glob()])?,
            skip: None,
        })
    }

    /// Never collect `path`; used to keep the output file out of its own content.
    pub fn skipping(mut self, path: &Path) -> Self {
        self.skip = fs::canonicalize(path).ok();
        self
    }

    /// Walks every file below the root, hidden and git-ignored ones included.
    pub fn scan(&self) -> Vec<FileEntry> {
        let mut entries = Vec::new();

        let walker = WalkBuilder::new(&self.root)
            .standard_filters(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(|entry| entry.file_name() != ".git")
            .build();

        for result in walker {
            match result {
                Ok(entry) => {
                    if let Some(processed) = self.process_entry(&entry) {
                        entries.push(processed);
                    }
                }
                Err(err) => log::warn!("Error walking entry: {}", err),
            }
        }

        entries
    }

    /// Anything that is not a directory is a candidate. Links are not
    /// followed, so a dangling one still reaches the reader and fails there.
    fn process_entry(&self, entry: &DirEntry) -> Option<FileEntry> {
        let is_dir = entry.file_type().map_or(true, |t| t.is_dir());
        let path = entry.path();
        if is_dir || path.is_dir() {
            return None;
        }

        let relative = diff_paths(path, &self.root)?;
        let display_path = format!("./{}", relative.to_string_lossy().replace('\\', "/"));
        let file_name = path.file_name()?.to_string_lossy();

        if !self.matches(&display_path, &file_name) {
            return None;
        }

        if let Some(skip) = &self.skip {
            if fs::canonicalize(path).ok().as_ref() == Some(skip) {
                log::debug!("Skipping output file {}", display_path);
                return None;
            }
        }

        Some(FileEntry {
            path: path.to_path_buf(),
            display_path,
        })
    }

    /// The inclusion filter for a walked file.
    pub fn matches(&self, display_path: &str, file_name: &str) -> bool {
        if self.source_set.is_match(display_path) {
            return true;
        }
        if self.mode.includes_extensionless() && !file_name.contains('.') {
            return true;
        }
        self.include_firebase
            && FIREBASE_MARKERS
                .iter()
                .any(|marker| display_path.contains(marker))
    }
}

fn build_globset(patterns: &[&str]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        builder.add(Glob::new(pat).with_context(|| format!("Invalid glob pattern: {}", pat))?);
    }
    Ok(builder.build()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn config(mode: ProjectMode, include_firebase: bool) -> Configuration {
        Configuration {
            mode,
            include_firebase,
            ..Configuration::default()
        }
    }

    fn create_project(dir: &Path) {
        fs::create_dir_all(dir.join("pkg/sub")).unwrap();
        fs::create_dir_all(dir.join("lib")).unwrap();
        fs::create_dir_all(dir.join(".git/objects")).unwrap();
        fs::create_dir_all(dir.join(".venv")).unwrap();

        fs::write(dir.join("main.py"), "print('hi')\n").unwrap();
        fs::write(dir.join("pkg/__init__.py"), "").unwrap();
        fs::write(dir.join("pkg/sub/util.py"), "X = 1\n").unwrap();
        fs::write(dir.join(".venv/site.py"), "# hidden\n").unwrap();
        fs::write(dir.join("lib/main.dart"), "void main() {}\n").unwrap();
        fs::write(dir.join("Makefile"), "all:\n").unwrap();
        fs::write(dir.join("README.md"), "# readme\n").unwrap();
        fs::write(dir.join("firebase.json"), "{}\n").unwrap();
        fs::write(dir.join(".gitignore"), "*.pyc\n").unwrap();
        fs::write(dir.join(".git/HEAD"), "ref: refs/heads/main\n").unwrap();
        fs::write(dir.join(".git/objects/abc123"), "blob\n").unwrap();
    }

    fn scanned(dir: &Path, config: &Configuration) -> Vec<String> {
        Scanner::new(dir.to_path_buf(), config)
            .unwrap()
            .scan()
            .into_iter()
            .map(|e| e.display_path)
            .collect()
    }

    #[test]
    fn test_python_mode_collects_py_files_only() {
        let temp = tempdir().unwrap();
        create_project(temp.path());

        let found = scanned(temp.path(), &config(ProjectMode::Python, false));
        assert_eq!(
            found,
            vec![
                "./.venv/site.py",
                "./main.py",
                "./pkg/__init__.py",
                "./pkg/sub/util.py",
            ]
        );
    }

    #[test]
    fn test_dart_mode_collects_dart_and_extensionless() {
        let temp = tempdir().unwrap();
        create_project(temp.path());

        let found = scanned(temp.path(), &config(ProjectMode::Dart, false));
        assert_eq!(found, vec!["./Makefile", "./lib/main.dart"]);
    }

    #[test]
    fn test_firebase_files_added_in_any_mode() {
        let temp = tempdir().unwrap();
        create_project(temp.path());
        fs::write(temp.path().join("lib/app.firebase.rules"), "rules\n").unwrap();

        let found = scanned(temp.path(), &config(ProjectMode::Python, true));
        assert!(found.contains(&"./firebase.json".to_string()));
        assert!(found.contains(&"./lib/app.firebase.rules".to_string()));
        assert!(found.contains(&"./main.py".to_string()));

        let found = scanned(temp.path(), &config(ProjectMode::Dart, true));
        assert!(found.contains(&"./firebase.json".to_string()));
        assert!(!found.contains(&"./main.py".to_string()));
    }

    #[test]
    fn test_git_directory_never_collected() {
        let temp = tempdir().unwrap();
        create_project(temp.path());

        let found = scanned(temp.path(), &config(ProjectMode::Dart, true));
        assert!(found.iter().all(|p| !p.starts_with("./.git/")));
    }

    #[test]
    fn test_skipped_path_is_excluded() {
        let temp = tempdir().unwrap();
        create_project(temp.path());
        let output = temp.path().join("context");
        fs::write(&output, "previous run\n").unwrap();

        let dart = config(ProjectMode::Dart, false);
        assert!(scanned(temp.path(), &dart).contains(&"./context".to_string()));

        let found: Vec<String> = Scanner::new(temp.path().to_path_buf(), &dart)
            .unwrap()
            .skipping(&output)
            .scan()
            .into_iter()
            .map(|e| e.display_path)
            .collect();
        assert_eq!(found, vec!["./Makefile", "./lib/main.dart"]);
    }

    #[test]
    fn test_matches_uses_full_path_suffix() {
        let scanner = Scanner::new(PathBuf::from("."), &config(ProjectMode::Python, false)).unwrap();
        assert!(scanner.matches("./a/b/c.py", "c.py"));
        assert!(!scanner.matches("./a/b/c.pyc", "c.pyc"));
        assert!(!scanner.matches("./firebase.json", "firebase.json"));
        assert!(!scanner.matches("./LICENSE", "LICENSE"));
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_is_listed() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("a.py"), "a\n").unwrap();
        std::os::unix::fs::symlink(temp.path().join("gone.py"), temp.path().join("link.py"))
            .unwrap();

        let found = scanned(temp.path(), &config(ProjectMode::Python, false));
        assert_eq!(found, vec!["./a.py", "./link.py"]);
    }
}
