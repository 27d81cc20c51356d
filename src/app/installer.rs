//! Self-installation into a directory on `PATH`.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const INSTALL_NAME: &str = "gather_project_files";
pub const SYSTEM_BIN_DIR: &str = "/usr/local/bin";

/// Check if the process is running as root
#[cfg(unix)]
pub fn is_elevated() -> bool {
    unsafe { libc::geteuid() == 0 }
}

#[cfg(not(unix))]
pub fn is_elevated() -> bool {
    false
}

/// `<home>/.local/bin` when it is an existing writable directory, else the system bin dir.
pub fn install_dir(home: Option<&Path>) -> PathBuf {
    if let Some(local_bin) = home.map(|h| h.join(".local").join("bin")) {
        let usable = fs::metadata(&local_bin)
            .map(|m| m.is_dir() && !m.permissions().readonly())
            .unwrap_or(false);
        if usable {
            return local_bin;
        }
    }
    PathBuf::from(SYSTEM_BIN_DIR)
}

/// Copies `source` into `dir` as an executable named [`INSTALL_NAME`].
pub fn install_into(source: &Path, dir: &Path) -> Result<PathBuf> {
    let target = dir.join(INSTALL_NAME);
    log::debug!("Installing {} to {}", source.display(), target.display());

    fs::copy(source, &target)
        .with_context(|| format!("Error during installation to {}", target.display()))?;
    set_executable(&target)?;

    Ok(target)
}

#[cfg(unix)]
fn set_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
        .with_context(|| format!("Failed to make {} executable", path.display()))
}

#[cfg(not(unix))]
fn set_executable(_path: &Path) -> Result<()> {
    Ok(())
}

/// Installs the running executable. Requires root.
pub fn install_self() -> Result<PathBuf> {
    if !is_elevated() {
        bail!("Installation requires root privileges. Use sudo.");
    }

    let source = std::env::current_exe().context("Could not locate the running executable")?;
    let home = dirs::home_dir();
    install_into(&source, &install_dir(home.as_deref()))
}
