use crate::app::cli::Cli;
use crate::app::models::{Configuration, ProjectMode, DEFAULT_OUTPUT_FILENAME};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Deserialize, Debug)]
struct PresetsFile {
    #[serde(flatten)]
    presets: HashMap<String, PresetConfig>,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct PresetConfig {
    pub name: Option<PathBuf>,
    pub firebase: Option<bool>,
    pub dart: Option<bool>,
}

pub fn presets_path(home: &Path) -> PathBuf {
    home.join(".config")
        .join("gather_project_files")
        .join("presets.toml")
}

/// Loads `~/.config/gather_project_files/presets.toml`. A missing file means no presets.
pub fn load_presets_file() -> Result<HashMap<String, PresetConfig>> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    load_presets_from(&presets_path(&home))
}

fn load_presets_from(config_path: &Path) -> Result<HashMap<String, PresetConfig>> {
    if !config_path.exists() {
        return Ok(HashMap::new());
    }

    let content = fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config at {:?}", config_path))?;

    let parsed: PresetsFile = toml::from_str(&content).context("Failed to parse presets.toml")?;

    Ok(parsed.presets)
}

/// A broken presets file is only fatal when `--preset` asked for one.
pub fn resolve_config(cli: Cli, project_name: Option<&str>) -> Result<Configuration> {
    let presets = presets_or_warn(load_presets_file(), cli.preset.is_some())?;
    Ok(resolve_with_presets(cli, project_name, &presets))
}

fn presets_or_warn(
    loaded: Result<HashMap<String, PresetConfig>>,
    explicit: bool,
) -> Result<HashMap<String, PresetConfig>> {
    match loaded {
        Ok(presets) => Ok(presets),
        Err(err) if !explicit => {
            log::warn!("Ignoring presets: {:#}", err);
            Ok(HashMap::new())
        }
        Err(err) => Err(err),
    }
}

/// Merges CLI args over the selected preset.
///
/// Preset to use: `--preset` > current directory name > none. An explicit
/// `--name` wins over the preset's; boolean flags are enabled by either side.
pub fn resolve_with_presets(
    cli: Cli,
    project_name: Option<&str>,
    presets: &HashMap<String, PresetConfig>,
) -> Configuration {
    let preset_key = cli.preset.as_deref().or(project_name);
    let preset = preset_key
        .and_then(|k| presets.get(k))
        .cloned()
        .unwrap_or_default();

    if let Some(key) = cli.preset.as_deref() {
        if !presets.contains_key(key) {
            log::warn!("Preset '{}' not found, using defaults", key);
        }
    }

    let dart = cli.dart || preset.dart.unwrap_or(false);

    Configuration {
        output_filename: cli
            .name
            .or(preset.name)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_FILENAME)),
        include_firebase: cli.firebase || preset.firebase.unwrap_or(false),
        mode: if dart {
            ProjectMode::Dart
        } else {
            ProjectMode::Python
        },
    }
}
