//! Pipeline settings with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::environment::{CloudFieldConfig, TerrainConfig};
use crate::error::ConfigError;

const SETTINGS_FILE: &str = "settings.ron";

/// Top-level settings of a generation pass.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PipelineSettings {
    /// Directory holding the pre-authored asset variants.
    pub assets_dir: PathBuf,
    /// Path of the part configuration document (`.json` or `.ron`).
    pub parts_config: PathBuf,
    /// How variant file names relate to part identifiers.
    pub variants: VariantConvention,
    /// Suffix of the group node created for each generated part.
    pub generated_suffix: String,
    /// Keep locator children of imported parts. When false they are deleted.
    pub keep_locators: bool,
    /// Substring that marks a child node as a locator.
    pub locator_marker: String,
    /// Seed of the shared random stream. `None` seeds from OS entropy.
    pub seed: Option<u64>,
    /// Terrain parameters.
    pub terrain: TerrainConfig,
    /// Cloud field parameters.
    pub clouds: CloudFieldConfig,
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

/// Naming convention of asset variant files: `<part><separator>*.<ext>`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct VariantConvention {
    /// Text between the part identifier and the rest of the file name.
    pub separator: String,
    /// Accepted file extensions, without the dot. Compared case-insensitively.
    pub extensions: Vec<String>,
}

impl Default for VariantConvention {
    fn default() -> Self {
        Self {
            separator: "_".to_string(),
            extensions: vec!["ma".to_string()],
        }
    }
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from("assets"),
            parts_config: PathBuf::from("parts.json"),
            variants: VariantConvention::default(),
            generated_suffix: "_GENERATED".to_string(),
            keep_locators: true,
            locator_marker: "LOC".to_string(),
            seed: None,
            terrain: TerrainConfig::default(),
            clouds: CloudFieldConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl PipelineSettings {
    /// Platform config directory for the pipeline, e.g. `~/.config/emerge`.
    pub fn default_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("emerge"))
    }

    /// Load settings from the given directory, or create a default settings file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let settings_path = config_dir.join(SETTINGS_FILE);

        if settings_path.exists() {
            let settings = Self::read(&settings_path)?;
            log::info!("Loaded settings from {}", settings_path.display());
            Ok(settings)
        } else {
            let settings = Self::default();
            settings.save(config_dir)?;
            log::info!("Created default settings at {}", settings_path.display());
            Ok(settings)
        }
    }

    /// Save settings to the given directory as `settings.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let settings_path = config_dir.join(SETTINGS_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&settings_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Re-read the settings file: `Some(new_settings)` if it changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_settings = Self::read(&config_dir.join(SETTINGS_FILE))?;

        if &new_settings != self {
            log::info!("Settings reloaded with changes");
            Ok(Some(new_settings))
        } else {
            Ok(None)
        }
    }

    /// Validate the numeric sections.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.terrain.validate()?;
        self.clouds.validate()?;
        Ok(())
    }

    /// Resolve `parts_config` and `assets_dir` against a base directory when relative.
    pub fn resolve_paths(&mut self, base: &Path) {
        if self.assets_dir.is_relative() {
            self.assets_dir = base.join(&self.assets_dir);
        }
        if self.parts_config.is_relative() {
            self.parts_config = base.join(&self.parts_config);
        }
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        ron::from_str(&contents).map_err(ConfigError::RonParseError)
    }
}
