//! Configuration file handling for GCodeView
//!
//! Supports JSON and TOML file formats, chosen by file extension, stored in
//! the platform-specific config directory by default.
//!
//! Configuration is organized into logical sections:
//! - View settings (scale, canvas size, offsets)
//! - Interaction radii for hit testing and cluster expansion
//! - Editor settings (undo depth)
//!
//! Every section is `#[serde(default)]`, so a file only needs the keys it
//! changes.

use gcodeview_core::constants::{
    CENTER_HIT_RADIUS_PX, DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, DEFAULT_SCALE,
    EXPAND_RING_RADIUS_PX, MAX_HISTORY_DEPTH, NODE_HIT_RADIUS_PX, SUB_NODE_HIT_RADIUS_PX,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{ConfigError, SettingsError, SettingsResult};

/// File name used inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name inside the platform config directory
pub const APP_DIR_NAME: &str = "gcodeview";

/// On-disk format, derived from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Self::Json),
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Self::Toml),
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Machine-to-screen mapping
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSettings {
    /// Pixels per machine unit
    pub scale: f64,
    pub canvas_width: f64,
    pub canvas_height: f64,
    /// Screen x of the machine origin; canvas centre when unset
    pub offset_x: Option<f64>,
    /// Screen y of the machine origin; canvas centre when unset
    pub offset_y: Option<f64>,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            offset_x: None,
            offset_y: None,
        }
    }
}

impl ViewSettings {
    /// Effective origin offsets
    pub fn offsets(&self) -> (f64, f64) {
        (
            self.offset_x.unwrap_or(self.canvas_width / 2.0),
            self.offset_y.unwrap_or(self.canvas_height / 2.0),
        )
    }
}

/// Pixel radii for canvas interaction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionSettings {
    pub hit_radius: f64,
    pub ring_radius: f64,
    pub sub_node_hit_radius: f64,
    pub center_hit_radius: f64,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            hit_radius: NODE_HIT_RADIUS_PX,
            ring_radius: EXPAND_RING_RADIUS_PX,
            sub_node_hit_radius: SUB_NODE_HIT_RADIUS_PX,
            center_hit_radius: CENTER_HIT_RADIUS_PX,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Undo snapshots kept
    pub history_depth: usize,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            history_depth: MAX_HISTORY_DEPTH,
        }
    }
}

/// Complete application configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub view: ViewSettings,
    pub interaction: InteractionSettings,
    pub editor: EditorSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("{}: {}", path.display(), e))
        })?;

        let config: Self = match format {
            ConfigFormat::Json => serde_json::from_str(&content)?,
            ConfigFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;
        let format = ConfigFormat::from_path(path)?;

        let content = match format {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content).map_err(|e| {
            SettingsError::SaveError(format!("{}: {}", path.display(), e))
        })?;

        debug!("Saved config to {}", path.display());
        Ok(())
    }

    /// Load `path` if given, else the default file if it exists, else defaults
    pub fn load_or_default(path: Option<&Path>) -> SettingsResult<Self> {
        if let Some(path) = path {
            return Self::load_from_file(path);
        }
        match default_config_path() {
            Ok(path) if path.exists() => Self::load_from_file(&path),
            Ok(_) => Ok(Self::default()),
            Err(err) => {
                debug!("No config directory: {}", err);
                Ok(Self::default())
            }
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        let view = &self.view;
        if !(view.scale.is_finite() && view.scale > 0.0) {
            return Err(SettingsError::invalid("view.scale", "must be finite and > 0"));
        }
        if view.canvas_width.is_nan()
            || view.canvas_height.is_nan()
            || view.canvas_width <= 0.0
            || view.canvas_height <= 0.0
        {
            return Err(SettingsError::invalid(
                "view.canvas_width",
                "canvas dimensions must be > 0",
            ));
        }
        for (key, offset) in [("view.offset_x", view.offset_x), ("view.offset_y", view.offset_y)] {
            if offset.is_some_and(|v| !v.is_finite()) {
                return Err(SettingsError::invalid(key, "must be finite"));
            }
        }

        let radii = [
            ("interaction.hit_radius", self.interaction.hit_radius),
            ("interaction.ring_radius", self.interaction.ring_radius),
            (
                "interaction.sub_node_hit_radius",
                self.interaction.sub_node_hit_radius,
            ),
            (
                "interaction.center_hit_radius",
                self.interaction.center_hit_radius,
            ),
        ];
        for (key, radius) in radii {
            if radius.is_nan() || radius <= 0.0 {
                return Err(SettingsError::invalid(key, "must be > 0"));
            }
        }

        if self.editor.history_depth == 0 {
            return Err(SettingsError::invalid("editor.history_depth", "must be > 0"));
        }

        Ok(())
    }
}

/// `<config dir>/gcodeview/config.toml`
pub fn default_config_path() -> SettingsResult<PathBuf> {
    let dir = dirs::config_dir().ok_or_else(|| {
        ConfigError::UnsupportedPlatform(std::env::consts::OS.to_string())
    })?;
    Ok(dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}
