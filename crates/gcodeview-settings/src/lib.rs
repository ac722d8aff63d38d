//! GCodeView Settings Crate
//!
//! Handles the configuration file: view scale and canvas, interaction radii
//! and editor history depth.

pub mod config;
pub mod error;

pub use config::{
    default_config_path, Config, ConfigFormat, EditorSettings, InteractionSettings, ViewSettings,
};
pub use error::{ConfigError, SettingsError, SettingsResult};
