//! Configuration and settings management for Floorwire
//!
//! Provides configuration file handling and validation.
//! Supports JSON and TOML file formats stored in platform-specific directories.
//!
//! Configuration is organized into logical sections:
//! - Snapping tolerances (wall tiers, light soft snap, alignment)
//! - Combination proximity boxes and gang limits
//! - Companion placement offsets
//! - Undo history depth
//! - Viewport zoom limits

use crate::error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name used inside the platform config directory
pub const CONFIG_FILE_NAME: &str = "floorwire.toml";

/// A 2D displacement in document units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

impl Offset {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Snap tolerances, in document units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnappingSettings {
    /// First tier for wall-mounted devices (power points, switches)
    pub wall_mounted_tolerance: f64,
    /// Second tier tried when the first finds nothing
    pub wall_mounted_fallback_tolerance: f64,
    /// Soft snap for lights
    pub light_tolerance: f64,
    /// Radius used to hint that a click is near a wall
    pub wall_hint_tolerance: f64,
    /// Light-to-light row/column alignment threshold
    pub alignment_threshold: f64,
}

impl Default for SnappingSettings {
    fn default() -> Self {
        Self {
            wall_mounted_tolerance: 200.0,
            wall_mounted_fallback_tolerance: 500.0,
            light_tolerance: 15.0,
            wall_hint_tolerance: 150.0,
            alignment_threshold: 20.0,
        }
    }
}

/// Proximity rules evaluated when a dragged switch is released
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombinationSettings {
    /// Half-width of the box in which a switch meshes into a light
    pub light_proximity: f64,
    /// Half-width of the box in which two switches combine
    pub switch_proximity: f64,
    /// Smallest combined gang count
    pub min_gangs: usize,
    /// Largest combined gang count
    pub max_gangs: usize,
}

impl Default for CombinationSettings {
    fn default() -> Self {
        Self {
            light_proximity: 100.0,
            switch_proximity: 50.0,
            min_gangs: 2,
            max_gangs: 4,
        }
    }
}

/// Where companion devices land relative to the placed device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementSettings {
    /// Offset of the switch created alongside a new light
    pub companion_switch_offset: Offset,
    /// Offset of the light created alongside a new switch
    pub companion_light_offset: Offset,
}

impl Default for PlacementSettings {
    fn default() -> Self {
        Self {
            companion_switch_offset: Offset::new(100.0, 0.0),
            companion_light_offset: Offset::new(-100.0, -50.0),
        }
    }
}

/// Undo history settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    /// Maximum number of retained snapshots
    pub max_depth: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self { max_depth: 50 }
    }
}

/// Zoom limits and wheel steps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportSettings {
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Factor applied per wheel notch when zooming in
    pub wheel_zoom_in: f64,
    /// Factor applied per wheel notch when zooming out
    pub wheel_zoom_out: f64,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            min_zoom: 0.1,
            max_zoom: 5.0,
            wheel_zoom_in: 1.1,
            wheel_zoom_out: 0.9,
        }
    }
}

/// Complete editor configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub snapping: SnappingSettings,
    pub combination: CombinationSettings,
    pub placement: PlacementSettings,
    pub history: HistorySettings,
    pub viewport: ViewportSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default location of the config file, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("floorwire").join(CONFIG_FILE_NAME))
    }

    /// Load config from the default location, falling back to defaults
    /// when the file does not exist.
    pub fn load_or_default() -> SettingsResult<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            ConfigFormat::Json => serde_json::from_str(&content)?,
            ConfigFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    ///
    /// Creates missing parent directories.
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;
        let format = ConfigFormat::from_path(path)?;

        let content = match format {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                SettingsError::ConfigDirectory(format!("{}: {}", parent.display(), e))
            })?;
        }
        std::fs::write(path, content)?;
        tracing::debug!("Saved config to {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        let s = &self.snapping;
        for (key, value) in [
            ("snapping.wall_mounted_tolerance", s.wall_mounted_tolerance),
            (
                "snapping.wall_mounted_fallback_tolerance",
                s.wall_mounted_fallback_tolerance,
            ),
            ("snapping.light_tolerance", s.light_tolerance),
            ("snapping.wall_hint_tolerance", s.wall_hint_tolerance),
            ("snapping.alignment_threshold", s.alignment_threshold),
        ] {
            ensure_positive(key, value)?;
        }
        if s.wall_mounted_fallback_tolerance < s.wall_mounted_tolerance {
            return Err(ConfigError::Inconsistent(
                "fallback wall tolerance is smaller than the primary tier".to_string(),
            ));
        }

        let c = &self.combination;
        ensure_positive("combination.light_proximity", c.light_proximity)?;
        ensure_positive("combination.switch_proximity", c.switch_proximity)?;
        if c.min_gangs < 2 {
            return Err(ConfigError::out_of_range(
                "combination.min_gangs",
                c.min_gangs,
            ));
        }
        if c.max_gangs > 4 {
            return Err(ConfigError::out_of_range(
                "combination.max_gangs",
                c.max_gangs,
            ));
        }
        if c.min_gangs > c.max_gangs {
            return Err(ConfigError::Inconsistent(
                "min_gangs exceeds max_gangs".to_string(),
            ));
        }

        let p = &self.placement;
        for (key, offset) in [
            ("placement.companion_switch_offset", p.companion_switch_offset),
            ("placement.companion_light_offset", p.companion_light_offset),
        ] {
            if !offset.x.is_finite() || !offset.y.is_finite() {
                return Err(ConfigError::out_of_range(
                    key,
                    format!("({}, {})", offset.x, offset.y),
                ));
            }
        }

        if self.history.max_depth == 0 {
            return Err(ConfigError::out_of_range("history.max_depth", 0));
        }

        let v = &self.viewport;
        ensure_positive("viewport.min_zoom", v.min_zoom)?;
        ensure_positive("viewport.max_zoom", v.max_zoom)?;
        ensure_positive("viewport.wheel_zoom_in", v.wheel_zoom_in)?;
        ensure_positive("viewport.wheel_zoom_out", v.wheel_zoom_out)?;
        if v.min_zoom > v.max_zoom {
            return Err(ConfigError::Inconsistent(
                "min_zoom exceeds max_zoom".to_string(),
            ));
        }

        Ok(())
    }
}

fn ensure_positive(key: &str, value: f64) -> ConfigResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::out_of_range(key, value))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> ConfigResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}
