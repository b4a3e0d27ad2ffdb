//! Floorwire Settings Crate
//!
//! Holds the tunable constants of the editor (snap tolerances, combination
//! proximity boxes, companion offsets, history depth, zoom limits) and their
//! file persistence.

pub mod config;
pub mod error;

pub use config::{
    CombinationSettings, Config, HistorySettings, Offset, PlacementSettings, SnappingSettings,
    ViewportSettings,
};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
