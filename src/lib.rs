//! # Floorwire
//!
//! Editor core for electrical overlays on floorplans:
//! - Wall-aware snapping of power points, switches and lights
//! - Companion placement (a light brings its switch, a switch its light)
//! - Drag handling with light alignment guides
//! - Switch-to-light meshing and multi-gang switch combination
//! - Undoable document store with a JSON project format
//!
//! ## Architecture
//!
//! Floorwire is organized as a workspace with multiple crates:
//!
//! 1. **floorwire-core** - Error types, units, document event bus
//! 2. **floorwire-settings** - Tolerances and limits, config file persistence
//! 3. **floorwire-designer** - Geometry, document store and interaction engine
//! 4. **floorwire** - Headless command line front end

pub use floorwire_core as core;
pub use floorwire_designer as designer;
pub use floorwire_settings as settings;

pub use floorwire_core::{DocumentError, DocumentEvent, Error, EventBus, ImportError, Result, Units};

pub use floorwire_designer::{
    Device, DeviceKind, DeviceNode, DeviceSchedule, Document, DocumentStore, DragOutcome, Edge,
    FloorplanEditor, Placement, Point, SvgWallImporter, WallSegment,
};

pub use floorwire_settings::{Config, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging with the default configuration
///
/// Log lines go to stderr so that command output on stdout stays clean.
/// `RUST_LOG` overrides the default `info` level.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
