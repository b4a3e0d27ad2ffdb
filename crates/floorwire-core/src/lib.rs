//! # Floorwire Core
//!
//! Core types and utilities shared by the Floorwire crates.
//! Provides the error types, measurement units and the document event bus
//! used to notify front ends about state changes.

pub mod error;
pub mod event_bus;
pub mod units;

pub use error::{DocumentError, Error, ImportError, Result};

pub use event_bus::{
    DocumentEvent, EventBus, EventCategory, EventFilter, HistoryEvent,
    ProjectEvent, SelectionEvent, StructureEvent, SubscriptionId, ViewEvent,
};

pub use units::Units;
