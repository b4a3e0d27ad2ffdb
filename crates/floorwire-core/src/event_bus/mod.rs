//! # Event Bus Module
//!
//! Provides the subscription mechanism through which front ends learn about
//! document changes.
//!
//! ## Overview
//!
//! - The document store publishes one typed event per completed mutation
//! - Subscribers filter by category and receive events synchronously
//! - Each store owns its own bus; there is no global instance
//!
//! ## Usage
//!
//! ```rust
//! use floorwire_core::event_bus::{DocumentEvent, EventBus, EventCategory, EventFilter};
//!
//! let bus = EventBus::new();
//! let subscription = bus.subscribe(
//!     EventFilter::Categories(vec![EventCategory::Structure]),
//!     |event| {
//!         if let DocumentEvent::Structure(change) = event {
//!             println!("structure changed: {:?}", change);
//!         }
//!     },
//! );
//! bus.unsubscribe(subscription);
//! ```

mod bus;
mod events;

pub use bus::*;
pub use events::*;
