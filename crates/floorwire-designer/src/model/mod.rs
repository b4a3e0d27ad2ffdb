//! Document model: device nodes, wiring edges, walls and the document root.
//!
//! Field names on the wire are camelCase to match the persisted project
//! format. Device subtypes live in a per-kind variant so a node can never
//! carry a subtype that belongs to another kind.

/// Declares a string identifier newtype that serializes as a bare string.
macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord,
            serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Fresh random identifier.
            pub fn generate() -> Self {
                Self(uuid::Uuid::new_v4().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

mod document;
mod edge;
mod node;

pub use crate::geometry::Point;
pub use document::{
    Background, BackgroundKind, Document, Meta, MetaUpdate, WallSegment, UNTITLED_NAME,
};
pub use edge::{Edge, EdgeData, EdgeId};
pub use node::{
    Device, DeviceKind, DeviceNode, LightType, NodeData, NodeId, PowerType, SwitchType,
};
