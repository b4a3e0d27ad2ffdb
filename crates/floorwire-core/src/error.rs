//! Error handling for Floorwire
//!
//! Provides error types for the layers that can actually fail:
//! - Document errors (loading/validating persisted projects)
//! - Import errors (extracting walls from vector floorplans)
//!
//! Operations that target a stale node or edge id are not errors; they
//! no-op and report that through their return value instead.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Document error type
///
/// Raised when a persisted project fails to parse or violates the
/// document invariants. Loading is all-or-nothing: any of these
/// rejects the whole document.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DocumentError {
    /// The payload is not valid JSON or does not match the document shape
    #[error("Invalid document JSON: {reason}")]
    InvalidJson {
        /// The parser message.
        reason: String,
    },

    /// An entity carries an empty identifier
    #[error("Empty {entity} id")]
    EmptyId {
        /// The entity kind ("node", "edge", "wall").
        entity: &'static str,
    },

    /// Two entities of the same kind share an identifier
    #[error("Duplicate {entity} id: {id}")]
    DuplicateId {
        /// The entity kind ("node", "edge", "wall").
        entity: &'static str,
        /// The repeated identifier.
        id: String,
    },

    /// An edge references a node that does not exist
    #[error("Edge {edge} references missing node {node}")]
    DanglingEdge {
        /// The offending edge.
        edge: String,
        /// The missing endpoint.
        node: String,
    },

    /// An edge connects a node to itself
    #[error("Edge {edge} connects node {node} to itself")]
    SelfLoop {
        /// The offending edge.
        edge: String,
        /// The node on both ends.
        node: String,
    },

    /// A node carries a subtype field that belongs to another device kind
    #[error("Node {node} of kind {kind} carries foreign field {field}")]
    KindMismatch {
        /// The offending node.
        node: String,
        /// The node's kind.
        kind: String,
        /// The foreign field name.
        field: &'static str,
    },

    /// A coordinate or numeric field is NaN or infinite
    #[error("Non-finite value in {context}")]
    NonFinite {
        /// Where the value was found.
        context: String,
    },
}

/// Import error type
///
/// Represents errors raised while extracting wall geometry from a
/// vector floorplan.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ImportError {
    /// The content has no `<svg>` root element
    #[error("Invalid SVG: missing <svg> element")]
    MissingSvgRoot,

    /// A numeric attribute could not be parsed
    #[error("Invalid value for attribute '{attribute}' on <{element}>: {value}")]
    InvalidAttribute {
        /// The element name.
        element: String,
        /// The attribute name.
        attribute: String,
        /// The raw attribute text.
        value: String,
    },

    /// The import scale is not a positive finite number
    #[error("Invalid import scale {0}")]
    InvalidScale(f64),
}

/// Main error type for Floorwire
///
/// Aggregates all error types into a single type for convenient error handling.
#[derive(Error, Debug)]
pub enum Error {
    /// Document error
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// Import error
    #[error(transparent)]
    Import(#[from] ImportError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this error came from document validation
    pub fn is_document_error(&self) -> bool {
        matches!(self, Error::Document(_))
    }
}

impl From<serde_json::Error> for DocumentError {
    fn from(err: serde_json::Error) -> Self {
        DocumentError::InvalidJson {
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Document(err.into())
    }
}

/// Result type for Floorwire operations
pub type Result<T> = std::result::Result<T, Error>;
