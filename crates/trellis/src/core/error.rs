use std::{io, result::Result as StdResult};

use thiserror::Error;

use crate::{core::id::NodeId, geom};

/// Result type for trellis operations.
pub type Result<T> = StdResult<T, Error>;

/// Core error type.
///
/// Structural faults are programming errors. They are returned to the caller
/// and the tree is left unchanged.
#[derive(PartialEq, Eq, Error, Debug, Clone)]
pub enum Error {
    #[error("node not found: {0:?}")]
    /// The node does not exist in the arena.
    NodeNotFound(NodeId),
    #[error("node {child:?} is not a child of {parent:?}")]
    /// The node is not a child of the given parent.
    NotAChild {
        /// Expected parent.
        parent: NodeId,
        /// Node that was not found among the children.
        child: NodeId,
    },
    #[error("reparenting {child:?} under {parent:?} would create a cycle")]
    /// Attaching would make a node its own ancestor.
    WouldCreateCycle {
        /// Proposed parent.
        parent: NodeId,
        /// Node being attached.
        child: NodeId,
    },
    #[error("duplicate child {child:?} under {parent:?}")]
    /// A children list contained the same node twice.
    DuplicateChild {
        /// Parent whose children were being replaced.
        parent: NodeId,
        /// The repeated node.
        child: NodeId,
    },
    #[error("child index {index} out of range for {parent:?} with {len} children")]
    /// Insertion index past the end of the children list.
    IndexOutOfRange {
        /// Parent being inserted into.
        parent: NodeId,
        /// Requested index.
        index: usize,
        /// Number of children at the time of the call.
        len: usize,
    },
    #[error("layout resumed more times than suspended on {0:?}")]
    /// `resume_layout` without a matching `suspend_layout`.
    UnbalancedResume(NodeId),
    #[error("invalid operation: {0}")]
    /// Operation not permitted in the current state.
    InvalidOperation(String),
    #[error("layout: {0}")]
    /// Layout failure.
    Layout(String),
    #[error("focus: {0}")]
    /// Focus-related failure.
    Focus(String),
    #[error("options: {0}")]
    /// Options could not be parsed.
    Options(String),
    #[error("geometry: {0}")]
    /// Geometry failure.
    Geometry(String),
    #[error("internal: {0}")]
    /// Internal error.
    Internal(String),
}

impl From<geom::Error> for Error {
    fn from(e: geom::Error) -> Self {
        Self::Geometry(e.to_string())
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Internal(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Options(e.to_string())
    }
}
