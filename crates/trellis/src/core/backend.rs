//! The native-handler collaborator.
//!
//! A native handler owns platform peers for nodes. The tree asks it to measure
//! leaves, tells it about new bounds and reads back the geometry the platform
//! actually applied. Every method has a neutral default, so a handler only
//! overrides what its platform supports.

use crate::{
    NodeId,
    geom::{Rect, Size},
};

/// Platform capabilities consumed by the tree.
pub trait NativeHandler {
    /// Preferred content size of a leaf, or `None` if the handler cannot measure it.
    fn measure(&self, _node: NodeId, _available: Size) -> Option<Size> {
        None
    }

    /// Push new bounds to the platform peer.
    fn apply_bounds(&mut self, _node: NodeId, _bounds: Rect) {}

    /// Authoritative bounds after the platform applied them, if a peer exists.
    fn report_bounds(&self, _node: NodeId) -> Option<Rect> {
        None
    }

    /// Device pixels per unit for the node's peer.
    fn scale_factor(&self, _node: NodeId) -> Option<f64> {
        None
    }

    /// The node was removed from the tree.
    fn node_removed(&mut self, _node: NodeId) {}
}
