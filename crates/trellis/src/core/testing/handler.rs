use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::{
    NodeId,
    backend::NativeHandler,
    geom::{Rect, Size},
};

/// A native handler that measures nodes from a fixed table.
///
/// Every bounds assignment is logged. With rounding enabled the handler
/// behaves like a platform with a pixel grid: it reports the applied bounds
/// snapped to device pixels at the rounding scale.
#[derive(Debug, Default)]
pub struct FixedHandler {
    /// Measured sizes by node.
    sizes: HashMap<NodeId, Size>,
    /// Pixel scale used to round reported bounds.
    rounding: Option<f64>,
    /// Scale factor reported for every node.
    scale: Option<f64>,
    /// Bounds the platform holds for each node.
    peers: HashMap<NodeId, Rect>,
    /// Every `apply_bounds` call, in order.
    applied: Rc<RefCell<Vec<(NodeId, Rect)>>>,
    /// Every removed node, in order.
    removed: Rc<RefCell<Vec<NodeId>>>,
}

impl FixedHandler {
    /// An empty handler: nothing measures and no bounds are reported.
    pub fn new() -> Self {
        Self::default()
    }

    /// Report applied bounds snapped to pixels at `scale`.
    pub fn with_rounding(mut self, scale: f64) -> Self {
        self.rounding = Some(scale);
        self
    }

    /// Report `scale` as every node's scale factor.
    pub fn with_scale_factor(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Set the measured size of a node.
    pub fn set_size(&mut self, node: NodeId, size: Size) {
        self.sizes.insert(node, size);
    }

    /// Builder form of `set_size`.
    pub fn size(mut self, node: NodeId, width: f64, height: f64) -> Self {
        self.set_size(node, Size::new(width, height));
        self
    }

    /// Shared log of `apply_bounds` calls. Stays readable after the handler
    /// moves into a tree.
    pub fn applied(&self) -> Rc<RefCell<Vec<(NodeId, Rect)>>> {
        self.applied.clone()
    }

    /// Shared log of removed nodes.
    pub fn removed(&self) -> Rc<RefCell<Vec<NodeId>>> {
        self.removed.clone()
    }
}

impl NativeHandler for FixedHandler {
    fn measure(&self, node: NodeId, _available: Size) -> Option<Size> {
        self.sizes.get(&node).copied()
    }

    fn apply_bounds(&mut self, node: NodeId, bounds: Rect) {
        self.applied.borrow_mut().push((node, bounds));
        if let Some(scale) = self.rounding {
            self.peers.insert(node, bounds.snap_to_pixels(scale));
        }
    }

    fn report_bounds(&self, node: NodeId) -> Option<Rect> {
        self.peers.get(&node).copied()
    }

    fn scale_factor(&self, _node: NodeId) -> Option<f64> {
        self.scale
    }

    fn node_removed(&mut self, node: NodeId) {
        self.peers.remove(&node);
        self.removed.borrow_mut().push(node);
    }
}
