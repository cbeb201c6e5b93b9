use slotmap::new_key_type;

new_key_type! {
    /// Opaque identifier for a node stored in the tree arena. Stable for the
    /// node's lifetime and never reused while the node exists.
    pub struct NodeId;
}

/// Identifies a registered change observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub(crate) u64);

/// Identifies an event handler registered on a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandlerId(pub(crate) u64);
