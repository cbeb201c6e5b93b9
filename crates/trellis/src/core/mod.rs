#![allow(clippy::new_without_default)]
//! Core types for the trellis control tree.

// Core modules - public
/// Native-handler collaborator interface.
pub mod backend;
/// Debug dump utilities.
pub mod dump;
/// Core error types.
pub mod error;
/// Input event types.
pub mod event;
/// Lazy tree traversals.
pub mod iter;
/// Change notifications.
pub mod notify;
/// Event bubbling.
pub mod route;
/// Test doubles for the native handler and notification observers.
pub mod testing;

// Core modules - internal
/// Focus and tab-order traversal.
pub mod focus;
/// Node ID types.
pub mod id;
/// Node data stored in the arena.
pub mod node;
/// Tree options.
pub mod options;
/// Layout suspension and batching.
pub mod suspend;
/// Tree structure and node attributes.
pub mod tree;
/// Visual-state resolution.
pub mod visual;

// Public exports from internal modules
pub use focus::FocusManager;
pub use id::{HandlerId, NodeId, SubscriptionId};
pub use node::Node;
pub use notify::Change;
pub use options::Options;
pub use route::{EventContext, Phase};
pub use suspend::{LayoutSuspendGuard, LayoutSuspension};
pub use tree::Tree;
pub use visual::{VisualState, VisualStateResolver, VisualStates};
