//! Trellis: a retained-mode control tree and layout engine.
//!
//! Trellis keeps a tree of controls in an arena and computes their geometry
//! with simple positional strategies (basic alignment, stacks, docking and
//! grids). Around that it provides batched layout suspension, tab-order focus
//! traversal, visual-state resolution and leaf-to-root event bubbling. Platform
//! measurement and native geometry come from a pluggable [`NativeHandler`].
//!
//! # Quick Start
//!
//! The main entry points are:
//! - [`Tree`] - The arena holding every control node
//! - [`LayoutManager`] and [`LayoutSuspension`] - Layout passes and batching
//! - [`FocusManager`] - Focus and tab order
//! - [`VisualStateResolver`] - Hover, pressed, focused and disabled state
//! - [`EventRouter`] - Event bubbling with optional root preview
//!
//! Most programs start with `use trellis::prelude::*;`.

#![warn(missing_docs)]

// Internal core module - re-export specific items below
mod core;

// Public modules
pub mod geom;
pub mod layout;
pub mod logging;
pub mod prelude;
pub mod widget;

pub use core::{
    Change, EventContext, FocusManager, HandlerId, LayoutSuspendGuard, LayoutSuspension, Node,
    NodeId, Options, Phase, SubscriptionId, Tree, VisualState, VisualStateResolver, VisualStates,
};
pub use core::{backend, dump, error, event, iter, notify, route, testing};
pub use backend::NativeHandler;
pub use layout::LayoutManager;
pub use route::EventRouter;
pub use widget::{EventOutcome, Widget};
