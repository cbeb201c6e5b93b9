//! Common imports for building and driving a control tree.

pub use crate::{
    EventOutcome, EventRouter, FocusManager, LayoutManager, LayoutSuspension, NodeId, Options,
    Tree, VisualState, VisualStateResolver, VisualStates, Widget,
    error::{Error, Result},
    event::{Event, InputBinding, Key, KeyGesture, Modifiers, MouseButton},
    geom::{Axis, Point, Rect, Size, Thickness},
    layout::{Alignment, Dock, DockOrder, GridCell, Layout, LayoutStyle},
    notify::Change,
};
