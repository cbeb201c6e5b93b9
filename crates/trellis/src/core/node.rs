use std::cell::Cell;

use crate::{
    core::{
        event::InputBinding,
        id::{HandlerId, NodeId},
        route::HandlerFn,
        visual::{VisualState, VisualStates},
    },
    geom::Rect,
    layout::Layout,
    widget::Widget,
};

/// A single element in the control tree.
///
/// Nodes live in the tree's arena and are only mutated through [`Tree`]
/// methods, which keep the structural invariants intact.
///
/// [`Tree`]: crate::Tree
pub struct Node {
    /// Optional widget implementation.
    pub(crate) widget: Option<Box<dyn Widget>>,
    /// Diagnostic name.
    pub(crate) name: String,
    /// Parent node, `None` for the root and detached nodes.
    pub(crate) parent: Option<NodeId>,
    /// Ordered children. Order is z-order and default tab order.
    pub(crate) children: Vec<NodeId>,
    /// Layout attributes.
    pub(crate) layout: Layout,
    /// Current bounds in parent client coordinates.
    pub(crate) bounds: Rect,
    /// Last bounds reported by the native handler.
    pub(crate) reported_bounds: Option<Rect>,
    /// Own visibility flag.
    pub(crate) visible: bool,
    /// Intrinsic enablement.
    pub(crate) enabled: bool,
    /// Excluded from the parent's layout pass.
    pub(crate) ignore_layout: bool,
    /// Can receive focus.
    pub(crate) can_select: bool,
    /// Takes part in tab traversal.
    pub(crate) tab_stop: bool,
    /// Tab order among siblings; ties keep child order.
    pub(crate) tab_index: i32,
    /// Receives events before its descendants.
    pub(crate) preview: bool,
    /// A mouse button is held down on this node.
    pub(crate) pressed: bool,
    /// Forced primary visual state.
    pub(crate) visual_state_override: Option<VisualState>,
    /// Forced visual state set.
    pub(crate) visual_states_override: Option<VisualStates>,
    /// Layout suspension depth.
    pub(crate) suspend_count: u32,
    /// A layout pass is running for this node.
    pub(crate) in_layout: bool,
    /// The node is being torn down.
    pub(crate) disposing: bool,
    /// Cached scale factor.
    pub(crate) scale_factor: Cell<Option<f64>>,
    /// Input bindings attached to this node.
    pub(crate) input_bindings: Vec<InputBinding>,
    /// Local event handlers, in registration order.
    pub(crate) handlers: Vec<(HandlerId, HandlerFn)>,
}

impl Node {
    /// A detached node with default attributes.
    pub(crate) fn new(name: impl Into<String>, widget: Option<Box<dyn Widget>>) -> Self {
        let can_select = widget.as_ref().is_some_and(|w| w.accept_focus());
        Self {
            widget,
            name: name.into(),
            parent: None,
            children: Vec::new(),
            layout: Layout::default(),
            bounds: Rect::default(),
            reported_bounds: None,
            visible: true,
            enabled: true,
            ignore_layout: false,
            can_select,
            tab_stop: true,
            tab_index: 0,
            preview: false,
            pressed: false,
            visual_state_override: None,
            visual_states_override: None,
            suspend_count: 0,
            in_layout: false,
            disposing: false,
            scale_factor: Cell::new(None),
            input_bindings: Vec::new(),
            handlers: Vec::new(),
        }
    }

    /// Diagnostic name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parent node.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Layout attributes.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Current bounds in parent client coordinates.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Own visibility flag, ignoring ancestors.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Intrinsic enablement, ignoring ancestors.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Excluded from the parent's layout.
    pub fn ignores_layout(&self) -> bool {
        self.ignore_layout
    }

    /// Can receive focus.
    pub fn can_select(&self) -> bool {
        self.can_select
    }

    /// Takes part in tab traversal.
    pub fn tab_stop(&self) -> bool {
        self.tab_stop
    }

    /// Tab order among siblings.
    pub fn tab_index(&self) -> i32 {
        self.tab_index
    }

    /// Input bindings attached directly to this node.
    pub fn input_bindings(&self) -> &[InputBinding] {
        &self.input_bindings
    }

    /// The widget, if any.
    pub fn widget(&self) -> Option<&dyn Widget> {
        self.widget.as_deref()
    }

    /// Mutable access to the widget.
    pub fn widget_mut(&mut self) -> Option<&mut (dyn Widget + 'static)> {
        self.widget.as_deref_mut()
    }
}
