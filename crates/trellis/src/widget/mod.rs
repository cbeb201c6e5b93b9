//! The widget capability trait.
//!
//! Widgets are the behaviour attached to tree nodes. The tree owns geometry,
//! structure and flags; a widget only answers the questions the engine asks of
//! it.

use std::any::{Any, type_name};

use crate::{core::event::Event, core::route::EventContext, geom::Size};

/// Result of offering an event to a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventOutcome {
    /// The event was acted on. Routing stops.
    Handle,
    /// The event was swallowed without action. Routing stops.
    Consume,
    /// The event was not handled. Routing continues.
    Ignore,
}

impl EventOutcome {
    /// True if routing should stop.
    pub fn is_handled(self) -> bool {
        !matches!(self, Self::Ignore)
    }
}

/// Behaviour attached to a node.
#[allow(unused_variables)]
pub trait Widget: Any {
    /// Short type name used in diagnostics.
    fn name(&self) -> String {
        let full = type_name::<Self>();
        full.rsplit("::").next().unwrap_or(full).to_string()
    }

    /// Handle an event routed to this node.
    fn on_event(&mut self, event: &Event, ctx: &mut EventContext<'_>) -> EventOutcome {
        EventOutcome::Ignore
    }

    /// Preferred content size, excluding padding. `None` defers to the native handler.
    fn measure(&self, available: Size) -> Option<Size> {
        None
    }

    /// Whether a node created with this widget can take focus.
    fn accept_focus(&self) -> bool {
        false
    }
}
