//! Test doubles for the native handler and for change observers.

/// Native-handler double with fixed measurements.
mod handler;
/// Observer that records notifications.
mod recorder;

pub use handler::FixedHandler;
pub use recorder::Recorder;
