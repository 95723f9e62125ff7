//! Pipeline events.
//!
//! Components emit structured events through an injected `EventHandle` next
//! to their tracing output, so callers and tests can observe what happened to
//! every order and item without inspecting log text.

mod collector;
mod events;
mod handle;

pub use collector::{create_event_system, EventCollector};
pub use events::PipelineEvent;
pub use handle::{EventEnvelope, EventHandle};

pub(crate) use handle::emit;
