//! Topic-based event bus for session events.
//!
//! Every notification drained from the engine is republished here, split into
//! the `Combat` and `Turn` topics so a UI can follow resources and turn flow
//! independently.

mod bus;

pub use bus::{Event, EventBus, Topic};
