//! Session events: the `Event` contract, command execution and fan-out.
//!
//! Events describe what a user action changed in a storefront session. They are
//! applied to the session synchronously and can then be handed to subscribers
//! (a renderer, a replay log) through an [`EventBus`].

pub mod bus;
pub mod event;
pub mod handler;
pub mod in_memory_bus;

pub use bus::{EventBus, Subscription};
pub use event::Event;
pub use handler::{execute, execute_and_publish};
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
