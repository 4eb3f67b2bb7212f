//! Change notification: event schema, bus, and the deferred-task queue.

pub mod bus;
pub mod microtask;
pub mod types;

pub use bus::{EventBus, Listener, Subscription};
pub use microtask::{Microtask, MicrotaskQueue};
pub use types::{GridEvent, GridEventKind};
