//! Viewgrid: Viewport Grid State Coordination
//!
//! A coordinator over a host-owned viewport grid store, a typed change bus with
//! deferred delivery, and presentation identity keys that let per-content UI state
//! follow its content across layout changes.

pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod events;
pub mod grid;
pub mod logging;
pub mod presentation;
pub mod viewport;

pub use context::GridContext;
pub use error::GridError;
pub use grid::{GridState, ServiceImplementation, SetLayoutParams, ViewportGridService};
pub use viewport::{Viewport, ViewportAssignment, ViewportId, ViewportOptions};
