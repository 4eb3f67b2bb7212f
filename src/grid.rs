//! Viewport grid: state model, backing contract, coordinator.

pub mod backing;
pub mod memory;
pub mod service;
pub mod state;

pub use backing::{
    BackingResult, FindOrCreateViewport, GridBacking, ReadyCallback, ServiceImplementation,
    SetLayoutParams,
};
pub use memory::InMemoryGrid;
pub use service::ViewportGridService;
pub use state::{GridLayout, GridState, ViewportMap, DEFAULT_LAYOUT_TYPE};
