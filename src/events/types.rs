//! Event schema for grid change notifications.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::grid::state::GridState;
use crate::viewport::{Viewport, ViewportId};

/// Enumerated notification kinds. Listeners subscribe per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GridEventKind {
    ActiveViewportIdChanged,
    LayoutChanged,
    GridStateChanged,
    GridSizeChanged,
    #[serde(rename = "event::viewportsReady")]
    ViewportsReady,
}

impl GridEventKind {
    pub const ALL: [GridEventKind; 5] = [
        GridEventKind::ActiveViewportIdChanged,
        GridEventKind::LayoutChanged,
        GridEventKind::GridStateChanged,
        GridEventKind::GridSizeChanged,
        GridEventKind::ViewportsReady,
    ];

    /// Wire name, stable across releases.
    pub fn as_str(&self) -> &'static str {
        match self {
            GridEventKind::ActiveViewportIdChanged => "event::activeviewportidchanged",
            GridEventKind::LayoutChanged => "event::layoutChanged",
            GridEventKind::GridStateChanged => "event::gridStateChanged",
            GridEventKind::GridSizeChanged => "event::gridSizeChanged",
            GridEventKind::ViewportsReady => "event::viewportsReady",
        }
    }
}

impl fmt::Display for GridEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A broadcast payload.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event")]
pub enum GridEvent {
    #[serde(rename = "event::activeviewportidchanged", rename_all = "camelCase")]
    ActiveViewportIdChanged { viewport_id: ViewportId },

    #[serde(rename = "event::layoutChanged", rename_all = "camelCase")]
    LayoutChanged { num_cols: usize, num_rows: usize },

    /// `viewports` is set by batch assignment and lists only the panes found in the
    /// resulting state; a generic `set` leaves it empty.
    #[serde(rename = "event::gridStateChanged")]
    GridStateChanged {
        state: Arc<GridState>,
        #[serde(skip_serializing_if = "Option::is_none")]
        viewports: Option<Vec<Viewport>>,
    },

    #[serde(rename = "event::gridSizeChanged")]
    GridSizeChanged { state: Arc<GridState> },

    ViewportsReady,
}

impl GridEvent {
    pub fn kind(&self) -> GridEventKind {
        match self {
            GridEvent::ActiveViewportIdChanged { .. } => GridEventKind::ActiveViewportIdChanged,
            GridEvent::LayoutChanged { .. } => GridEventKind::LayoutChanged,
            GridEvent::GridStateChanged { .. } => GridEventKind::GridStateChanged,
            GridEvent::GridSizeChanged { .. } => GridEventKind::GridSizeChanged,
            GridEvent::ViewportsReady => GridEventKind::ViewportsReady,
        }
    }
}
