//! In-process backing store.
//!
//! A complete [`GridBacking`] for hosts that do not bring their own state library,
//! and for tests. State lives behind an `Arc` that is swapped on every mutation.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Map;
use tracing::{debug, info};

use crate::error::GridError;
use crate::grid::backing::{BackingResult, GridBacking, ReadyCallback, SetLayoutParams};
use crate::grid::state::{GridLayout, GridState, ViewportMap};
use crate::presentation::ids::PresentationIdContext;
use crate::presentation::registry::PresentationIdRegistry;
use crate::viewport::{DisplaySetOptions, LayoutPosition, Viewport, ViewportAssignment};

pub struct InMemoryGrid {
    state: RwLock<Arc<GridState>>,
    initial: Arc<GridState>,
    registry: Option<Arc<PresentationIdRegistry>>,
}

impl InMemoryGrid {
    pub fn new() -> Self {
        Self::with_initial(GridState::default())
    }

    pub fn with_initial(initial: GridState) -> Self {
        let initial = Arc::new(initial);
        Self {
            state: RwLock::new(initial.clone()),
            initial,
            registry: None,
        }
    }

    /// Stamp `viewport_options.presentation_ids` on panes whenever content lands.
    pub fn with_presentation_ids(mut self, registry: Arc<PresentationIdRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    fn current(&self) -> Arc<GridState> {
        self.state.read().clone()
    }

    fn publish(&self, next: GridState) {
        *self.state.write() = Arc::new(next);
    }

    fn stamp_presentation_ids(&self, viewport: &mut Viewport, siblings: &ViewportMap) {
        let Some(registry) = &self.registry else {
            return;
        };
        viewport.viewport_options.presentation_ids = if viewport.has_content() {
            registry.resolve_all(&PresentationIdContext::new(viewport, siblings))
        } else {
            Default::default()
        };
    }

    fn apply_assignment(&self, working: &mut GridState, assignment: ViewportAssignment) {
        let Some(existing) = working.viewports.get(&assignment.viewport_id) else {
            debug!(
                viewport_id = %assignment.viewport_id,
                "assignment names a viewport outside the layout, dropping"
            );
            return;
        };

        let mut updated = existing.clone();
        let content_changed = updated.display_set_instance_uids != assignment.display_set_instance_uids;
        updated.display_set_instance_uids = assignment.display_set_instance_uids;
        if let Some(options) = assignment.viewport_options {
            updated.viewport_options = options;
        }
        updated.display_set_options = assignment.display_set_options.unwrap_or_else(|| {
            vec![DisplaySetOptions::default(); updated.display_set_instance_uids.len()]
        });
        if content_changed {
            updated.is_ready = false;
        }

        self.stamp_presentation_ids(&mut updated, &working.viewports);
        working.viewports.insert(updated);
    }
}

impl Default for InMemoryGrid {
    fn default() -> Self {
        Self::new()
    }
}

fn invalid(message: impl Into<String>) -> anyhow::Error {
    GridError::InvalidLayout(message.into()).into()
}

/// Uniform cell for slot `index` of a `num_rows` × `num_cols` grid.
pub fn grid_cell(index: usize, num_rows: usize, num_cols: usize) -> (LayoutPosition, String) {
    let col = index % num_cols;
    let row = index / num_cols;
    let width = 1.0 / num_cols as f64;
    let height = 1.0 / num_rows as f64;
    let position = LayoutPosition::new(col as f64 * width, row as f64 * height, width, height);
    (position, format!("{col}-{row}"))
}

#[async_trait]
impl GridBacking for InMemoryGrid {
    fn get_state(&self) -> Arc<GridState> {
        self.current()
    }

    fn set_active_viewport(&self, viewport_id: &str) -> BackingResult {
        let current = self.current();
        if !current.viewports.contains(viewport_id) {
            return Err(GridError::ViewportNotFound(viewport_id.to_string()).into());
        }
        let mut next = current.as_ref().clone();
        next.active_viewport_id = Some(viewport_id.to_string());
        self.publish(next);
        Ok(())
    }

    async fn set_display_sets_for_viewports(&self, assignments: Vec<ViewportAssignment>) -> BackingResult {
        let mut working = self.current().as_ref().clone();
        for assignment in assignments {
            self.apply_assignment(&mut working, assignment);
        }
        self.publish(working);
        Ok(())
    }

    fn set_layout(&self, params: SetLayoutParams) -> BackingResult {
        if params.num_rows == 0 || params.num_cols == 0 {
            return Err(invalid(format!(
                "{} rows x {} cols",
                params.num_rows, params.num_cols
            )));
        }

        let previous = self.current();
        let slots = if params.layout_options.is_empty() {
            params
                .num_rows
                .checked_mul(params.num_cols)
                .ok_or_else(|| {
                    invalid(format!(
                        "{} rows x {} cols overflows the pane count",
                        params.num_rows, params.num_cols
                    ))
                })?
        } else {
            params.layout_options.len()
        };

        let mut scratch = Map::new();
        let mut viewports = ViewportMap::new();
        let mut seen = HashSet::new();
        for index in 0..slots {
            let (cell, position_id) = grid_cell(index, params.num_rows, params.num_cols);
            let position = params.layout_options.get(index).copied().unwrap_or(cell);

            let found = params
                .find_or_create_viewport
                .as_ref()
                .and_then(|factory| factory(index, &position_id, &mut scratch));
            let mut viewport = found.unwrap_or_else(|| {
                previous
                    .viewports
                    .iter()
                    .find(|v| v.position_id.as_deref() == Some(position_id.as_str()))
                    .cloned()
                    .unwrap_or_else(|| Viewport::new(format!("default-{position_id}")))
            });

            if !seen.insert(viewport.viewport_id.clone()) {
                return Err(invalid(format!(
                    "viewport {} appears twice in the layout",
                    viewport.viewport_id
                )));
            }
            viewport.set_position(position);
            viewport.position_id = Some(position_id);
            viewports.insert(viewport);
        }

        // Each pane sees the full new layout, including its own previous key.
        for index in 0..viewports.len() {
            let mut viewport = viewports.values()[index].clone();
            self.stamp_presentation_ids(&mut viewport, &viewports);
            viewports.insert(viewport);
        }

        let active_viewport_id = match params.active_viewport_id {
            Some(id) if viewports.contains(&id) => Some(id),
            Some(id) => return Err(invalid(format!("active viewport {id} is not in the layout"))),
            None => previous
                .active_viewport_id
                .clone()
                .filter(|id| viewports.contains(id))
                .or_else(|| viewports.ids().next().map(str::to_string)),
        };

        self.publish(GridState {
            active_viewport_id,
            layout: GridLayout {
                num_rows: params.num_rows,
                num_cols: params.num_cols,
                layout_type: params.layout_type,
            },
            viewports,
            is_hanging_protocol_layout: params.is_hanging_protocol_layout,
        });
        Ok(())
    }

    fn reset(&self) -> BackingResult {
        *self.state.write() = self.initial.clone();
        Ok(())
    }

    fn on_mode_exit(&self) -> BackingResult {
        info!("viewport grid returned to initial state on mode exit");
        self.reset()
    }

    fn set(&self, state: GridState) -> BackingResult {
        if !state.active_is_consistent() {
            return Err(invalid("active viewport id names no viewport"));
        }
        self.publish(state);
        Ok(())
    }

    fn get_num_viewport_panes(&self) -> usize {
        self.current().viewports.len()
    }

    fn set_viewport_is_ready(&self, viewport_id: &str, callback: ReadyCallback) -> BackingResult {
        let mut next = self.current().as_ref().clone();
        match next.viewports.get_mut(viewport_id) {
            Some(viewport) => viewport.is_ready = true,
            None => return Err(GridError::ViewportNotFound(viewport_id.to_string()).into()),
        }
        self.publish(next);
        callback();
        Ok(())
    }
}
