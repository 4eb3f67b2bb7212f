//! CLI route: single route table and run context. Dispatches to the grid context and presentation.

use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info};

use crate::cli::command_name;
use crate::cli::parse::Commands;
use crate::cli::presentation::{
    format_grid_json, format_grid_text, format_providers_json, format_providers_text,
};
use crate::config::ConfigLoader;
use crate::context::GridContext;
use crate::error::GridError;
use crate::events::{GridEvent, GridEventKind};
use crate::grid::{InMemoryGrid, SetLayoutParams};
use crate::presentation::UnknownOrientation;
use crate::viewport::{ViewportAssignment, ViewportOptions};

/// Runtime context for CLI execution: a grid context over an in-memory backing.
/// Built from workspace path and optional config path using ConfigLoader only.
pub struct RunContext {
    grid: GridContext,
    backing: Arc<InMemoryGrid>,
    workspace_root: PathBuf,
}

impl RunContext {
    /// Create run context from workspace root and optional config path.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, GridError> {
        let config = if let Some(ref cfg_path) = config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&workspace_root)?
        };

        let grid = GridContext::new(config, Arc::new(UnknownOrientation))?;
        let backing = grid.install_in_memory_backing();

        Ok(Self {
            grid,
            backing,
            workspace_root,
        })
    }

    pub fn grid(&self) -> &GridContext {
        &self.grid
    }

    pub fn backing(&self) -> &Arc<InMemoryGrid> {
        &self.backing
    }

    pub async fn execute(&self, command: &Commands) -> Result<String, GridError> {
        debug!(
            command = command_name(command),
            workspace = %self.workspace_root.display(),
            "executing command"
        );
        match command {
            Commands::Layout {
                rows,
                cols,
                assignments,
                orientation,
                active,
                format,
            } => {
                let rows = rows.unwrap_or(self.grid.config().grid.default_rows);
                let cols = cols.unwrap_or(self.grid.config().grid.default_cols);
                let assignments = assignments
                    .iter()
                    .map(|raw| parse_assignment(raw, orientation.as_deref()))
                    .collect::<Result<Vec<_>, _>>()?;
                self.handle_layout(rows, cols, assignments, active.as_deref(), format)
                    .await
            }
            Commands::Config => toml::to_string_pretty(self.grid.config())
                .map_err(|e| GridError::Config(format!("Failed to render config: {}", e))),
            Commands::Providers { format } => {
                let kinds = self.grid.registry().kinds();
                Ok(if format == "json" {
                    format_providers_json(&kinds)
                } else {
                    format_providers_text(&kinds)
                })
            }
        }
    }

    async fn handle_layout(
        &self,
        rows: usize,
        cols: usize,
        assignments: Vec<ViewportAssignment>,
        active: Option<&str>,
        format: &str,
    ) -> Result<String, GridError> {
        let service = self.grid.service();
        let events = Arc::new(Mutex::new(Vec::<GridEvent>::new()));
        let subscriptions: Vec<_> = GridEventKind::ALL
            .iter()
            .map(|kind| {
                let events = events.clone();
                service.subscribe(*kind, move |event| events.lock().push(event.clone()))
            })
            .collect();

        let layout_type = self.grid.config().grid.layout_type.clone();
        let result = async {
            service.set_layout(SetLayoutParams::grid(rows, cols).with_layout_type(layout_type))?;
            if !assignments.is_empty() {
                let updated = service.set_display_sets_for_viewports(assignments).await?;
                for viewport in &updated {
                    service.set_viewport_is_ready(&viewport.viewport_id, || {})?;
                }
                service.publish_viewports_ready();
            }
            if let Some(viewport_id) = active {
                service.set_active_viewport_id(viewport_id)?;
            }
            let delivered = self.grid.checkpoint();
            debug!(delivered, "deferred notifications delivered");
            service.get_state()
        }
        .await;

        for subscription in &subscriptions {
            subscription.unsubscribe();
        }
        let state = result?;
        info!(panes = state.viewports.len(), "layout applied");

        let events = events.lock();
        Ok(if format == "json" {
            format_grid_json(&state, &events)
        } else {
            format_grid_text(&state, &self.grid.registry().kinds(), &events)
        })
    }
}

/// Parse `VIEWPORT=UID[,UID...]` into an assignment.
pub fn parse_assignment(
    raw: &str,
    orientation: Option<&str>,
) -> Result<ViewportAssignment, GridError> {
    let (viewport_id, uids) = raw
        .split_once('=')
        .ok_or_else(|| GridError::Config(format!("assignment '{}' is not VIEWPORT=UIDS", raw)))?;
    let viewport_id = viewport_id.trim();
    if viewport_id.is_empty() {
        return Err(GridError::Config(format!(
            "assignment '{}' has no viewport id",
            raw
        )));
    }
    let uids: Vec<String> = uids
        .split(',')
        .map(str::trim)
        .filter(|uid| !uid.is_empty())
        .map(str::to_string)
        .collect();

    let assignment = ViewportAssignment::new(viewport_id, uids);
    Ok(match orientation {
        Some(orientation) => {
            assignment.with_options(ViewportOptions::default().with_orientation(orientation))
        }
        None => assignment,
    })
}
