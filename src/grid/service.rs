//! Viewport grid coordinator.
//!
//! A façade over the host's backing implementation. It holds no pane data: every
//! read goes to the backing `get_state`, every mutation is forwarded, and the
//! coordinator only decides when listeners hear about it.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::error::GridError;
use crate::events::{EventBus, GridEvent, GridEventKind, MicrotaskQueue, Subscription};
use crate::grid::backing::{ServiceImplementation, SetLayoutParams};
use crate::grid::state::{GridState, ViewportMap};
use crate::presentation::ids::PresentationIdContext;
use crate::presentation::registry::{PresentationIdProvider, PresentationIdRegistry};
use crate::viewport::{DisplaySetUid, LayoutPosition, Viewport, ViewportAssignment, ViewportId};

pub struct ViewportGridService {
    implementation: RwLock<ServiceImplementation>,
    registry: Arc<PresentationIdRegistry>,
    bus: EventBus,
    microtasks: MicrotaskQueue,
}

impl ViewportGridService {
    pub const NAME: &'static str = "viewportGridService";

    pub fn new(microtasks: MicrotaskQueue, registry: Arc<PresentationIdRegistry>) -> Self {
        Self {
            implementation: RwLock::new(ServiceImplementation::default()),
            registry,
            bus: EventBus::new(),
            microtasks,
        }
    }

    pub fn registry(&self) -> &Arc<PresentationIdRegistry> {
        &self.registry
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn microtasks(&self) -> &MicrotaskQueue {
        &self.microtasks
    }

    pub fn subscribe(
        &self,
        kind: GridEventKind,
        listener: impl Fn(&GridEvent) + Send + Sync + 'static,
    ) -> Subscription {
        self.bus.subscribe(kind, listener)
    }

    /// Install backing callbacks. Callbacks absent from `implementation` keep their
    /// current registration.
    pub fn set_service_implementation(&self, implementation: ServiceImplementation) {
        debug!(
            provided = ?implementation.provided(),
            "registering viewport grid implementation"
        );
        self.implementation.write().merge(implementation);
    }

    fn require<T>(
        &self,
        name: &'static str,
        pick: impl FnOnce(&ServiceImplementation) -> Option<T>,
    ) -> Result<T, GridError> {
        pick(&self.implementation.read()).ok_or(GridError::MissingImplementation(name))
    }

    fn defer_broadcast(&self, event: GridEvent) {
        let bus = self.bus.clone();
        self.microtasks.queue(move || {
            bus.broadcast(&event);
        });
    }

    pub fn get_state(&self) -> Result<Arc<GridState>, GridError> {
        let get_state = self.require("getState", |i| i.get_state.clone())?;
        Ok(get_state())
    }

    /// Forward the change now; listeners hear about it at the next checkpoint.
    pub fn set_active_viewport_id(&self, viewport_id: &str) -> Result<(), GridError> {
        let set_active = self.require("setActiveViewportId", |i| i.set_active_viewport.clone())?;
        set_active(viewport_id)?;
        self.defer_broadcast(GridEvent::ActiveViewportIdChanged {
            viewport_id: viewport_id.to_string(),
        });
        Ok(())
    }

    pub async fn set_display_sets_for_viewport(
        &self,
        assignment: ViewportAssignment,
    ) -> Result<Vec<Viewport>, GridError> {
        self.set_display_sets_for_viewports(vec![assignment]).await
    }

    /// Forward a batch, then re-read state and report which panes it produced.
    ///
    /// Panes the backing store dropped are logged and left out of both the return
    /// value and the deferred `GridStateChanged` broadcast.
    pub async fn set_display_sets_for_viewports(
        &self,
        assignments: Vec<ViewportAssignment>,
    ) -> Result<Vec<Viewport>, GridError> {
        let assign = self.require("setDisplaySetsForViewports", |i| {
            i.set_display_sets_for_viewports.clone()
        })?;
        let get_state = self.require("getState", |i| i.get_state.clone())?;

        let requested: Vec<ViewportId> =
            assignments.iter().map(|a| a.viewport_id.clone()).collect();
        debug!(viewports = ?requested, "assigning display sets");

        assign(assignments).await?;

        // Other work may have run during the await; only the fresh state counts.
        let state = get_state();
        let mut updated = Vec::with_capacity(requested.len());
        for viewport_id in &requested {
            match state.viewport(viewport_id) {
                Some(viewport) => updated.push(viewport.clone()),
                None => warn!(
                    viewport_id = %viewport_id,
                    "updated viewport missing from grid state"
                ),
            }
        }

        self.defer_broadcast(GridEvent::GridStateChanged {
            state,
            viewports: Some(updated.clone()),
        });
        Ok(updated)
    }

    /// Forward a layout change and announce it before returning.
    pub fn set_layout(&self, params: SetLayoutParams) -> Result<(), GridError> {
        let set_layout = self.require("setLayout", |i| i.set_layout.clone())?;
        let (num_cols, num_rows) = (params.num_cols, params.num_rows);
        debug!(?params, "setting layout");
        set_layout(params)?;
        self.bus
            .broadcast(&GridEvent::LayoutChanged { num_cols, num_rows });
        Ok(())
    }

    pub fn reset(&self) -> Result<(), GridError> {
        let reset = self.require("reset", |i| i.reset.clone())?;
        reset()?;
        Ok(())
    }

    /// Return the grid to a clean state. Modes that want to restore their grid later
    /// must save it before calling this.
    pub fn on_mode_exit(&self) -> Result<(), GridError> {
        let on_mode_exit = self.require("onModeExit", |i| i.on_mode_exit.clone())?;
        on_mode_exit()?;
        Ok(())
    }

    pub fn set(&self, state: GridState) -> Result<(), GridError> {
        let set = self.require("set", |i| i.set.clone())?;
        set(state.clone())?;
        self.defer_broadcast(GridEvent::GridStateChanged {
            state: Arc::new(state),
            viewports: None,
        });
        Ok(())
    }

    /// Announce that the grid's on-screen size changed.
    pub fn set_viewport_grid_size_changed(&self) -> Result<(), GridError> {
        let state = self.get_state()?;
        self.bus.broadcast(&GridEvent::GridSizeChanged { state });
        Ok(())
    }

    pub fn publish_viewports_ready(&self) {
        self.bus.broadcast(&GridEvent::ViewportsReady);
    }

    pub fn get_num_viewport_panes(&self) -> Result<usize, GridError> {
        let panes = self.require("getNumViewportPanes", |i| i.get_num_viewport_panes.clone())?;
        Ok(panes())
    }

    pub fn get_display_set_uids_for_viewport(
        &self,
        viewport_id: &str,
    ) -> Result<Option<Vec<DisplaySetUid>>, GridError> {
        let state = self.get_state()?;
        Ok(state
            .viewport(viewport_id)
            .map(|viewport| viewport.display_set_instance_uids.clone()))
    }

    pub fn get_active_viewport_id(&self) -> Result<Option<ViewportId>, GridError> {
        Ok(self.get_state()?.active_viewport_id.clone())
    }

    pub fn get_layout_options_from_state(&self, state: &GridState) -> Vec<LayoutPosition> {
        state.layout_options()
    }

    pub fn set_viewport_is_ready(
        &self,
        viewport_id: &str,
        callback: impl FnOnce() + Send + 'static,
    ) -> Result<(), GridError> {
        let set_ready = self.require("setViewportIsReady", |i| i.set_viewport_is_ready.clone())?;
        set_ready(viewport_id, Box::new(callback))?;
        Ok(())
    }

    pub fn add_presentation_id_provider(&self, kind: impl Into<String>, provider: PresentationIdProvider) {
        self.registry.register(kind, provider);
    }

    pub fn get_presentation_id(
        &self,
        kind: &str,
        viewport: &Viewport,
        viewports: &ViewportMap,
    ) -> Option<String> {
        self.registry
            .resolve(kind, &PresentationIdContext::new(viewport, viewports))
    }

    /// Every registered kind that has an identity for `viewport`.
    pub fn get_presentation_ids(
        &self,
        viewport: &Viewport,
        viewports: &ViewportMap,
    ) -> BTreeMap<String, String> {
        self.registry
            .resolve_all(&PresentationIdContext::new(viewport, viewports))
    }
}
