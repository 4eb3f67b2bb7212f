//! Backing implementation contract.
//!
//! The coordinator owns no pane data. A host supplies the callbacks below, either one
//! at a time through [`ServiceImplementation`] or all at once from a [`GridBacking`].

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;
use serde_json::{Map, Value};

use crate::grid::state::{GridState, DEFAULT_LAYOUT_TYPE};
use crate::viewport::{LayoutPosition, Viewport, ViewportAssignment};

/// Result type for host callbacks.
pub type BackingResult<T = ()> = anyhow::Result<T>;

/// Host factory consulted for each slot of a new layout.
///
/// Receives the slot index, its position id (`"{col}-{row}"`), and a scratch options
/// map shared across all slots of one `set_layout` call. Returning `None` lets the
/// backing store create a default pane.
pub type FindOrCreateViewport =
    Arc<dyn Fn(usize, &str, &mut Map<String, Value>) -> Option<Viewport> + Send + Sync>;

/// Invoked once the backing store has marked a pane ready.
pub type ReadyCallback = Box<dyn FnOnce() + Send>;

pub type GetStateFn = Arc<dyn Fn() -> Arc<GridState> + Send + Sync>;
pub type SetActiveViewportFn = Arc<dyn Fn(&str) -> BackingResult + Send + Sync>;
pub type SetDisplaySetsFn =
    Arc<dyn Fn(Vec<ViewportAssignment>) -> BoxFuture<'static, BackingResult> + Send + Sync>;
pub type SetLayoutFn = Arc<dyn Fn(SetLayoutParams) -> BackingResult + Send + Sync>;
pub type ResetFn = Arc<dyn Fn() -> BackingResult + Send + Sync>;
pub type SetStateFn = Arc<dyn Fn(GridState) -> BackingResult + Send + Sync>;
pub type NumViewportPanesFn = Arc<dyn Fn() -> usize + Send + Sync>;
pub type SetViewportIsReadyFn = Arc<dyn Fn(&str, ReadyCallback) -> BackingResult + Send + Sync>;

/// Arguments of a layout change, forwarded verbatim to the backing store.
#[derive(Clone)]
pub struct SetLayoutParams {
    pub num_cols: usize,
    pub num_rows: usize,
    /// Explicit geometry per slot; empty means a uniform grid.
    pub layout_options: Vec<LayoutPosition>,
    pub layout_type: String,
    pub active_viewport_id: Option<String>,
    pub find_or_create_viewport: Option<FindOrCreateViewport>,
    pub is_hanging_protocol_layout: bool,
}

impl SetLayoutParams {
    pub fn grid(num_rows: usize, num_cols: usize) -> Self {
        Self {
            num_cols,
            num_rows,
            layout_options: Vec::new(),
            layout_type: DEFAULT_LAYOUT_TYPE.to_string(),
            active_viewport_id: None,
            find_or_create_viewport: None,
            is_hanging_protocol_layout: false,
        }
    }

    pub fn with_layout_options(mut self, layout_options: Vec<LayoutPosition>) -> Self {
        self.layout_options = layout_options;
        self
    }

    pub fn with_layout_type(mut self, layout_type: impl Into<String>) -> Self {
        self.layout_type = layout_type.into();
        self
    }

    pub fn with_active_viewport_id(mut self, viewport_id: impl Into<String>) -> Self {
        self.active_viewport_id = Some(viewport_id.into());
        self
    }

    pub fn with_find_or_create<F>(mut self, factory: F) -> Self
    where
        F: Fn(usize, &str, &mut Map<String, Value>) -> Option<Viewport> + Send + Sync + 'static,
    {
        self.find_or_create_viewport = Some(Arc::new(factory));
        self
    }

    pub fn hanging_protocol(mut self, is_hanging_protocol_layout: bool) -> Self {
        self.is_hanging_protocol_layout = is_hanging_protocol_layout;
        self
    }
}

impl fmt::Debug for SetLayoutParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SetLayoutParams")
            .field("num_cols", &self.num_cols)
            .field("num_rows", &self.num_rows)
            .field("layout_options", &self.layout_options)
            .field("layout_type", &self.layout_type)
            .field("active_viewport_id", &self.active_viewport_id)
            .field("find_or_create_viewport", &self.find_or_create_viewport.is_some())
            .field("is_hanging_protocol_layout", &self.is_hanging_protocol_layout)
            .finish()
    }
}

/// A complete host store.
#[async_trait]
pub trait GridBacking: Send + Sync {
    fn get_state(&self) -> Arc<GridState>;
    fn set_active_viewport(&self, viewport_id: &str) -> BackingResult;
    async fn set_display_sets_for_viewports(&self, assignments: Vec<ViewportAssignment>) -> BackingResult;
    fn set_layout(&self, params: SetLayoutParams) -> BackingResult;
    fn reset(&self) -> BackingResult;
    fn on_mode_exit(&self) -> BackingResult;
    fn set(&self, state: GridState) -> BackingResult;
    fn get_num_viewport_panes(&self) -> usize;
    fn set_viewport_is_ready(&self, viewport_id: &str, callback: ReadyCallback) -> BackingResult;
}

/// A possibly partial set of backing callbacks.
#[derive(Clone, Default)]
pub struct ServiceImplementation {
    pub get_state: Option<GetStateFn>,
    pub set_active_viewport: Option<SetActiveViewportFn>,
    pub set_display_sets_for_viewports: Option<SetDisplaySetsFn>,
    pub set_layout: Option<SetLayoutFn>,
    pub reset: Option<ResetFn>,
    pub on_mode_exit: Option<ResetFn>,
    pub set: Option<SetStateFn>,
    pub get_num_viewport_panes: Option<NumViewportPanesFn>,
    pub set_viewport_is_ready: Option<SetViewportIsReadyFn>,
}

impl ServiceImplementation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every callback, delegating to `backing`.
    pub fn from_backing<B: GridBacking + 'static>(backing: Arc<B>) -> Self {
        let b = backing;
        Self {
            get_state: Some({
                let b = b.clone();
                Arc::new(move || b.get_state())
            }),
            set_active_viewport: Some({
                let b = b.clone();
                Arc::new(move |id: &str| b.set_active_viewport(id))
            }),
            set_display_sets_for_viewports: Some({
                let b = b.clone();
                Arc::new(move |assignments: Vec<ViewportAssignment>| {
                    let b = b.clone();
                    Box::pin(async move { b.set_display_sets_for_viewports(assignments).await })
                        as BoxFuture<'static, BackingResult>
                })
            }),
            set_layout: Some({
                let b = b.clone();
                Arc::new(move |params: SetLayoutParams| b.set_layout(params))
            }),
            reset: Some({
                let b = b.clone();
                Arc::new(move || b.reset())
            }),
            on_mode_exit: Some({
                let b = b.clone();
                Arc::new(move || b.on_mode_exit())
            }),
            set: Some({
                let b = b.clone();
                Arc::new(move |state: GridState| b.set(state))
            }),
            get_num_viewport_panes: Some({
                let b = b.clone();
                Arc::new(move || b.get_num_viewport_panes())
            }),
            set_viewport_is_ready: Some(Arc::new(move |id: &str, callback: ReadyCallback| {
                b.set_viewport_is_ready(id, callback)
            })),
        }
    }

    pub fn with_get_state(mut self, f: impl Fn() -> Arc<GridState> + Send + Sync + 'static) -> Self {
        self.get_state = Some(Arc::new(f));
        self
    }

    pub fn with_set_active_viewport(
        mut self,
        f: impl Fn(&str) -> BackingResult + Send + Sync + 'static,
    ) -> Self {
        self.set_active_viewport = Some(Arc::new(f));
        self
    }

    pub fn with_set_display_sets_for_viewports<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(Vec<ViewportAssignment>) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = BackingResult> + Send + 'static,
    {
        self.set_display_sets_for_viewports = Some(Arc::new(move |assignments| {
            Box::pin(f(assignments)) as BoxFuture<'static, BackingResult>
        }));
        self
    }

    pub fn with_set_layout(
        mut self,
        f: impl Fn(SetLayoutParams) -> BackingResult + Send + Sync + 'static,
    ) -> Self {
        self.set_layout = Some(Arc::new(f));
        self
    }

    pub fn with_reset(mut self, f: impl Fn() -> BackingResult + Send + Sync + 'static) -> Self {
        self.reset = Some(Arc::new(f));
        self
    }

    pub fn with_on_mode_exit(mut self, f: impl Fn() -> BackingResult + Send + Sync + 'static) -> Self {
        self.on_mode_exit = Some(Arc::new(f));
        self
    }

    pub fn with_set(mut self, f: impl Fn(GridState) -> BackingResult + Send + Sync + 'static) -> Self {
        self.set = Some(Arc::new(f));
        self
    }

    pub fn with_get_num_viewport_panes(mut self, f: impl Fn() -> usize + Send + Sync + 'static) -> Self {
        self.get_num_viewport_panes = Some(Arc::new(f));
        self
    }

    pub fn with_set_viewport_is_ready(
        mut self,
        f: impl Fn(&str, ReadyCallback) -> BackingResult + Send + Sync + 'static,
    ) -> Self {
        self.set_viewport_is_ready = Some(Arc::new(f));
        self
    }

    /// Overwrite only the callbacks `other` provides.
    pub fn merge(&mut self, other: ServiceImplementation) {
        fn take<T>(slot: &mut Option<T>, incoming: Option<T>) {
            if incoming.is_some() {
                *slot = incoming;
            }
        }
        take(&mut self.get_state, other.get_state);
        take(&mut self.set_active_viewport, other.set_active_viewport);
        take(
            &mut self.set_display_sets_for_viewports,
            other.set_display_sets_for_viewports,
        );
        take(&mut self.set_layout, other.set_layout);
        take(&mut self.reset, other.reset);
        take(&mut self.on_mode_exit, other.on_mode_exit);
        take(&mut self.set, other.set);
        take(&mut self.get_num_viewport_panes, other.get_num_viewport_panes);
        take(&mut self.set_viewport_is_ready, other.set_viewport_is_ready);
    }

    /// Names of the callbacks currently provided.
    pub fn provided(&self) -> Vec<&'static str> {
        let slots = [
            ("getState", self.get_state.is_some()),
            ("setActiveViewportId", self.set_active_viewport.is_some()),
            (
                "setDisplaySetsForViewports",
                self.set_display_sets_for_viewports.is_some(),
            ),
            ("setLayout", self.set_layout.is_some()),
            ("reset", self.reset.is_some()),
            ("onModeExit", self.on_mode_exit.is_some()),
            ("set", self.set.is_some()),
            ("getNumViewportPanes", self.get_num_viewport_panes.is_some()),
            ("setViewportIsReady", self.set_viewport_is_ready.is_some()),
        ];
        slots
            .into_iter()
            .filter_map(|(name, present)| present.then_some(name))
            .collect()
    }
}

impl fmt::Debug for ServiceImplementation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceImplementation")
            .field("provided", &self.provided())
            .finish()
    }
}
