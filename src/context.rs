//! Process-wide grid context.
//!
//! Built once at startup and passed to whoever needs the grid. Owns the deferred
//! task queue, the identity registry, the coordinator and the built-in stores.

use std::sync::Arc;

use tracing::info;

use crate::config::ViewGridConfig;
use crate::error::GridError;
use crate::events::MicrotaskQueue;
use crate::grid::{InMemoryGrid, ServiceImplementation, SetLayoutParams, ViewportGridService};
use crate::presentation::kinds::{position_store, segmentation_store, window_level_store};
use crate::presentation::{
    OrientationResolver, PositionPresentationStore, PresentationIdRegistry,
    SegmentationPresentationStore, WindowLevelPresentationStore, POSITION_PRESENTATION_ID,
    SEGMENTATION_PRESENTATION_ID, WINDOW_LEVEL_PRESENTATION_ID,
};

pub struct GridContext {
    config: ViewGridConfig,
    microtasks: MicrotaskQueue,
    registry: Arc<PresentationIdRegistry>,
    service: Arc<ViewportGridService>,
    segmentation: Arc<SegmentationPresentationStore>,
    window_level: Arc<WindowLevelPresentationStore>,
    position: Arc<PositionPresentationStore>,
}

impl GridContext {
    /// Build a context with the providers `config` enables. No backing is installed.
    pub fn new(
        config: ViewGridConfig,
        resolver: Arc<dyn OrientationResolver>,
    ) -> Result<Self, GridError> {
        config.validate().map_err(|errors| {
            let msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            GridError::Config(format!(
                "Configuration validation failed:\n{}",
                msgs.join("\n")
            ))
        })?;

        let microtasks = MicrotaskQueue::new();
        let registry = Arc::new(PresentationIdRegistry::new());
        let service = Arc::new(ViewportGridService::new(
            microtasks.clone(),
            registry.clone(),
        ));
        let segmentation = Arc::new(segmentation_store(resolver));
        let window_level = Arc::new(window_level_store());
        let position = Arc::new(position_store());

        for kind in &config.presentation.providers {
            match kind.as_str() {
                SEGMENTATION_PRESENTATION_ID => segmentation.register_provider(&registry),
                WINDOW_LEVEL_PRESENTATION_ID => window_level.register_provider(&registry),
                POSITION_PRESENTATION_ID => position.register_provider(&registry),
                other => {
                    return Err(GridError::Config(format!(
                        "unknown presentation kind: {other}"
                    )))
                }
            }
        }

        info!(
            providers = ?registry.kinds(),
            "viewport grid context ready"
        );

        Ok(Self {
            config,
            microtasks,
            registry,
            service,
            segmentation,
            window_level,
            position,
        })
    }

    /// Install a fresh [`InMemoryGrid`] as the coordinator's backing and return it.
    pub fn install_in_memory_backing(&self) -> Arc<InMemoryGrid> {
        let backing = InMemoryGrid::new()
            .with_presentation_ids(self.registry.clone())
            .shared();
        self.service
            .set_service_implementation(ServiceImplementation::from_backing(backing.clone()));
        backing
    }

    pub fn config(&self) -> &ViewGridConfig {
        &self.config
    }

    pub fn microtasks(&self) -> &MicrotaskQueue {
        &self.microtasks
    }

    pub fn registry(&self) -> &Arc<PresentationIdRegistry> {
        &self.registry
    }

    pub fn service(&self) -> &Arc<ViewportGridService> {
        &self.service
    }

    pub fn segmentation(&self) -> &Arc<SegmentationPresentationStore> {
        &self.segmentation
    }

    pub fn window_level(&self) -> &Arc<WindowLevelPresentationStore> {
        &self.window_level
    }

    pub fn position(&self) -> &Arc<PositionPresentationStore> {
        &self.position
    }

    /// Run deferred broadcasts. Returns how many ran.
    pub fn checkpoint(&self) -> usize {
        self.microtasks.run_until_idle()
    }

    pub fn clear_presentations(&self) {
        self.segmentation.clear();
        self.window_level.clear();
        self.position.clear();
    }

    /// Leave the current mode: clean grid, empty stores.
    pub fn on_mode_exit(&self) -> Result<(), GridError> {
        self.service.on_mode_exit()?;
        self.clear_presentations();
        Ok(())
    }

    /// Apply the configured startup layout.
    pub fn apply_default_layout(&self) -> Result<(), GridError> {
        let grid = &self.config.grid;
        self.service.set_layout(
            SetLayoutParams::grid(grid.default_rows, grid.default_cols)
                .with_layout_type(grid.layout_type.clone()),
        )
    }
}
