//! Presentation identity: providers, registry, and per-kind stores.

pub mod ids;
pub mod kinds;
pub mod providers;
pub mod registry;
pub mod store;

pub use ids::{
    is_updating_same_viewport, OrientationResolver, PresentationIdContext, StaticOrientations,
    UnknownOrientation, DEFAULT_ORIENTATION, JOIN_STR,
};
pub use kinds::{
    PositionPresentation, PositionPresentationStore, SegmentationPresentation,
    SegmentationPresentationItem, SegmentationPresentationStore, SegmentationRepresentation,
    WindowLevelPresentation, WindowLevelPresentationStore,
};
pub use providers::{
    BUILTIN_KINDS, POSITION_PRESENTATION_ID, SEGMENTATION_PRESENTATION_ID,
    WINDOW_LEVEL_PRESENTATION_ID,
};
pub use registry::{PresentationIdProvider, PresentationIdRegistry};
pub use store::{AddContext, PresentationStore};
