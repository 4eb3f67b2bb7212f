//! Built-in presentation payloads and their stores.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::presentation::ids::OrientationResolver;
use crate::presentation::providers::{
    position_provider, segmentation_provider, window_level_provider, POSITION_PRESENTATION_ID,
    SEGMENTATION_PRESENTATION_ID, WINDOW_LEVEL_PRESENTATION_ID,
};
use crate::presentation::store::PresentationStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SegmentationRepresentation {
    Labelmap,
    Contour,
    Surface,
}

/// One segmentation shown in a pane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentationPresentationItem {
    pub segmentation_id: String,
    #[serde(rename = "type")]
    pub representation_type: SegmentationRepresentation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hydrated: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<Value>,
}

/// Segmentations in display order.
pub type SegmentationPresentation = Vec<SegmentationPresentationItem>;

/// VOI settings of one layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiSettings {
    pub window_width: f64,
    pub window_center: f64,
    #[serde(default)]
    pub invert: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colormap: Option<String>,
}

/// Window/level per display set uid.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WindowLevelPresentation {
    pub layers: BTreeMap<String, VoiSettings>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Camera {
    pub position: [f64; 3],
    pub focal_point: [f64; 3],
    pub view_up: [f64; 3],
    pub parallel_scale: f64,
}

/// Camera pose and slice of a pane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionPresentation {
    pub camera: Camera,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_index: Option<usize>,
}

pub type SegmentationPresentationStore = PresentationStore<SegmentationPresentation>;
pub type WindowLevelPresentationStore = PresentationStore<WindowLevelPresentation>;
pub type PositionPresentationStore = PresentationStore<PositionPresentation>;

pub fn segmentation_store(resolver: Arc<dyn OrientationResolver>) -> SegmentationPresentationStore {
    PresentationStore::new(SEGMENTATION_PRESENTATION_ID, segmentation_provider(resolver))
}

pub fn window_level_store() -> WindowLevelPresentationStore {
    PresentationStore::new(WINDOW_LEVEL_PRESENTATION_ID, window_level_provider())
}

pub fn position_store() -> PositionPresentationStore {
    PresentationStore::new(POSITION_PRESENTATION_ID, position_provider())
}
