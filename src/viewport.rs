//! Viewport (pane) data model.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Opaque pane identifier.
pub type ViewportId = String;

/// Opaque content-unit (display set) identifier.
pub type DisplaySetUid = String;

/// Fractional placement of a pane inside the grid.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LayoutPosition {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl LayoutPosition {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Options bag carried by a pane.
///
/// `presentation_ids` holds the identity keys stamped on the pane when content was
/// last assigned; collision-aware providers read them back from sibling panes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewport_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_group_id: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub presentation_ids: BTreeMap<String, String>,

    /// Mode-specific flags the coordinator never interprets.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ViewportOptions {
    pub fn with_orientation(mut self, orientation: impl Into<String>) -> Self {
        self.orientation = Some(orientation.into());
        self
    }

    pub fn with_viewport_type(mut self, viewport_type: impl Into<String>) -> Self {
        self.viewport_type = Some(viewport_type.into());
        self
    }

    pub fn presentation_id(&self, kind: &str) -> Option<&str> {
        self.presentation_ids.get(kind).map(String::as_str)
    }
}

/// Per-layer options, parallel to `display_set_instance_uids`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DisplaySetOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub options: Map<String, Value>,
}

/// One rectangular slot of the grid.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    pub viewport_id: ViewportId,

    /// Ordered content; index 0 is the base layer.
    #[serde(default)]
    pub display_set_instance_uids: Vec<DisplaySetUid>,

    #[serde(default)]
    pub display_set_options: Vec<DisplaySetOptions>,

    #[serde(default)]
    pub viewport_options: ViewportOptions,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_id: Option<String>,

    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,

    #[serde(default)]
    pub is_ready: bool,
}

impl Viewport {
    pub fn new(viewport_id: impl Into<ViewportId>) -> Self {
        Self {
            viewport_id: viewport_id.into(),
            ..Self::default()
        }
    }

    pub fn with_display_sets<I, S>(mut self, uids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<DisplaySetUid>,
    {
        self.display_set_instance_uids = uids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_options(mut self, options: ViewportOptions) -> Self {
        self.viewport_options = options;
        self
    }

    pub fn with_position(mut self, position: LayoutPosition) -> Self {
        self.set_position(position);
        self
    }

    pub fn position(&self) -> LayoutPosition {
        LayoutPosition::new(self.x, self.y, self.width, self.height)
    }

    pub fn set_position(&mut self, position: LayoutPosition) {
        self.x = position.x;
        self.y = position.y;
        self.width = position.width;
        self.height = position.height;
    }

    pub fn has_content(&self) -> bool {
        !self.display_set_instance_uids.is_empty()
    }

    pub fn first_display_set(&self) -> Option<&str> {
        self.display_set_instance_uids.first().map(String::as_str)
    }
}

/// Content assignment for one pane, as submitted in a batch.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportAssignment {
    pub viewport_id: ViewportId,

    #[serde(default)]
    pub display_set_instance_uids: Vec<DisplaySetUid>,

    /// Replaces the pane's options when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewport_options: Option<ViewportOptions>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_set_options: Option<Vec<DisplaySetOptions>>,
}

impl ViewportAssignment {
    pub fn new<I, S>(viewport_id: impl Into<ViewportId>, uids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<DisplaySetUid>,
    {
        Self {
            viewport_id: viewport_id.into(),
            display_set_instance_uids: uids.into_iter().map(Into::into).collect(),
            viewport_options: None,
            display_set_options: None,
        }
    }

    pub fn with_options(mut self, options: ViewportOptions) -> Self {
        self.viewport_options = Some(options);
        self
    }

    pub fn with_display_set_options(mut self, options: Vec<DisplaySetOptions>) -> Self {
        self.display_set_options = Some(options);
        self
    }
}
