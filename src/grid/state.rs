//! Grid state snapshot.

use serde::{Deserialize, Serialize};

use crate::viewport::{LayoutPosition, Viewport, ViewportId};

/// Layout type used when callers do not name one.
pub const DEFAULT_LAYOUT_TYPE: &str = "grid";

/// Ordered pane-id → pane mapping.
///
/// Iteration follows insertion order, which is the order panes were laid out.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewportMap {
    entries: Vec<Viewport>,
}

impl ViewportMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, viewport_id: &str) -> Option<&Viewport> {
        self.entries.iter().find(|v| v.viewport_id == viewport_id)
    }

    pub fn get_mut(&mut self, viewport_id: &str) -> Option<&mut Viewport> {
        self.entries.iter_mut().find(|v| v.viewport_id == viewport_id)
    }

    pub fn contains(&self, viewport_id: &str) -> bool {
        self.get(viewport_id).is_some()
    }

    /// Insert or replace. A replaced pane keeps its slot in the ordering.
    pub fn insert(&mut self, viewport: Viewport) -> Option<Viewport> {
        match self.get_mut(&viewport.viewport_id) {
            Some(existing) => Some(std::mem::replace(existing, viewport)),
            None => {
                self.entries.push(viewport);
                None
            }
        }
    }

    pub fn remove(&mut self, viewport_id: &str) -> Option<Viewport> {
        let index = self.entries.iter().position(|v| v.viewport_id == viewport_id)?;
        Some(self.entries.remove(index))
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|v| v.viewport_id.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Viewport> {
        self.entries.iter()
    }

    pub fn values(&self) -> &[Viewport] {
        &self.entries
    }
}

impl FromIterator<Viewport> for ViewportMap {
    fn from_iter<T: IntoIterator<Item = Viewport>>(iter: T) -> Self {
        let mut map = ViewportMap::new();
        for viewport in iter {
            map.insert(viewport);
        }
        map
    }
}

impl<'a> IntoIterator for &'a ViewportMap {
    type Item = &'a Viewport;
    type IntoIter = std::slice::Iter<'a, Viewport>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Layout metadata propagated verbatim from `setLayout` calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridLayout {
    pub num_rows: usize,
    pub num_cols: usize,
    pub layout_type: String,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            num_rows: 1,
            num_cols: 1,
            layout_type: DEFAULT_LAYOUT_TYPE.to_string(),
        }
    }
}

/// Canonical grid snapshot, owned by the backing implementation.
///
/// Consumers receive it behind an `Arc` and never mutate it in place.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridState {
    pub active_viewport_id: Option<ViewportId>,
    pub layout: GridLayout,
    pub viewports: ViewportMap,
    #[serde(default)]
    pub is_hanging_protocol_layout: bool,
}

impl GridState {
    pub fn viewport(&self, viewport_id: &str) -> Option<&Viewport> {
        self.viewports.get(viewport_id)
    }

    pub fn active_viewport(&self) -> Option<&Viewport> {
        self.active_viewport_id
            .as_deref()
            .and_then(|id| self.viewports.get(id))
    }

    /// Geometry of every pane, in pane order.
    pub fn layout_options(&self) -> Vec<LayoutPosition> {
        self.viewports.iter().map(Viewport::position).collect()
    }

    /// Whether the active id (when set) names an existing pane.
    pub fn active_is_consistent(&self) -> bool {
        match &self.active_viewport_id {
            Some(id) => self.viewports.contains(id),
            None => true,
        }
    }
}
