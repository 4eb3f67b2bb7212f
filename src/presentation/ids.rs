//! Identity key construction helpers shared by the built-in providers.

use std::collections::{BTreeMap, HashSet};

use crate::grid::state::ViewportMap;
use crate::viewport::Viewport;

/// Separator between key parts. Must not occur in display set uids or labels.
pub const JOIN_STR: &str = "&";

/// Orientation label used when neither the pane nor its content names one.
pub const DEFAULT_ORIENTATION: &str = "acquisition";

/// Input handed to every identity provider.
#[derive(Debug, Clone, Copy)]
pub struct PresentationIdContext<'a> {
    /// The pane as it will look after the assignment.
    pub viewport: &'a Viewport,
    /// All panes as they are now.
    pub viewports: &'a ViewportMap,
    /// True when a pane with this id already shows exactly this ordered content.
    pub is_updating_same_viewport: bool,
}

impl<'a> PresentationIdContext<'a> {
    pub fn new(viewport: &'a Viewport, viewports: &'a ViewportMap) -> Self {
        Self {
            viewport,
            viewports,
            is_updating_same_viewport: is_updating_same_viewport(viewport, viewports),
        }
    }
}

/// Whether some pane in `viewports` has both the same id and the same ordered
/// content list as `viewport`.
pub fn is_updating_same_viewport(viewport: &Viewport, viewports: &ViewportMap) -> bool {
    viewports.iter().any(|v| {
        v.viewport_id == viewport.viewport_id
            && v.display_set_instance_uids == viewport.display_set_instance_uids
    })
}

/// Resolves the anatomical orientation label of a content unit.
///
/// The label algorithm (image orientation cosines → axial/sagittal/coronal) belongs
/// to the imaging layer; the grid only consumes its answer.
pub trait OrientationResolver: Send + Sync {
    fn orientation_for(&self, display_set_uid: &str) -> Option<String>;
}

/// Resolver that never knows an orientation.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnknownOrientation;

impl OrientationResolver for UnknownOrientation {
    fn orientation_for(&self, _display_set_uid: &str) -> Option<String> {
        None
    }
}

/// Lookup-table resolver, filled by a host that already classified its content.
#[derive(Debug, Default, Clone)]
pub struct StaticOrientations {
    labels: BTreeMap<String, String>,
}

impl StaticOrientations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, display_set_uid: impl Into<String>, label: impl Into<String>) -> Self {
        self.labels.insert(display_set_uid.into(), label.into());
        self
    }
}

impl OrientationResolver for StaticOrientations {
    fn orientation_for(&self, display_set_uid: &str) -> Option<String> {
        self.labels.get(display_set_uid).cloned()
    }
}

/// Resolved orientation for a pane: explicit option, else the first content unit's
/// orientation, else [`DEFAULT_ORIENTATION`].
pub fn resolve_orientation(viewport: &Viewport, resolver: &dyn OrientationResolver) -> String {
    if let Some(orientation) = viewport
        .viewport_options
        .orientation
        .as_deref()
        .filter(|o| !o.is_empty())
    {
        return orientation.to_string();
    }
    viewport
        .first_display_set()
        .and_then(|uid| resolver.orientation_for(uid))
        .filter(|o| !o.is_empty())
        .unwrap_or_else(|| DEFAULT_ORIENTATION.to_string())
}

/// Join `parts` and append a discriminator so the key is unique among panes.
///
/// Re-assigning the same content onto the same pane keeps that pane's current key.
/// Otherwise the smallest index not carried by another pane for `kind` is used.
pub fn unique_presentation_id(kind: &str, parts: &[String], ctx: &PresentationIdContext<'_>) -> String {
    let base = parts.join(JOIN_STR);
    let prefix = format!("{base}{JOIN_STR}");
    let target = &ctx.viewport.viewport_id;

    if ctx.is_updating_same_viewport {
        let current = ctx
            .viewports
            .get(target)
            .and_then(|v| v.viewport_options.presentation_id(kind));
        if let Some(current) = current {
            let is_indexed = current
                .strip_prefix(&prefix)
                .is_some_and(|index| index.parse::<u32>().is_ok());
            if is_indexed {
                return current.to_string();
            }
        }
    }

    let taken: HashSet<&str> = ctx
        .viewports
        .iter()
        .filter(|v| &v.viewport_id != target)
        .filter_map(|v| v.viewport_options.presentation_id(kind))
        .collect();

    let mut index = 0u32;
    loop {
        let candidate = format!("{prefix}{index}");
        if !taken.contains(candidate.as_str()) {
            return candidate;
        }
        index += 1;
    }
}
