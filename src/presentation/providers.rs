//! Built-in presentation identity providers.
//!
//! Each provider answers only for its own kind string and yields no identity for a
//! pane without content.

use std::sync::Arc;

use crate::presentation::ids::{
    resolve_orientation, unique_presentation_id, OrientationResolver, PresentationIdContext,
    DEFAULT_ORIENTATION, JOIN_STR,
};
use crate::presentation::registry::PresentationIdProvider;

pub const SEGMENTATION_PRESENTATION_ID: &str = "segmentationPresentationId";
pub const WINDOW_LEVEL_PRESENTATION_ID: &str = "windowLevelPresentationId";
pub const POSITION_PRESENTATION_ID: &str = "positionPresentationId";

/// Viewport type assumed when a pane does not declare one.
pub const DEFAULT_VIEWPORT_TYPE: &str = "stack";

pub const BUILTIN_KINDS: [&str; 3] = [
    SEGMENTATION_PRESENTATION_ID,
    WINDOW_LEVEL_PRESENTATION_ID,
    POSITION_PRESENTATION_ID,
];

/// `[orientation, ...uids]` joined with [`JOIN_STR`].
///
/// No discriminator: panes with the same ordered content and orientation share
/// segmentation state.
pub fn segmentation_presentation_id(
    kind: &str,
    ctx: &PresentationIdContext<'_>,
    resolver: &dyn OrientationResolver,
) -> Option<String> {
    if kind != SEGMENTATION_PRESENTATION_ID || !ctx.viewport.has_content() {
        return None;
    }
    let mut parts = Vec::with_capacity(ctx.viewport.display_set_instance_uids.len() + 1);
    parts.push(resolve_orientation(ctx.viewport, resolver));
    parts.extend(ctx.viewport.display_set_instance_uids.iter().cloned());
    Some(parts.join(JOIN_STR))
}

/// Per layer the layer's option id (when set) then its uid, plus a discriminator.
pub fn window_level_presentation_id(kind: &str, ctx: &PresentationIdContext<'_>) -> Option<String> {
    if kind != WINDOW_LEVEL_PRESENTATION_ID || !ctx.viewport.has_content() {
        return None;
    }
    let viewport = ctx.viewport;
    let mut parts = Vec::new();
    for (index, uid) in viewport.display_set_instance_uids.iter().enumerate() {
        if let Some(id) = viewport
            .display_set_options
            .get(index)
            .and_then(|options| options.id.as_ref())
        {
            parts.push(id.clone());
        }
        parts.push(uid.clone());
    }
    Some(unique_presentation_id(kind, &parts, ctx))
}

/// `[viewport type, orientation, ...uids]` plus a discriminator.
///
/// The orientation here is the pane's declared one; camera pose is not shared
/// between panes that merely happen to resolve the same label.
pub fn position_presentation_id(kind: &str, ctx: &PresentationIdContext<'_>) -> Option<String> {
    if kind != POSITION_PRESENTATION_ID || !ctx.viewport.has_content() {
        return None;
    }
    let options = &ctx.viewport.viewport_options;
    let mut parts = vec![
        options
            .viewport_type
            .clone()
            .unwrap_or_else(|| DEFAULT_VIEWPORT_TYPE.to_string()),
        options
            .orientation
            .clone()
            .unwrap_or_else(|| DEFAULT_ORIENTATION.to_string()),
    ];
    parts.extend(ctx.viewport.display_set_instance_uids.iter().cloned());
    Some(unique_presentation_id(kind, &parts, ctx))
}

pub fn segmentation_provider(resolver: Arc<dyn OrientationResolver>) -> PresentationIdProvider {
    Arc::new(move |kind: &str, ctx: &PresentationIdContext<'_>| {
        segmentation_presentation_id(kind, ctx, resolver.as_ref())
    })
}

pub fn window_level_provider() -> PresentationIdProvider {
    Arc::new(window_level_presentation_id)
}

pub fn position_provider() -> PresentationIdProvider {
    Arc::new(position_presentation_id)
}
