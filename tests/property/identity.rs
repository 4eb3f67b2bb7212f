//! Property-based tests for presentation identity keys

use proptest::prelude::*;
use std::collections::HashSet;
use viewgrid::grid::ViewportMap;
use viewgrid::presentation::providers::{
    position_presentation_id, segmentation_presentation_id, window_level_presentation_id,
};
use viewgrid::presentation::{
    PresentationIdContext, UnknownOrientation, POSITION_PRESENTATION_ID,
    SEGMENTATION_PRESENTATION_ID, WINDOW_LEVEL_PRESENTATION_ID,
};
use viewgrid::viewport::{Viewport, ViewportOptions};

fn uids() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z0-9.]{1,8}", 1..4)
}

fn orientation() -> impl Strategy<Value = Option<String>> {
    prop::option::of(prop::sample::select(vec![
        "axial".to_string(),
        "sagittal".to_string(),
        "coronal".to_string(),
    ]))
}

fn pane(id: &str, uids: &[String], orientation: &Option<String>) -> Viewport {
    let mut options = ViewportOptions::default();
    options.orientation = orientation.clone();
    Viewport::new(id)
        .with_display_sets(uids.iter().cloned())
        .with_options(options)
}

proptest! {
    /// Same ordered content and orientation always share a segmentation key.
    #[test]
    fn test_segmentation_key_is_shared_by_identical_content(
        content in uids(),
        orientation in orientation(),
    ) {
        let left = pane("left", &content, &orientation);
        let right = pane("right", &content, &orientation);
        let all: ViewportMap = [left.clone(), right.clone()].into_iter().collect();

        let a = segmentation_presentation_id(
            SEGMENTATION_PRESENTATION_ID,
            &PresentationIdContext::new(&left, &all),
            &UnknownOrientation,
        );
        let b = segmentation_presentation_id(
            SEGMENTATION_PRESENTATION_ID,
            &PresentationIdContext::new(&right, &all),
            &UnknownOrientation,
        );
        prop_assert!(a.is_some());
        prop_assert_eq!(a, b);
    }

    /// Reordering layers changes the segmentation key.
    #[test]
    fn test_segmentation_key_depends_on_layer_order(content in uids()) {
        prop_assume!(content.len() > 1 && content[0] != content[content.len() - 1]);
        let mut reversed = content.clone();
        reversed.reverse();

        let forward = pane("vp", &content, &None);
        let backward = pane("vp", &reversed, &None);
        let all = ViewportMap::new();
        let a = segmentation_presentation_id(
            SEGMENTATION_PRESENTATION_ID,
            &PresentationIdContext::new(&forward, &all),
            &UnknownOrientation,
        );
        let b = segmentation_presentation_id(
            SEGMENTATION_PRESENTATION_ID,
            &PresentationIdContext::new(&backward, &all),
            &UnknownOrientation,
        );
        prop_assert_ne!(a, b);
    }

    /// Discriminated kinds never hand the same key to two panes.
    #[test]
    fn test_discriminated_keys_are_unique_across_panes(
        content in uids(),
        count in 1usize..6,
    ) {
        let mut all = ViewportMap::new();
        for index in 0..count {
            let mut viewport = pane(&format!("vp{index}"), &content, &None);
            let ctx = PresentationIdContext::new(&viewport, &all);
            let window_level = window_level_presentation_id(WINDOW_LEVEL_PRESENTATION_ID, &ctx);
            let position = position_presentation_id(POSITION_PRESENTATION_ID, &ctx);
            let ids = &mut viewport.viewport_options.presentation_ids;
            ids.insert(WINDOW_LEVEL_PRESENTATION_ID.to_string(), window_level.unwrap());
            ids.insert(POSITION_PRESENTATION_ID.to_string(), position.unwrap());
            all.insert(viewport);
        }

        for kind in [WINDOW_LEVEL_PRESENTATION_ID, POSITION_PRESENTATION_ID] {
            let keys: HashSet<&str> = all
                .iter()
                .filter_map(|v| v.viewport_options.presentation_id(kind))
                .collect();
            prop_assert_eq!(keys.len(), count);
        }
    }

    /// Providers answer only for their own kind.
    #[test]
    fn test_providers_ignore_foreign_kinds(content in uids(), kind in "[a-zA-Z]{1,12}") {
        let viewport = pane("vp", &content, &None);
        let all = ViewportMap::new();
        let ctx = PresentationIdContext::new(&viewport, &all);
        prop_assume!(kind != WINDOW_LEVEL_PRESENTATION_ID && kind != POSITION_PRESENTATION_ID);
        prop_assert_eq!(window_level_presentation_id(&kind, &ctx), None);
        prop_assert_eq!(position_presentation_id(&kind, &ctx), None);
        prop_assert_eq!(
            segmentation_presentation_id(&kind, &ctx, &UnknownOrientation),
            None
        );
    }
}
