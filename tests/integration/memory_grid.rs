//! Reference in-memory backing driven through the coordinator

use serde_json::{Map, Value};
use viewgrid::grid::{GridBacking, InMemoryGrid, SetLayoutParams};
use viewgrid::presentation::{
    POSITION_PRESENTATION_ID, SEGMENTATION_PRESENTATION_ID, WINDOW_LEVEL_PRESENTATION_ID,
};
use viewgrid::viewport::{DisplaySetOptions, LayoutPosition, Viewport, ViewportAssignment, ViewportOptions};
use viewgrid::GridError;

use crate::integration::test_utils::context;

#[test]
fn test_factory_supplies_pane_ids() {
    let (ctx, _backing) = context();
    ctx.service()
        .set_layout(SetLayoutParams::grid(1, 2).with_find_or_create(
            |index: usize, position_id: &str, options: &mut Map<String, Value>| {
                options.insert(format!("slot{index}"), Value::from(position_id.to_string()));
                Some(Viewport::new(format!("vp{}", index + 1)))
            },
        ))
        .unwrap();

    let state = ctx.service().get_state().unwrap();
    let ids: Vec<&str> = state.viewports.ids().collect();
    assert_eq!(ids, vec!["vp1", "vp2"]);
    assert_eq!(state.viewport("vp2").unwrap().position_id.as_deref(), Some("1-0"));
    assert_eq!(state.active_viewport_id.as_deref(), Some("vp1"));
}

#[test]
fn test_duplicate_pane_ids_are_rejected() {
    let (ctx, _backing) = context();
    let err = ctx
        .service()
        .set_layout(SetLayoutParams::grid(1, 2).with_find_or_create(
            |_: usize, _: &str, _: &mut Map<String, Value>| Some(Viewport::new("same")),
        ))
        .unwrap_err();
    assert!(matches!(err, GridError::InvalidLayout(_)));
}

#[test]
fn test_explicit_active_must_exist_in_layout() {
    let (ctx, _backing) = context();
    let err = ctx
        .service()
        .set_layout(SetLayoutParams::grid(1, 1).with_active_viewport_id("elsewhere"))
        .unwrap_err();
    assert!(matches!(err, GridError::InvalidLayout(_)));

    ctx.service()
        .set_layout(SetLayoutParams::grid(1, 2).with_active_viewport_id("default-1-0"))
        .unwrap();
    assert_eq!(
        ctx.service().get_active_viewport_id().unwrap().as_deref(),
        Some("default-1-0")
    );
}

#[test]
fn test_active_pane_survives_relayout_when_still_present() {
    let (ctx, _backing) = context();
    ctx.service().set_layout(SetLayoutParams::grid(1, 2)).unwrap();
    ctx.service().set_active_viewport_id("default-1-0").unwrap();
    ctx.service().set_layout(SetLayoutParams::grid(2, 2)).unwrap();
    assert_eq!(
        ctx.service().get_active_viewport_id().unwrap().as_deref(),
        Some("default-1-0")
    );

    ctx.service().set_layout(SetLayoutParams::grid(1, 1)).unwrap();
    assert_eq!(
        ctx.service().get_active_viewport_id().unwrap().as_deref(),
        Some("default-0-0")
    );
}

#[test]
fn test_explicit_layout_options_decide_slot_count_and_geometry() {
    let (ctx, _backing) = context();
    let options = vec![
        LayoutPosition::new(0.0, 0.0, 0.66, 1.0),
        LayoutPosition::new(0.66, 0.0, 0.34, 0.5),
        LayoutPosition::new(0.66, 0.5, 0.34, 0.5),
    ];
    ctx.service()
        .set_layout(
            SetLayoutParams::grid(2, 2)
                .with_layout_options(options.clone())
                .with_layout_type("custom")
                .hanging_protocol(true),
        )
        .unwrap();

    let state = ctx.service().get_state().unwrap();
    assert_eq!(state.viewports.len(), 3);
    assert_eq!(ctx.service().get_layout_options_from_state(&state), options);
    assert_eq!(state.layout.layout_type, "custom");
    assert!(state.is_hanging_protocol_layout);
}

#[tokio::test]
async fn test_assignment_stamps_presentation_ids() {
    let (ctx, _backing) = context();
    ctx.service().set_layout(SetLayoutParams::grid(1, 2)).unwrap();

    ctx.service()
        .set_display_sets_for_viewports(vec![
            ViewportAssignment::new("default-0-0", ["ct"])
                .with_options(ViewportOptions::default().with_orientation("axial")),
            ViewportAssignment::new("default-1-0", ["ct"])
                .with_options(ViewportOptions::default().with_orientation("axial")),
        ])
        .await
        .unwrap();

    let state = ctx.service().get_state().unwrap();
    let left = &state.viewport("default-0-0").unwrap().viewport_options;
    let right = &state.viewport("default-1-0").unwrap().viewport_options;

    assert_eq!(left.presentation_id(SEGMENTATION_PRESENTATION_ID), Some("axial&ct"));
    assert_eq!(right.presentation_id(SEGMENTATION_PRESENTATION_ID), Some("axial&ct"));
    assert_eq!(left.presentation_id(WINDOW_LEVEL_PRESENTATION_ID), Some("ct&0"));
    assert_eq!(right.presentation_id(WINDOW_LEVEL_PRESENTATION_ID), Some("ct&1"));
    assert_eq!(
        left.presentation_id(POSITION_PRESENTATION_ID),
        Some("stack&axial&ct&0")
    );
    assert_eq!(
        right.presentation_id(POSITION_PRESENTATION_ID),
        Some("stack&axial&ct&1")
    );
}

#[tokio::test]
async fn test_reassigning_same_content_keeps_discriminator() {
    let (ctx, _backing) = context();
    ctx.service().set_layout(SetLayoutParams::grid(1, 2)).unwrap();
    let service = ctx.service();

    service
        .set_display_sets_for_viewport(ViewportAssignment::new("default-0-0", ["mr"]))
        .await
        .unwrap();
    service
        .set_display_sets_for_viewport(ViewportAssignment::new("default-1-0", ["mr"]))
        .await
        .unwrap();
    // Same content back onto the second pane.
    let updated = service
        .set_display_sets_for_viewport(ViewportAssignment::new("default-1-0", ["mr"]))
        .await
        .unwrap();

    assert_eq!(
        updated[0]
            .viewport_options
            .presentation_id(WINDOW_LEVEL_PRESENTATION_ID),
        Some("mr&1")
    );

    // A relayout that keeps both panes keeps both keys.
    service.set_layout(SetLayoutParams::grid(2, 2)).unwrap();
    let state = service.get_state().unwrap();
    assert_eq!(
        state
            .viewport("default-0-0")
            .unwrap()
            .viewport_options
            .presentation_id(WINDOW_LEVEL_PRESENTATION_ID),
        Some("mr&0")
    );
    assert_eq!(
        state
            .viewport("default-1-0")
            .unwrap()
            .viewport_options
            .presentation_id(WINDOW_LEVEL_PRESENTATION_ID),
        Some("mr&1")
    );
}

#[tokio::test]
async fn test_content_change_clears_ready_and_defaults_layer_options() {
    let (ctx, _backing) = context();
    ctx.service().set_layout(SetLayoutParams::grid(1, 1)).unwrap();
    let service = ctx.service();

    service
        .set_display_sets_for_viewport(ViewportAssignment::new("default-0-0", ["ct"]))
        .await
        .unwrap();
    service.set_viewport_is_ready("default-0-0", || {}).unwrap();
    assert!(service.get_state().unwrap().viewport("default-0-0").unwrap().is_ready);

    let updated = service
        .set_display_sets_for_viewport(
            ViewportAssignment::new("default-0-0", ["ct", "pt"]).with_display_set_options(vec![
                DisplaySetOptions::default(),
                DisplaySetOptions {
                    id: Some("fusion".to_string()),
                    ..Default::default()
                },
            ]),
        )
        .await
        .unwrap();
    let pane = &updated[0];
    assert!(!pane.is_ready);
    assert_eq!(pane.display_set_options.len(), 2);
    assert_eq!(
        pane.viewport_options.presentation_id(WINDOW_LEVEL_PRESENTATION_ID),
        Some("ct&fusion&pt&0")
    );

    let updated = service
        .set_display_sets_for_viewport(ViewportAssignment::new("default-0-0", ["mr"]))
        .await
        .unwrap();
    assert_eq!(updated[0].display_set_options, vec![DisplaySetOptions::default()]);
}

#[test]
fn test_backing_without_registry_leaves_ids_alone() {
    let backing = InMemoryGrid::new();
    backing.set_layout(SetLayoutParams::grid(1, 1)).unwrap();
    let mut state = backing.get_state().as_ref().clone();
    state
        .viewports
        .get_mut("default-0-0")
        .unwrap()
        .viewport_options
        .presentation_ids
        .insert(SEGMENTATION_PRESENTATION_ID.to_string(), "stale".to_string());
    backing.set(state).unwrap();

    backing.set_layout(SetLayoutParams::grid(1, 1)).unwrap();
    assert_eq!(
        backing
            .get_state()
            .viewport("default-0-0")
            .unwrap()
            .viewport_options
            .presentation_id(SEGMENTATION_PRESENTATION_ID),
        Some("stale")
    );
}

#[test]
fn test_set_rejects_dangling_active_pane() {
    let backing = InMemoryGrid::new();
    let mut state = viewgrid::GridState::default();
    state.active_viewport_id = Some("ghost".to_string());
    let err = GridError::from(backing.set(state).unwrap_err());
    assert!(matches!(err, GridError::InvalidLayout(_)));
}
