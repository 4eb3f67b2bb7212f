//! End-to-end flows through the grid context and the CLI run context

use std::sync::Arc;

use tempfile::TempDir;
use viewgrid::cli::{Commands, RunContext};
use viewgrid::config::ViewGridConfig;
use viewgrid::events::GridEventKind;
use viewgrid::grid::GridBacking;
use viewgrid::presentation::{StaticOrientations, SEGMENTATION_PRESENTATION_ID};
use viewgrid::viewport::ViewportAssignment;
use viewgrid::GridContext;

use crate::integration::test_utils::record;

fn config_file(dir: &TempDir, body: &str) -> std::path::PathBuf {
    let path = dir.path().join("gridctl.toml");
    std::fs::write(&path, body).unwrap();
    path
}

#[tokio::test]
async fn test_segmentation_state_follows_content_across_layouts() {
    let resolver = StaticOrientations::new().with("ct", "axial");
    let mut config = ViewGridConfig::default();
    config.grid.default_cols = 2;
    let ctx = GridContext::new(config, Arc::new(resolver)).unwrap();
    ctx.install_in_memory_backing();
    ctx.apply_default_layout().unwrap();

    let updated = ctx
        .service()
        .set_display_sets_for_viewport(ViewportAssignment::new("default-0-0", ["ct"]))
        .await
        .unwrap();
    let key = updated[0]
        .viewport_options
        .presentation_id(SEGMENTATION_PRESENTATION_ID)
        .unwrap()
        .to_string();
    ctx.segmentation().set(key.clone(), Vec::new());

    // Same content lands in a different pane of a new layout.
    ctx.service()
        .set_layout(viewgrid::SetLayoutParams::grid(2, 2))
        .unwrap();
    let moved = ctx
        .service()
        .set_display_sets_for_viewport(ViewportAssignment::new("default-1-1", ["ct"]))
        .await
        .unwrap();
    assert_eq!(
        moved[0]
            .viewport_options
            .presentation_id(SEGMENTATION_PRESENTATION_ID),
        Some(key.as_str())
    );
    assert!(ctx.segmentation().get(&key).is_some());
}

#[tokio::test]
async fn test_mode_exit_returns_to_clean_grid() {
    let ctx = GridContext::new(
        ViewGridConfig::default(),
        Arc::new(viewgrid::presentation::UnknownOrientation),
    )
    .unwrap();
    ctx.install_in_memory_backing();
    ctx.apply_default_layout().unwrap();
    ctx.segmentation().set("acquisition&ct", Vec::new());
    let (events, _sub) = record(&ctx, GridEventKind::GridStateChanged);

    ctx.on_mode_exit().unwrap();
    ctx.checkpoint();

    assert_eq!(ctx.service().get_num_viewport_panes().unwrap(), 0);
    assert!(ctx.segmentation().is_empty());
    assert!(events.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_run_context_renders_layout_json() {
    let dir = TempDir::new().unwrap();
    let path = config_file(&dir, "[grid]\ndefault_rows = 1\ndefault_cols = 2\n");
    let run = RunContext::new(dir.path().to_path_buf(), Some(path)).unwrap();

    let output = run
        .execute(&Commands::Layout {
            rows: None,
            cols: None,
            assignments: vec!["default-1-0=ct,pt".to_string()],
            orientation: Some("coronal".to_string()),
            active: Some("default-1-0".to_string()),
            format: "json".to_string(),
        })
        .await
        .unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed["state"]["activeViewportId"], "default-1-0");
    let events: Vec<&str> = parsed["events"]
        .as_array()
        .unwrap()
        .iter()
        .map(|event| event["event"].as_str().unwrap())
        .collect();
    assert_eq!(
        events,
        vec![
            "event::layoutChanged",
            "event::viewportsReady",
            "event::gridStateChanged",
            "event::activeviewportidchanged"
        ]
    );
    let state = run.grid().service().get_state().unwrap();
    assert!(state.viewport("default-1-0").unwrap().is_ready);
    assert_eq!(
        run.backing().get_num_viewport_panes(),
        state.viewports.len()
    );
}

#[tokio::test]
async fn test_run_context_lists_configured_providers() {
    let dir = TempDir::new().unwrap();
    let path = config_file(
        &dir,
        "[presentation]\nproviders = [\"positionPresentationId\", \"segmentationPresentationId\"]\n",
    );
    let run = RunContext::new(dir.path().to_path_buf(), Some(path)).unwrap();

    let output = run
        .execute(&Commands::Providers {
            format: "text".to_string(),
        })
        .await
        .unwrap();
    let position = output.find("positionPresentationId").unwrap();
    let segmentation = output.find("segmentationPresentationId").unwrap();
    assert!(position < segmentation);
    assert!(output.contains("Total: 2 kind(s)"));
}

#[tokio::test]
async fn test_run_context_rejects_unknown_pane_in_active_flag() {
    let dir = TempDir::new().unwrap();
    let path = config_file(&dir, "");
    let run = RunContext::new(dir.path().to_path_buf(), Some(path)).unwrap();

    let result = run
        .execute(&Commands::Layout {
            rows: Some(1),
            cols: Some(1),
            assignments: vec![],
            orientation: None,
            active: Some("nowhere".to_string()),
            format: "text".to_string(),
        })
        .await;
    assert!(result.is_err());
    assert_eq!(run.grid().service().bus().listener_count(GridEventKind::LayoutChanged), 0);
}

#[tokio::test]
async fn test_run_context_prints_effective_config() {
    let dir = TempDir::new().unwrap();
    let path = config_file(&dir, "[grid]\nlayout_type = \"mpr\"\n");
    let run = RunContext::new(dir.path().to_path_buf(), Some(path)).unwrap();

    let output = run.execute(&Commands::Config).await.unwrap();
    let parsed: ViewGridConfig = toml::from_str(&output).unwrap();
    assert_eq!(parsed.grid.layout_type, "mpr");
    assert_eq!(&parsed, run.grid().config());
}
