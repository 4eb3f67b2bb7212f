//! Layout command presentation: grid table and json.

use comfy_table::Table;
use serde_json::json;

use crate::events::GridEvent;
use crate::grid::GridState;

fn geometry(x: f64, y: f64, width: f64, height: f64) -> String {
    format!("{:.3},{:.3} {:.3}x{:.3}", x, y, width, height)
}

pub fn format_grid_text(state: &GridState, kinds: &[String], events: &[GridEvent]) -> String {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);

    let mut header = vec![
        "Viewport".to_string(),
        "Position".to_string(),
        "Geometry".to_string(),
        "Display Sets".to_string(),
        "Ready".to_string(),
    ];
    header.extend(kinds.iter().cloned());
    table.set_header(header);

    for viewport in &state.viewports {
        let marker = if state.active_viewport_id.as_deref() == Some(viewport.viewport_id.as_str()) {
            format!("* {}", viewport.viewport_id)
        } else {
            viewport.viewport_id.clone()
        };
        let mut row = vec![
            marker,
            viewport.position_id.clone().unwrap_or_else(|| "-".to_string()),
            geometry(viewport.x, viewport.y, viewport.width, viewport.height),
            if viewport.has_content() {
                viewport.display_set_instance_uids.join(", ")
            } else {
                "-".to_string()
            },
            if viewport.is_ready { "yes" } else { "no" }.to_string(),
        ];
        for kind in kinds {
            row.push(
                viewport
                    .viewport_options
                    .presentation_id(kind)
                    .unwrap_or("-")
                    .to_string(),
            );
        }
        table.add_row(row);
    }

    let mut output = format!(
        "Layout: {} x {} ({})\n{}\n",
        state.layout.num_rows, state.layout.num_cols, state.layout.layout_type, table
    );
    if !events.is_empty() {
        output.push_str("\nEvents:\n");
        for event in events {
            output.push_str(&format!("  {}\n", event.kind()));
        }
    }
    output
}

pub fn format_grid_json(state: &GridState, events: &[GridEvent]) -> String {
    let out = json!({
        "generatedAt": chrono::Utc::now().to_rfc3339(),
        "state": state,
        "events": events,
    });
    serde_json::to_string_pretty(&out).unwrap_or_else(|_| "{}".to_string())
}
