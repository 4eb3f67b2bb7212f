//! Providers command presentation: registered kinds text/json.

use serde_json::json;

pub fn format_providers_text(kinds: &[String]) -> String {
    if kinds.is_empty() {
        return "No presentation id providers registered.\n\nEnable kinds under [presentation] providers.".to_string();
    }
    let mut output = String::from("Presentation id providers:\n");
    for (index, kind) in kinds.iter().enumerate() {
        output.push_str(&format!("  {:>2}. {}\n", index + 1, kind));
    }
    output.push_str(&format!("\nTotal: {} kind(s)\n", kinds.len()));
    output
}

pub fn format_providers_json(kinds: &[String]) -> String {
    let out = json!({ "providers": kinds, "total": kinds.len() });
    serde_json::to_string_pretty(&out).unwrap_or_else(|_| "{}".to_string())
}
