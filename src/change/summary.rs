use indexmap::IndexMap;

use crate::change::SUMMARY_RULE_WIDTH;

/// Render patches as a human-readable report, one section per file in map order.
pub fn diff_summary(patches: &IndexMap<String, String>) -> String {
    let rule = "-".repeat(SUMMARY_RULE_WIDTH);
    let mut sections = Vec::with_capacity(patches.len() * 3);
    for (file, patch) in patches {
        sections.push(format!("\nFile: {}", file));
        sections.push(rule.clone());
        sections.push(patch.clone());
    }
    sections.join("\n")
}
