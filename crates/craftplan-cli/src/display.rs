use std::collections::BTreeMap;

use craftplan_core::Summary;

const RULE: &str = "-----------------------------";

/// Render a plan the way the console shows it.
pub fn format_plan(summary: &Summary, objective: i64, leftover: Option<&BTreeMap<String, u64>>) -> String {
    let mut out = String::new();

    out.push_str("You can craft the following:\n");
    out.push_str(RULE);
    out.push('\n');
    push_counts(&mut out, &summary.recipes);
    out.push_str(RULE);
    out.push('\n');
    out.push_str("It will cost you:\n");
    out.push_str(RULE);
    out.push('\n');
    push_counts(&mut out, &summary.resources);

    if let Some(left) = leftover {
        out.push_str(RULE);
        out.push('\n');
        out.push_str("You will have left:\n");
        out.push_str(RULE);
        out.push('\n');
        push_counts(&mut out, left);
    }

    out.push_str(RULE);
    out.push('\n');
    out.push_str(&format!("Total priority: {}\n", objective));
    out
}

fn push_counts(out: &mut String, counts: &BTreeMap<String, u64>) {
    if counts.is_empty() {
        out.push_str("  (nothing)\n");
        return;
    }
    for (name, count) in counts {
        out.push_str(&format!("  {:20} {:>8}\n", name, count));
    }
}
