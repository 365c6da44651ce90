use cssdiff_core::emitter::{emit_node_css, node_label};
use cssdiff_core::{DiffResult, Node};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct JsonReport {
    changed: bool,
    extra: Vec<String>,
    missing: Vec<String>,
    modified: Vec<JsonModified>,
}

#[derive(Debug, Serialize)]
struct JsonModified {
    before: String,
    after: String,
}

pub fn render_json(result: &DiffResult) -> serde_json::Result<String> {
    let report = JsonReport {
        changed: result.changed,
        extra: result.extra.iter().map(emit_node_css).collect(),
        missing: result.missing.iter().map(emit_node_css).collect(),
        modified: result
            .modified
            .iter()
            .map(|m| JsonModified {
                before: emit_node_css(&m.before),
                after: emit_node_css(&m.after),
            })
            .collect(),
    };
    let mut out = serde_json::to_string_pretty(&report)?;
    out.push('\n');
    Ok(out)
}

pub fn render_text(result: &DiffResult) -> String {
    let mut out = format!("changed: {}\n", result.changed);

    for node in &result.missing {
        push_entry('-', node, &mut out);
    }
    for node in &result.extra {
        push_entry('+', node, &mut out);
    }
    for modified in &result.modified {
        out.push_str("~ ");
        out.push_str(&node_label(&modified.before));
        out.push('\n');
        push_indented(&emit_node_css(&modified.before), "  - ", &mut out);
        push_indented(&emit_node_css(&modified.after), "  + ", &mut out);
    }
    out
}

fn push_entry(marker: char, node: &Node, out: &mut String) {
    out.push(marker);
    out.push(' ');
    out.push_str(&node_label(node));
    out.push('\n');
    push_indented(&emit_node_css(node), "    ", out);
}

fn push_indented(css: &str, prefix: &str, out: &mut String) {
    for line in css.lines() {
        out.push_str(prefix);
        out.push_str(line);
        out.push('\n');
    }
}
