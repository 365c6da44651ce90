use serde_json::Value;

use crate::ast::{Declaration, Node, OtherNode, Rule, RuleItem, Stylesheet};

pub fn emit_css(stylesheet: &Stylesheet) -> String {
    let mut out = String::new();

    for node in stylesheet {
        emit_node(node, 0, &mut out);
        out.push('\n');
    }
    out
}

/// Render one node as CSS text, as used in diff reports.
pub fn emit_node_css(node: &Node) -> String {
    let mut out = String::new();
    emit_node(node, 0, &mut out);
    out
}

/// Short one-line label for a node: selectors for rules, the prelude for at-rules.
pub fn node_label(node: &Node) -> String {
    match node {
        Node::Rule(rule) => rule.selectors.join(", "),
        Node::Media(media) => format!("@media {}", media.query),
        Node::Group(group) => format!("@{} {}", group.kind, group.prelude)
            .trim_end()
            .to_string(),
        Node::Comment(comment) => format!("/*{}*/", comment.text),
        Node::Other(other) => match other.payload.get(&other.kind).and_then(Value::as_str) {
            Some(prelude) => format!("@{} {}", other.kind, prelude),
            None => format!("@{}", other.kind),
        },
    }
}

fn emit_node(node: &Node, depth: usize, out: &mut String) {
    match node {
        Node::Rule(rule) => emit_rule(rule, depth, out),
        Node::Media(media) => emit_block("media", &media.query, &media.rules, depth, out),
        Node::Group(group) => emit_block(&group.kind, &group.prelude, &group.rules, depth, out),
        Node::Comment(comment) => {
            indent(depth, out);
            out.push_str("/*");
            out.push_str(&comment.text);
            out.push_str("*/\n");
        }
        Node::Other(other) => emit_other(other, depth, out),
    }
}

fn emit_rule(rule: &Rule, depth: usize, out: &mut String) {
    indent(depth, out);
    out.push_str(&rule.selectors.join(",\n"));
    out.push_str(" {\n");

    for item in &rule.declarations {
        match item {
            RuleItem::Declaration(decl) => emit_declaration(decl, depth + 1, out),
            RuleItem::Comment(comment) => {
                indent(depth + 1, out);
                out.push_str("/*");
                out.push_str(&comment.text);
                out.push_str("*/\n");
            }
            RuleItem::Other(value) => {
                indent(depth + 1, out);
                out.push_str("/* ");
                out.push_str(&value.to_string());
                out.push_str(" */\n");
            }
        }
    }
    indent(depth, out);
    out.push_str("}\n");
}

fn emit_block(kind: &str, prelude: &str, rules: &[Node], depth: usize, out: &mut String) {
    indent(depth, out);
    out.push('@');
    out.push_str(kind);
    if !prelude.is_empty() {
        out.push(' ');
        out.push_str(prelude);
    }
    out.push_str(" {\n");
    for node in rules {
        emit_node(node, depth + 1, out);
    }
    indent(depth, out);
    out.push_str("}\n");
}

/// At-rules without dedicated handling: `@kind prelude;` when the parser gave
/// a prelude string, otherwise a block of whatever declarations they carry.
fn emit_other(other: &OtherNode, depth: usize, out: &mut String) {
    indent(depth, out);
    if let Some(prelude) = other.payload.get(&other.kind).and_then(Value::as_str) {
        out.push('@');
        out.push_str(&other.kind);
        out.push(' ');
        out.push_str(prelude);
        out.push_str(";\n");
        return;
    }

    out.push('@');
    out.push_str(&other.kind);
    out.push_str(" {\n");
    let declarations = other
        .payload
        .get("declarations")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    for decl in declarations {
        if let (Some(property), Some(value)) = (
            decl.get("property").and_then(Value::as_str),
            decl.get("value").and_then(Value::as_str),
        ) {
            emit_declaration(&Declaration::new(property, value), depth + 1, out);
        }
    }
    indent(depth, out);
    out.push_str("}\n");
}

fn emit_declaration(decl: &Declaration, depth: usize, out: &mut String) {
    indent(depth, out);
    out.push_str(&decl.property);
    out.push_str(": ");
    out.push_str(&decl.value);
    out.push_str(";\n");
}

fn indent(depth: usize, out: &mut String) {
    for _ in 0..depth {
        out.push_str("    ");
    }
}
