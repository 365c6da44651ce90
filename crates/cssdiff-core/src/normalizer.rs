//! Canonical form of a stylesheet.
//!
//! Produces a copy of the tree with comments dropped at every level, every
//! quoted string re-quoted with double quotes and hex colors lower-cased.
//! Unrecognized at-rules are normalized through their JSON payload and their
//! prelude string; unknown items inside a rule are cloned as-is.

use serde_json::{Map, Value};

use crate::ast::{GroupBlock, MediaBlock, Node, OtherNode, Rule, RuleItem, Stylesheet};

pub fn normalize(stylesheet: &Stylesheet) -> Stylesheet {
    Stylesheet {
        rules: normalize_nodes(&stylesheet.rules),
    }
}

/// Normalizes one sibling level. Apart from dropped comments, the output
/// keeps the input order one-to-one.
pub fn normalize_nodes(nodes: &[Node]) -> Vec<Node> {
    nodes.iter().filter_map(normalize_node).collect()
}

fn normalize_node(node: &Node) -> Option<Node> {
    match node {
        Node::Comment(_) => None,
        Node::Rule(rule) => Some(Node::Rule(normalize_rule(rule))),
        Node::Media(media) => Some(Node::Media(MediaBlock {
            query: rewrite_tokens(&media.query, false),
            rules: normalize_nodes(&media.rules),
            span: media.span,
        })),
        Node::Group(group) => Some(Node::Group(GroupBlock {
            kind: group.kind.clone(),
            prelude: rewrite_tokens(&group.prelude, false),
            rules: normalize_nodes(&group.rules),
            span: group.span,
        })),
        Node::Other(other) => {
            let mut payload = normalize_payload(&other.payload);
            // The prelude sits under the at-rule's own name (`"import": "'a.css'"`).
            if let Some(Value::String(prelude)) = payload.get_mut(&other.kind) {
                *prelude = rewrite_tokens(prelude, false);
            }
            Some(Node::Other(OtherNode {
                kind: other.kind.clone(),
                payload,
                span: other.span,
            }))
        }
    }
}

/// Canonical payload of an unrecognized at-rule: comment objects dropped from
/// every array, declaration values and rule selectors normalized.
fn normalize_payload(value: &Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(
            items
                .iter()
                .filter(|item| item_type(item) != Some("comment"))
                .map(normalize_payload)
                .collect(),
        ),
        Value::Object(map) => {
            let node_type = map.get("type").and_then(Value::as_str);
            let mut out = Map::with_capacity(map.len());
            for (key, field) in map {
                let field = match (node_type, key.as_str(), field) {
                    (Some("declaration"), "value", Value::String(text)) => {
                        Value::String(normalize_value(text))
                    }
                    (Some("rule"), "selectors", Value::Array(selectors)) => Value::Array(
                        selectors
                            .iter()
                            .map(|sel| match sel {
                                Value::String(text) => Value::String(normalize_selector(text)),
                                other => other.clone(),
                            })
                            .collect(),
                    ),
                    _ => normalize_payload(field),
                };
                out.insert(key.clone(), field);
            }
            Value::Object(out)
        }
        _ => value.clone(),
    }
}

fn item_type(value: &Value) -> Option<&str> {
    value.get("type").and_then(Value::as_str)
}

fn normalize_rule(rule: &Rule) -> Rule {
    let declarations = rule
        .declarations
        .iter()
        .filter_map(|item| match item {
            RuleItem::Comment(_) => None,
            RuleItem::Declaration(decl) => {
                let mut decl = decl.clone();
                decl.value = normalize_value(&decl.value);
                Some(RuleItem::Declaration(decl))
            }
            RuleItem::Other(_) => Some(item.clone()),
        })
        .collect();

    Rule {
        selectors: rule.selectors.iter().map(|s| normalize_selector(s)).collect(),
        declarations,
        span: rule.span,
    }
}

/// Canonical spelling of a declaration value: double-quoted strings and
/// lower-case hex colors.
pub fn normalize_value(value: &str) -> String {
    rewrite_tokens(value, true)
}

/// Canonical spelling of a selector. Only quoting changes; `#Id` and class
/// names are case-sensitive and stay as written.
pub fn normalize_selector(selector: &str) -> String {
    rewrite_tokens(selector, false)
}

fn rewrite_tokens(input: &str, lower_hex: bool) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    let mut pos = 0;

    while pos < chars.len() {
        match chars[pos] {
            '"' | '\'' => pos = push_string(&chars, pos, &mut out),
            '\\' => {
                out.push('\\');
                if let Some(&next) = chars.get(pos + 1) {
                    out.push(next);
                }
                pos += 2;
            }
            '#' if lower_hex => pos = push_hash(&chars, pos, &mut out),
            ch => {
                out.push(ch);
                pos += 1;
            }
        }
    }

    out
}

/// Copies the string literal opening at `start` with double quotes and
/// returns the index just past it.
fn push_string(chars: &[char], start: usize, out: &mut String) -> usize {
    let quote = chars[start];
    let mut pos = start + 1;
    out.push('"');

    while pos < chars.len() {
        let ch = chars[pos];
        if ch == '\\' {
            match chars.get(pos + 1) {
                Some('\'') => out.push('\''),
                Some(&next) => {
                    out.push('\\');
                    out.push(next);
                }
                None => out.push('\\'),
            }
            pos += 2;
            continue;
        }
        if ch == quote {
            out.push('"');
            return pos + 1;
        }
        if ch == '"' {
            out.push_str("\\\"");
        } else {
            out.push(ch);
        }
        pos += 1;
    }

    // Unterminated strings run to the end of the value.
    pos
}

/// Copies a `#` token starting at `start`, lower-casing it when it is a hex color.
fn push_hash(chars: &[char], start: usize, out: &mut String) -> usize {
    let digits_start = start + 1;
    let mut end = digits_start;
    while end < chars.len() && chars[end].is_ascii_hexdigit() {
        end += 1;
    }

    let at_boundary = start == 0 || !is_name_char(chars[start - 1]);
    let terminated = end == chars.len() || !is_name_char(chars[end]);
    let is_color = matches!(end - digits_start, 3 | 4 | 6 | 8) && at_boundary && terminated;

    out.push('#');
    for &ch in &chars[digits_start..end] {
        out.push(if is_color { ch.to_ascii_lowercase() } else { ch });
    }
    end
}

fn is_name_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' || !ch.is_ascii()
}
