//! Reads the JSON syntax tree emitted by the CSS parser.
//!
//! The expected shape is the one produced by the `css` parser package:
//!
//! ```json
//! { "type": "stylesheet",
//!   "stylesheet": { "rules": [
//!     { "type": "rule", "selectors": ["a"],
//!       "declarations": [{ "type": "declaration", "property": "color", "value": "red" }] }
//!   ] } }
//! ```
//!
//! `supports`, `document` and `host` become [`GroupBlock`]s. Other node kinds
//! are kept as [`OtherNode`]s, and unknown items inside a rule as
//! [`RuleItem::Other`], with their `position` data stripped.

use std::fs;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::ast::{
    Comment, Declaration, GroupBlock, MediaBlock, Node, OtherNode, Rule, RuleItem, Stylesheet,
};
use crate::error::{DiffError, Result, Span};

#[derive(Debug, Deserialize)]
struct Position {
    start: Point,
}

#[derive(Debug, Deserialize)]
struct Point {
    line: usize,
    column: usize,
}

/// Load a stylesheet tree from a JSON file.
pub fn load_stylesheet(path: &Path) -> Result<Stylesheet> {
    let data = fs::read_to_string(path).map_err(|source| DiffError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_stylesheet(&data, &path.display().to_string())
}

/// Read a stylesheet tree from any reader; `origin` names it in errors.
pub fn read_stylesheet<R: Read>(mut reader: R, origin: &str) -> Result<Stylesheet> {
    let mut data = String::new();
    reader
        .read_to_string(&mut data)
        .map_err(|source| DiffError::Io {
            path: origin.into(),
            source,
        })?;
    parse_stylesheet(&data, origin)
}

pub fn parse_stylesheet(data: &str, origin: &str) -> Result<Stylesheet> {
    let value: Value = serde_json::from_str(data).map_err(|source| DiffError::Json {
        origin: origin.to_string(),
        source,
    })?;
    let stylesheet = stylesheet_from_json(&value)?;
    tracing::debug!(origin, nodes = stylesheet.rules.len(), "loaded stylesheet");
    Ok(stylesheet)
}

pub fn stylesheet_from_json(value: &Value) -> Result<Stylesheet> {
    let root = as_object(value, "$")?;
    match root.get("type").and_then(Value::as_str) {
        Some("stylesheet") => {}
        Some(other) => {
            return Err(DiffError::invalid(
                "$.type",
                format!("expected \"stylesheet\", found \"{}\"", other),
            ))
        }
        None => return Err(DiffError::invalid("$", "not a stylesheet tree")),
    }

    let body = root
        .get("stylesheet")
        .ok_or_else(|| DiffError::invalid("$", "missing \"stylesheet\" body"))?;
    let body = as_object(body, "$.stylesheet")?;

    if let Some(errors) = body.get("parsingErrors").and_then(Value::as_array) {
        if !errors.is_empty() {
            return Err(DiffError::invalid(
                "$.stylesheet.parsingErrors",
                format!("parser reported {} error(s)", errors.len()),
            ));
        }
    }

    let rules = nodes_from_json(body.get("rules"), "$.stylesheet.rules")?;
    Ok(Stylesheet { rules })
}

fn nodes_from_json(value: Option<&Value>, path: &str) -> Result<Vec<Node>> {
    let items = value
        .and_then(Value::as_array)
        .ok_or_else(|| DiffError::invalid(path, "expected an array of nodes"))?;

    items
        .iter()
        .enumerate()
        .map(|(idx, item)| node_from_json(item, &format!("{}[{}]", path, idx)))
        .collect()
}

fn node_from_json(value: &Value, path: &str) -> Result<Node> {
    let obj = as_object(value, path)?;
    let kind = node_type(obj, path)?;
    let span = span_of(obj);

    let node = match kind {
        "rule" => {
            let selectors = obj
                .get("selectors")
                .and_then(Value::as_array)
                .ok_or_else(|| DiffError::invalid(path, "rule has no selectors"))?
                .iter()
                .enumerate()
                .map(|(idx, sel)| {
                    sel.as_str().map(str::to_string).ok_or_else(|| {
                        DiffError::invalid(
                            format!("{}.selectors[{}]", path, idx),
                            "selector is not a string",
                        )
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            let declarations = match obj.get("declarations") {
                None | Some(Value::Null) => Vec::new(),
                Some(list) => rule_items_from_json(list, &format!("{}.declarations", path))?,
            };

            Node::Rule(Rule {
                selectors,
                declarations,
                span,
            })
        }
        "comment" => Node::Comment(Comment {
            text: string_field(obj, "comment", path)?,
            span,
        }),
        "media" => Node::Media(MediaBlock {
            query: string_field(obj, "media", path)?,
            rules: nodes_from_json(obj.get("rules"), &format!("{}.rules", path))?,
            span,
        }),
        "supports" | "document" | "host" => Node::Group(GroupBlock {
            kind: match obj.get("vendor").and_then(Value::as_str) {
                Some(vendor) => format!("{}{}", vendor, kind),
                None => kind.to_string(),
            },
            prelude: obj
                .get(kind)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            rules: nodes_from_json(obj.get("rules"), &format!("{}.rules", path))?,
            span,
        }),
        _ => {
            let mut payload = obj.clone();
            payload.remove("type");
            payload.remove("position");
            let mut payload = Value::Object(payload);
            strip_positions(&mut payload);
            Node::Other(OtherNode {
                kind: kind.to_string(),
                payload,
                span,
            })
        }
    };

    Ok(node)
}

fn rule_items_from_json(value: &Value, path: &str) -> Result<Vec<RuleItem>> {
    let items = value
        .as_array()
        .ok_or_else(|| DiffError::invalid(path, "expected an array of declarations"))?;

    let mut out = Vec::with_capacity(items.len());
    for (idx, item) in items.iter().enumerate() {
        let path = format!("{}[{}]", path, idx);
        let obj = as_object(item, &path)?;
        let span = span_of(obj);
        match node_type(obj, &path)? {
            "declaration" => out.push(RuleItem::Declaration(Declaration {
                property: string_field(obj, "property", &path)?,
                value: string_field(obj, "value", &path)?,
                span,
            })),
            "comment" => out.push(RuleItem::Comment(Comment {
                text: string_field(obj, "comment", &path)?,
                span,
            })),
            _ => {
                let mut item = item.clone();
                strip_positions(&mut item);
                out.push(RuleItem::Other(item));
            }
        }
    }
    Ok(out)
}

fn as_object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| DiffError::invalid(path, "expected an object"))
}

fn node_type<'a>(obj: &'a Map<String, Value>, path: &str) -> Result<&'a str> {
    obj.get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| DiffError::invalid(path, "node has no \"type\""))
}

fn string_field(obj: &Map<String, Value>, field: &str, path: &str) -> Result<String> {
    obj.get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| DiffError::invalid(path, format!("missing string field \"{}\"", field)))
}

fn span_of(obj: &Map<String, Value>) -> Span {
    obj.get("position")
        .and_then(|pos| Position::deserialize(pos).ok())
        .map(|pos| Span {
            line: pos.start.line,
            column: pos.start.column,
        })
        .unwrap_or_else(Span::dummy)
}

fn strip_positions(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.remove("position");
            map.values_mut().for_each(strip_positions);
        }
        Value::Array(items) => items.iter_mut().for_each(strip_positions),
        _ => {}
    }
}
