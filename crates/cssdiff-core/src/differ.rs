//! Stylesheet comparison.
//!
//! Both trees are normalized, top-level siblings are matched by identity and
//! every matched pair is checked for content differences. Rule groups
//! (`@media`, `@supports`, ...) are compared level by level with the same
//! procedure on their already-normalized children.

use crate::ast::{Node, Rule, RuleItem, Stylesheet};
use crate::matcher::match_nodes;
use crate::normalizer::normalize;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiffResult {
    pub changed: bool,
    /// Nodes only in the second stylesheet, in its order.
    pub extra: Vec<Node>,
    /// Nodes only in the first stylesheet, in its order.
    pub missing: Vec<Node>,
    /// Matched nodes whose contents differ, in first-stylesheet order.
    pub modified: Vec<ModifiedNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModifiedNode {
    pub before: Node,
    pub after: Node,
}

/// Compares `first` against `second`.
///
/// Nodes in the result are clones of the caller's nodes, not their
/// canonical forms.
pub fn diff(first: &Stylesheet, second: &Stylesheet) -> DiffResult {
    let canonical_first = normalize(first);
    let canonical_second = normalize(second);

    let result = diff_level(
        &first.rules,
        &second.rules,
        &canonical_first.rules,
        &canonical_second.rules,
    );
    tracing::debug!(
        changed = result.changed,
        extra = result.extra.len(),
        missing = result.missing.len(),
        modified = result.modified.len(),
        "compared stylesheets"
    );
    result
}

/// Compares one sibling level. The canonical slices are the normalized forms
/// of the original ones; originals are only used for reporting.
fn diff_level(
    first: &[Node],
    second: &[Node],
    canonical_first: &[Node],
    canonical_second: &[Node],
) -> DiffResult {
    // Normalization only drops comments at this level, so canonical index `i`
    // is the `i`-th non-comment original.
    let original_first: Vec<&Node> = first.iter().filter(|n| !n.is_comment()).collect();
    let original_second: Vec<&Node> = second.iter().filter(|n| !n.is_comment()).collect();

    let matching = match_nodes(canonical_first, canonical_second);

    let mut result = DiffResult {
        extra: matching
            .extra
            .iter()
            .map(|&idx| original_second[idx].clone())
            .collect(),
        missing: matching
            .missing
            .iter()
            .map(|&idx| original_first[idx].clone())
            .collect(),
        ..DiffResult::default()
    };

    for &(a, b) in &matching.pairs {
        if !same_contents(
            original_first[a],
            original_second[b],
            &canonical_first[a],
            &canonical_second[b],
        ) {
            tracing::trace!(
                kind = canonical_first[a].kind(),
                span = %original_first[a].span(),
                "matched node differs"
            );
            result.modified.push(ModifiedNode {
                before: original_first[a].clone(),
                after: original_second[b].clone(),
            });
        }
    }

    result.changed =
        !result.extra.is_empty() || !result.missing.is_empty() || !result.modified.is_empty();
    result
}

/// Paired nodes share a key and therefore a kind.
fn same_contents(
    original_first: &Node,
    original_second: &Node,
    canonical_first: &Node,
    canonical_second: &Node,
) -> bool {
    if let (Node::Rule(a), Node::Rule(b)) = (canonical_first, canonical_second) {
        return same_items(a, b);
    }

    match (
        original_first.children(),
        original_second.children(),
        canonical_first.children(),
        canonical_second.children(),
    ) {
        (Some(first), Some(second), Some(first_canonical), Some(second_canonical)) => {
            !diff_level(first, second, first_canonical, second_canonical).changed
        }
        // Other nodes are keyed on their whole canonical payload.
        _ => true,
    }
}

/// Element-wise comparison of canonical rule items: same count, same order,
/// exact property names and normalized values. Unrecognized items compare by
/// their JSON value.
fn same_items(first: &Rule, second: &Rule) -> bool {
    let mut first = first.items();
    let mut second = second.items();
    loop {
        match (first.next(), second.next()) {
            (None, None) => return true,
            (Some(RuleItem::Declaration(a)), Some(RuleItem::Declaration(b)))
                if a.property == b.property && a.value == b.value => {}
            (Some(RuleItem::Other(a)), Some(RuleItem::Other(b))) if a == b => {}
            _ => return false,
        }
    }
}
