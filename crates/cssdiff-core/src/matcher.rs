//! Sibling matching by structural identity.
//!
//! Two nodes at the same level correspond when their [`NodeKey`]s are equal,
//! wherever they sit in their sequences. Rules sharing a key are paired in
//! order of appearance; the surplus on either side is left unmatched.
//! Comments have no identity and never pair.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;

use crate::ast::Node;

/// Structural identity of a node among its siblings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeKey<'a> {
    /// Ordered selector list, compared literally.
    Rule(&'a [String]),
    Media(&'a str),
    Group { kind: &'a str, prelude: &'a str },
    Other { kind: &'a str, payload: String },
}

impl<'a> NodeKey<'a> {
    /// `None` for comments.
    pub fn of(node: &'a Node) -> Option<Self> {
        let key = match node {
            Node::Rule(rule) => NodeKey::Rule(&rule.selectors),
            Node::Media(media) => NodeKey::Media(&media.query),
            Node::Group(group) => NodeKey::Group {
                kind: &group.kind,
                prelude: &group.prelude,
            },
            Node::Comment(_) => return None,
            // serde_json keeps object keys sorted, so equal payloads print equally.
            Node::Other(other) => NodeKey::Other {
                kind: &other.kind,
                payload: other.payload.to_string(),
            },
        };
        Some(key)
    }
}

/// Outcome of matching two sibling sequences, as indices into them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Matching {
    /// `(first_index, second_index)` in first-sequence order.
    pub pairs: Vec<(usize, usize)>,
    /// Unmatched indices of the second sequence, ascending.
    pub extra: Vec<usize>,
    /// Unmatched indices of the first sequence, ascending.
    pub missing: Vec<usize>,
}

pub fn match_nodes(first: &[Node], second: &[Node]) -> Matching {
    let mut candidates: FxHashMap<NodeKey<'_>, VecDeque<usize>> = FxHashMap::default();
    for (idx, node) in second.iter().enumerate() {
        if let Some(key) = NodeKey::of(node) {
            candidates.entry(key).or_default().push_back(idx);
        }
    }

    let mut matching = Matching::default();
    let mut matched_second = vec![false; second.len()];

    for (idx, node) in first.iter().enumerate() {
        let paired = NodeKey::of(node)
            .and_then(|key| candidates.get_mut(&key))
            .and_then(VecDeque::pop_front);
        match paired {
            Some(other) => {
                matched_second[other] = true;
                matching.pairs.push((idx, other));
            }
            None => matching.missing.push(idx),
        }
    }

    matching.extra = matched_second
        .iter()
        .enumerate()
        .filter(|(_, matched)| !**matched)
        .map(|(idx, _)| idx)
        .collect();

    tracing::trace!(
        pairs = matching.pairs.len(),
        extra = matching.extra.len(),
        missing = matching.missing.len(),
        "matched sibling nodes"
    );

    matching
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Comment, GroupBlock, MediaBlock, OtherNode, Rule};
    use crate::error::Span;
    use serde_json::json;

    fn rule(selectors: &[&str]) -> Node {
        Rule::new(selectors.iter().copied())
            .with_declaration("display", "none")
            .into()
    }

    #[test]
    fn pairs_by_selector_regardless_of_position() {
        let first = vec![rule(&[".a"]), rule(&[".b"]), rule(&[".c"])];
        let second = vec![rule(&[".c"]), rule(&[".a"]), rule(&[".b"])];

        let matching = match_nodes(&first, &second);

        assert_eq!(matching.pairs, vec![(0, 1), (1, 2), (2, 0)]);
        assert!(matching.extra.is_empty());
        assert!(matching.missing.is_empty());
    }

    #[test]
    fn splits_unmatched_into_extra_and_missing() {
        let first = vec![rule(&[".missing"]), rule(&[".common"])];
        let second = vec![rule(&[".extra"]), rule(&[".common"])];

        let matching = match_nodes(&first, &second);

        assert_eq!(matching.pairs, vec![(1, 1)]);
        assert_eq!(matching.extra, vec![0]);
        assert_eq!(matching.missing, vec![0]);
    }

    #[test]
    fn selector_list_order_and_count_are_identity() {
        let first = vec![rule(&["a", "b"]), rule(&["a"])];
        let second = vec![rule(&["b", "a"]), rule(&["a", "b", "c"])];

        let matching = match_nodes(&first, &second);

        assert!(matching.pairs.is_empty());
        assert_eq!(matching.missing, vec![0, 1]);
        assert_eq!(matching.extra, vec![0, 1]);
    }

    #[test]
    fn duplicate_keys_pair_in_order_of_appearance() {
        let first = vec![rule(&["p"]), rule(&[".x"]), rule(&["p"]), rule(&["p"])];
        let second = vec![rule(&["p"]), rule(&["p"])];

        let matching = match_nodes(&first, &second);

        assert_eq!(matching.pairs, vec![(0, 0), (2, 1)]);
        assert_eq!(matching.missing, vec![1, 3]);
        assert!(matching.extra.is_empty());
    }

    #[test]
    fn surplus_duplicates_in_second_are_extra() {
        let first = vec![rule(&["p"])];
        let second = vec![rule(&["p"]), rule(&["q"]), rule(&["p"])];

        let matching = match_nodes(&first, &second);

        assert_eq!(matching.pairs, vec![(0, 0)]);
        assert_eq!(matching.extra, vec![1, 2]);
        assert!(matching.missing.is_empty());
    }

    #[test]
    fn different_kinds_never_pair() {
        let first: Vec<Node> = vec![MediaBlock::new("print", Vec::new()).into()];
        let second = vec![rule(&["print"])];

        let matching = match_nodes(&first, &second);

        assert!(matching.pairs.is_empty());
        assert_eq!(matching.missing, vec![0]);
        assert_eq!(matching.extra, vec![0]);
    }

    #[test]
    fn other_nodes_match_on_payload() {
        let import = |url: &str| {
            Node::Other(OtherNode {
                kind: "import".to_string(),
                payload: json!({ "import": url }),
                span: Span::dummy(),
            })
        };
        let first = vec![import("\"a.css\""), import("\"b.css\"")];
        let second = vec![import("\"b.css\"")];

        let matching = match_nodes(&first, &second);

        assert_eq!(matching.pairs, vec![(1, 0)]);
        assert_eq!(matching.missing, vec![0]);
    }

    #[test]
    fn comments_never_pair() {
        let first = vec![Comment::new("same").into(), rule(&["a"])];
        let second = vec![rule(&["a"]), Comment::new("same").into()];

        let matching = match_nodes(&first, &second);

        assert_eq!(matching.pairs, vec![(1, 0)]);
        assert_eq!(matching.missing, vec![0]);
        assert_eq!(matching.extra, vec![1]);
    }

    #[test]
    fn groups_match_on_kind_and_prelude() {
        let first: Vec<Node> = vec![
            GroupBlock::new("supports", "(display: grid)", Vec::new()).into(),
            GroupBlock::new("document", "url-prefix()", Vec::new()).into(),
        ];
        let second: Vec<Node> = vec![
            GroupBlock::new("-moz-document", "url-prefix()", Vec::new()).into(),
            GroupBlock::new("supports", "(display: grid)", vec![rule(&["a"])]).into(),
        ];

        let matching = match_nodes(&first, &second);

        assert_eq!(matching.pairs, vec![(0, 1)]);
        assert_eq!(matching.missing, vec![1]);
        assert_eq!(matching.extra, vec![0]);
    }

    #[test]
    fn empty_sequences() {
        assert_eq!(match_nodes(&[], &[]), Matching::default());

        let matching = match_nodes(&[], &[rule(&[".extra"])]);
        assert_eq!(matching.extra, vec![0]);
    }
}
