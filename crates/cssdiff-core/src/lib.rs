//! Compare two parsed CSS stylesheets for semantic equivalence.
//!
//! Comments, quoting style and hex color case are ignored. Top-level nodes
//! are matched by identity (a rule's selector list) rather than position, and
//! the unmatched remainder is reported as extra or missing.
//!
//! ```
//! use cssdiff_core::{diff, Rule, Stylesheet};
//!
//! let a = Stylesheet::new(vec![Rule::new(["a"]).with_declaration("color", "#FFFFFF").into()]);
//! let b = Stylesheet::new(vec![Rule::new(["a"]).with_declaration("color", "#ffffff").into()]);
//!
//! assert!(!diff(&a, &b).changed);
//! ```

pub mod ast;
pub mod differ;
pub mod emitter;
pub mod error;
pub mod loader;
pub mod matcher;
pub mod normalizer;

pub use ast::{
    Comment, Declaration, GroupBlock, MediaBlock, Node, OtherNode, Rule, RuleItem, Stylesheet,
};
pub use differ::{diff, DiffResult, ModifiedNode};
pub use error::{DiffError, Result, Span};
pub use loader::{load_stylesheet, read_stylesheet};
pub use matcher::{match_nodes, Matching, NodeKey};
pub use normalizer::normalize;
