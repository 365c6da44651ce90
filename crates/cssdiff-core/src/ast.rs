use crate::error::Span;

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Rule(Rule),
    Media(MediaBlock),
    /// `@supports`, `@document` and `@host`: a prelude and nested rules.
    Group(GroupBlock),
    Comment(Comment),
    /// Any node kind the differ has no special handling for (`@import`,
    /// `@font-face`, `@keyframes`, ...).
    Other(OtherNode),
}

impl Node {
    pub fn kind(&self) -> &str {
        match self {
            Node::Rule(_) => "rule",
            Node::Media(_) => "media",
            Node::Group(group) => &group.kind,
            Node::Comment(_) => "comment",
            Node::Other(other) => &other.kind,
        }
    }

    pub fn is_comment(&self) -> bool {
        matches!(self, Node::Comment(_))
    }

    pub fn span(&self) -> Span {
        match self {
            Node::Rule(rule) => rule.span,
            Node::Media(media) => media.span,
            Node::Group(group) => group.span,
            Node::Comment(comment) => comment.span,
            Node::Other(other) => other.span,
        }
    }

    pub fn as_rule(&self) -> Option<&Rule> {
        match self {
            Node::Rule(rule) => Some(rule),
            _ => None,
        }
    }

    /// Nested nodes of rule groups (`@media`, `@supports`, ...).
    pub fn children(&self) -> Option<&[Node]> {
        match self {
            Node::Media(media) => Some(media.rules.as_slice()),
            Node::Group(group) => Some(group.rules.as_slice()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub selectors: Vec<String>,
    pub declarations: Vec<RuleItem>,
    pub span: Span,
}

impl Rule {
    pub fn new<S: Into<String>>(selectors: impl IntoIterator<Item = S>) -> Self {
        Self {
            selectors: selectors.into_iter().map(Into::into).collect(),
            declarations: Vec::new(),
            span: Span::dummy(),
        }
    }

    pub fn with_declaration(mut self, property: &str, value: &str) -> Self {
        self.declarations
            .push(RuleItem::Declaration(Declaration::new(property, value)));
        self
    }

    pub fn with_comment(mut self, text: &str) -> Self {
        self.declarations.push(RuleItem::Comment(Comment::new(text)));
        self
    }

    /// Declarations only, skipping comments and unrecognized items.
    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations.iter().filter_map(|item| match item {
            RuleItem::Declaration(decl) => Some(decl),
            _ => None,
        })
    }

    /// Every item except comments, in order.
    pub fn items(&self) -> impl Iterator<Item = &RuleItem> {
        self.declarations
            .iter()
            .filter(|item| !matches!(item, RuleItem::Comment(_)))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RuleItem {
    Declaration(Declaration),
    Comment(Comment),
    /// An item kind the parser emitted that is neither of the above, kept as
    /// its JSON object without `position`.
    Other(serde_json::Value),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub property: String,
    pub value: String,
    pub span: Span,
}

impl Declaration {
    pub fn new(property: &str, value: &str) -> Self {
        Self {
            property: property.to_string(),
            value: value.to_string(),
            span: Span::dummy(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub text: String,
    pub span: Span,
}

impl Comment {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            span: Span::dummy(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MediaBlock {
    pub query: String,
    pub rules: Vec<Node>,
    pub span: Span,
}

impl MediaBlock {
    pub fn new(query: &str, rules: Vec<Node>) -> Self {
        Self {
            query: query.to_string(),
            rules,
            span: Span::dummy(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupBlock {
    /// At-rule name, vendor prefix included (`supports`, `-moz-document`).
    pub kind: String,
    pub prelude: String,
    pub rules: Vec<Node>,
    pub span: Span,
}

impl GroupBlock {
    pub fn new(kind: &str, prelude: &str, rules: Vec<Node>) -> Self {
        Self {
            kind: kind.to_string(),
            prelude: prelude.to_string(),
            rules,
            span: Span::dummy(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OtherNode {
    pub kind: String,
    /// The parser's node object with `type` and `position` removed.
    pub payload: serde_json::Value,
    pub span: Span,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stylesheet {
    pub rules: Vec<Node>,
}

impl Stylesheet {
    pub fn new(rules: Vec<Node>) -> Self {
        Self { rules }
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<'a> IntoIterator for &'a Stylesheet {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

impl From<Rule> for Node {
    fn from(rule: Rule) -> Self {
        Node::Rule(rule)
    }
}

impl From<MediaBlock> for Node {
    fn from(media: MediaBlock) -> Self {
        Node::Media(media)
    }
}

impl From<GroupBlock> for Node {
    fn from(group: GroupBlock) -> Self {
        Node::Group(group)
    }
}

impl From<Comment> for Node {
    fn from(comment: Comment) -> Self {
        Node::Comment(comment)
    }
}
