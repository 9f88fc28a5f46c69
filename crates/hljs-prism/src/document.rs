//! Parsed stylesheet document model.
//!
//! A [`StylesheetDocument`] is an immutable tree of style [`Rule`]s and
//! [`AtRule`]s (media, supports, ...). Both can hold further nodes: at-rules
//! group rules, style rules carry nested rules (CSS nesting).
//! The model is independent of any CSS parsing library; [`crate::css`] is one
//! way to build it, tests build it by hand.

/// A single `property: value` pair inside a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub property: String,
    pub value: String,
}

impl Declaration {
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
        }
    }
}

/// A style rule: a selector list plus its declarations in source order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Rule {
    pub selectors: Vec<String>,
    pub declarations: Vec<Declaration>,
    /// Nested rules and at-rules, selectors as written (`&` is not resolved).
    pub children: Vec<Node>,
}

impl Rule {
    pub fn new<S: Into<String>>(selectors: impl IntoIterator<Item = S>) -> Self {
        Self {
            selectors: selectors.into_iter().map(Into::into).collect(),
            declarations: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style helper for appending a declaration.
    pub fn declare(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.declarations.push(Declaration::new(property, value));
        self
    }

    pub fn nest(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    /// Returns true if any selector in the list equals `selector`.
    pub fn has_selector(&self, selector: &str) -> bool {
        self.selectors.iter().any(|s| s == selector)
    }

    /// Returns true if the selector list is exactly `[selector]`.
    pub fn is_sole_selector(&self, selector: &str) -> bool {
        matches!(self.selectors.as_slice(), [only] if only == selector)
    }
}

/// A grouping construct such as `@media` or `@supports`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AtRule {
    /// At-keyword without the `@`.
    pub name: String,
    pub prelude: String,
    /// Nested nodes. Empty for block-less at-rules like `@import`.
    pub children: Vec<Node>,
}

impl AtRule {
    pub fn new(name: impl Into<String>, prelude: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            name: name.into(),
            prelude: prelude.into(),
            children,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Rule(Rule),
    AtRule(AtRule),
}

impl From<Rule> for Node {
    fn from(rule: Rule) -> Self {
        Node::Rule(rule)
    }
}

impl From<AtRule> for Node {
    fn from(at_rule: AtRule) -> Self {
        Node::AtRule(at_rule)
    }
}

/// One parsed stylesheet.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StylesheetDocument {
    pub nodes: Vec<Node>,
}

impl StylesheetDocument {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    /// Iterates every style rule in document order, descending into at-rules
    /// and nested rules. A rule comes before the rules nested in it.
    pub fn rules(&self) -> Rules<'_> {
        Rules {
            stack: vec![(Parent::Root, self.nodes.iter())],
        }
    }
}

/// The node directly containing a rule.
#[derive(Debug, Clone, Copy)]
pub enum Parent<'a> {
    Root,
    Rule(&'a Rule),
    AtRule(&'a AtRule),
}

/// A rule visited by [`StylesheetDocument::rules`], with its direct parent.
#[derive(Debug, Clone, Copy)]
pub struct RuleEntry<'a> {
    pub rule: &'a Rule,
    pub parent: Parent<'a>,
}

impl RuleEntry<'_> {
    /// True only when the direct parent is an at-rule.
    pub fn is_nested_in_at_rule(&self) -> bool {
        matches!(self.parent, Parent::AtRule(_))
    }
}

/// Depth-first worklist walk over a document's nodes.
pub struct Rules<'a> {
    stack: Vec<(Parent<'a>, std::slice::Iter<'a, Node>)>,
}

impl<'a> Iterator for Rules<'a> {
    type Item = RuleEntry<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (parent, iter) = self.stack.last_mut()?;
            let parent = *parent;
            match iter.next() {
                Some(Node::Rule(rule)) => {
                    if !rule.children.is_empty() {
                        self.stack.push((Parent::Rule(rule), rule.children.iter()));
                    }
                    return Some(RuleEntry { rule, parent });
                }
                Some(Node::AtRule(at_rule)) => {
                    self.stack.push((Parent::AtRule(at_rule), at_rule.children.iter()));
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}
