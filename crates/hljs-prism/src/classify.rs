//! Selector classification: highlight.js class selectors to token types.
//!
//! # Mapping
//!
//! A fixed table maps hljs selectors to one or more prism token types.
//! Selectors missing from the table contribute nothing; an hljs theme rule
//! whose selectors all miss is dropped.
//!
//! # Title precedence
//!
//! hljs styles class and function names with `.hljs-title.class_` and
//! `.hljs-title.function_`, falling back to the generic `.hljs-title`. The
//! generic rule only claims `class-name` and `function` when the stylesheet
//! has no specific rule for them anywhere. Whether those specific rules
//! exist is a document-wide fact, computed up front as a [`TitlePrecedence`].

use crate::document::StylesheetDocument;
use crate::theme::TokenType;

/// Selector for the whole highlighted block, the source of the plain style.
pub const HLJS_BASE: &str = ".hljs";

pub const HLJS_TITLE_GENERIC: &str = ".hljs-title";
pub const HLJS_TITLE_CLASS: &str = ".hljs-title.class_";
pub const HLJS_TITLE_FUNCTION: &str = ".hljs-title.function_";

const fn t(name: &'static str) -> TokenType {
    TokenType::new(name)
}

/// Selector to token types.
pub static HLJS_CLASSES: &[(&str, &[TokenType])] = &[
    (".hljs-keyword", &[t("keyword"), t("atrule")]),
    (".hljs-built_in", &[t("builtin")]),
    (HLJS_TITLE_CLASS, &[t("class-name")]),
    (HLJS_TITLE_FUNCTION, &[t("function")]),
    (".hljs-literal", &[t("boolean")]),
    (".hljs-number", &[t("number")]),
    (".hljs-string", &[t("string"), t("char"), t("url")]),
    (".hljs-symbol", &[t("symbol"), t("entity")]),
    (".hljs-regexp", &[t("regex")]),
    (".hljs-operator", &[t("operator")]),
    (".hljs-variable", &[t("variable")]),
    (".hljs-variable.constant_", &[t("constant")]),
    (".hljs-property", &[t("property")]),
    (".hljs-punctuation", &[t("punctuation")]),
    (
        ".hljs-meta",
        &[t("important"), t("doctype"), t("prolog"), t("cdata")],
    ),
    (".hljs-comment", &[t("comment")]),
    (".hljs-tag", &[t("tag")]),
    (".hljs-attr", &[t("attr-name")]),
    (".hljs-strong", &[t("bold")]),
    (".hljs-emphasis", &[t("italic")]),
    (".hljs-selector-class", &[t("selector")]),
    (".hljs-addition", &[t("inserted")]),
    (".hljs-deletion", &[t("deleted")]),
];

/// Looks up the token types for a single selector.
pub fn token_types(selector: &str) -> &'static [TokenType] {
    HLJS_CLASSES
        .iter()
        .find(|(s, _)| *s == selector)
        .map(|(_, types)| *types)
        .unwrap_or(&[])
}

/// Document-wide presence of the specific title selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TitlePrecedence {
    pub has_class: bool,
    pub has_function: bool,
}

impl TitlePrecedence {
    /// Scans every rule in the document, including rules nested in at-rules.
    pub fn scan(document: &StylesheetDocument) -> Self {
        let mut precedence = Self::default();
        for entry in document.rules() {
            precedence.has_class |= entry.rule.has_selector(HLJS_TITLE_CLASS);
            precedence.has_function |= entry.rule.has_selector(HLJS_TITLE_FUNCTION);
        }
        precedence
    }
}

/// Classifies a rule's selectors into token types.
///
/// Types are deduplicated and ordered by first appearance: selectors in list
/// order, then each selector's table order. Title selectors synthesized by
/// the precedence rule come after the rule's own selectors.
pub fn classify<S: AsRef<str>>(selectors: &[S], precedence: TitlePrecedence) -> Vec<TokenType> {
    let mut expanded: Vec<&str> = selectors.iter().map(|s| s.as_ref()).collect();

    if expanded.contains(&HLJS_TITLE_GENERIC) {
        if !precedence.has_class {
            expanded.push(HLJS_TITLE_CLASS);
        }
        if !precedence.has_function {
            expanded.push(HLJS_TITLE_FUNCTION);
        }
    }

    let mut types: Vec<TokenType> = Vec::new();
    for selector in expanded {
        for token in token_types(selector) {
            if !types.contains(token) {
                types.push(*token);
            }
        }
    }

    tracing::trace!(selectors = selectors.len(), types = types.len(), "classified selectors");
    types
}
