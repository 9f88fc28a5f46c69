//! Output theme model, shaped like a `prism-react-renderer` `PrismTheme`.
//!
//! ```text
//! {
//!   plain:  { color, backgroundColor, ... },
//!   styles: [ { types: [...], style: { ... }, languages?: [...] }, ... ]
//! }
//! ```
//!
//! Field order in the structs is the serialization order.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

/// An abstract token category understood by the target highlighter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TokenType(&'static str);

impl TokenType {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl PartialEq<&str> for TokenType {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Normalized property name to value, in first-insertion order.
///
/// Re-inserting a property keeps its original position and replaces the value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct StyleDeclarations(IndexMap<String, String>);

impl StyleDeclarations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, property: impl Into<String>, value: impl Into<String>) {
        self.0.insert(property.into(), value.into());
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.0.get(property).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StyleDeclarations {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut style = Self::new();
        for (k, v) in iter {
            style.insert(k, v);
        }
        style
    }
}

/// Styles applied to a set of token types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeRule {
    pub types: Vec<TokenType>,
    pub style: StyleDeclarations,
    /// Restricts the rule to specific languages. Never produced from hljs
    /// stylesheets, kept so the model covers the full target format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<String>>,
}

impl ThemeRule {
    pub fn new(types: Vec<TokenType>, style: StyleDeclarations) -> Self {
        Self {
            types,
            style,
            languages: None,
        }
    }
}

/// The assembled theme.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Theme {
    /// Default style for the whole code block.
    pub plain: StyleDeclarations,
    /// Token rules in stylesheet order.
    pub styles: Vec<ThemeRule>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_reinsert_keeps_position() {
        let mut style = StyleDeclarations::new();
        style.insert("color", "#fff");
        style.insert("fontWeight", "bold");
        style.insert("color", "#000");

        let entries: Vec<_> = style.iter().collect();
        assert_eq!(entries, vec![("color", "#000"), ("fontWeight", "bold")]);
    }

    #[test]
    fn test_theme_serialization_key_order() {
        let theme = Theme {
            plain: [("color", "#fff"), ("backgroundColor", "#000")]
                .into_iter()
                .collect(),
            styles: vec![ThemeRule::new(
                vec![TokenType::new("keyword"), TokenType::new("atrule")],
                [("fontWeight", "bold")].into_iter().collect(),
            )],
        };

        let json = serde_json::to_string(&theme).unwrap();
        assert_eq!(
            json,
            r##"{"plain":{"color":"#fff","backgroundColor":"#000"},"styles":[{"types":["keyword","atrule"],"style":{"fontWeight":"bold"}}]}"##
        );
    }

    #[test]
    fn test_languages_serialized_when_present() {
        let mut rule = ThemeRule::new(vec![TokenType::new("tag")], StyleDeclarations::new());
        rule.languages = Some(vec!["markup".to_string()]);

        let json = serde_json::to_string(&rule).unwrap();
        assert_eq!(json, r#"{"types":["tag"],"style":{},"languages":["markup"]}"#);
    }

    #[test]
    fn test_empty_theme() {
        let json = serde_json::to_string(&Theme::default()).unwrap();
        assert_eq!(json, r#"{"plain":{},"styles":[]}"#);
    }
}
