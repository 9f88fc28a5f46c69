//! Theme assembly from a parsed stylesheet.
//!
//! Two passes over an immutable document:
//!
//! 1. **Lookahead**: [`TitlePrecedence::scan`] visits every rule, nested or
//!    not, to find the specific title selectors.
//! 2. **Main**: rules in document order, nested style rules included. The `.hljs` rule becomes
//!    the plain style; every other rule is classified and, when it maps to
//!    at least one token type, appended as a [`ThemeRule`].
//!
//! Rules directly inside at-rules (`@media`, `@supports`, ...) never reach the
//! theme, since the target format has no equivalent. Only the direct parent
//! counts: a rule nested in a style rule is kept even if that style rule sits
//! in an at-rule.

use crate::classify::{classify, TitlePrecedence, HLJS_BASE};
use crate::document::{Parent, Rule, StylesheetDocument};
use crate::normalize::normalize;
use crate::theme::{StyleDeclarations, Theme, ThemeRule};

/// Builds a theme from a stylesheet document.
pub fn assemble(document: &StylesheetDocument) -> Theme {
    let precedence = TitlePrecedence::scan(document);
    let mut theme = Theme::default();

    for entry in document.rules() {
        if let Parent::AtRule(at_rule) = entry.parent {
            tracing::debug!(
                selectors = ?entry.rule.selectors,
                at_rule = %at_rule.name,
                "skipping rule nested in at-rule"
            );
            continue;
        }

        let rule = entry.rule;
        let style = style_of(rule);

        // Later `.hljs` rules replace earlier ones wholesale.
        if rule.is_sole_selector(HLJS_BASE) {
            theme.plain = style;
            continue;
        }

        let types = classify(&rule.selectors, precedence);
        if types.is_empty() {
            tracing::debug!(selectors = ?rule.selectors, "no token types for rule, dropping");
            continue;
        }
        theme.styles.push(ThemeRule::new(types, style));
    }

    theme
}

/// Normalizes a rule's own declarations. Last write wins per property.
fn style_of(rule: &Rule) -> StyleDeclarations {
    let mut style = StyleDeclarations::new();
    for decl in &rule.declarations {
        if let Some((property, value)) = normalize(&decl.property, &decl.value) {
            style.insert(property, value);
        }
    }
    style
}
