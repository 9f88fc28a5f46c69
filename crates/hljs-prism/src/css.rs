//! CSS stylesheet loading.
//!
//! Turns stylesheet text into a [`StylesheetDocument`]. The parser is built
//! on `cssparser` (the tokenizer used by Firefox), so comments, escapes and
//! nested blocks are handled by the tokenizer rather than by hand.
//!
//! # What is kept
//!
//! - **Selectors**: the prelude of each style rule, split on top-level
//!   commas. Commas inside functional pseudo-classes such as `:is(a, b)`
//!   stay within their selector. Whitespace runs collapse to one space.
//! - **Declarations**: property names as written and values as source text,
//!   minus comments at any depth (`rgba(0, 0, 0 /* x */)` loses the comment
//!   too). A trailing `!important` is dropped from the value.
//! - **Nested rules**: style rules inside a style rule body (CSS nesting) are
//!   kept as children, with their selectors as written.
//! - **At-rules**: name, prelude and, for block at-rules, their nested rules.

use cssparser::{
    AtRuleParser, CowRcStr, DeclarationParser, ParseError, Parser, ParserInput, ParserState,
    QualifiedRuleParser, RuleBodyItemParser, RuleBodyParser, SourcePosition, Token,
};

use crate::document::{AtRule, Declaration, Node, Rule, StylesheetDocument};
use crate::error::{ConvertError, Result};

/// Parses stylesheet text into a document.
///
/// A malformed top-level rule fails the whole parse. Malformed content inside
/// an at-rule block is skipped, since those rules never reach a theme.
pub fn parse_stylesheet(css: &str) -> Result<StylesheetDocument> {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    let mut rule_parser = DocumentParser;

    let mut nodes = Vec::new();
    for result in cssparser::StyleSheetParser::new(&mut parser, &mut rule_parser) {
        match result {
            Ok(node) => nodes.push(node),
            Err((e, slice)) => {
                return Err(ConvertError::Parse {
                    line: e.location.line + 1,
                    column: e.location.column,
                    message: format!("invalid rule `{}`: {:?}", slice.trim(), e.kind),
                });
            }
        }
    }

    Ok(StylesheetDocument::new(nodes))
}

/// Top-level and at-rule block contents.
struct DocumentParser;

impl<'i> QualifiedRuleParser<'i> for DocumentParser {
    type Prelude = Vec<String>;
    type QualifiedRule = Node;
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        input: &mut Parser<'i, 't>,
    ) -> std::result::Result<Self::Prelude, ParseError<'i, Self::Error>> {
        parse_selector_list(input)
    }

    fn parse_block<'t>(
        &mut self,
        selectors: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> std::result::Result<Self::QualifiedRule, ParseError<'i, Self::Error>> {
        Ok(Node::Rule(parse_rule_block(selectors, input)))
    }
}

impl<'i> AtRuleParser<'i> for DocumentParser {
    type Prelude = (String, String);
    type AtRule = Node;
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> std::result::Result<Self::Prelude, ParseError<'i, Self::Error>> {
        Ok(parse_at_rule_prelude(name, input))
    }

    fn rule_without_block(
        &mut self,
        (name, prelude): Self::Prelude,
        _start: &ParserState,
    ) -> std::result::Result<Self::AtRule, ()> {
        Ok(Node::AtRule(AtRule::new(name, prelude, Vec::new())))
    }

    fn parse_block<'t>(
        &mut self,
        (name, prelude): Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> std::result::Result<Self::AtRule, ParseError<'i, Self::Error>> {
        let children = cssparser::StyleSheetParser::new(input, self)
            .filter_map(|result| match result {
                Ok(node) => Some(node),
                Err((e, slice)) => {
                    tracing::debug!(
                        kind = ?e.kind,
                        rule = slice.trim(),
                        "skipping rule in at-rule block"
                    );
                    None
                }
            })
            .collect();

        Ok(Node::AtRule(AtRule::new(name, prelude, children)))
    }
}

/// One item of a style rule body.
enum BodyItem {
    Declaration(Declaration),
    Nested(Node),
}

/// Style rule body contents: declarations, nested rules and nested at-rules.
struct RuleBodyItems;

impl<'i> DeclarationParser<'i> for RuleBodyItems {
    type Declaration = BodyItem;
    type Error = ();

    fn parse_value<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> std::result::Result<Self::Declaration, ParseError<'i, Self::Error>> {
        // `a:hover { ... }` reads like a declaration until its block; reject it
        // so the body parser retries it as a nested rule.
        let start = input.state();
        if has_curly_block(input) {
            return Err(input.new_custom_error(()));
        }
        input.reset(&start);

        let raw = without_comments(input);
        Ok(BodyItem::Declaration(Declaration::new(
            name.as_ref(),
            strip_important(raw.trim()),
        )))
    }
}

impl<'i> QualifiedRuleParser<'i> for RuleBodyItems {
    type Prelude = Vec<String>;
    type QualifiedRule = BodyItem;
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        input: &mut Parser<'i, 't>,
    ) -> std::result::Result<Self::Prelude, ParseError<'i, Self::Error>> {
        parse_selector_list(input)
    }

    fn parse_block<'t>(
        &mut self,
        selectors: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> std::result::Result<Self::QualifiedRule, ParseError<'i, Self::Error>> {
        Ok(BodyItem::Nested(Node::Rule(parse_rule_block(selectors, input))))
    }
}

impl<'i> AtRuleParser<'i> for RuleBodyItems {
    type Prelude = (String, String);
    type AtRule = BodyItem;
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> std::result::Result<Self::Prelude, ParseError<'i, Self::Error>> {
        Ok(parse_at_rule_prelude(name, input))
    }

    fn rule_without_block(
        &mut self,
        (name, prelude): Self::Prelude,
        _start: &ParserState,
    ) -> std::result::Result<Self::AtRule, ()> {
        Ok(BodyItem::Nested(Node::AtRule(AtRule::new(name, prelude, Vec::new()))))
    }

    /// Keeps the nested rules only. Bare declarations directly in the at-rule
    /// have no rule of their own and never reach a theme.
    fn parse_block<'t>(
        &mut self,
        (name, prelude): Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> std::result::Result<Self::AtRule, ParseError<'i, Self::Error>> {
        let children = RuleBodyParser::new(input, self)
            .filter_map(|result| match result {
                Ok(BodyItem::Nested(node)) => Some(node),
                _ => None,
            })
            .collect();

        Ok(BodyItem::Nested(Node::AtRule(AtRule::new(name, prelude, children))))
    }
}

impl<'i> RuleBodyItemParser<'i, BodyItem, ()> for RuleBodyItems {
    fn parse_declarations(&self) -> bool {
        true
    }
    fn parse_qualified(&self) -> bool {
        true
    }
}

fn parse_selector_list<'i>(
    input: &mut Parser<'i, '_>,
) -> std::result::Result<Vec<String>, ParseError<'i, ()>> {
    let selectors: Vec<String> = split_top_level_commas(input)
        .iter()
        .map(|s| collapse_whitespace(s))
        .collect();

    if selectors.iter().any(String::is_empty) {
        return Err(input.new_custom_error(()));
    }
    Ok(selectors)
}

fn parse_at_rule_prelude(name: CowRcStr<'_>, input: &mut Parser<'_, '_>) -> (String, String) {
    let prelude = collapse_whitespace(&without_comments(input));
    (name.as_ref().to_string(), prelude)
}

fn parse_rule_block(selectors: Vec<String>, input: &mut Parser<'_, '_>) -> Rule {
    let mut rule = Rule::new(selectors);
    let mut body = RuleBodyItems;

    for result in RuleBodyParser::new(input, &mut body) {
        match result {
            Ok(BodyItem::Declaration(decl)) => rule.declarations.push(decl),
            Ok(BodyItem::Nested(node)) => rule.children.push(node),
            Err((e, slice)) => {
                tracing::debug!(kind = ?e.kind, item = slice.trim(), "skipping rule body item");
            }
        }
    }

    rule
}

/// Consumes the rest of `input`, reporting whether it holds a `{}` block.
fn has_curly_block(input: &mut Parser<'_, '_>) -> bool {
    while let Ok(token) = input.next() {
        if matches!(token, Token::CurlyBracketBlock) {
            return true;
        }
    }
    false
}

/// Consumes the rest of `input`, returning its source text with comments cut
/// out, including comments inside function and bracket blocks.
fn without_comments<'i>(input: &mut Parser<'i, '_>) -> String {
    let mut text = String::new();
    let mut segment_start = input.position();

    loop {
        let before = input.position();
        let (is_comment, opens_block) = match input.next_including_whitespace_and_comments() {
            Ok(token) => (
                matches!(token, Token::Comment(_)),
                matches!(
                    token,
                    Token::Function(_)
                        | Token::ParenthesisBlock
                        | Token::SquareBracketBlock
                        | Token::CurlyBracketBlock
                ),
            ),
            Err(_) => break,
        };

        if is_comment {
            text.push_str(input.slice(segment_start..before));
            segment_start = input.position();
        } else if opens_block {
            let opened = input.position();
            let nested = input.parse_nested_block(|nested| {
                let inner = without_comments(nested);
                Ok::<_, ParseError<'i, ()>>((inner, nested.position()))
            });
            // The closing delimiter stays in the next segment.
            if let Ok((inner, inner_end)) = nested {
                text.push_str(input.slice(segment_start..opened));
                text.push_str(&inner);
                segment_start = inner_end;
            }
        }
    }

    text.push_str(input.slice_from(segment_start));
    text
}

/// Consumes the rest of `input`, returning the comma-separated pieces.
///
/// Commas inside blocks are not seen here: the tokenizer hands a function or
/// bracket block back as a single token.
fn split_top_level_commas(input: &mut Parser<'_, '_>) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut segment_start: SourcePosition = input.position();

    loop {
        let before = input.position();
        let token = match input.next_including_whitespace_and_comments() {
            Ok(token) => token.clone(),
            Err(_) => break,
        };
        match token {
            Token::Comma => {
                current.push_str(input.slice(segment_start..before));
                pieces.push(std::mem::take(&mut current));
                segment_start = input.position();
            }
            Token::Comment(_) => {
                current.push_str(input.slice(segment_start..before));
                current.push(' ');
                segment_start = input.position();
            }
            _ => {}
        }
    }

    current.push_str(input.slice_from(segment_start));
    pieces.push(current);
    pieces
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Drops a trailing `!important` (any case, optional space after `!`).
fn strip_important(value: &str) -> &str {
    if let Some(bang) = value.rfind('!') {
        let flag = value[bang + 1..].trim();
        if flag.eq_ignore_ascii_case("important") {
            return value[..bang].trim_end();
        }
    }
    value
}
