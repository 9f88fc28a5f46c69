//! hljs-prism - convert highlight.js themes into prism-react-renderer themes.
//!
//! highlight.js themes are stylesheets keyed by classes such as
//! `.hljs-keyword`. `prism-react-renderer` wants a plain object: a default
//! `plain` style plus a list of `{ types, style }` rules. This crate maps one
//! to the other.
//!
//! # Pipeline
//!
//! ```text
//! css text --parse_stylesheet--> StylesheetDocument --assemble--> Theme
//!                                                                   |
//!                                    ThemeStringifier::write_theme  v
//!                                                             JS module text
//! ```
//!
//! - [`css`]: builds the document model with `cssparser`.
//! - [`classify`]: hljs selectors to prism token types, including the
//!   `.hljs-title` precedence rule.
//! - [`normalize`]: CSS declarations to camel-cased style entries, with color
//!   extraction for the `background` shorthand.
//! - [`assemble`]: walks the document and builds the [`Theme`].
//! - [`stringify`]: writes the theme as a CommonJS module with a license header.
//!
//! # Quick Start
//!
//! ```rust
//! use hljs_prism::{convert_css, ThemeStringifier};
//!
//! let css = ".hljs { color: #fff; background: #000 }
//!            .hljs-comment { color: #888; font-style: italic }";
//!
//! let module = convert_css(css, &ThemeStringifier::new("dark.css", "MIT")).unwrap();
//! assert!(module.contains(r##""plain":{"color":"#fff","backgroundColor":"#000"}"##));
//! assert!(module.ends_with("module.exports = theme;\n"));
//! ```

pub mod assemble;
pub mod classify;
pub mod css;
pub mod document;
mod error;
pub mod normalize;
pub mod stringify;
pub mod theme;

pub use assemble::assemble;
pub use classify::{classify, TitlePrecedence};
pub use css::parse_stylesheet;
pub use document::{AtRule, Declaration, Node, Parent, Rule, StylesheetDocument};
pub use error::{ConvertError, Result};
pub use normalize::{extract_color, normalize};
pub use stringify::{convert_css, JsonLayout, ThemeStringifier};
pub use theme::{StyleDeclarations, Theme, ThemeRule, TokenType};
