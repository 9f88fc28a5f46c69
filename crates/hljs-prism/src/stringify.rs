//! Theme output as a CommonJS module for `prism-react-renderer`.
//!
//! The layout is fixed, since downstream tooling loads these files as-is:
//!
//! ```text
//! /*
//!   Converted from <source>
//!
//!   <license, indented by two spaces>
//! */
//!
//! /** @type {import("prism-react-renderer").PrismTheme} */
//! const theme = <json>;
//!
//! module.exports = theme;
//! ```

use std::fmt::Write;

use crate::assemble::assemble;
use crate::css::parse_stylesheet;
use crate::document::StylesheetDocument;
use crate::error::Result;
use crate::theme::Theme;

const TYPE_ANNOTATION: &str = r#"/** @type {import("prism-react-renderer").PrismTheme} */"#;

/// How the theme object is laid out inside the module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonLayout {
    /// Single line, no insignificant whitespace.
    #[default]
    Compact,
    /// Two-space indented, one entry per line.
    Pretty,
}

/// Writes assembled themes, with a provenance and license header.
#[derive(Debug, Clone, Default)]
pub struct ThemeStringifier {
    /// Where the stylesheet came from, written verbatim into the header.
    pub source: String,
    pub license: String,
    pub layout: JsonLayout,
}

impl ThemeStringifier {
    pub fn new(source: impl Into<String>, license: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            license: license.into(),
            layout: JsonLayout::default(),
        }
    }

    pub fn with_layout(mut self, layout: JsonLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Assembles `document` and writes the module into `builder`.
    pub fn stringify<W: Write>(
        &self,
        document: &StylesheetDocument,
        builder: &mut W,
    ) -> Result<()> {
        self.write_theme(&assemble(document), builder)
    }

    /// Writes an already assembled theme into `builder`.
    pub fn write_theme<W: Write>(&self, theme: &Theme, builder: &mut W) -> Result<()> {
        let json = match self.layout {
            JsonLayout::Compact => serde_json::to_string(theme)?,
            JsonLayout::Pretty => serde_json::to_string_pretty(theme)?,
        };

        builder.write_str("/*\n")?;
        write!(builder, "  Converted from {}\n\n", self.source)?;
        builder.write_str(&indent(self.license.trim(), "  "))?;
        builder.write_str("\n")?;
        builder.write_str("*/\n\n")?;

        writeln!(builder, "{}", TYPE_ANNOTATION)?;
        write!(builder, "const theme = {};\n\n", json)?;
        builder.write_str("module.exports = theme;\n")?;
        Ok(())
    }

    pub fn to_module(&self, document: &StylesheetDocument) -> Result<String> {
        let mut out = String::new();
        self.stringify(document, &mut out)?;
        Ok(out)
    }
}

/// Parses `css`, assembles its theme and returns the module text.
pub fn convert_css(css: &str, stringifier: &ThemeStringifier) -> Result<String> {
    let document = parse_stylesheet(css)?;
    stringifier.to_module(&document)
}

/// Prefixes every line with `prefix`, trimming trailing whitespace per line.
fn indent(text: &str, prefix: &str) -> String {
    text.split('\n')
        .map(|line| format!("{}{}", prefix, line).trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Rule;

    const LICENSE: &str =
        "BSD 3-Clause License\n\nCopyright (c) 2006, Ivan Sagalaev.\nAll rights reserved.   \n";

    #[test]
    fn test_module_layout() {
        let doc = StylesheetDocument::new(vec![
            Rule::new([".hljs"]).declare("color", "#fff").into(),
            Rule::new([".hljs-comment"]).declare("font-style", "italic").into(),
        ]);
        let stringifier = ThemeStringifier::new("https://example.com/styles/dark.css", LICENSE);

        let expected = r##"/*
  Converted from https://example.com/styles/dark.css

  BSD 3-Clause License

  Copyright (c) 2006, Ivan Sagalaev.
  All rights reserved.
*/

/** @type {import("prism-react-renderer").PrismTheme} */
const theme = {"plain":{"color":"#fff"},"styles":[{"types":["comment"],"style":{"fontStyle":"italic"}}]};

module.exports = theme;
"##;
        assert_eq!(stringifier.to_module(&doc).unwrap(), expected);
    }

    #[test]
    fn test_empty_license_and_theme() {
        let out = ThemeStringifier::new("a.css", "")
            .to_module(&StylesheetDocument::default())
            .unwrap();
        assert_eq!(
            out,
            "/*\n  Converted from a.css\n\n\n*/\n\n/** @type {import(\"prism-react-renderer\").PrismTheme} */\nconst theme = {\"plain\":{},\"styles\":[]};\n\nmodule.exports = theme;\n"
        );
    }

    #[test]
    fn test_pretty_layout() {
        let doc =
            StylesheetDocument::new(vec![Rule::new([".hljs"]).declare("color", "red").into()]);
        let out = ThemeStringifier::new("a.css", "MIT")
            .with_layout(JsonLayout::Pretty)
            .to_module(&doc)
            .unwrap();
        assert!(out.contains(
            "const theme = {\n  \"plain\": {\n    \"color\": \"red\"\n  },\n  \"styles\": []\n};\n"
        ));
    }

    #[test]
    fn test_indent_trims_trailing_whitespace() {
        assert_eq!(indent("a\n\n  b  \nc", "  "), "  a\n\n    b\n  c");
    }

    #[test]
    fn test_convert_css() {
        let css = ".hljs { color: #fff; background: #000 }\n.hljs-keyword { font-weight: bold }";
        let out = convert_css(css, &ThemeStringifier::new("x.css", "L")).unwrap();
        assert!(out.contains(
            r##"const theme = {"plain":{"color":"#fff","backgroundColor":"#000"},"styles":[{"types":["keyword","atrule"],"style":{"fontWeight":"bold"}}]};"##
        ));
    }

    #[test]
    fn test_convert_css_parse_error() {
        assert!(convert_css("{ color: red }", &ThemeStringifier::default()).is_err());
    }
}
