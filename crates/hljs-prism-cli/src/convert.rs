//! Batch conversion of a highlight.js styles directory.
//!
//! Each stylesheet is converted on its own: nothing assembled for one file
//! carries over to the next.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use hljs_prism::{convert_css, JsonLayout, ThemeStringifier};

use crate::cli::Cli;

const SOURCE_EXTENSION: &str = "css";
const OUTPUT_EXTENSION: &str = "js";

/// A discovered stylesheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    /// Path relative to the source root, `/`-separated.
    pub name: String,
}

/// Converts every stylesheet under `cli.source_dir`. Returns how many were written.
pub fn run(cli: &Cli) -> Result<usize> {
    let license = fs::read_to_string(&cli.license)
        .with_context(|| format!("failed to read license {}", cli.license.display()))?;
    let layout = if cli.pretty {
        JsonLayout::Pretty
    } else {
        JsonLayout::Compact
    };

    let sources = discover(&cli.source_dir)?;
    if sources.is_empty() {
        tracing::warn!(dir = %cli.source_dir.display(), "no stylesheets found");
    }

    for source in &sources {
        let stringifier =
            ThemeStringifier::new(source_url(&cli.base_url, &source.name), license.as_str())
                .with_layout(layout);
        let dest = destination(&cli.dest_dir, &source.name);
        convert_file(&source.path, &dest, &stringifier)?;
        tracing::debug!(source = %source.name, dest = %dest.display(), "converted");
    }

    Ok(sources.len())
}

/// Reads, converts and writes one stylesheet, creating parent directories.
pub fn convert_file(source: &Path, dest: &Path, stringifier: &ThemeStringifier) -> Result<()> {
    let css = fs::read_to_string(source)
        .with_context(|| format!("failed to read {}", source.display()))?;
    let module = convert_css(&css, stringifier)
        .with_context(|| format!("failed to convert {}", source.display()))?;

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(dest, module).with_context(|| format!("failed to write {}", dest.display()))?;
    Ok(())
}

/// Finds `*.css` files under `root`, sorted by relative name.
pub fn discover(root: &Path) -> Result<Vec<SourceFile>> {
    let mut files = Vec::new();
    walk(root, root, &mut files)?;
    files.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(files)
}

fn walk(current: &Path, root: &Path, files: &mut Vec<SourceFile>) -> Result<()> {
    let entries = fs::read_dir(current)
        .with_context(|| format!("failed to read directory {}", current.display()))?;

    for entry in entries {
        let path = entry
            .with_context(|| format!("failed to read directory {}", current.display()))?
            .path();

        if path.is_dir() {
            walk(&path, root, files)?;
        } else if path.is_file()
            && path.extension().and_then(|e| e.to_str()) == Some(SOURCE_EXTENSION)
        {
            let relative = path.strip_prefix(root).unwrap_or(&path);
            let name = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            files.push(SourceFile { path, name });
        }
    }

    Ok(())
}

/// `<base>/<name>`, tolerating a trailing slash on `base`.
pub fn source_url(base: &str, name: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), name)
}

/// Mirrors `name` under `dest_dir` with a `.js` extension.
pub fn destination(dest_dir: &Path, name: &str) -> PathBuf {
    dest_dir.join(name).with_extension(OUTPUT_EXTENSION)
}
