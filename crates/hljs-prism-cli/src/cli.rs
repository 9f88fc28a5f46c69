use std::path::PathBuf;

use clap::Parser;

pub const DEFAULT_BASE_URL: &str = "https://github.com/highlightjs/highlight.js/blob/main/src/styles";

/// Convert highlight.js stylesheet themes into prism-react-renderer themes.
#[derive(Parser, Debug)]
#[command(name = "hljs-prism", version)]
pub struct Cli {
    /// Directory searched recursively for `*.css` themes
    #[arg(long, default_value = "highlight.js/src/styles")]
    pub source_dir: PathBuf,

    /// License text copied into every generated file
    #[arg(long, default_value = "highlight.js/LICENSE")]
    pub license: PathBuf,

    /// Directory receiving the generated `.js` modules
    #[arg(long, default_value = "themes")]
    pub dest_dir: PathBuf,

    /// URL prefix for the "Converted from" header line
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Indent the theme object instead of writing it on one line
    #[arg(long)]
    pub pretty: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            return tracing::Level::ERROR;
        }
        match self.verbose {
            0 => tracing::Level::INFO,
            1 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["hljs-prism"]).unwrap();
        assert_eq!(cli.source_dir, PathBuf::from("highlight.js/src/styles"));
        assert_eq!(cli.license, PathBuf::from("highlight.js/LICENSE"));
        assert_eq!(cli.dest_dir, PathBuf::from("themes"));
        assert_eq!(cli.base_url, DEFAULT_BASE_URL);
        assert!(!cli.pretty);
        assert_eq!(cli.log_level(), tracing::Level::INFO);
    }

    #[test]
    fn test_verbosity() {
        let cli = Cli::try_parse_from(["hljs-prism", "-vv"]).unwrap();
        assert_eq!(cli.log_level(), tracing::Level::TRACE);

        let cli = Cli::try_parse_from(["hljs-prism", "--quiet"]).unwrap();
        assert_eq!(cli.log_level(), tracing::Level::ERROR);

        assert!(Cli::try_parse_from(["hljs-prism", "-q", "-v"]).is_err());
    }

    #[test]
    fn test_paths() {
        let cli = Cli::try_parse_from([
            "hljs-prism",
            "--source-dir",
            "in",
            "--dest-dir",
            "out",
            "--license",
            "LICENSE",
            "--pretty",
        ])
        .unwrap();
        assert_eq!(cli.source_dir, PathBuf::from("in"));
        assert_eq!(cli.dest_dir, PathBuf::from("out"));
        assert_eq!(cli.license, PathBuf::from("LICENSE"));
        assert!(cli.pretty);
    }
}
