//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use prestige_domain::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "prestige", version, about = "Run HTTP sheets from the command line")]
pub struct Cli {
    /// Settings file (defaults to the platform config directory)
    #[arg(long, global = true, env = "PRESTIGE_SETTINGS")]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the blocks of a sheet as JSON
    Blocks {
        /// Sheet file
        file: PathBuf,
    },

    /// Run the scripts above a request and print the request
    Extract(ExtractArgs),

    /// Print the highlighting tokens of every line
    Highlight {
        /// Sheet file
        file: PathBuf,
    },

    /// Check script blocks and `=` payloads for syntax errors
    Lint {
        /// Sheet file
        file: PathBuf,
    },

    /// Write the starter sheet to a file
    New {
        /// Sheet file to create
        file: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Sheet file
    pub file: PathBuf,

    /// Line of the request to run (1-based)
    #[arg(short, long)]
    pub line: usize,

    /// Data bag entry; the value is parsed as JSON when possible
    #[arg(short, long = "data", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub data: Vec<(String, String)>,

    /// File to make available to `this.file(name)`, staged under its file name
    #[arg(short, long = "file", value_name = "PATH")]
    pub files: Vec<PathBuf>,

    /// Output format (defaults to the configured one)
    #[arg(long, value_enum)]
    pub format: Option<Format>,

    /// Use `--request`/`--header` in curl output
    #[arg(long)]
    pub long_flags: bool,

    /// Keep curl output on a single line
    #[arg(long)]
    pub single_line: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Json,
    Curl,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Json => Self::Json,
            Format::Curl => Self::Curl,
        }
    }
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim().to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got `{raw}`")),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn extract_arguments() {
        let cli = Cli::try_parse_from([
            "prestige", "extract", "api.sheet", "--line", "3", "-d", "token=abc", "--data", "n=1", "--format",
            "curl", "--single-line",
        ])
        .unwrap();
        let Command::Extract(args) = cli.command else {
            panic!("expected extract");
        };
        assert_eq!(args.line, 3);
        assert_eq!(
            args.data,
            vec![("token".to_string(), "abc".to_string()), ("n".to_string(), "1".to_string())]
        );
        assert_eq!(args.format, Some(Format::Curl));
        assert!(args.single_line);
        assert!(!args.long_flags);
    }

    #[test]
    fn data_requires_key() {
        assert!(parse_key_value("=x").is_err());
        assert!(parse_key_value("novalue").is_err());
        assert_eq!(parse_key_value("a=b=c").unwrap(), ("a".to_string(), "b=c".to_string()));
    }

    #[test]
    fn global_settings_flag() {
        let cli = Cli::try_parse_from(["prestige", "lint", "x.sheet", "--settings", "/tmp/s.json"]).unwrap();
        assert_eq!(cli.settings, Some(PathBuf::from("/tmp/s.json")));
    }
}
