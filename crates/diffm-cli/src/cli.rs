use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use diffm_types::InlineGranularity;

#[derive(Parser)]
#[command(
    name = "diffm",
    about = "diffm: side-by-side comparison of two directory trees",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Config file (JSON, or TOML with a .toml extension)
    #[arg(short, long, global = true, default_value = ".diffm")]
    pub config: PathBuf,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum InlineArg {
    Word,
    Char,
}

impl From<InlineArg> for InlineGranularity {
    fn from(arg: InlineArg) -> Self {
        match arg {
            InlineArg::Word => InlineGranularity::Word,
            InlineArg::Char => InlineGranularity::Char,
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Compare the two trees and show every differing file
    Compare(CompareArgs),
    /// List common, old-only, and new-only files
    Files(FilesArgs),
    /// Show the comparison of a single file
    Show(ShowArgs),
}

/// Overrides applied on top of the config file.
#[derive(Args, Clone, Debug, Default)]
pub struct ConfigOverrides {
    /// Old tree root
    #[arg(long)]
    pub old: Option<PathBuf>,
    /// New tree root
    #[arg(long)]
    pub new: Option<PathBuf>,
    /// Highlight granularity inside changed lines
    #[arg(long)]
    pub inline: Option<InlineArg>,
}

#[derive(Args)]
pub struct CompareArgs {
    #[command(flatten)]
    pub overrides: ConfigOverrides,
    /// Print one summary line per file instead of the panes
    #[arg(long)]
    pub summary: bool,
}

#[derive(Args)]
pub struct FilesArgs {
    #[command(flatten)]
    pub overrides: ConfigOverrides,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Relative path of the file, or any member of its alias group
    pub path: String,
    #[command(flatten)]
    pub overrides: ConfigOverrides,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_compare() {
        let cli = Cli::try_parse_from(["diffm", "compare"]).unwrap();
        assert!(matches!(cli.command, Command::Compare(_)));
        assert_eq!(cli.config, PathBuf::from(".diffm"));
        assert!(!cli.verbose);
    }

    #[test]
    fn parse_compare_with_roots() {
        let cli = Cli::try_parse_from(["diffm", "compare", "--old", "a", "--new", "b", "--summary"]).unwrap();
        if let Command::Compare(args) = cli.command {
            assert_eq!(args.overrides.old, Some("a".into()));
            assert_eq!(args.overrides.new, Some("b".into()));
            assert!(args.summary);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_inline_char() {
        let cli = Cli::try_parse_from(["diffm", "compare", "--inline", "char"]).unwrap();
        if let Command::Compare(args) = cli.command {
            let inline = args.overrides.inline.map(InlineGranularity::from);
            assert_eq!(inline, Some(InlineGranularity::Char));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_files() {
        let cli = Cli::try_parse_from(["diffm", "files"]).unwrap();
        assert!(matches!(cli.command, Command::Files(_)));
    }

    #[test]
    fn parse_show() {
        let cli = Cli::try_parse_from(["diffm", "show", "src/lib.rs"]).unwrap();
        if let Command::Show(args) = cli.command {
            assert_eq!(args.path, "src/lib.rs");
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_global_config() {
        let cli = Cli::try_parse_from(["diffm", "files", "-c", "other.toml"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("other.toml"));
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::try_parse_from(["diffm", "--verbose", "compare"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn parse_json_format() {
        let cli = Cli::try_parse_from(["diffm", "--format", "json", "files"]).unwrap();
        assert!(matches!(cli.format, OutputFormat::Json));
    }
}
