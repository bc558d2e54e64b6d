//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

/// bmt - Blog maintenance tool.
#[derive(Debug, Parser)]
#[command(name = "bmt")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to settings file (overrides ~/.bmt/config.yml)
    #[arg(long, global = true, env = "BMT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Show verbose output, including command output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Update a setting, or list settings when no key is given
    Set(SetArgs),

    /// Show current settings
    Config(ConfigArgs),

    /// Build the static site
    Build,

    /// Build the site and force-push it to the repository
    Push(PushArgs),

    /// Create a new post
    New(NewArgs),

    /// Run the develop server and report when it is ready
    Preview(PreviewArgs),

    /// Clear build caches
    Clean,

    /// Open the content or project folder
    Open(OpenArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for `bmt set`.
#[derive(Debug, Clone, Default, Args)]
pub struct SetArgs {
    /// Setting to change: path, repository, branch, content, port, probe
    pub key: Option<String>,

    /// New value
    pub value: Option<String>,
}

/// Arguments for `bmt config`.
#[derive(Debug, Clone, Default, Args)]
pub struct ConfigArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `bmt push`.
#[derive(Debug, Clone, Args)]
pub struct PushArgs {
    /// Commit message (words are joined with spaces)
    #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
    pub message: Vec<String>,
}

impl PushArgs {
    /// The commit message as one string.
    pub fn message(&self) -> String {
        self.message.join(" ")
    }
}

/// Arguments for `bmt new`.
#[derive(Debug, Clone, Default, Args)]
pub struct NewArgs {
    /// Post title
    pub title: String,

    /// Category (skips the category prompt)
    #[arg(short, long)]
    pub category: Option<String>,

    /// Tags separated by commas or spaces (skips the tags prompt)
    #[arg(short, long)]
    pub tags: Option<String>,

    /// Create the post as a draft
    #[arg(long)]
    pub draft: bool,

    /// Accept defaults for every remaining prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Do not open the new post
    #[arg(long)]
    pub no_open: bool,
}

/// Arguments for `bmt preview`.
#[derive(Debug, Clone, Default, Args)]
pub struct PreviewArgs {
    /// Port the develop server listens on (overrides the saved port)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Stop waiting after this many port checks
    #[arg(long, value_name = "N")]
    pub max_attempts: Option<u32>,
}

/// Folder opened by `bmt open`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OpenTarget {
    /// The content directory
    Home,
    /// The project directory
    Project,
}

/// Arguments for `bmt open`.
#[derive(Debug, Clone, Args)]
pub struct OpenArgs {
    /// Which folder to open
    #[arg(value_enum)]
    pub target: OpenTarget,
}

/// Arguments for `bmt completions`.
#[derive(Debug, Clone, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_set_with_key_and_value() {
        let cli = Cli::try_parse_from(["bmt", "set", "port", "9000"]).unwrap();
        match cli.command {
            Commands::Set(args) => {
                assert_eq!(args.key.as_deref(), Some("port"));
                assert_eq!(args.value.as_deref(), Some("9000"));
            }
            other => panic!("expected set, got {:?}", other),
        }
    }

    #[test]
    fn parses_set_without_arguments() {
        let cli = Cli::try_parse_from(["bmt", "set"]).unwrap();
        assert!(matches!(cli.command, Commands::Set(SetArgs { key: None, .. })));
    }

    #[test]
    fn push_joins_message_words() {
        let cli = Cli::try_parse_from(["bmt", "push", "new", "post"]).unwrap();
        match cli.command {
            Commands::Push(args) => assert_eq!(args.message(), "new post"),
            other => panic!("expected push, got {:?}", other),
        }
    }

    #[test]
    fn push_requires_message() {
        assert!(Cli::try_parse_from(["bmt", "push"]).is_err());
    }

    #[test]
    fn parses_new_with_flags() {
        let cli = Cli::try_parse_from([
            "bmt", "new", "Hello", "-c", "tech", "-t", "a,b", "--draft", "-y", "--no-open",
        ])
        .unwrap();
        match cli.command {
            Commands::New(args) => {
                assert_eq!(args.title, "Hello");
                assert_eq!(args.category.as_deref(), Some("tech"));
                assert_eq!(args.tags.as_deref(), Some("a,b"));
                assert!(args.draft && args.yes && args.no_open);
            }
            other => panic!("expected new, got {:?}", other),
        }
    }

    #[test]
    fn parses_preview_overrides() {
        let cli =
            Cli::try_parse_from(["bmt", "preview", "--port", "9000", "--max-attempts", "5"])
                .unwrap();
        match cli.command {
            Commands::Preview(args) => {
                assert_eq!(args.port, Some(9000));
                assert_eq!(args.max_attempts, Some(5));
            }
            other => panic!("expected preview, got {:?}", other),
        }
    }

    #[test]
    fn open_rejects_unknown_target() {
        assert!(Cli::try_parse_from(["bmt", "open", "desktop"]).is_err());
        assert!(Cli::try_parse_from(["bmt", "open", "home"]).is_ok());
    }

    #[test]
    fn verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["bmt", "-v", "-q", "build"]).is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["bmt", "build", "--debug", "--no-color"]).unwrap();
        assert!(cli.debug);
        assert!(cli.no_color);
    }
}
