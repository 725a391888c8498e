//! Command-line parsing.
//!
//! Help and version are ordinary flags here instead of clap's built-ins, so
//! they land in [`Options`] like every other switch and are accepted anywhere
//! on the line.

use std::ffi::OsString;

use clap::{CommandFactory, Parser, Subcommand};

use crate::workflow::WorkflowOptions;

/// Stage, commit and push in one step, with optional AI commit messages.
#[derive(Parser, Debug)]
#[command(name = "autopush")]
#[command(about = "Stage, commit and push in one step, with optional AI commit messages")]
#[command(disable_help_flag = true, disable_version_flag = true, disable_help_subcommand = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Commit without pushing
    #[arg(long, global = true)]
    pub no_push: bool,

    /// Type the commit message instead of asking the AI provider
    #[arg(long, global = true)]
    pub no_ai: bool,

    /// Push with --force
    #[arg(long, global = true)]
    pub force_push: bool,

    /// Switch to (or create) this branch before committing
    #[arg(short = 'b', long, global = true, value_name = "NAME")]
    pub branch: Option<String>,

    /// Print version
    #[arg(short = 'v', long, global = true)]
    pub version: bool,

    /// Print help
    #[arg(short = 'h', long, global = true)]
    pub help: bool,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Choose an AI provider and store its API key
    #[command(disable_help_flag = true)]
    Setup,
    /// Install the latest published version
    #[command(disable_help_flag = true)]
    Upgrade,
    /// Remove autopush and optionally its configuration
    #[command(disable_help_flag = true)]
    Uninstall,
}

/// Everything the command line asked for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    pub no_push: bool,
    pub no_ai: bool,
    pub force_push: bool,
    pub version: bool,
    pub help: bool,
    pub setup: bool,
    pub upgrade: bool,
    pub uninstall: bool,
    pub branch: Option<String>,
}

impl From<Cli> for Options {
    fn from(cli: Cli) -> Self {
        Self {
            no_push: cli.no_push,
            no_ai: cli.no_ai,
            force_push: cli.force_push,
            version: cli.version,
            help: cli.help,
            setup: cli.command == Some(Command::Setup),
            upgrade: cli.command == Some(Command::Upgrade),
            uninstall: cli.command == Some(Command::Uninstall),
            branch: cli.branch,
        }
    }
}

impl Options {
    pub fn workflow(&self) -> WorkflowOptions {
        WorkflowOptions {
            no_push: self.no_push,
            no_ai: self.no_ai,
            force_push: self.force_push,
            branch: self.branch.clone(),
        }
    }
}

/// Parse a full argv, program name first.
pub fn parse_args<I, T>(args: I) -> Result<Options, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Cli::try_parse_from(args).map(Options::from)
}

/// Rendered help text.
pub fn help_text() -> String {
    Cli::command().render_help().to_string()
}

/// A parse failure with a single pointer to `--help`.
///
/// clap adds its own "For more information" line only when it knows the help
/// flag, which it does not for ours.
pub fn error_text(err: &clap::Error) -> String {
    let rendered = err.render().to_string();
    let rendered = rendered.trim_end();
    if rendered.contains("For more information") {
        rendered.to_string()
    } else {
        format!("{}\n\nFor more information, try '--help'.", rendered)
    }
}

pub fn version_text() -> String {
    format!("autopush {}", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Options, clap::Error> {
        parse_args(std::iter::once("autopush").chain(args.iter().copied()))
    }

    #[test]
    fn test_bare_invocation() {
        assert_eq!(parse(&[]).unwrap(), Options::default());
    }

    #[test]
    fn test_flags_combine_independently() {
        let opts = parse(&["--no-push", "--no-ai"]).unwrap();
        assert!(opts.no_push);
        assert!(opts.no_ai);
        assert!(!opts.force_push);
        assert_eq!(opts.branch, None);
    }

    #[test]
    fn test_branch_value() {
        assert_eq!(parse(&["--branch", "feature/x"]).unwrap().branch.as_deref(), Some("feature/x"));
        assert_eq!(parse(&["-b", "fix"]).unwrap().branch.as_deref(), Some("fix"));
    }

    #[test]
    fn test_branch_requires_value() {
        assert!(parse(&["--branch"]).is_err());
        assert!(parse(&["--no-push", "-b"]).is_err());
    }

    #[test]
    fn test_unknown_token_fails() {
        assert!(parse(&["--frobnicate"]).is_err());
        assert!(parse(&["deploy"]).is_err());
    }

    #[test]
    fn test_error_points_to_help_once() {
        let err = parse(&["--frobnicate"]).unwrap_err();
        let text = error_text(&err);
        assert!(text.contains("--frobnicate"));
        assert_eq!(text.matches("--help").count(), 1, "{text}");
    }

    #[test]
    fn test_short_help_and_version() {
        assert!(parse(&["-h"]).unwrap().help);
        assert!(parse(&["--help"]).unwrap().help);
        assert!(parse(&["-v"]).unwrap().version);
        assert!(parse(&["--version"]).unwrap().version);
    }

    #[test]
    fn test_subcommands() {
        assert!(parse(&["setup"]).unwrap().setup);
        assert!(parse(&["upgrade"]).unwrap().upgrade);
        assert!(parse(&["uninstall"]).unwrap().uninstall);
    }

    #[test]
    fn test_flags_accepted_after_subcommand() {
        let opts = parse(&["setup", "--no-ai", "-h"]).unwrap();
        assert!(opts.setup);
        assert!(opts.no_ai);
        assert!(opts.help);
    }

    #[test]
    fn test_workflow_options() {
        let opts = parse(&["--force-push", "-b", "main", "--no-push"]).unwrap();
        assert_eq!(
            opts.workflow(),
            WorkflowOptions {
                no_push: true,
                no_ai: false,
                force_push: true,
                branch: Some("main".to_string()),
            }
        );
    }

    #[test]
    fn test_help_lists_flags() {
        let help = help_text();
        for flag in ["--no-push", "--no-ai", "--force-push", "--branch", "setup", "upgrade", "uninstall"] {
            assert!(help.contains(flag), "help is missing {flag}");
        }
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }
}
