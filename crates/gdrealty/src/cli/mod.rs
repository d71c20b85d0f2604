//! Command-line interface for gdrealty.
//!
//! This module provides the CLI structure for the `gdrealty` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{ConfigCommand, ContentCommand, ServeCommand};

/// gdrealty - Marketing website for the GD RealState agency
///
/// Serves the agency's home, about, projects, blog and contact pages, with
/// live carousels and a scroll-aware navbar over a WebSocket channel.
#[derive(Debug, Parser)]
#[command(name = "gdrealty")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the website
    Serve(ServeCommand),

    /// List the page routes
    Routes,

    /// Export or check site content
    #[command(subcommand)]
    Content(ContentCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::Verbosity;
    use clap::CommandFactory;

    fn cli(verbose: u8, quiet: bool) -> Cli {
        Cli {
            config: None,
            verbose,
            quiet,
            command: Command::Routes,
        }
    }

    #[test]
    fn test_cli_name() {
        assert_eq!(Cli::command().get_name(), "gdrealty");
    }

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(cli(0, true).verbosity(), Verbosity::Quiet);
        assert_eq!(cli(3, true).verbosity(), Verbosity::Quiet);
        assert_eq!(cli(0, false).verbosity(), Verbosity::Normal);
        assert_eq!(cli(1, false).verbosity(), Verbosity::Verbose);
        assert_eq!(cli(2, false).verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from(["gdrealty", "serve"]).unwrap();
        let Command::Serve(serve) = cli.command else {
            panic!("expected serve");
        };
        assert!(serve.bind.is_none());
        assert!(!serve.no_live);
    }

    #[test]
    fn test_parse_serve_with_bind() {
        let cli =
            Cli::try_parse_from(["gdrealty", "serve", "--bind", "0.0.0.0:3000", "--no-live"])
                .unwrap();
        let Command::Serve(serve) = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(serve.bind.as_deref(), Some("0.0.0.0:3000"));
        assert!(serve.no_live);
    }

    #[test]
    fn test_parse_routes() {
        let cli = Cli::try_parse_from(["gdrealty", "routes"]).unwrap();
        assert!(matches!(cli.command, Command::Routes));
    }

    #[test]
    fn test_parse_content_export() {
        let cli = Cli::try_parse_from(["gdrealty", "content", "export", "-o", "out.json"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Content(ContentCommand::Export { out: Some(_) })
        ));
    }

    #[test]
    fn test_parse_content_check_requires_file() {
        assert!(Cli::try_parse_from(["gdrealty", "content", "check"]).is_err());
        let cli = Cli::try_parse_from(["gdrealty", "content", "check", "site.json"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Content(ContentCommand::Check { .. })
        ));
    }

    #[test]
    fn test_parse_config_show_json() {
        let cli = Cli::try_parse_from(["gdrealty", "config", "show", "--json"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Config(ConfigCommand::Show { json: true })
        ));
    }

    #[test]
    fn test_parse_with_config() {
        let cli = Cli::try_parse_from(["gdrealty", "-c", "/custom/config.toml", "routes"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["gdrealty", "routes", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
        let cli = Cli::try_parse_from(["gdrealty", "serve", "-q"]).unwrap();
        assert!(cli.quiet);
    }
}
