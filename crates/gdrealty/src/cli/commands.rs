//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Serve command arguments.
#[derive(Debug, Args)]
pub struct ServeCommand {
    /// Address to listen on, overriding `server.bind`
    #[arg(short, long, value_name = "ADDR")]
    pub bind: Option<String>,

    /// Path to a JSON content file, overriding `content.path`
    #[arg(long, value_name = "FILE")]
    pub content: Option<PathBuf>,

    /// Serve pages without the live WebSocket channel
    #[arg(long)]
    pub no_live: bool,
}

/// Content catalog commands.
#[derive(Debug, Subcommand)]
pub enum ContentCommand {
    /// Write the built-in catalog as JSON
    Export {
        /// Write to this file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        out: Option<PathBuf>,
    },

    /// Check that a content file loads and validates
    Check {
        /// Path to the content file
        file: PathBuf,
    },
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_command_debug() {
        let cmd = ServeCommand {
            bind: Some("0.0.0.0:80".to_string()),
            content: None,
            no_live: false,
        };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("bind"));
        assert!(debug_str.contains("0.0.0.0:80"));
    }

    #[test]
    fn test_content_command_debug() {
        let cmd = ContentCommand::Check {
            file: PathBuf::from("site.json"),
        };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Check"));
        assert!(debug_str.contains("site.json"));
    }

    #[test]
    fn test_config_command_debug() {
        let cmd = ConfigCommand::Show { json: false };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Show"));
    }
}
