//! `gdrealty` - CLI for the GD RealState website
//!
//! This binary serves the site and provides helpers for inspecting its
//! routes, content and configuration.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::path::PathBuf;

use clap::Parser;
use tracing::{info, warn};

use gdrealty::cli::{Cli, Command, ConfigCommand, ContentCommand, ServeCommand};
use gdrealty::content::{catalog, file};
use gdrealty::routes::Page;
use gdrealty::{init_logging, AppState, Config};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Execute the command
    match cli.command {
        Command::Serve(serve_cmd) => {
            let config = Config::load_from(cli.config.clone())?;
            handle_serve(config, serve_cmd)
        }
        Command::Routes => {
            handle_routes();
            Ok(())
        }
        Command::Content(content_cmd) => handle_content(content_cmd),
        Command::Config(config_cmd) => handle_config(cli.config, config_cmd),
    }
}

fn handle_serve(mut config: Config, cmd: ServeCommand) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(bind) = cmd.bind {
        config.server.bind = bind;
    }
    if let Some(path) = cmd.content {
        config.content.path = Some(path);
    }
    if cmd.no_live {
        config.server.live_updates = false;
    }
    config.validate()?;

    let state = AppState::from_config(config)?;
    let shutdown = state.shutdown.clone();

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async move {
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => info!("shutdown requested"),
                Err(e) => warn!("failed to listen for ctrl-c: {}", e),
            }
            shutdown.cancel();
        });
        gdrealty::serve(state).await
    })?;
    Ok(())
}

fn handle_routes() {
    for page in Page::ALL {
        println!("GET  {:<18} {}", page.pattern(), page.description());
    }
    println!("POST {:<18} call-back form", Page::Home.pattern());
    println!("POST {:<18} inquiry form", "/projects/{id}/inquiry");
    println!("POST {:<18} call request form", "/contact/call");
    println!("POST {:<18} contact message form", "/contact/message");
    println!("GET  {:<18} live channel (WebSocket)", "/live");
}

fn handle_content(cmd: ContentCommand) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        ContentCommand::Export { out } => {
            let catalog = catalog::builtin();
            match out {
                Some(path) => {
                    file::save(&catalog, &path)?;
                    println!("Wrote built-in content to {}", path.display());
                }
                None => println!("{}", file::to_json(&catalog)?),
            }
        }
        ContentCommand::Check { file: path } => {
            let catalog = file::load(&path)?;
            println!("Content file is valid: {}", path.display());
            println!("  Projects:      {}", catalog.projects.len());
            println!("  Blog posts:    {}", catalog.posts.len());
            println!("  Team members:  {}", catalog.team.len());
            println!("  About entries: {}", catalog.about.len());
        }
    }
    Ok(())
}

fn handle_config(
    config_path: Option<PathBuf>,
    cmd: ConfigCommand,
) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        ConfigCommand::Show { json } => {
            let config = Config::load_from(config_path)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Server]");
                println!("  Bind:               {}", config.server.bind);
                println!("  Live updates:       {}", config.server.live_updates);
                println!();
                println!("[Site]");
                println!("  Name:               {}", config.site.name);
                println!("  Phone:              {}", config.site.phone);
                println!("  Email:              {}", config.site.email);
                println!("  Address:            {}", config.site.address);
                for row in &config.site.office_hours {
                    println!("  Hours:              {}: {}", row.days, row.hours);
                }
                println!();
                println!("[UI]");
                println!("  Auto-advance (ms):  {}", config.ui.auto_advance_ms);
                println!("  Scroll threshold:   {}px", config.ui.scroll_threshold_px);
                println!();
                println!("[Content]");
                match &config.content.path {
                    Some(path) => println!("  Path:               {}", path.display()),
                    None => println!("  Path:               (built-in)"),
                }
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.or(config_path).unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
