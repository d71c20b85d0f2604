//! `gdrealty` - Marketing website for the GD RealState agency
//!
//! This library provides the pages of the agency site (home, about, projects,
//! project detail, blog and contact), the transient UI state behind them
//! (carousels, section selector, scroll toggle, form drafts) and the live
//! channel that keeps that state on the server.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod content;
pub mod error;
pub mod logging;
pub mod routes;
pub mod server;
pub mod session;
pub mod ticker;
pub mod widgets;

pub use config::Config;
pub use content::{Catalog, CatalogSource, ContentSource};
pub use error::{Error, Result};
pub use logging::init_logging;
pub use server::{router, serve, AppState, LiveConnections, REQUIRED_MESSAGE};
pub use session::{LiveSession, UiEvent, ViewUpdate};
