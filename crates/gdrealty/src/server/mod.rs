//! HTTP front end: routes, shared state and the listener.

mod assets;
mod forms;
mod live;
mod pages;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::info;

pub use forms::REQUIRED_MESSAGE;
pub use live::LiveConnections;

use crate::config::Config;
use crate::content::{CatalogSource, ContentSource};
use crate::error::{Error, Result};
use crate::routes::Page;
use crate::widgets::{InquirySink, LogSink};

/// State shared by every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Loaded configuration.
    pub config: Arc<Config>,
    /// Where page content comes from.
    pub content: Arc<dyn ContentSource>,
    /// Where submitted forms go.
    pub sink: Arc<dyn InquirySink>,
    /// Cancelled when the server shuts down; live sessions stop with it.
    pub shutdown: CancellationToken,
    /// Open live connections.
    pub live: LiveConnections,
}

impl AppState {
    /// Assemble state from its parts.
    #[must_use]
    pub fn new(
        config: Config,
        content: Arc<dyn ContentSource>,
        sink: Arc<dyn InquirySink>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            content,
            sink,
            shutdown: CancellationToken::new(),
            live: LiveConnections::default(),
        }
    }

    /// Built-in content and a logging sink.
    #[must_use]
    pub fn builtin(config: Config) -> Self {
        Self::new(config, Arc::new(CatalogSource::builtin()), Arc::new(LogSink))
    }

    /// Content from `config.content.path` if set, otherwise built in.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured content file cannot be loaded.
    pub fn from_config(config: Config) -> Result<Self> {
        let content = CatalogSource::from_optional_file(config.content.path.as_deref())?;
        Ok(Self::new(config, Arc::new(content), Arc::new(LogSink)))
    }

    /// Replace the submission sink.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn InquirySink>) -> Self {
        self.sink = sink;
        self
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let mut router = Router::new()
        .route(Page::Home.pattern(), get(pages::home).post(forms::call_back))
        .route(Page::About.pattern(), get(pages::about))
        .route(Page::Projects.pattern(), get(pages::projects))
        .route("/projects/", get(pages::default_project))
        .route(Page::ProjectDetail.pattern(), get(pages::project_detail))
        .route("/projects/{id}/inquiry", post(forms::inquiry))
        .route(Page::Blog.pattern(), get(pages::blog).post(forms::newsletter))
        .route(Page::Contact.pattern(), get(pages::contact))
        .route("/contact/call", post(forms::call_request))
        .route("/contact/message", post(forms::contact_message))
        .route("/assets/{file}", get(assets::serve));

    if state.config.server.live_updates {
        router = router.route("/live", get(live::upgrade));
    }

    router
        .fallback(pages::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind the configured address and serve until `state.shutdown` is
/// cancelled.
///
/// # Errors
///
/// Returns an error if the address is invalid or cannot be bound.
pub async fn serve(state: AppState) -> Result<()> {
    let addr = state.config.bind_addr()?;
    let listener = TcpListener::bind(addr).await.map_err(|source| Error::Bind {
        addr: addr.to_string(),
        source,
    })?;

    info!(
        addr = %listener.local_addr()?,
        content = state.content.origin(),
        live = state.config.server.live_updates,
        "serving site"
    );

    let shutdown = state.shutdown.clone();
    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;

    info!("server stopped");
    Ok(())
}
