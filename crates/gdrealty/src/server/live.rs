//! WebSocket adapter for live sessions.
//!
//! The socket is split: a writer task serializes [`ViewUpdate`]s, the
//! connection task parses [`UiEvent`]s, and the session itself runs in its
//! own task between them.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::Response;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

use super::AppState;
use crate::error::Result;
use crate::routes::{self, DetailQuery, Page};
use crate::session::{LiveSession, UiEvent, ViewUpdate};

const CHANNEL_CAPACITY: usize = 32;

/// Count of open live connections.
#[derive(Debug, Clone, Default)]
pub struct LiveConnections(Arc<AtomicUsize>);

impl LiveConnections {
    /// Number of connections currently open.
    #[must_use]
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    fn open(&self) -> ConnectionGuard {
        let open = self.0.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(open, "live connection opened");
        ConnectionGuard(self.0.clone())
    }
}

/// Decrements the open count when the connection task finishes.
#[derive(Debug)]
struct ConnectionGuard(Arc<AtomicUsize>);

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        let open = self.0.fetch_sub(1, Ordering::SeqCst).saturating_sub(1);
        debug!(open, "live connection closed");
    }
}

/// `GET /live`: upgrade to a live session for the page named in the query.
pub async fn upgrade(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response> {
    let session = build_session(&state, &params).await?;
    let shutdown = state.shutdown.clone();
    let connection = state.live.open();
    Ok(ws.on_upgrade(move |socket| async move {
        handle_socket(socket, session, shutdown).await;
        drop(connection);
    }))
}

/// Build the session for the view described by `params`.
///
/// Pages without carousels, unknown pages and unknown projects all get a
/// session that only tracks the navbar.
pub async fn build_session(state: &AppState, params: &HashMap<String, String>) -> Result<LiveSession> {
    let ui = &state.config.ui;
    let page = params.get("page").and_then(|slug| Page::from_slug(slug));

    let session = match page {
        Some(Page::Home) => {
            let projects = state.content.projects().await?;
            LiveSession::for_home(ui, &projects, params)
        }
        Some(Page::ProjectDetail) => {
            let id = routes::project_id_param(params.get("id").map(String::as_str));
            let query = DetailQuery {
                section: params.get("section").cloned(),
                image: params.get("image").cloned(),
                plan: params.get("plan").cloned(),
            };
            match state.content.project(id).await? {
                Some(project) => LiveSession::for_project(ui, &project, &query),
                None => LiveSession::new(ui),
            }
        }
        _ => LiveSession::new(ui),
    };
    Ok(session)
}

async fn handle_socket(socket: WebSocket, session: LiveSession, shutdown: CancellationToken) {
    let (mut ws_sender, mut ws_receiver) = socket.split();
    let (event_tx, event_rx) = mpsc::channel::<UiEvent>(CHANNEL_CAPACITY);
    let (update_tx, mut update_rx) = mpsc::channel::<ViewUpdate>(CHANNEL_CAPACITY);

    let session_task = tokio::spawn(session.run(event_rx, update_tx, shutdown.clone()));

    let writer = tokio::spawn(async move {
        while let Some(update) = update_rx.recv().await {
            let text = match serde_json::to_string(&update) {
                Ok(text) => text,
                Err(e) => {
                    error!("Failed to encode view update: {}", e);
                    continue;
                }
            };
            if ws_sender.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
        let _ = ws_sender.close().await;
    });

    loop {
        let msg = tokio::select! {
            () = shutdown.cancelled() => break,
            msg = ws_receiver.next() => msg,
        };
        match msg {
            Some(Ok(Message::Text(text))) => match serde_json::from_str::<UiEvent>(text.as_str()) {
                Ok(event) => {
                    if event_tx.send(event).await.is_err() {
                        break;
                    }
                }
                Err(e) => debug!("Ignoring malformed ui event: {}", e),
            },
            Some(Ok(Message::Close(_))) | None => break,
            Some(Err(e)) => {
                warn!("WebSocket error: {}", e);
                break;
            }
            Some(Ok(_)) => {}
        }
    }

    // Closing the event channel ends the session, which closes the writer.
    drop(event_tx);
    match session_task.await {
        Ok(end) => debug!(?end, "live session finished"),
        Err(e) => error!("Live session task failed: {}", e),
    }
    let _ = writer.await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::routes::{FLOOR_PLAN_CAROUSEL, GALLERY_CAROUSEL};
    use crate::widgets::Section;

    fn params(items: &[(&str, &str)]) -> HashMap<String, String> {
        items
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[tokio::test]
    async fn test_detail_session_from_params() {
        let state = AppState::builtin(Config::default());
        let session = build_session(
            &state,
            &params(&[("page", "project"), ("id", "1"), ("section", "tour"), ("image", "2")]),
        )
        .await
        .unwrap();

        assert_eq!(session.section(), Some(Section::Tour));
        assert_eq!(session.position(GALLERY_CAROUSEL), Some(2));
        assert_eq!(session.position(FLOOR_PLAN_CAROUSEL), Some(0));
    }

    #[tokio::test]
    async fn test_unknown_project_gets_nav_only_session() {
        let state = AppState::builtin(Config::default());
        let session = build_session(&state, &params(&[("page", "project"), ("id", "42")]))
            .await
            .unwrap();
        assert_eq!(session.section(), None);
        assert_eq!(session.position(GALLERY_CAROUSEL), None);
    }

    #[tokio::test]
    async fn test_home_session_has_card_carousels() {
        let state = AppState::builtin(Config::default());
        let session = build_session(&state, &params(&[("page", "home"), ("img1", "1")]))
            .await
            .unwrap();
        assert_eq!(session.position("project-1"), Some(1));
        assert_eq!(session.position("project-2"), Some(0));
    }

    #[test]
    fn test_connection_count_follows_guards() {
        let live = LiveConnections::default();
        let first = live.open();
        let second = live.open();
        assert_eq!(live.count(), 2);
        drop(first);
        assert_eq!(live.count(), 1);
        drop(second);
        assert_eq!(live.count(), 0);
    }

    #[tokio::test]
    async fn test_missing_page_gets_nav_only_session() {
        let state = AppState::builtin(Config::default());
        let session = build_session(&state, &HashMap::new()).await.unwrap();
        assert_eq!(session.section(), None);
    }
}
