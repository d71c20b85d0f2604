//! End-to-end tests against the full router.

use std::time::Duration;

use axum::http::StatusCode;
use axum_test::TestServer;
use gdrealty::content::MediaItem;
use gdrealty::{router, AppState, Config, ViewUpdate, REQUIRED_MESSAGE};

fn server() -> TestServer {
    TestServer::new(router(AppState::builtin(Config::default()))).unwrap()
}

#[tokio::test]
async fn test_every_page_renders() {
    let server = server();
    for path in ["/", "/about", "/projects", "/projects/2", "/blog", "/contact"] {
        let response = server.get(path).await;
        assert_eq!(response.status_code(), StatusCode::OK, "GET {path}");
        assert!(response.text().contains("id=\"navbar\""), "GET {path}");
    }
}

#[tokio::test]
async fn test_project_id_defaults_to_first_project() {
    let server = server();
    for path in ["/projects/abc", "/projects/"] {
        let response = server.get(path).await;
        assert_eq!(response.status_code(), StatusCode::OK, "GET {path}");
        assert!(response.text().contains("Luxury Downtown Loft"), "GET {path}");
    }
}

#[tokio::test]
async fn test_unknown_project_is_not_found() {
    let response = server().get("/projects/999").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert!(response.text().contains("Not Found"));
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let response = server().get("/listings").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_detail_state_comes_from_query() {
    let response = server()
        .get("/projects/1")
        .add_query_param("section", "floor-plans")
        .add_query_param("plan", "1")
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.text();
    assert!(body.contains("Floor Plans"));
    assert!(body.contains("section=floor-plans"));
}

#[tokio::test]
async fn test_call_back_form_acknowledges() {
    let response = server()
        .post("/")
        .form(&[("name", "Abebe Kebede"), ("phone", "555-0100")])
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.text();
    assert!(body.contains("Thanks! We"));
    assert!(!body.contains("Abebe Kebede"));
}

#[tokio::test]
async fn test_incomplete_form_is_rendered_back() {
    let response = server()
        .post("/contact/message")
        .form(&[("name", "Abebe Kebede"), ("email", ""), ("message", "")])
        .await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = response.text();
    assert!(body.contains(REQUIRED_MESSAGE));
    assert!(body.contains("Abebe Kebede"));
}

#[tokio::test]
async fn test_inquiry_posts_back_to_project() {
    let response = server()
        .post("/projects/2/inquiry")
        .form(&[
            ("name", "Abebe Kebede"),
            ("email", "abebe@example.com"),
            ("phone", "555-0100"),
        ])
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.text().contains("Modern Family Home"));
}

#[tokio::test]
async fn test_blog_search_filters_and_hides_featured() {
    let server = server();

    let all = server.get("/blog").await;
    assert!(all.text().contains("Featured Article"));

    let response = server.get("/blog").add_query_param("q", "mortgage").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.text();
    assert!(body.contains("Understanding Mortgage Rates in 2025"));
    assert!(!body.contains("Featured Article"));
    assert!(!body.contains("Staging Your Home for a Quick Sale"));

    let none = server.get("/blog").add_query_param("q", "zzzz").await;
    let body = none.text();
    assert!(body.contains("No articles found"));
    assert!(body.contains("<a href=\"/blog\" class=\"link\">View all articles"));
}

#[tokio::test]
async fn test_newsletter_signup() {
    let server = server();

    let page = server.get("/blog").await;
    assert!(page.text().contains("id=\"newsletter-form\""));

    let response = server
        .post("/blog")
        .form(&[("email", "hana@example.com")])
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.text();
    assert!(body.contains("subscribed!"));
    assert!(!body.contains("hana@example.com"));

    let rejected = server.post("/blog").form(&[("email", "")]).await;
    assert_eq!(rejected.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(rejected.text().contains(REQUIRED_MESSAGE));
}

#[tokio::test]
async fn test_assets_carry_etag() {
    let response = server().get("/assets/site.css").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.maybe_header("etag").is_some());

    let missing = server().get("/assets/nope.js").await;
    assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_live_channel_can_be_disabled() {
    let mut config = Config::default();
    config.server.live_updates = false;
    let server = TestServer::new(router(AppState::builtin(config))).unwrap();

    let page = server.get("/").await;
    assert!(!page.text().contains("data-live"));
    assert_eq!(server.get("/live").await.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_serves_content_from_file() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("content.json");

    let mut catalog = gdrealty::content::catalog::builtin();
    catalog.projects.truncate(1);
    catalog.projects[0].title = "Riverside Penthouse".to_string();
    gdrealty::content::file::save(&catalog, &path)?;

    let mut config = Config::default();
    config.content.path = Some(path);
    let server = TestServer::new(router(AppState::from_config(config)?))?;

    let detail = server.get("/projects/1").await;
    assert_eq!(detail.status_code(), StatusCode::OK);
    assert!(detail.text().contains("Riverside Penthouse"));
    assert_eq!(server.get("/projects/2").await.status_code(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn test_video_media_renders_as_video() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("content.json");

    let mut catalog = gdrealty::content::catalog::builtin();
    catalog.projects[0].images = vec![
        MediaItem::new("https://cdn.example.com/front.jpg"),
        MediaItem::new("https://cdn.example.com/walkthrough.mp4"),
    ];
    gdrealty::content::file::save(&catalog, &path)?;

    let mut config = Config::default();
    config.content.path = Some(path);
    let server = TestServer::new(router(AppState::from_config(config)?))?;

    let first = server.get("/projects/1").await.text();
    assert!(first.contains(
        "<img class=\"carousel-image\" data-carousel-image data-alt=\"Luxury Downtown Loft\" src=\"https://cdn.example.com/front.jpg\""
    ));

    let second = server
        .get("/projects/1")
        .add_query_param("image", "1")
        .await
        .text();
    assert!(second.contains("<video class=\"carousel-image\" data-carousel-image"));
    assert!(!second.contains("<img class=\"carousel-image\""));
    assert!(second.contains("src=\"https://cdn.example.com/walkthrough.mp4\""));
    Ok(())
}

#[tokio::test]
async fn test_live_channel_round_trip() {
    let state = AppState::builtin(Config::default());
    let server = TestServer::builder()
        .http_transport()
        .build(router(state.clone()))
        .unwrap();

    let mut socket = server
        .get_websocket("/live")
        .add_query_param("page", "project")
        .add_query_param("id", "1")
        .await
        .into_websocket()
        .await;

    socket
        .send_text(r#"{"type":"next","carousel":"gallery"}"#)
        .await;
    let update: ViewUpdate = socket.receive_json().await;
    assert!(matches!(
        update,
        ViewUpdate::Slide { ref carousel, index: 1, video: false, .. } if carousel == "gallery"
    ));
    assert_eq!(state.live.count(), 1);

    // Malformed events are skipped and the connection stays up
    socket.send_text("not an event").await;
    socket
        .send_text(r#"{"type":"previous","carousel":"gallery"}"#)
        .await;
    let update: ViewUpdate = socket.receive_json().await;
    assert!(matches!(update, ViewUpdate::Slide { index: 0, .. }));

    socket.close().await;
    for _ in 0..200 {
        if state.live.count() == 0 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(state.live.count(), 0);
}
