use super::*;
use axum::{
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;
use tokio::net::TcpListener;

async fn handle_titles() -> Json<serde_json::Value> {
    Json(json!({ "titles": ["Starry Night", "Water Lilies", "The Kiss"] }))
}

async fn handle_artworks() -> Json<serde_json::Value> {
    Json(json!({
        "data": [
            { "id": 1, "title": "Starry Night", "image_url": "x.jpg", "artist_id": 4 },
            { "id": 2, "title": "Water Lilies", "image_url": null }
        ]
    }))
}

async fn handle_artwork(Path(artwork_id): Path<i64>) -> axum::response::Response {
    if artwork_id == 1 {
        Json(json!({ "id": 1, "title": "Starry Night", "image_url": "x.jpg" })).into_response()
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(json!({ "detail": "Item not found" })),
        )
            .into_response()
    }
}

async fn handle_root() -> Json<serde_json::Value> {
    Json(json!({ "message": "This is Art Base One" }))
}

async fn handle_image() -> &'static [u8] {
    b"fake-image-bytes"
}

async fn spawn_api_server(app: Router) -> anyhow::Result<Url> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(Url::parse(&format!("http://{addr}/api"))?)
}

fn happy_router() -> Router {
    Router::new()
        .route("/api/", get(handle_root))
        .route("/api/artworks", get(handle_artworks))
        .route("/api/artworks/all", get(handle_artworks))
        .route("/api/artworks/titles", get(handle_titles))
        .route("/api/artworks/:artwork_id", get(handle_artwork))
        .route("/api/static/x.jpg", get(handle_image))
}

#[tokio::test]
async fn fetch_titles_preserves_response_order() {
    let base = spawn_api_server(happy_router()).await.expect("spawn server");
    let client = HttpArtworkClient::new(base);

    let titles = client.fetch_titles().await.expect("titles");
    assert_eq!(titles, vec!["Starry Night", "Water Lilies", "The Kiss"]);
}

#[tokio::test]
async fn fetch_artworks_decodes_data_envelope() {
    let base = spawn_api_server(happy_router()).await.expect("spawn server");
    let client = HttpArtworkClient::new(base);

    let artworks = client.fetch_artworks().await.expect("artworks");
    assert_eq!(artworks.len(), 2);
    assert_eq!(artworks[0], Artwork::new(1, "Starry Night", "x.jpg"));
    assert_eq!(artworks[1].image_url, None);
}

#[tokio::test]
async fn artworks_path_is_configurable() {
    let router = Router::new().route("/api/artworks/all", get(handle_artworks));
    let base = spawn_api_server(router).await.expect("spawn server");
    let client = HttpArtworkClient::new(base).with_artworks_path("/artworks/all");

    let artworks = client.fetch_artworks().await.expect("artworks");
    assert_eq!(artworks.len(), 2);
}

#[tokio::test]
async fn non_success_status_carries_backend_detail() {
    let base = spawn_api_server(happy_router()).await.expect("spawn server");
    let client = HttpArtworkClient::new(base);

    let err = client
        .fetch_artwork(ArtworkId(99))
        .await
        .expect_err("must fail");
    assert_eq!(err.status(), Some(404));
    assert!(err.to_string().contains("Item not found"), "unexpected: {err}");
}

#[tokio::test]
async fn fetch_single_artwork_by_id() {
    let base = spawn_api_server(happy_router()).await.expect("spawn server");
    let client = HttpArtworkClient::new(base);

    let artwork = client.fetch_artwork(ArtworkId(1)).await.expect("artwork");
    assert_eq!(artwork.title, "Starry Night");
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let router = Router::new().route(
        "/api/artworks/titles",
        get(|| async { Json(json!({ "names": ["nope"] })) }),
    );
    let base = spawn_api_server(router).await.expect("spawn server");
    let client = HttpArtworkClient::new(base);

    let err = client.fetch_titles().await.expect_err("must fail");
    assert!(matches!(err, FetchError::Decode { .. }), "unexpected: {err}");
}

#[tokio::test]
async fn missing_route_is_a_status_error() {
    let base = spawn_api_server(Router::new()).await.expect("spawn server");
    let client = HttpArtworkClient::new(base);

    let err = client.fetch_artworks().await.expect_err("must fail");
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let base = Url::parse(&format!("http://{addr}/api")).expect("url");
    let client = HttpArtworkClient::new(base);
    let err = client.fetch_titles().await.expect_err("must fail");
    assert!(matches!(err, FetchError::Transport { .. }), "unexpected: {err}");
}

#[tokio::test]
async fn root_message_probe() {
    let base = spawn_api_server(happy_router()).await.expect("spawn server");
    let client = HttpArtworkClient::new(base);

    let message = client.fetch_root_message().await.expect("root");
    assert_eq!(message, "This is Art Base One");
}

#[tokio::test]
async fn relative_image_urls_resolve_against_api_base() {
    let base = spawn_api_server(happy_router()).await.expect("spawn server");
    let client = HttpArtworkClient::new(base.clone());

    let resolved = client.resolve_image_url("x.jpg").expect("resolve");
    assert_eq!(resolved.path(), "/x.jpg");

    let absolute = client
        .resolve_image_url("https://cdn.example/a.png")
        .expect("resolve");
    assert_eq!(absolute.as_str(), "https://cdn.example/a.png");

    let image_url = format!("{}/static/x.jpg", base.as_str().trim_end_matches('/'));
    let bytes = client.fetch_image(&image_url).await.expect("image");
    assert_eq!(bytes, b"fake-image-bytes");
}

#[tokio::test]
async fn from_settings_uses_resolved_base_and_artworks_path() {
    let base = spawn_api_server(happy_router()).await.expect("spawn server");
    let settings = Settings {
        api_base: base.to_string(),
        artworks_path: "artworks/all".into(),
        request_timeout_secs: Some(5),
        ..Settings::default()
    };
    let client = HttpArtworkClient::from_settings(&settings).expect("client");
    assert_eq!(client.base(), &base);

    let artworks = client.fetch_artworks().await.expect("artworks");
    assert_eq!(artworks.len(), 2);
}
