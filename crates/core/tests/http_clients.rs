//! HTTP client integration tests.
//!
//! The store and Bot API clients are exercised against in-process axum
//! servers that mimic the real endpoints.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use kakaogram_core::{
    pipeline::messages,
    testing::{fixtures, MockConversation, MockPublisher},
    BotApiPublisher, CreateRequest, KakaoClient, PackSource, PackUrl, PipelineError,
    PipelineOutcome, PublishError, SourceConfig, SourceError, StickerConfig, StickerPipeline,
    StickerPublisher, StickerTransformer, TelegramConfig,
};

const TOKEN: &str = "test-token";

async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

// =============================================================================
// Fake emoticon store
// =============================================================================

async fn pack_metadata(Path(token): Path<String>) -> impl IntoResponse {
    match token.as_str() {
        "broken" => (StatusCode::INTERNAL_SERVER_ERROR, "boom".to_string()).into_response(),
        "garbage" => (StatusCode::OK, "<html>maintenance</html>".to_string()).into_response(),
        "wrongshape" => Json(json!({ "title": "Foo", "thumbnailUrls": [] })).into_response(),
        _ => (
            [(header::CONTENT_TYPE, "application/json")],
            fixtures::metadata_json("Foo", &["/img/u1.png", "/img/u2.png"]),
        )
            .into_response(),
    }
}

async fn serve_image(Path(name): Path<String>) -> impl IntoResponse {
    let bytes = match name.as_str() {
        "u1.png" => fixtures::png_image(1000, 400, [255, 0, 0, 255]),
        "u2.png" => fixtures::png_image(200, 200, [0, 255, 0, 128]),
        _ => return StatusCode::NOT_FOUND.into_response(),
    };
    ([(header::CONTENT_TYPE, "image/png")], bytes).into_response()
}

/// Store whose metadata lists absolute image URLs on the same server.
async fn spawn_store() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let image_base = base.clone();

    let router = Router::new()
        .route(
            "/api/v1/items/t/{token}",
            get(move |Path(token): Path<String>| {
                let image_base = image_base.clone();
                async move {
                    if token == "abc123" {
                        let urls = [
                            format!("{}/img/u1.png", image_base),
                            format!("{}/img/u2.png", image_base),
                        ];
                        let urls: Vec<&str> = urls.iter().map(String::as_str).collect();
                        (
                            [(header::CONTENT_TYPE, "application/json")],
                            fixtures::metadata_json("Foo", &urls),
                        )
                            .into_response()
                    } else {
                        pack_metadata(Path(token)).await.into_response()
                    }
                }
            }),
        )
        .route("/img/{name}", get(serve_image));

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    base
}

fn store_client(base_url: &str) -> KakaoClient {
    KakaoClient::new(&SourceConfig {
        base_url: base_url.to_string(),
        timeout_secs: 5,
    })
    .unwrap()
}

#[tokio::test]
async fn test_store_client_fetches_metadata_from_rewritten_url() {
    let base = spawn_store().await;
    let client = store_client(&base);

    let pack = PackUrl::parse("https://e.kakao.com/t/abc123").unwrap();
    let metadata = client.fetch_metadata(&pack).await.unwrap();

    assert_eq!(metadata.title, "Foo");
    assert_eq!(
        metadata.thumbnail_urls,
        vec![format!("{}/img/u1.png", base), format!("{}/img/u2.png", base)]
    );
}

#[tokio::test]
async fn test_store_client_server_error() {
    let client = store_client(&spawn_store().await);
    let pack = PackUrl::parse("https://e.kakao.com/t/broken").unwrap();

    let result = client.fetch_metadata(&pack).await;
    match result {
        Err(SourceError::ApiError { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "boom");
        }
        other => panic!("expected ApiError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_store_client_rejects_malformed_bodies() {
    let client = store_client(&spawn_store().await);

    for token in ["garbage", "wrongshape"] {
        let pack = PackUrl::parse(&format!("https://e.kakao.com/t/{}", token)).unwrap();
        let result = client.fetch_metadata(&pack).await;
        assert!(
            matches!(result, Err(SourceError::ParseError(_))),
            "{}: {:?}",
            token,
            result
        );
    }
}

#[tokio::test]
async fn test_store_client_downloads_images() {
    let base = spawn_store().await;
    let client = store_client(&base);

    let bytes = client
        .fetch_image(&format!("{}/img/u2.png", base))
        .await
        .unwrap();
    let decoded = image::load_from_memory(&bytes).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (200, 200));

    let missing = client.fetch_image(&format!("{}/img/nope.png", base)).await;
    assert!(matches!(
        missing,
        Err(SourceError::ApiError { status: 404, .. })
    ));
}

#[tokio::test]
async fn test_store_client_connection_refused() {
    // Bind and drop to get a port nothing listens on.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let client = store_client(&base);
    let pack = PackUrl::parse("https://e.kakao.com/t/abc123").unwrap();
    assert!(matches!(
        client.fetch_metadata(&pack).await,
        Err(SourceError::HttpError(_))
    ));
}

#[tokio::test]
async fn test_pipeline_against_fake_store() {
    let client = store_client(&spawn_store().await);
    let publisher = MockPublisher::new();
    let chat = MockConversation::new();
    let pipeline = StickerPipeline::new(
        client,
        publisher.clone(),
        StickerTransformer::new(&StickerConfig::default()),
        "kakaogram_bot",
    );

    let request = CreateRequest::from_text(1, "https://e.kakao.com/t/abc123");
    let outcome = pipeline.run(&request, &chat).await.unwrap();
    assert!(matches!(outcome, PipelineOutcome::Completed(_)));

    // Both a wide and a square input come out at the canvas size.
    for call in publisher.recorded_calls().await {
        let png = match call {
            kakaogram_core::testing::RecordedPublish::CreateSet { stickers, .. } => {
                stickers[0].png.clone()
            }
            kakaogram_core::testing::RecordedPublish::AddSticker { sticker, .. } => sticker.png,
        };
        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (512, 512));
    }

    let download_id = chat.message_id_starting_with("다운로드 중").await.unwrap();
    assert_eq!(
        chat.edits_of(download_id).await,
        vec![messages::downloading(1, 2), messages::downloading(2, 2)]
    );
}

#[tokio::test]
async fn test_pipeline_metadata_500_only_sends_loading_notice() {
    let client = store_client(&spawn_store().await);
    let chat = MockConversation::new();
    let pipeline = StickerPipeline::new(
        client,
        MockPublisher::new(),
        StickerTransformer::new(&StickerConfig::default()),
        "kakaogram_bot",
    );

    let request = CreateRequest::from_text(1, "https://e.kakao.com/t/broken");
    let result = pipeline.run(&request, &chat).await;

    assert!(matches!(result, Err(PipelineError::Source(_))));
    assert_eq!(chat.replies().await, vec![messages::LOADING.to_string()]);
    assert!(chat.sent().await.is_empty());
}

// =============================================================================
// Fake Bot API
// =============================================================================

type Recorded = Arc<Mutex<Vec<(String, HashMap<String, Vec<u8>>)>>>;

async fn bot_method(
    State(recorded): State<Recorded>,
    Path(method): Path<String>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let mut fields = HashMap::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        let data = field.bytes().await.unwrap();
        fields.insert(name, data.to_vec());
    }

    let occupied = fields.get("name").map(|n| n.as_slice()) == Some(b"taken_by_bot".as_slice());
    recorded.lock().unwrap().push((method, fields));

    if occupied {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "ok": false,
                "error_code": 400,
                "description": "Bad Request: sticker set name is already occupied"
            })),
        )
    } else {
        (StatusCode::OK, Json(json!({ "ok": true, "result": true })))
    }
}

async fn spawn_bot_api() -> (String, Recorded) {
    let recorded: Recorded = Arc::default();
    let router = Router::new()
        .route(&format!("/bot{}/{{method}}", TOKEN), post(bot_method))
        .with_state(Arc::clone(&recorded));
    (spawn(router).await, recorded)
}

fn bot_publisher(api_url: &str) -> BotApiPublisher {
    BotApiPublisher::new(&TelegramConfig {
        token: TOKEN.to_string(),
        api_url: api_url.to_string(),
        ..Default::default()
    })
    .unwrap()
}

fn text(fields: &HashMap<String, Vec<u8>>, name: &str) -> String {
    String::from_utf8(fields[name].clone()).unwrap()
}

#[tokio::test]
async fn test_create_sticker_set_multipart_shape() {
    let (api_url, recorded) = spawn_bot_api().await;
    let publisher = bot_publisher(&api_url);
    let sticker = fixtures::prepared_sticker();

    publisher
        .create_sticker_set(77, "t1_by_bot", "Foo", std::slice::from_ref(&sticker))
        .await
        .unwrap();

    let recorded = recorded.lock().unwrap();
    let (method, fields) = &recorded[0];
    assert_eq!(method, "createNewStickerSet");
    assert_eq!(text(fields, "user_id"), "77");
    assert_eq!(text(fields, "name"), "t1_by_bot");
    assert_eq!(text(fields, "title"), "Foo");
    assert_eq!(text(fields, "sticker_type"), "regular");

    let stickers: Value = serde_json::from_str(&text(fields, "stickers")).unwrap();
    assert_eq!(
        stickers,
        json!([{ "sticker": "attach://sticker0", "format": "static", "emoji_list": ["😀"] }])
    );
    assert_eq!(fields["sticker0"], sticker.png);
}

#[tokio::test]
async fn test_add_sticker_to_set_multipart_shape() {
    let (api_url, recorded) = spawn_bot_api().await;
    let publisher = bot_publisher(&api_url);
    let sticker = fixtures::prepared_sticker();

    publisher
        .add_sticker_to_set(77, "t1_by_bot", &sticker)
        .await
        .unwrap();

    let recorded = recorded.lock().unwrap();
    let (method, fields) = &recorded[0];
    assert_eq!(method, "addStickerToSet");
    let payload: Value = serde_json::from_str(&text(fields, "sticker")).unwrap();
    assert_eq!(payload["sticker"], "attach://sticker0");
    assert_eq!(fields["sticker0"], sticker.png);
}

#[tokio::test]
async fn test_bot_api_error_is_reported() {
    let (api_url, _recorded) = spawn_bot_api().await;
    let publisher = bot_publisher(&api_url);

    let result = publisher
        .create_sticker_set(77, "taken_by_bot", "Foo", &[fixtures::prepared_sticker()])
        .await;

    match result {
        Err(PublishError::ApiError { code, description }) => {
            assert_eq!(code, 400);
            assert!(description.contains("already occupied"));
        }
        other => panic!("expected ApiError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_transport_error_does_not_leak_token() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let api_url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let publisher = bot_publisher(&api_url);
    let err = publisher
        .add_sticker_to_set(77, "t1_by_bot", &fixtures::prepared_sticker())
        .await
        .unwrap_err();

    assert!(matches!(err, PublishError::HttpError(_)));
    assert!(!err.to_string().contains(TOKEN));
}
