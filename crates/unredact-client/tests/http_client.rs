use std::collections::HashMap;
use std::time::Duration;

use axum::{Json, Router, extract::Query, http::StatusCode, routing::get};
use serde_json::{Value, json};
use unredact_client::{ClientError, HttpUnredactionClient, UnredactionClient, UnredactionRequest};

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/unredact", addr)
}

async fn fill_masks(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let text = params.get("text").cloned().unwrap_or_default();
    let words: Vec<String> = text
        .split(' ')
        .filter(|token| *token == "unk")
        .enumerate()
        .map(|(i, _)| format!("word{}", i))
        .collect();
    Json(json!({
        "text": text,
        "unredacted_text": text,
        "unredacted_words": words,
    }))
}

fn client(endpoint: &str) -> HttpUnredactionClient {
    HttpUnredactionClient::new(endpoint, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_successful_round_trip() {
    let endpoint = serve(Router::new().route("/unredact", get(fill_masks))).await;

    let response = client(&endpoint)
        .unredact(&UnredactionRequest {
            text: "The unk brown unk".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(response.text, "The unk brown unk");
    assert_eq!(response.unredacted_words, vec!["word0", "word1"]);
}

#[tokio::test]
async fn test_query_survives_fragment_and_existing_params() {
    let app = Router::new().route(
        "/unredact",
        get(|Query(params): Query<HashMap<String, String>>| async move {
            Json(json!({
                "text": params.get("text").cloned().unwrap_or_default(),
                "unredacted_words": [params.get("model").cloned().unwrap_or_default()],
            }))
        }),
    );
    let endpoint = serve(app).await;

    let response = client(&format!("{}?model=base#section", endpoint))
        .unredact(&UnredactionRequest {
            text: "what's unk & 50%".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(response.text, "what's unk & 50%");
    assert_eq!(response.unredacted_words, vec!["base"]);
}

#[tokio::test]
async fn test_http_error_status() {
    let app = Router::new().route(
        "/unredact",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "model offline") }),
    );
    let endpoint = serve(app).await;

    let err = client(&endpoint)
        .unredact(&UnredactionRequest {
            text: "unk".to_string(),
        })
        .await
        .unwrap_err();

    match err {
        ClientError::Status { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "model offline");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body() {
    let app = Router::new().route("/unredact", get(|| async { "<html>not json</html>" }));
    let endpoint = serve(app).await;

    let err = client(&endpoint)
        .unredact(&UnredactionRequest {
            text: "unk".to_string(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_wrong_shape_is_malformed() {
    let app = Router::new().route(
        "/unredact",
        get(|| async { Json(json!({ "text": "unk", "unredacted_words": "quick" })) }),
    );
    let endpoint = serve(app).await;

    let err = client(&endpoint)
        .unredact(&UnredactionRequest {
            text: "unk".to_string(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_unreachable_service() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(&format!("http://{}/unredact", addr))
        .unredact(&UnredactionRequest {
            text: "unk".to_string(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Transport(_)));
}
