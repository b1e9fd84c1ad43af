mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::app::spawn_test_app;
use common::http::{assert_json_error, assert_status_ok_json, call};

#[tokio::test]
async fn it_register_chat_upserts_title() {
    let app = spawn_test_app().await;

    let (status, first) = call(
        &app.app,
        Method::POST,
        "/api/chats",
        Some(json!({ "chatId": -1001, "title": "Spanish club" })),
    )
    .await;
    assert_status_ok_json(status, &first);
    assert_eq!(first["data"]["chatId"], -1001);
    assert_eq!(first["data"]["title"], "Spanish club");

    let (status, second) = call(
        &app.app,
        Method::POST,
        "/api/chats",
        Some(json!({ "chatId": -1001, "title": "Spanish club B1" })),
    )
    .await;
    assert_status_ok_json(status, &second);
    assert_eq!(second["data"]["title"], "Spanish club B1");
    assert_eq!(first["data"]["createdAt"], second["data"]["createdAt"]);

    let (status, fetched) = call(&app.app, Method::GET, "/api/chats/-1001", None).await;
    assert_status_ok_json(status, &fetched);
    assert_eq!(fetched["data"]["title"], "Spanish club B1");
}

#[tokio::test]
async fn it_blank_title_is_rejected() {
    let app = spawn_test_app().await;

    let (status, body) = call(
        &app.app,
        Method::POST,
        "/api/chats",
        Some(json!({ "chatId": 3, "title": "  " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_json_error(&body, "VALIDATION_ERROR");
}

#[tokio::test]
async fn it_unknown_chat_is_404() {
    let app = spawn_test_app().await;

    let (status, body) = call(&app.app, Method::GET, "/api/chats/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_json_error(&body, "CHAT_NOT_FOUND");
}
