use crate::helpers::{body_json, make_test_app};
use axum::http::StatusCode;

#[tokio::test]
async fn health_is_public() {
    let app = make_test_app().await;

    let response = app.get("/api/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["database"], "up");
}
