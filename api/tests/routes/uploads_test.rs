use crate::helpers::{MultipartBuilder, make_test_app};
use axum::{body::to_bytes, http::StatusCode};

#[tokio::test]
async fn stored_files_are_served_to_authenticated_callers() {
    let app = make_test_app().await;
    let created = app
        .create(
            MultipartBuilder::new()
                .text("title", "Fire drill")
                .file("drill.pdf", b"%PDF drill"),
        )
        .await;
    let url = created["fileUrl"].as_str().unwrap();

    let response = app.get(url, Some("operator")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], b"%PDF drill");
}

#[tokio::test]
async fn stored_files_require_a_token() {
    let app = make_test_app().await;
    let created = app
        .create(
            MultipartBuilder::new()
                .text("title", "Fire drill")
                .file("drill.pdf", b"%PDF drill"),
        )
        .await;

    let response = app.get(created["fileUrl"].as_str().unwrap(), None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unknown_file_is_404() {
    let app = make_test_app().await;

    let response = app.get("/uploads/missing.pdf", Some("admin")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
