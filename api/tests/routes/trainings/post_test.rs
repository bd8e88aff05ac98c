use crate::helpers::{MultipartBuilder, body_json, make_test_app, make_test_app_with_limit};
use axum::http::StatusCode;
use util::config::DEFAULT_MAX_UPLOAD_BYTES;

fn forklift_form() -> MultipartBuilder {
    MultipartBuilder::new()
        .text("title", "Forklift basics")
        .text("description", "Operating a forklift safely")
        .text("type", "manual")
        .text("roles", "operator")
        .text("roles", "supervisor")
        .text("section", "Warehouse")
        .text("module", "Vehicles")
        .file("forklift.pdf", b"%PDF-1.4 forklift")
}

#[tokio::test]
async fn admin_creates_training_and_file_is_stored() {
    let app = make_test_app().await;

    let response = app
        .multipart("POST", "/api/trainings", "admin", forklift_form())
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    let data = &json["data"];
    assert_eq!(data["title"], "Forklift basics");
    assert_eq!(data["type"], "manual");
    assert_eq!(data["originalFileName"], "forklift.pdf");
    assert_eq!(data["roles"], serde_json::json!(["operator", "supervisor"]));
    assert_eq!(data["section"], "Warehouse");
    assert_eq!(data["module"], "Vehicles");

    let file_url = data["fileUrl"].as_str().unwrap();
    assert!(file_url.starts_with("/uploads/"));
    assert!(file_url.ends_with(".pdf"));
    assert_ne!(file_url, "/uploads/forklift.pdf");

    let stored = std::fs::read(app.stored_path(file_url)).unwrap();
    assert_eq!(stored, b"%PDF-1.4 forklift");
    assert_eq!(app.stored_files().len(), 1);
}

#[tokio::test]
async fn comma_separated_roles_are_split() {
    let app = make_test_app().await;

    let data = app
        .create(
            MultipartBuilder::new()
                .text("title", "Ladders")
                .text("roles", "operator, cleaner,operator")
                .file("ladders.docx", b"docx"),
        )
        .await;

    assert_eq!(data["roles"], serde_json::json!(["operator", "cleaner"]));
    assert_eq!(data["section"], "");
    assert_eq!(data["module"], "");
}

#[tokio::test]
async fn non_admin_cannot_create() {
    let app = make_test_app().await;

    let response = app
        .multipart("POST", "/api/trainings", "operator", forklift_form())
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(app.stored_files().is_empty());
}

#[tokio::test]
async fn missing_token_is_unauthorized() {
    let app = make_test_app().await;

    let (content_type, body) = forklift_form().finish();
    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/trainings")
        .header(axum::http::header::CONTENT_TYPE, content_type)
        .body(axum::body::Body::from(body))
        .unwrap();

    let response = app.send(request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn missing_file_is_rejected() {
    let app = make_test_app().await;

    let response = app
        .multipart(
            "POST",
            "/api/trainings",
            "admin",
            MultipartBuilder::new().text("title", "No file"),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "A file must be uploaded");
}

#[tokio::test]
async fn missing_title_is_rejected_and_upload_discarded() {
    let app = make_test_app().await;

    let response = app
        .multipart(
            "POST",
            "/api/trainings",
            "admin",
            MultipartBuilder::new()
                .text("title", "  ")
                .file("forklift.pdf", b"pdf"),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["message"],
        "Missing required field: title"
    );
    assert!(app.stored_files().is_empty());
}

#[tokio::test]
async fn disallowed_extension_leaves_no_file() {
    let app = make_test_app().await;

    let response = app
        .multipart(
            "POST",
            "/api/trainings",
            "admin",
            MultipartBuilder::new()
                .text("title", "Script")
                .file("install.exe", b"MZ"),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "File type not allowed");
    assert!(app.stored_files().is_empty());
}

#[tokio::test]
async fn oversized_file_is_rejected_with_413() {
    let app = make_test_app_with_limit(1024).await;

    let response = app
        .multipart(
            "POST",
            "/api/trainings",
            "admin",
            MultipartBuilder::new()
                .text("title", "Big video")
                .file("big.mp4", &vec![0u8; 4096]),
        )
        .await;
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert!(app.stored_files().is_empty());
}

#[tokio::test]
async fn file_at_the_limit_is_accepted() {
    let app = make_test_app_with_limit(1024).await;

    app.create(
        MultipartBuilder::new()
            .text("title", "Exactly")
            .file("exact.mp4", &vec![1u8; 1024]),
    )
    .await;
    assert_eq!(app.stored_files().len(), 1);
}

#[tokio::test]
async fn duplicate_title_section_module_is_rejected_without_orphan() {
    let app = make_test_app().await;
    app.create(forklift_form()).await;

    let response = app
        .multipart("POST", "/api/trainings", "admin", forklift_form())
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["success"], false);
    assert_eq!(app.stored_files().len(), 1);
}

#[tokio::test]
async fn same_title_in_another_module_is_allowed() {
    let app = make_test_app().await;
    app.create(forklift_form()).await;

    app.create(
        MultipartBuilder::new()
            .text("title", "Forklift basics")
            .text("section", "Warehouse")
            .text("module", "Loading dock")
            .file("forklift.pdf", b"pdf"),
    )
    .await;
    assert_eq!(app.stored_files().len(), 2);
}

#[tokio::test]
async fn two_files_in_one_request_are_rejected() {
    let app = make_test_app().await;

    let response = app
        .multipart(
            "POST",
            "/api/trainings",
            "admin",
            MultipartBuilder::new()
                .text("title", "Twice")
                .file("a.pdf", b"a")
                .file("b.pdf", b"b"),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(app.stored_files().is_empty());
}

#[tokio::test]
async fn default_limit_is_twenty_mebibytes() {
    assert_eq!(DEFAULT_MAX_UPLOAD_BYTES, 20 * 1024 * 1024);
    let app = make_test_app().await;
    let limit = DEFAULT_MAX_UPLOAD_BYTES as usize;

    let response = app
        .multipart(
            "POST",
            "/api/trainings",
            "admin",
            MultipartBuilder::new()
                .text("title", "Too long")
                .file("long.mp4", &vec![0u8; limit + 1]),
        )
        .await;
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert!(app.stored_files().is_empty());

    let response = app
        .multipart(
            "POST",
            "/api/trainings",
            "admin",
            MultipartBuilder::new()
                .text("title", "Just fits")
                .file("fits.mp4", &vec![0u8; limit]),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(app.stored_files().len(), 1);
}
