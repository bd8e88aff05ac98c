use crate::helpers::{MultipartBuilder, body_json, make_test_app};
use axum::http::StatusCode;

fn original() -> MultipartBuilder {
    MultipartBuilder::new()
        .text("title", "Fire drill")
        .text("description", "Yearly drill")
        .text("type", "slides")
        .text("roles", "operator")
        .text("section", "Safety")
        .text("module", "Basics")
        .text("submodule", "Drills")
        .file("drill.pptx", b"old slides")
}

#[tokio::test]
async fn omitted_fields_keep_their_values() {
    let app = make_test_app().await;
    let created = app.create(original()).await;
    let uri = format!("/api/trainings/{}", created["id"]);

    let response = app
        .multipart(
            "PUT",
            &uri,
            "admin",
            MultipartBuilder::new().text("description", "Twice a year"),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = body_json(response).await["data"].clone();
    assert_eq!(data["title"], "Fire drill");
    assert_eq!(data["description"], "Twice a year");
    assert_eq!(data["type"], "slides");
    assert_eq!(data["roles"], serde_json::json!(["operator"]));
    assert_eq!(data["section"], "Safety");
    assert_eq!(data["module"], "Basics");
    assert_eq!(data["submodule"], "Drills");
    assert_eq!(data["fileUrl"], created["fileUrl"]);
}

#[tokio::test]
async fn empty_title_and_roles_keep_but_empty_section_clears() {
    let app = make_test_app().await;
    let created = app.create(original()).await;
    let uri = format!("/api/trainings/{}", created["id"]);

    let response = app
        .multipart(
            "PUT",
            &uri,
            "admin",
            MultipartBuilder::new()
                .text("title", "")
                .text("roles", "")
                .text("section", "")
                .text("submodule", ""),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = body_json(response).await["data"].clone();
    assert_eq!(data["title"], "Fire drill");
    assert_eq!(data["roles"], serde_json::json!(["operator"]));
    assert_eq!(data["section"], "");
    assert_eq!(data["module"], "Basics");
    assert_eq!(data["submodule"], "");
}

#[tokio::test]
async fn roles_are_replaced() {
    let app = make_test_app().await;
    let created = app.create(original()).await;
    let uri = format!("/api/trainings/{}", created["id"]);

    app.multipart(
        "PUT",
        &uri,
        "admin",
        MultipartBuilder::new().text("roles", "supervisor,cleaner"),
    )
    .await;

    assert_eq!(
        app.get(&uri, Some("operator")).await.status(),
        StatusCode::FORBIDDEN
    );
    let response = app.get(&uri, Some("cleaner")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["data"]["roles"],
        serde_json::json!(["supervisor", "cleaner"])
    );
}

#[tokio::test]
async fn new_file_replaces_the_old_one() {
    let app = make_test_app().await;
    let created = app.create(original()).await;
    let uri = format!("/api/trainings/{}", created["id"]);
    let old_path = app.stored_path(created["fileUrl"].as_str().unwrap());

    let response = app
        .multipart(
            "PUT",
            &uri,
            "admin",
            MultipartBuilder::new().file("drill-v2.mp4", b"new video"),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = body_json(response).await["data"].clone();
    assert_ne!(data["fileUrl"], created["fileUrl"]);
    assert_eq!(data["originalFileName"], "drill-v2.mp4");

    assert!(!old_path.exists());
    let new_path = app.stored_path(data["fileUrl"].as_str().unwrap());
    assert_eq!(std::fs::read(new_path).unwrap(), b"new video");
    assert_eq!(app.stored_files().len(), 1);
}

#[tokio::test]
async fn disallowed_replacement_keeps_the_old_file() {
    let app = make_test_app().await;
    let created = app.create(original()).await;
    let uri = format!("/api/trainings/{}", created["id"]);

    let response = app
        .multipart(
            "PUT",
            &uri,
            "admin",
            MultipartBuilder::new().file("notes.txt", b"text"),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let stored = app.stored_files();
    assert_eq!(stored.len(), 1);
    assert!(
        created["fileUrl"]
            .as_str()
            .unwrap()
            .ends_with(&stored[0])
    );
}

#[tokio::test]
async fn collision_with_another_record_is_rejected() {
    let app = make_test_app().await;
    app.create(original()).await;
    let other = app
        .create(
            MultipartBuilder::new()
                .text("title", "First aid")
                .text("section", "Safety")
                .text("module", "Basics")
                .file("aid.pdf", b"pdf"),
        )
        .await;
    let uri = format!("/api/trainings/{}", other["id"]);

    let response = app
        .multipart(
            "PUT",
            &uri,
            "admin",
            MultipartBuilder::new()
                .text("title", "Fire drill")
                .file("aid-v2.pdf", b"pdf v2"),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert_eq!(app.stored_files().len(), 2);
    let response = app.get(&uri, Some("admin")).await;
    assert_eq!(body_json(response).await["data"]["title"], "First aid");
}

#[tokio::test]
async fn update_missing_training_is_404() {
    let app = make_test_app().await;

    let response = app
        .multipart(
            "PUT",
            "/api/trainings/77",
            "admin",
            MultipartBuilder::new().text("title", "Ghost"),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_admin_cannot_update() {
    let app = make_test_app().await;
    let created = app.create(original()).await;

    let response = app
        .multipart(
            "PUT",
            &format!("/api/trainings/{}", created["id"]),
            "operator",
            MultipartBuilder::new().text("title", "Hijacked"),
        )
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn blank_title_keeps_and_padded_title_is_trimmed() {
    let app = make_test_app().await;
    let created = app.create(original()).await;
    let uri = format!("/api/trainings/{}", created["id"]);

    let response = app
        .multipart("PUT", &uri, "admin", MultipartBuilder::new().text("title", "   "))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["title"], "Fire drill");

    let response = app
        .multipart(
            "PUT",
            &uri,
            "admin",
            MultipartBuilder::new().text("title", "  Fire drill v2  "),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["title"], "Fire drill v2");
}

#[tokio::test]
async fn update_non_numeric_id_is_a_json_404() {
    let app = make_test_app().await;

    let response = app
        .multipart(
            "PUT",
            "/api/trainings/abc",
            "admin",
            MultipartBuilder::new().text("title", "Ghost"),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["success"], false);
}
