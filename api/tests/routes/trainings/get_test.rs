use crate::helpers::{MultipartBuilder, TestApp, body_json, make_test_app};
use axum::http::StatusCode;

fn training(title: &str, section: &str, module: &str, roles: &str) -> MultipartBuilder {
    MultipartBuilder::new()
        .text("title", title)
        .text("section", section)
        .text("module", module)
        .text("roles", roles)
        .file("material.pdf", b"pdf")
}

async fn seed(app: &TestApp) {
    app.create(training("Fire drill", "Safety", "Basics", "operator"))
        .await;
    app.create(training("First aid", "Safety", "Basics", "supervisor"))
        .await;
    app.create(training("Pallet jack", "Warehouse", "Vehicles", "operator,supervisor"))
        .await;
}

#[tokio::test]
async fn admin_lists_everything_grouped() {
    let app = make_test_app().await;
    seed(&app).await;

    let response = app.get("/api/trainings", Some("admin")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = body_json(response).await["data"].clone();
    let basics = data["Safety"]["Basics"].as_array().unwrap();
    assert_eq!(basics.len(), 2);
    assert_eq!(basics[0]["title"], "Fire drill");
    assert_eq!(basics[1]["title"], "First aid");
    assert_eq!(data["Warehouse"]["Vehicles"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn role_only_sees_trainings_shared_with_it() {
    let app = make_test_app().await;
    seed(&app).await;

    let data = body_json(app.get("/api/trainings", Some("operator")).await).await["data"].clone();
    let basics = data["Safety"]["Basics"].as_array().unwrap();
    assert_eq!(basics.len(), 1);
    assert_eq!(basics[0]["title"], "Fire drill");
    assert_eq!(data["Warehouse"]["Vehicles"][0]["title"], "Pallet jack");

    let data = body_json(app.get("/api/trainings", Some("cleaner")).await).await["data"].clone();
    assert_eq!(data, serde_json::json!({}));
}

#[tokio::test]
async fn empty_submodule_is_null_in_list() {
    let app = make_test_app().await;
    app.create(training("Fire drill", "Safety", "Basics", "operator"))
        .await;
    app.create(
        training("Evacuation", "Safety", "Basics", "operator").text("submodule", "Routes"),
    )
    .await;

    let data = body_json(app.get("/api/trainings", Some("admin")).await).await["data"].clone();
    let basics = data["Safety"]["Basics"].as_array().unwrap();
    assert!(basics[0]["submodule"].is_null());
    assert_eq!(basics[1]["submodule"], "Routes");
}

#[tokio::test]
async fn listing_requires_a_token() {
    let app = make_test_app().await;

    let response = app.get("/api/trainings", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn get_single_training_by_role() {
    let app = make_test_app().await;
    let created = app
        .create(training("Fire drill", "Safety", "Basics", "operator"))
        .await;
    let uri = format!("/api/trainings/{}", created["id"]);

    let response = app.get(&uri, Some("operator")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["title"], "Fire drill");

    let response = app.get(&uri, Some("admin")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.get(&uri, Some("supervisor")).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["success"], false);
}

#[tokio::test]
async fn get_missing_training_is_404() {
    let app = make_test_app().await;

    let response = app.get("/api/trainings/999", Some("admin")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_numeric_id_is_a_json_404() {
    let app = make_test_app().await;

    let response = app.get("/api/trainings/abc", Some("admin")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Training material not found");
}
