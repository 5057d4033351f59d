use axum::http::StatusCode;
use serde_json::{json, Value};

mod common;

use common::fixtures::{property_form, update_body};
use common::{png, spawn_app, MEDIA_BASE_URL};

fn uploaded_files(app: &common::TestApp) -> usize {
    std::fs::read_dir(app.uploads.path())
        .map(|entries| entries.count())
        .unwrap_or(0)
}

#[tokio::test]
async fn create_stores_images_and_coerces_form_values() {
    let app = spawn_app().await;
    let token = app.token().await;

    let response = app
        .server
        .post("/api/property")
        .authorization_bearer(&token)
        .multipart(property_form(&[], 2))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();

    assert_eq!(body["price"], json!(250000.0));
    assert_eq!(body["bedrooms"], json!(3));
    assert_eq!(body["area"], json!(180.5));
    assert_eq!(body["propertyType"], json!("HOUSE"));
    assert_eq!(body["status"], json!("AVAILABLE"));
    assert!(body["deletedAt"].is_null());

    let images = body["images"].as_array().expect("images array");
    assert_eq!(images.len(), 2);
    assert_eq!(uploaded_files(&app), 2);

    // stored media is served back under /uploads
    let reference = images[0].as_str().unwrap();
    assert!(reference.starts_with(MEDIA_BASE_URL));
    let path = reference.trim_start_matches("http://localhost:8080");
    app.server.get(path).await.assert_status_ok();
}

#[tokio::test]
async fn create_accepts_bracketed_image_field() {
    let app = spawn_app().await;
    let token = app.token().await;

    let form = property_form(&[], 0).add_part("images[]", png("front.png"));
    let response = app
        .server
        .post("/api/property")
        .authorization_bearer(&token)
        .multipart(form)
        .await;

    response.assert_status(StatusCode::CREATED);
    assert_eq!(response.json::<Value>()["images"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn create_without_images_persists_nothing() {
    let app = spawn_app().await;
    let token = app.token().await;

    let response = app
        .server
        .post("/api/property")
        .authorization_bearer(&token)
        .multipart(property_form(&[], 0))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], json!("Validation failed"));
    assert_eq!(body["fields"]["images"], json!(["At least one image is required"]));

    assert!(app.store.properties().is_empty());
    assert_eq!(uploaded_files(&app), 0);
}

#[tokio::test]
async fn create_rejects_more_than_five_images() {
    let app = spawn_app().await;
    let token = app.token().await;

    let response = app
        .server
        .post("/api/property")
        .authorization_bearer(&token)
        .multipart(property_form(&[], 6))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.json::<Value>()["fields"]["images"].is_array());
    assert_eq!(uploaded_files(&app), 0);
}

#[tokio::test]
async fn create_rejects_non_image_uploads_before_storing_any() {
    let app = spawn_app().await;
    let token = app.token().await;

    let notes = axum_test::multipart::Part::bytes(b"plain text".to_vec())
        .file_name("notes.txt")
        .mime_type("text/plain");
    let form = property_form(&[], 1).add_part("images", notes);

    let response = app
        .server
        .post("/api/property")
        .authorization_bearer(&token)
        .multipart(form)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["fields"]["images"],
        json!(["notes.txt is not an image"])
    );
    assert_eq!(uploaded_files(&app), 0);
}

#[tokio::test]
async fn create_reports_every_invalid_field() {
    let app = spawn_app().await;
    let token = app.token().await;

    let response = app
        .server
        .post("/api/property")
        .authorization_bearer(&token)
        .multipart(property_form(
            &[("price", "cheap"), ("bedrooms", "-2"), ("propertyType", "CASTLE"), ("city", "")],
            1,
        ))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let fields = response.json::<Value>()["fields"].clone();
    assert_eq!(fields["price"], json!(["price must be a number"]));
    assert_eq!(fields["bedrooms"], json!(["bedrooms must be zero or more"]));
    assert_eq!(fields["city"], json!(["city is required"]));
    assert!(fields["propertyType"].is_array());
    assert!(app.store.properties().is_empty());
}

#[tokio::test]
async fn writes_require_a_bearer_token() {
    let app = spawn_app().await;

    app.server
        .post("/api/property")
        .multipart(property_form(&[], 1))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    app.server
        .put("/api/property/1")
        .json(&update_body(10.0))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    let response = app
        .server
        .delete("/api/property/1")
        .authorization_bearer("not-a-jwt")
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.json::<Value>()["error"],
        json!("Invalid token: Invalid or expired token")
    );
}

#[tokio::test]
async fn get_returns_active_listing_or_404() {
    let app = spawn_app().await;
    let token = app.token().await;
    let id = app.create_listing(&token, &[]).await;

    let response = app.server.get(&format!("/api/property/{id}")).await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["id"], json!(id));

    let missing = app.server.get("/api/property/999").await;
    missing.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(missing.json::<Value>()["error"], json!("Property not found"));

    app.server
        .get("/api/property/not-a-number")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_replaces_fields_and_keeps_images() {
    let app = spawn_app().await;
    let token = app.token().await;
    let id = app.create_listing(&token, &[]).await;
    let before = app.store.properties()[0].images.clone();

    let response = app
        .server
        .put(&format!("/api/property/{id}"))
        .authorization_bearer(&token)
        .json(&update_body(1200.0))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["price"], json!(1200.0));
    assert_eq!(body["purchase"], json!("RENT"));
    assert_eq!(body["bathrooms"], json!(1));
    assert_eq!(body["status"], json!("RENTED"));
    assert_eq!(body["images"], json!(before));
}

#[tokio::test]
async fn update_validates_like_creation() {
    let app = spawn_app().await;
    let token = app.token().await;
    let id = app.create_listing(&token, &[]).await;

    let mut body = update_body(-5.0);
    body["images"] = json!([]);

    let response = app
        .server
        .put(&format!("/api/property/{id}"))
        .authorization_bearer(&token)
        .json(&body)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let fields = response.json::<Value>()["fields"].clone();
    assert_eq!(fields["price"], json!(["price must be zero or more"]));
    assert!(fields["images"].is_array());

    let malformed = app
        .server
        .put(&format!("/api/property/{id}"))
        .authorization_bearer(&token)
        .content_type("application/json")
        .bytes("{\"price\": ".into())
        .await;
    malformed.assert_status(StatusCode::BAD_REQUEST);

    app.server
        .put("/api/property/4242")
        .authorization_bearer(&token)
        .json(&update_body(10.0))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    // existence is checked before the body
    app.server
        .put("/api/property/4242")
        .authorization_bearer(&token)
        .json(&update_body(-5.0))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_is_soft_and_hides_the_listing() {
    let app = spawn_app().await;
    let token = app.token().await;
    let id = app.create_listing(&token, &[]).await;
    app.create_listing(&token, &[("city", "Hawassa")]).await;

    let response = app
        .server
        .delete(&format!("/api/property/{id}"))
        .authorization_bearer(&token)
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({ "message": "Deleted successfully" }));

    // the row survives with a deletion timestamp
    let stored = app.store.properties();
    assert_eq!(stored.len(), 2);
    assert!(stored.iter().any(|p| p.id == id && p.deleted_at.is_some()));

    app.server
        .get(&format!("/api/property/{id}"))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    app.server
        .delete(&format!("/api/property/{id}"))
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let list: Value = app.server.get("/api/properties").await.json();
    assert_eq!(list["totalItems"], json!(1));

    let search: Value = app
        .server
        .get("/api/properties/search")
        .add_query_param("city", "addis")
        .await
        .json();
    assert_eq!(search["pagination"]["total"], json!(0));
}

#[tokio::test]
async fn list_paginates_active_listings() {
    let app = spawn_app().await;
    let token = app.token().await;
    for _ in 0..3 {
        app.create_listing(&token, &[]).await;
    }

    let response = app
        .server
        .get("/api/properties")
        .add_query_param("page", "2")
        .add_query_param("limit", "2")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["page"], json!(2));
    assert_eq!(body["limit"], json!(2));
    assert_eq!(body["totalItems"], json!(3));
    assert_eq!(body["totalPages"], json!(2));
    assert_eq!(body["properties"].as_array().unwrap().len(), 1);

    let defaults: Value = app.server.get("/api/properties").await.json();
    assert_eq!(defaults["page"], json!(1));
    assert_eq!(defaults["limit"], json!(10));
}

#[tokio::test]
async fn list_rejects_out_of_range_paging() {
    let app = spawn_app().await;

    for (key, value) in [
        ("limit", "0"),
        ("limit", "101"),
        ("page", "0"),
        ("page", "x"),
        ("page", "9223372036854775807"),
    ] {
        let response = app.server.get("/api/properties").add_query_param(key, value).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(
            response.json::<Value>()["fields"][key].is_array(),
            "{key}={value} should be a field error"
        );
    }
}
