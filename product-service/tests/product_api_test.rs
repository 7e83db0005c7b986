//! End-to-end CRUD tests against a real MongoDB instance.
//!
//! Run with `cargo test -- --ignored` with MongoDB available at
//! `TEST_MONGODB_URI` (default `mongodb://localhost:27017`).

mod common;

use common::TestApp;
use reqwest::Client;
use serde_json::{json, Value};

#[tokio::test]
#[ignore] // Requires MongoDB
async fn crud_round_trip_works() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    // Create
    let response = client
        .post(&format!("{}/api/v1/product/new", app.address))
        .json(&json!({"name": "Pen", "description": "Blue ink pen", "price": 1.5}))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["success"], true);
    assert_eq!(body["product"]["name"], "Pen");
    assert_eq!(body["product"]["description"], "Blue ink pen");
    assert_eq!(body["product"]["price"], 1.5);
    let id = body["product"]["_id"].as_str().expect("id should be a string").to_string();

    // Partial update leaves the other fields untouched
    let response = client
        .put(&format!("{}/api/v1/product/{}", app.address, id))
        .json(&json!({"price": 2}))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["product"]["name"], "Pen");
    assert_eq!(body["product"]["description"], "Blue ink pen");
    assert_eq!(body["product"]["price"], 2.0);

    // Delete
    let response = client
        .delete(&format!("{}/api/v1/product/{}", app.address, id))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["message"], "Product is successfully deleted");

    // Gone from the listing
    let response = client
        .get(&format!("{}/api/v1/product", app.address))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["products"].as_array().unwrap().len(), 0);

    app.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires MongoDB
async fn create_with_missing_fields_persists_nothing() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let response = client
        .post(&format!("{}/api/v1/product/new", app.address))
        .json(&json!({"name": "Pen"}))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Name, description, and price are required");

    let response = client
        .get(&format!("{}/api/v1/product", app.address))
        .send()
        .await
        .expect("Failed to execute request");
    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["products"].as_array().unwrap().len(), 0);

    app.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires MongoDB
async fn listing_returns_every_created_product() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    for name in ["Pen", "Pencil", "Eraser"] {
        let response = client
            .post(&format!("{}/api/v1/product/new", app.address))
            .json(&json!({"name": name, "description": "stationery", "price": 1.0}))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), 201);
    }

    let response = client
        .get(&format!("{}/api/v1/product", app.address))
        .send()
        .await
        .expect("Failed to execute request");
    let body: Value = response.json().await.expect("Failed to parse JSON");
    let names: Vec<String> = body["products"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names.len(), 3);
    for name in ["Pen", "Pencil", "Eraser"] {
        assert!(names.iter().any(|n| n == name));
    }

    app.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires MongoDB
async fn form_encoded_create_works() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let response = client
        .post(&format!("{}/api/v1/product/new", app.address))
        .form(&[
            ("name", "Pen"),
            ("description", "Blue ink pen"),
            ("price", "1.5"),
        ])
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["product"]["name"], "Pen");
    assert_eq!(body["product"]["price"], 1.5);

    app.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires MongoDB
async fn unknown_and_malformed_ids_map_to_404_and_500() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let response = client
        .put(&format!(
            "{}/api/v1/product/64a51152209bba6c04cb1ab1",
            app.address
        ))
        .json(&json!({"price": 2}))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), 404);

    let response = client
        .delete(&format!("{}/api/v1/product/not-an-id", app.address))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), 500);
    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["message"], "Failed to delete product");
    assert!(body["error"].as_str().is_some());

    app.cleanup().await;
}
