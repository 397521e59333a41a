//! API integration tests
//!
//! These run against a live server with a seeded database.

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Helper to get an authenticated token for the seed admin
async fn get_auth_token(client: &Client) -> String {
    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": "DI-ADMIN",
            "password": "admi1234"
        }))
        .send()
        .await
        .expect("Failed to send login request");

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["token"].as_str().expect("No token in response").to_string()
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_login() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": "DI-ADMIN",
            "password": "admi1234"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["token"].is_string());
    assert_eq!(body["token_type"], "Bearer");
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": "DI-ADMIN",
            "password": "wrong"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_get_current_user() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .get(format!("{}/auth/me", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["username"], "DI-ADMIN");
}

#[tokio::test]
#[ignore]
async fn test_list_departments_seeded() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .get(format!("{}/departments", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let departments = body.as_array().expect("Expected an array");
    assert!(departments
        .iter()
        .any(|d| d["name"] == "Dirección de Informática"));
}

#[tokio::test]
#[ignore]
async fn test_equipment_crud_and_state_sync() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    // Create equipment
    let response = client
        .post(format!("{}/equipment", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "internal_code": "TEST-SYNC-001",
            "description": "Integration test workstation"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    let equipment_id = body["id"].as_i64().expect("No equipment ID");
    assert_eq!(body["state"], "optimal");

    // Record a maintenance event that degrades it
    let response = client
        .post(format!("{}/maintenance", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "equipment_id": equipment_id,
            "description": "Disk failure detected",
            "resulting_state": "defective"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);

    // The equipment's state must follow the event
    let response = client
        .get(format!("{}/equipment/{}", BASE_URL, equipment_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["state"], "defective");

    // Cleanup (removes the maintenance history too)
    let response = client
        .delete(format!("{}/equipment/{}", BASE_URL, equipment_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 204);
}

#[tokio::test]
#[ignore]
async fn test_maintenance_for_missing_equipment() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .post(format!("{}/maintenance", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "equipment_id": 999999,
            "description": "Ghost service",
            "resulting_state": "optimal"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_get_analytics() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .get(format!("{}/analytics", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["states"]["optimal"].is_number());
    assert!(body["states"]["defective"].is_number());
    assert!(body["states"]["inoperative"].is_number());
    assert!(body["trajectories"]["improved"].is_number());
    assert!(body["trajectories"]["unchanged"].is_number());
    assert!(body["trajectories"]["worsened"].is_number());
    assert!(body["departments"].is_array());
}

#[tokio::test]
#[ignore]
async fn test_list_audit() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .get(format!("{}/audit?limit=10", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let entries = body.as_array().expect("Expected an array");
    assert!(entries.len() <= 10);
}

#[tokio::test]
#[ignore]
async fn test_unauthorized_access() {
    let client = Client::new();

    let response = client
        .get(format!("{}/equipment", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}
