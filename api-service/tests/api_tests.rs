mod common;

use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_health() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/health")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/register")
        .json(&json!({
            "username": "alice",
            "password": "Str0ngPW!",
            "firstname": "Alice",
            "lastname": "A"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["auth"], true);
    assert!(!body["token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_register_missing_fields() {
    let app = TestApp::spawn().await;

    for payload in [
        json!({ "password": "Str0ngPW!" }),
        json!({ "username": "alice" }),
        json!({ "username": "", "password": "Str0ngPW!" }),
    ] {
        let response = app
            .post("/api/auth/register")
            .json(&payload)
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body["error"], "Username and password are required");
    }
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let app = TestApp::spawn().await;
    app.register("alice", "Str0ngPW!").await;

    let response = app
        .post("/api/auth/register")
        .json(&json!({ "username": "alice", "password": "other" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "Error creating user");
}

#[tokio::test]
async fn test_register_then_login_resolves_same_user() {
    let app = TestApp::spawn().await;

    let register_token = app.register("alice", "Str0ngPW!").await;
    let registered_id = app
        .jwt_handler
        .verify(&register_token)
        .expect("Register token should verify")
        .sub;

    let response = app
        .post("/api/auth/login")
        .json(&json!({ "username": "alice", "password": "Str0ngPW!" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["auth"], true);
    assert_eq!(body["user"]["username"], "alice");
    assert_eq!(body["user"]["firstname"], "Test");
    assert_eq!(body["user"]["id"].to_string(), registered_id);
    assert!(body["user"].get("password_hash").is_none());

    let login_claims = app
        .jwt_handler
        .verify(body["token"].as_str().unwrap())
        .expect("Login token should verify");
    assert_eq!(login_claims.sub, registered_id);
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::spawn().await;
    app.register("alice", "Str0ngPW!").await;

    let response = app
        .post("/api/auth/login")
        .json(&json!({ "username": "alice", "password": "wrong" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "auth": false, "token": null }));
}

#[tokio::test]
async fn test_login_unknown_user() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/login")
        .json(&json!({ "username": "nobody", "password": "whatever" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "No user found.");
}

#[tokio::test]
async fn test_list_users_hides_password_hash() {
    let app = TestApp::spawn().await;
    let token = app.register("alice", "Str0ngPW!").await;
    app.register("bob", "An0therPW").await;

    let response = app
        .get_authenticated("/api/auth/users", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let users: Vec<serde_json::Value> = response.json().await.expect("Failed to parse response");
    assert_eq!(users.len(), 2);
    assert_eq!(users[0]["username"], "alice");
    assert_eq!(users[1]["username"], "bob");
    for user in &users {
        assert!(user.get("password_hash").is_none());
        assert!(user["created_at"].is_string());
    }

    let stored_hash: String =
        sqlx::query_scalar("SELECT password_hash FROM users WHERE username = 'alice'")
            .fetch_one(&app.pool)
            .await
            .unwrap();
    assert!(stored_hash.starts_with("$argon2id$"));
}

#[tokio::test]
async fn test_similar_usernames() {
    let app = TestApp::spawn().await;
    let token = app.register("john_doe", "pw").await;
    app.register("JohnDoe", "pw").await;
    app.register("alice", "pw").await;
    app.register("john.doe1", "pw").await;

    let response = app
        .get_authenticated("/api/auth/similar-usernames", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(
        body,
        json!({ "groups": [["john_doe", "JohnDoe", "john.doe1"]] })
    );

    let response = app
        .get_authenticated("/api/auth/similar-usernames?candidate=alicee", &token)
        .send()
        .await
        .expect("Failed to execute request");
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "groups": [["alice"]] }));

    let response = app
        .get_authenticated("/api/auth/similar-usernames?candidate=zed", &token)
        .send()
        .await
        .expect("Failed to execute request");
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "groups": [] }));
}

#[tokio::test]
async fn test_products_require_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/products")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "error": "No token provided" }));
}

#[tokio::test]
async fn test_invalid_token_rejected() {
    let app = TestApp::spawn().await;

    let response = app
        .get_authenticated("/api/products", "not-a-jwt")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "error": "Failed to authenticate token" }));
}

#[tokio::test]
async fn test_expired_token_rejected() {
    let app = TestApp::spawn().await;
    let token = app.register("alice", "Str0ngPW!").await;
    let user_id = app.jwt_handler.verify(&token).unwrap().sub;

    let issued_at = chrono::Utc::now().timestamp() - 2 * common::TEST_TOKEN_TTL_SECONDS;
    let expired = app.jwt_handler.issue_at(user_id, issued_at).unwrap();

    let response = app
        .get_authenticated("/api/products", &expired)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "Failed to authenticate token");
}

#[tokio::test]
async fn test_token_without_bearer_prefix_accepted() {
    let app = TestApp::spawn().await;
    let token = app.register("alice", "Str0ngPW!").await;

    let response = app
        .get("/api/products")
        .header("Authorization", token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_create_and_get_product() {
    let app = TestApp::spawn().await;
    let token = app.register("alice", "Str0ngPW!").await;

    let response = app
        .post_authenticated("/api/products", &token)
        .json(&json!({ "name": "Keyboard", "price": 49.99, "stock": 12 }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);
    let created: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(created["name"], "Keyboard");
    assert_eq!(created["price"], 49.99);
    assert_eq!(created["stock"], 12);

    let id = created["id"].as_i64().unwrap();
    let response = app
        .get_authenticated(&format!("/api/products/{}", id), &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "success");
    assert_eq!(body["data"], created);
}

#[tokio::test]
async fn test_create_product_invalid_input() {
    let app = TestApp::spawn().await;
    let token = app.register("alice", "Str0ngPW!").await;

    for payload in [
        json!({ "price": 1.0, "stock": 1 }),
        json!({ "name": "Mouse", "stock": 1 }),
        json!({ "name": "Mouse", "price": -1.0, "stock": 1 }),
        json!({ "name": "Mouse", "price": 1.0, "stock": -1 }),
    ] {
        let response = app
            .post_authenticated("/api/products", &token)
            .json(&payload)
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", payload);
    }
}

#[tokio::test]
async fn test_get_product_not_found() {
    let app = TestApp::spawn().await;
    let token = app.register("alice", "Str0ngPW!").await;

    let response = app
        .get_authenticated("/api/products/999", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "error": "Product not found" }));

    let response = app
        .get_authenticated("/api/products/abc", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_products_with_meta() {
    let app = TestApp::spawn().await;
    let token = app.register("alice", "Str0ngPW!").await;

    let response = app
        .get_authenticated("/api/products", &token)
        .send()
        .await
        .expect("Failed to execute request");
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(
        body,
        json!({ "message": "success", "data": [], "meta": { "count": 0, "average_price": null } })
    );

    app.create_product(&token, "Cable", 10.0, 3).await;
    app.create_product(&token, "Charger", 25.5, 1).await;

    let response = app
        .get_authenticated("/api/products", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"][0]["name"], "Cable");
    assert_eq!(body["meta"]["count"], 2);
    assert_eq!(body["meta"]["average_price"], 17.75);
}

#[tokio::test]
async fn test_update_stock() {
    let app = TestApp::spawn().await;
    let token = app.register("alice", "Str0ngPW!").await;
    let id = app.create_product(&token, "Cable", 10.0, 3).await;

    let response = app
        .patch_authenticated(&format!("/api/products/{}/stock", id), &token)
        .json(&json!({ "stock": 42 }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "success": true }));

    let response = app
        .get_authenticated(&format!("/api/products/{}", id), &token)
        .send()
        .await
        .expect("Failed to execute request");
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["stock"], 42);

    let response = app
        .patch_authenticated(&format!("/api/products/{}/stock", id), &token)
        .json(&json!({ "stock": -5 }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_stock_unknown_product() {
    let app = TestApp::spawn().await;
    let token = app.register("alice", "Str0ngPW!").await;

    let response = app
        .patch_authenticated("/api/products/999/stock", &token)
        .json(&json!({ "stock": 5 }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "error": "Product not found" }));
}

#[tokio::test]
async fn test_seeded_admin_can_log_in() {
    let app = TestApp::spawn_seeded().await;

    let response = app
        .post("/api/auth/login")
        .json(&json!({ "username": "admin", "password": "admin123" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["user"]["firstname"], "Admin");
    assert_eq!(body["user"]["lastname"], "User");

    let token = body["token"].as_str().unwrap();
    let response = app
        .get_authenticated("/api/products", token)
        .send()
        .await
        .expect("Failed to execute request");
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["meta"]["count"], 3);
    assert_eq!(body["data"][0]["name"], "Laptop");
    assert_eq!(body["data"][0]["price"], 999.99);
    assert_eq!(body["meta"]["average_price"], 526.66);
}

#[tokio::test]
async fn test_malformed_bodies_are_json_bad_requests() {
    let app = TestApp::spawn().await;
    let token = app.register("alice", "Str0ngPW!").await;
    let id = app.create_product(&token, "Cable", 10.0, 3).await;

    let requests = [
        app.patch_authenticated(&format!("/api/products/{}/stock", id), &token)
            .json(&json!({ "stock": "five" })),
        app.post_authenticated("/api/products", &token)
            .json(&json!({ "name": "Mouse", "price": "cheap", "stock": 1 })),
        app.post("/api/auth/register")
            .body(r#"{"username":"bob","password":"pw"}"#),
        app.post("/api/auth/login")
            .header("Content-Type", "application/json")
            .body("{not json"),
    ];

    for request in requests {
        let response = request.send().await.expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json().await.expect("Error body should be JSON");
        assert!(body["error"]
            .as_str()
            .unwrap()
            .starts_with("Invalid request body"));
    }
}

async fn assert_server_error(response: reqwest::Response, message: &str) {
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "error": message }));
}

#[tokio::test]
async fn test_user_storage_failures() {
    let app = TestApp::spawn().await;
    let token = app.token_for(1);
    app.drop_table("users").await;

    let response = app
        .get_authenticated("/api/auth/users", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_server_error(response, "Error getting users").await;

    let response = app
        .get_authenticated("/api/auth/similar-usernames", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_server_error(response, "Error finding similar usernames").await;

    let response = app
        .post("/api/auth/login")
        .json(&json!({ "username": "alice", "password": "Str0ngPW!" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_server_error(response, "Error on the server.").await;

    let response = app
        .post("/api/auth/register")
        .json(&json!({ "username": "alice", "password": "Str0ngPW!" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_server_error(response, "Error creating user").await;
}

#[tokio::test]
async fn test_product_storage_failures() {
    let app = TestApp::spawn().await;
    let token = app.token_for(1);
    app.drop_table("products").await;

    let response = app
        .get_authenticated("/api/products", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_server_error(response, "Error getting products").await;

    let response = app
        .get_authenticated("/api/products/1", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_server_error(response, "Error getting product").await;

    let response = app
        .post_authenticated("/api/products", &token)
        .json(&json!({ "name": "Mouse", "price": 5.0, "stock": 1 }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_server_error(response, "Error creating product").await;

    let response = app
        .patch_authenticated("/api/products/1/stock", &token)
        .json(&json!({ "stock": 5 }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_server_error(response, "Failed to update stock").await;
}
