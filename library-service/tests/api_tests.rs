mod common;

use chrono::Duration;
use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;
use serde_json::Value;

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/v1/auth/register")
        .json(&json!({
            "subscriberId": "628123456789",
            "name": "Dewi",
            "handle": "dewi",
            "secret": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["code"], 201);
    assert_eq!(body["message"], "Account registered successfully");
    assert!(body.get("data").is_none());
    assert_eq!(app.accounts.len().await, 1);
}

#[tokio::test]
async fn test_register_invalid_subscriber_id_writes_nothing() {
    let app = TestApp::spawn().await;

    for subscriber_id in ["62812345678", "0812345678901", "62812345678a", "081234567890"] {
        let status = app.register(subscriber_id, "dewi", "pass_word!").await;
        assert_eq!(status, 400, "subscriber id {}", subscriber_id);
    }

    assert!(app.accounts.is_empty().await);
}

#[tokio::test]
async fn test_register_missing_fields() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/v1/auth/register")
        .json(&json!({ "subscriberId": "628123456789" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Invalid input");
    assert!(app.accounts.is_empty().await);
}

#[tokio::test]
async fn test_register_malformed_json() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/v1/auth/register")
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_duplicate_handle() {
    let app = TestApp::spawn().await;

    assert_eq!(app.register("628123456789", "dewi", "pass_word!").await, 201);

    let response = app
        .post("/api/v1/auth/register")
        .json(&json!({
            "subscriberId": "628987654321",
            "name": "Another Dewi",
            "handle": "dewi",
            "secret": "different"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Subscriber id or handle is already registered");
    assert_eq!(app.accounts.len().await, 1);
}

#[tokio::test]
async fn test_register_duplicate_subscriber_id() {
    let app = TestApp::spawn().await;

    assert_eq!(app.register("628123456789", "dewi", "pass_word!").await, 201);
    assert_eq!(app.register("628123456789", "sari", "pass_word!").await, 400);
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::spawn().await;
    app.register("628123456789", "dewi", "pass_word!").await;

    let response = app
        .post("/api/v1/auth/login")
        .json(&json!({ "subscriberId": "628123456789", "secret": "pass_word!" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["code"], 200);
    assert!(body["data"]["expiresAt"].is_string());

    let token = body["data"]["token"].as_str().unwrap();
    let verified = app.jwt_handler.verify(token).expect("Token should verify");
    assert_eq!(verified.identity.len(), 32);
    assert!(verified.expires_at <= chrono::Utc::now() + Duration::minutes(30));
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::spawn().await;
    app.register("628123456789", "dewi", "pass_word!").await;

    let wrong_secret = app
        .post("/api/v1/auth/login")
        .json(&json!({ "subscriberId": "628123456789", "secret": "wrong" }))
        .send()
        .await
        .expect("Failed to execute request");
    let unknown_subscriber = app
        .post("/api/v1/auth/login")
        .json(&json!({ "subscriberId": "628000000000", "secret": "pass_word!" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(wrong_secret.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_subscriber.status(), StatusCode::UNAUTHORIZED);

    let wrong_secret: Value = wrong_secret.json().await.unwrap();
    let unknown_subscriber: Value = unknown_subscriber.json().await.unwrap();
    assert_eq!(wrong_secret, unknown_subscriber);
}

#[tokio::test]
async fn test_profile_requires_token() {
    let app = TestApp::spawn().await;

    let missing = app
        .get("/api/v1/users/profile")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);

    let garbage = app
        .get_authenticated("/api/v1/users/profile", "invalid.token.here")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(garbage.status(), StatusCode::UNAUTHORIZED);

    let body: Value = garbage.json().await.unwrap();
    assert_eq!(body["message"], "Unauthorized");
}

#[tokio::test]
async fn test_profile_success() {
    let app = TestApp::spawn().await;
    let token = app.authenticated_token().await;

    let response = app
        .get_authenticated("/api/v1/users/profile", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["subscriberId"], "628123456789");
    assert_eq!(body["data"]["handle"], "reader");
    assert_eq!(body["data"]["name"], "Test Reader");
    assert!(body["data"].get("passwordDigest").is_none());
}

#[tokio::test]
async fn test_profile_unknown_identity() {
    let app = TestApp::spawn().await;

    // Validly signed, but no account behind it.
    let issued = app
        .jwt_handler
        .issue("ffffffffffffffffffffffffffffffff", Duration::minutes(5))
        .unwrap();

    let response = app
        .get_authenticated("/api/v1/users/profile", &issued.token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_books_crud() {
    let app = TestApp::spawn().await;
    let token = app.authenticated_token().await;

    let empty = app
        .get_authenticated("/api/v1/books", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(empty.status(), StatusCode::NOT_FOUND);

    let created = app
        .post_authenticated("/api/v1/books", &token)
        .json(&json!({
            "title": "Laut Bercerita",
            "author": "Leila S. Chudori",
            "year": 2017,
            "genre": "Fiction",
            "coverImageUrl": "https://covers.example.com/laut.jpg"
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(created.status(), StatusCode::CREATED);

    let listed: Value = app
        .get_authenticated("/api/v1/books", &token)
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .unwrap();
    let books = listed["data"].as_array().unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["title"], "Laut Bercerita");
    assert_eq!(books[0]["coverImageUrl"], "https://covers.example.com/laut.jpg");
    let id = books[0]["id"].as_str().unwrap().to_string();

    let updated = app
        .put_authenticated(&format!("/api/v1/books/{}", id), &token)
        .json(&json!({
            "title": "Laut Bercerita",
            "author": "Leila S. Chudori",
            "year": 2018
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(updated.status(), StatusCode::OK);

    let fetched: Value = app
        .get_authenticated(&format!("/api/v1/books/{}", id), &token)
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .unwrap();
    assert_eq!(fetched["data"]["year"], 2018);
    assert!(fetched["data"].get("genre").is_none());

    let deleted = app
        .delete_authenticated(&format!("/api/v1/books/{}", id), &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(deleted.status(), StatusCode::OK);

    let gone = app
        .get_authenticated(&format!("/api/v1/books/{}", id), &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_books_invalid_input() {
    let app = TestApp::spawn().await;
    let token = app.authenticated_token().await;

    let missing_author = app
        .post_authenticated("/api/v1/books", &token)
        .json(&json!({ "title": "Untitled", "year": 2001 }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(missing_author.status(), StatusCode::BAD_REQUEST);

    let bad_year = app
        .post_authenticated("/api/v1/books", &token)
        .json(&json!({ "title": "Old", "author": "Someone", "year": 999 }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(bad_year.status(), StatusCode::BAD_REQUEST);

    let bad_id = app
        .get_authenticated("/api/v1/books/not-a-uuid", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(bad_id.status(), StatusCode::BAD_REQUEST);

    let unknown = app
        .delete_authenticated(
            "/api/v1/books/00000000-0000-4000-8000-000000000000",
            &token,
        )
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_process_url() {
    let app = TestApp::spawn().await;

    let cases = [
        (
            "http://Example.com/Path/?q=1#frag",
            "canonical",
            "http://Example.com/Path",
        ),
        (
            "http://example.com/Path/",
            "redirection",
            "https://www.byfood.com/path",
        ),
        (
            "https://BYFOOD.com/Food-Experiences/?ref=1",
            "ALL",
            "https://www.byfood.com/food-experiences",
        ),
    ];

    for (url, operation, expected) in cases {
        let response = app
            .post("/api/v1/urls/process")
            .json(&json!({ "url": url, "operation": operation }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["data"]["processedUrl"], expected);
    }
}

#[tokio::test]
async fn test_process_url_rejections() {
    let app = TestApp::spawn().await;

    let unknown_operation = app
        .post("/api/v1/urls/process")
        .json(&json!({ "url": "http://example.com", "operation": "foo" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(unknown_operation.status(), StatusCode::BAD_REQUEST);
    let body: Value = unknown_operation.json().await.unwrap();
    assert_eq!(body["message"], "Invalid operation type");

    let bad_host = app
        .post("/api/v1/urls/process")
        .json(&json!({ "url": "http://exa mple.com/", "operation": "canonical" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(bad_host.status(), StatusCode::BAD_REQUEST);
    let body: Value = bad_host.json().await.unwrap();
    assert_eq!(body["message"], "Invalid input");
}

#[tokio::test]
async fn test_process_relative_url() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/v1/urls/process")
        .json(&json!({ "url": "/Food/Tokyo/?q=ramen shops", "operation": "redirection" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["processedUrl"], "https://www.byfood.com/food/tokyo");
}

#[tokio::test]
async fn test_messages_follow_requested_language() {
    let app = TestApp::spawn().await;
    let token = app.authenticated_token().await;

    let by_header: Value = app
        .get_authenticated("/api/v1/books", &token)
        .header("Accept-Language", "id-ID,id;q=0.9,en;q=0.8")
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .unwrap();
    assert_eq!(by_header["message"], "Buku tidak ditemukan");

    let by_query: Value = app
        .get_authenticated("/api/v1/books?lang=en", &token)
        .header("Accept-Language", "id")
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .unwrap();
    assert_eq!(by_query["message"], "Book not found");
}

#[tokio::test]
async fn test_concurrent_registrations_same_handle() {
    let app = TestApp::spawn().await;

    let attempts = (0..8).map(|i| {
        let subscriber_id = format!("6281234567{:02}", i);
        let app = &app;
        async move { app.register(&subscriber_id, "contested", "pass_word!").await }
    });

    let statuses = futures::future::join_all(attempts).await;

    assert_eq!(statuses.iter().filter(|s| **s == 201).count(), 1);
    assert!(statuses.iter().all(|s| *s == 201 || *s == 400));
    assert_eq!(app.accounts.len().await, 1);
}
