use std::sync::Arc;

use auth::Authenticator;
use auth::JwtHandler;
use chrono::Duration;
use library_service::domain::account::service::AccountService;
use library_service::domain::book::service::BookService;
use library_service::i18n::Catalog;
use library_service::inbound::http::router::create_router;
use library_service::inbound::http::router::AppState;
use library_service::outbound::repositories::InMemoryAccountRepository;
use library_service::outbound::repositories::InMemoryBookRepository;
use serde_json::json;
use serde_json::Value;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server over in-memory stores
pub struct TestApp {
    pub address: String,
    pub accounts: InMemoryAccountRepository,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let accounts = InMemoryAccountRepository::new();
        let books = InMemoryBookRepository::new();

        let authenticator = Arc::new(Authenticator::new(JWT_SECRET, Duration::minutes(30)));

        let state = AppState {
            account_service: Arc::new(AccountService::new(
                Arc::new(accounts.clone()),
                Arc::clone(&authenticator),
            )),
            book_service: Arc::new(BookService::new(Arc::new(books))),
            authenticator,
            catalog: Arc::new(Catalog::builtin().expect("Failed to load catalogues")),
        };

        let router = create_router(state, &[]);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            accounts,
            api_client: reqwest::Client::new(),
            jwt_handler: JwtHandler::new(JWT_SECRET),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .put(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Register an account and return the response status
    pub async fn register(&self, subscriber_id: &str, handle: &str, secret: &str) -> u16 {
        self.post("/api/v1/auth/register")
            .json(&json!({
                "subscriberId": subscriber_id,
                "name": "Test Reader",
                "handle": handle,
                "secret": secret
            }))
            .send()
            .await
            .expect("Failed to execute request")
            .status()
            .as_u16()
    }

    /// Log in and return the bearer token
    pub async fn login(&self, subscriber_id: &str, secret: &str) -> String {
        let body: Value = self
            .post("/api/v1/auth/login")
            .json(&json!({ "subscriberId": subscriber_id, "secret": secret }))
            .send()
            .await
            .expect("Failed to execute request")
            .json()
            .await
            .expect("Failed to parse response");

        body["data"]["token"]
            .as_str()
            .expect("Login response has no token")
            .to_string()
    }

    /// Register a fresh account and return a token for it
    pub async fn authenticated_token(&self) -> String {
        self.register("628123456789", "reader", "pass_word!").await;
        self.login("628123456789", "pass_word!").await
    }
}
