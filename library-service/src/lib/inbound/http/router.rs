use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::header::ACCEPT;
use axum::http::header::ACCEPT_LANGUAGE;
use axum::http::header::AUTHORIZATION;
use axum::http::header::CONTENT_TYPE;
use axum::http::HeaderValue;
use axum::http::Method;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::add_book::add_book;
use super::handlers::delete_book::delete_book;
use super::handlers::get_book::get_book;
use super::handlers::health::health;
use super::handlers::list_books::list_books;
use super::handlers::login::login;
use super::handlers::process_url::process_url;
use super::handlers::profile::profile;
use super::handlers::register::register;
use super::handlers::update_book::update_book;
use super::middleware::authenticate as auth_middleware;
use super::openapi::openapi_router;
use crate::domain::account::ports::AccountServicePort;
use crate::domain::book::ports::BookServicePort;
use crate::i18n::Catalog;

#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<dyn AccountServicePort>,
    pub book_service: Arc<dyn BookServicePort>,
    pub authenticator: Arc<Authenticator>,
    pub catalog: Arc<Catalog>,
}

pub fn create_router(state: AppState, allowed_origins: &[String]) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health))
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/urls/process", post(process_url));

    let protected_routes = Router::new()
        .route("/users/profile", get(profile))
        .route("/books", post(add_book).get(list_books))
        .route(
            "/books/:id",
            get(get_book).put(update_book).delete(delete_book),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Headers are left out of the span: Authorization carries bearer tokens.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .nest(
            "/api/v1",
            Router::new().merge(public_routes).merge(protected_routes),
        )
        .merge(openapi_router())
        .layer(trace_layer)
        .layer(cors_layer(allowed_origins))
        .with_state(state)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION, ACCEPT, ACCEPT_LANGUAGE])
        .allow_credentials(true)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::Extension;
    use chrono::Duration;
    use futures::future::join_all;
    use tower::ServiceExt;

    use super::*;
    use crate::domain::account::service::AccountService;
    use crate::domain::book::service::BookService;
    use crate::inbound::http::middleware::AuthenticatedAccount;
    use crate::outbound::repositories::InMemoryAccountRepository;
    use crate::outbound::repositories::InMemoryBookRepository;

    fn state() -> AppState {
        let authenticator = Arc::new(Authenticator::new(
            b"test-secret-key-for-jwt-signing-at-least-32-bytes",
            chrono::Duration::minutes(30),
        ));
        AppState {
            account_service: Arc::new(AccountService::new(
                Arc::new(InMemoryAccountRepository::new()),
                Arc::clone(&authenticator),
            )),
            book_service: Arc::new(BookService::new(Arc::new(InMemoryBookRepository::new()))),
            authenticator,
            catalog: Arc::new(Catalog::builtin().unwrap()),
        }
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_is_public() {
        let response = create_router(state(), &[])
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["code"], 200);
        assert_eq!(body["data"]["status"], "ok");
    }

    #[tokio::test]
    async fn test_protected_route_rejects_localized() {
        let response = create_router(state(), &[])
            .oneshot(
                Request::builder()
                    .uri("/api/v1/books?lang=id")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body["code"], 401);
        assert_eq!(body["message"], "Tidak memiliki otorisasi");
        assert!(body.get("data").is_none());
    }

    #[tokio::test]
    async fn test_concurrent_requests_see_their_own_identity() {
        let state = state();
        let authenticator = Arc::clone(&state.authenticator);

        let echo = Router::new()
            .route(
                "/whoami",
                get(|Extension(caller): Extension<AuthenticatedAccount>| async move {
                    caller.account_id.to_string()
                }),
            )
            .route_layer(middleware::from_fn_with_state(
                state.clone(),
                auth_middleware,
            ))
            .with_state(state);

        let requests = (0..32).map(|i| {
            let echo = echo.clone();
            let identity = format!("{:032x}", i);
            let token = authenticator
                .generate_token(&identity)
                .unwrap()
                .token;
            async move {
                let response = echo
                    .oneshot(
                        Request::builder()
                            .uri("/whoami")
                            .header(AUTHORIZATION, format!("Bearer {}", token))
                            .body(Body::empty())
                            .unwrap(),
                    )
                    .await
                    .unwrap();
                let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                    .await
                    .unwrap();
                (identity, String::from_utf8(bytes.to_vec()).unwrap())
            }
        });

        for (identity, echoed) in join_all(requests).await {
            assert_eq!(identity, echoed);
        }
    }

    #[tokio::test]
    async fn test_openapi_document_is_public() {
        let response = create_router(state(), &[])
            .oneshot(
                Request::builder()
                    .uri("/api-docs/openapi.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["servers"][0]["url"], "/api/v1");
        assert!(body["paths"]["/books/{id}"]["delete"].is_object());
        assert!(body["paths"]["/urls/process"]["post"].is_object());
        assert_eq!(
            body["components"]["securitySchemes"]["bearer_auth"]["scheme"],
            "bearer"
        );
    }

    #[tokio::test]
    async fn test_expired_token_is_unauthorized() {
        let state = state();
        let expired = auth::JwtHandler::new(b"test-secret-key-for-jwt-signing-at-least-32-bytes")
            .issue_at(
                "0123456789abcdef0123456789abcdef",
                Duration::minutes(30),
                chrono::Utc::now() - Duration::hours(1),
            )
            .unwrap();

        let response = create_router(state, &[])
            .oneshot(
                Request::builder()
                    .uri("/api/v1/users/profile")
                    .header(AUTHORIZATION, format!("Bearer {}", expired.token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
