//! OpenAPI documentation

use axum::Router;
use utoipa::openapi::security::HttpAuthScheme;
use utoipa::openapi::security::HttpBuilder;
use utoipa::openapi::security::SecurityScheme;
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa::ToSchema;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers;
use super::handlers::health::HealthResponseData;
use super::handlers::login::LoginRequestBody;
use super::handlers::login::LoginResponseData;
use super::handlers::process_url::ProcessUrlRequestBody;
use super::handlers::process_url::ProcessUrlResponseData;
use super::handlers::profile::ProfileResponseData;
use super::handlers::register::RegisterRequestBody;
use super::handlers::BookData;
use super::handlers::BookRequestBody;

/// Where the generated document is served.
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

/// Where the interactive documentation is served.
pub const SWAGGER_UI_PATH: &str = "/swagger-ui";

/// Envelope schemas as they appear on the wire, one per payload type.
macro_rules! envelope {
    ($name:ident, $data:ty, $doc:literal) => {
        #[doc = $doc]
        #[derive(ToSchema)]
        #[allow(dead_code)]
        pub struct $name {
            /// Same as the HTTP status
            code: u16,
            /// Localized message
            message: String,
            data: $data,
        }
    };
}

/// Envelope without `data`: every error and the data-less successes.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct MessageEnvelope {
    /// Same as the HTTP status
    code: u16,
    /// Localized message
    message: String,
}

envelope!(HealthEnvelope, HealthResponseData, "Health check response");
envelope!(LoginEnvelope, LoginResponseData, "Issued bearer token");
envelope!(ProfileEnvelope, ProfileResponseData, "Caller profile");
envelope!(BookEnvelope, BookData, "A single book");
envelope!(BookListEnvelope, Vec<BookData>, "Every book in the catalogue");
envelope!(ProcessUrlEnvelope, ProcessUrlResponseData, "Normalized url");

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Library Books API",
        description = "Library books, subscriber accounts and url normalization"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        handlers::health::health,
        // Auth
        handlers::register::register,
        handlers::login::login,
        handlers::profile::profile,
        // Books
        handlers::add_book::add_book,
        handlers::list_books::list_books,
        handlers::get_book::get_book,
        handlers::update_book::update_book,
        handlers::delete_book::delete_book,
        // Urls
        handlers::process_url::process_url,
    ),
    components(
        schemas(
            RegisterRequestBody,
            LoginRequestBody,
            LoginResponseData,
            ProfileResponseData,
            BookRequestBody,
            BookData,
            ProcessUrlRequestBody,
            ProcessUrlResponseData,
            HealthResponseData,
            MessageEnvelope,
            HealthEnvelope,
            LoginEnvelope,
            ProfileEnvelope,
            BookEnvelope,
            BookListEnvelope,
            ProcessUrlEnvelope,
        )
    ),
    modifiers(&BearerSecurity),
    tags(
        (name = "health", description = "Health check"),
        (name = "auth", description = "Registration, login and profile"),
        (name = "books", description = "Book catalogue"),
        (name = "urls", description = "Url normalization")
    )
)]
pub struct ApiDoc;

/// Registers the `bearer_auth` scheme referenced by protected paths.
struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Swagger UI plus the raw document, for merging into the service router.
pub fn openapi_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().merge(SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_JSON_PATH, ApiDoc::openapi()))
}
