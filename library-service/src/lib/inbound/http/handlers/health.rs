use axum::http::StatusCode;
use axum::response::Response;
use serde::Serialize;
use utoipa::ToSchema;

use super::ApiSuccess;
use crate::i18n::MessageKey;
use crate::inbound::http::locale::Locale;
use crate::inbound::http::openapi::HealthEnvelope;

#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthEnvelope)
    )
)]
pub async fn health(locale: Locale) -> Response {
    locale.respond(Ok(ApiSuccess::new(
        StatusCode::OK,
        MessageKey::SuccessHealth,
        HealthResponseData {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
        },
    )))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct HealthResponseData {
    #[schema(value_type = String, example = "ok")]
    pub status: &'static str,
    #[schema(value_type = String)]
    pub version: &'static str,
}
