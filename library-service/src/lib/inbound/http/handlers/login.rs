use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use utoipa::ToSchema;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::models::LoginCommand;
use crate::i18n::MessageKey;
use crate::inbound::http::locale::Locale;
use crate::inbound::http::openapi::LoginEnvelope;
use crate::inbound::http::openapi::MessageEnvelope;
use crate::inbound::http::router::AppState;

#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequestBody,
    responses(
        (status = 200, description = "Bearer token and its expiry", body = LoginEnvelope),
        (status = 400, description = "Invalid input", body = MessageEnvelope),
        (status = 401, description = "Invalid subscriber id or secret", body = MessageEnvelope),
        (status = 500, description = "Token or database error", body = MessageEnvelope)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    locale: Locale,
    body: Result<Json<LoginRequestBody>, JsonRejection>,
) -> Response {
    locale.respond(issue_token(&state, body).await)
}

async fn issue_token(
    state: &AppState,
    body: Result<Json<LoginRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let Json(body) = body?;

    // A malformed subscriber id cannot belong to anyone: same answer as a miss.
    let command = LoginCommand::new(body.subscriber_id, body.secret)
        .map_err(|_| ApiError::Unauthorized(MessageKey::ErrorInvalidCredentials))?;

    state
        .account_service
        .login(command)
        .await
        .map_err(ApiError::from)
        .map(|issued| {
            ApiSuccess::new(
                StatusCode::OK,
                MessageKey::SuccessLogin,
                LoginResponseData {
                    token: issued.token,
                    expires_at: issued.expires_at,
                },
            )
        })
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct LoginRequestBody {
    subscriber_id: String,
    secret: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponseData {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}
