use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;
use serde::Deserialize;
use utoipa::ToSchema;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::models::RegisterCommand;
use crate::i18n::MessageKey;
use crate::inbound::http::locale::Locale;
use crate::inbound::http::openapi::MessageEnvelope;
use crate::inbound::http::router::AppState;

#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "auth",
    request_body = RegisterRequestBody,
    responses(
        (status = 201, description = "Account registered", body = MessageEnvelope),
        (status = 400, description = "Invalid input or account already registered", body = MessageEnvelope),
        (status = 500, description = "Database error", body = MessageEnvelope)
    )
)]
pub async fn register(
    State(state): State<AppState>,
    locale: Locale,
    body: Result<Json<RegisterRequestBody>, JsonRejection>,
) -> Response {
    locale.respond(register_account(&state, body).await)
}

async fn register_account(
    state: &AppState,
    body: Result<Json<RegisterRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<()>, ApiError> {
    let Json(body) = body?;

    state
        .account_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::message_only(StatusCode::CREATED, MessageKey::SuccessRegister))
}

/// HTTP request body for registration (raw JSON)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct RegisterRequestBody {
    subscriber_id: String,
    name: String,
    handle: String,
    secret: String,
}

impl RegisterRequestBody {
    fn try_into_command(self) -> Result<RegisterCommand, ApiError> {
        RegisterCommand::new(self.subscriber_id, self.name, self.handle, self.secret)
            .map_err(ApiError::from)
    }
}
