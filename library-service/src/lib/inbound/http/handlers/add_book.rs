use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;
use chrono::Datelike;
use chrono::Utc;

use super::ApiError;
use super::ApiSuccess;
use super::BookRequestBody;
use crate::i18n::MessageKey;
use crate::inbound::http::locale::Locale;
use crate::inbound::http::openapi::MessageEnvelope;
use crate::inbound::http::router::AppState;

#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    security(("bearer_auth" = [])),
    request_body = BookRequestBody,
    responses(
        (status = 201, description = "Book added", body = MessageEnvelope),
        (status = 400, description = "Invalid input", body = MessageEnvelope),
        (status = 401, description = "Missing, invalid or expired token", body = MessageEnvelope),
        (status = 500, description = "Database error", body = MessageEnvelope)
    )
)]
pub async fn add_book(
    State(state): State<AppState>,
    locale: Locale,
    body: Result<Json<BookRequestBody>, JsonRejection>,
) -> Response {
    locale.respond(create(&state, body).await)
}

async fn create(
    state: &AppState,
    body: Result<Json<BookRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<()>, ApiError> {
    let Json(body) = body?;
    let details = body.try_into_details(Utc::now().year())?;

    state
        .book_service
        .add_book(details)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::message_only(StatusCode::CREATED, MessageKey::SuccessAddBook))
}
