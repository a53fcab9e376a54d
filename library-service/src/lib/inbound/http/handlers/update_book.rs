use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;
use chrono::Datelike;
use chrono::Utc;

use super::ApiError;
use super::ApiSuccess;
use super::BookRequestBody;
use crate::domain::book::errors::BookError;
use crate::domain::book::models::BookId;
use crate::i18n::MessageKey;
use crate::inbound::http::locale::Locale;
use crate::inbound::http::openapi::MessageEnvelope;
use crate::inbound::http::router::AppState;

#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(
        ("id" = String, Path, description = "Book id (UUID)")
    ),
    request_body = BookRequestBody,
    responses(
        (status = 200, description = "Book updated", body = MessageEnvelope),
        (status = 400, description = "Malformed book id or invalid input", body = MessageEnvelope),
        (status = 401, description = "Missing, invalid or expired token", body = MessageEnvelope),
        (status = 404, description = "Book not found", body = MessageEnvelope)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    locale: Locale,
    Path(book_id): Path<String>,
    body: Result<Json<BookRequestBody>, JsonRejection>,
) -> Response {
    locale.respond(replace(&state, &book_id, body).await)
}

async fn replace(
    state: &AppState,
    book_id: &str,
    body: Result<Json<BookRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<()>, ApiError> {
    let book_id = BookId::from_string(book_id).map_err(BookError::from)?;
    let Json(body) = body?;
    let details = body.try_into_details(Utc::now().year())?;

    state
        .book_service
        .update_book(&book_id, details)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::message_only(StatusCode::OK, MessageKey::SuccessUpdateBook))
}
