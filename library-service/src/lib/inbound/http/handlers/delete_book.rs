use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::book::errors::BookError;
use crate::domain::book::models::BookId;
use crate::i18n::MessageKey;
use crate::inbound::http::locale::Locale;
use crate::inbound::http::openapi::MessageEnvelope;
use crate::inbound::http::router::AppState;

#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(
        ("id" = String, Path, description = "Book id (UUID)")
    ),
    responses(
        (status = 200, description = "Book deleted", body = MessageEnvelope),
        (status = 400, description = "Malformed book id", body = MessageEnvelope),
        (status = 401, description = "Missing, invalid or expired token", body = MessageEnvelope),
        (status = 404, description = "Book not found", body = MessageEnvelope)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    locale: Locale,
    Path(book_id): Path<String>,
) -> Response {
    locale.respond(remove(&state, &book_id).await)
}

async fn remove(state: &AppState, book_id: &str) -> Result<ApiSuccess<()>, ApiError> {
    let book_id = BookId::from_string(book_id).map_err(BookError::from)?;

    state
        .book_service
        .delete_book(&book_id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::message_only(StatusCode::OK, MessageKey::SuccessDeleteBook))
}
