use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;

use super::ApiError;
use super::ApiSuccess;
use super::BookData;
use crate::i18n::MessageKey;
use crate::inbound::http::locale::Locale;
use crate::inbound::http::openapi::BookListEnvelope;
use crate::inbound::http::openapi::MessageEnvelope;
use crate::inbound::http::router::AppState;

#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All books, newest first", body = BookListEnvelope),
        (status = 401, description = "Missing, invalid or expired token", body = MessageEnvelope),
        (status = 404, description = "No books in the catalogue", body = MessageEnvelope),
        (status = 500, description = "Database error", body = MessageEnvelope)
    )
)]
pub async fn list_books(State(state): State<AppState>, locale: Locale) -> Response {
    let result: Result<ApiSuccess<Vec<BookData>>, ApiError> = state
        .book_service
        .list_books()
        .await
        .map_err(ApiError::from)
        .map(|books| {
            ApiSuccess::new(
                StatusCode::OK,
                MessageKey::SuccessGetBook,
                books.iter().map(BookData::from).collect(),
            )
        });

    locale.respond(result)
}
