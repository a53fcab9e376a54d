use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::account::errors::AccountError;
use crate::domain::book::errors::BookError;
use crate::domain::book::models::Book;
use crate::domain::book::models::BookDetails;
use crate::domain::url::errors::UrlError;
use crate::i18n::MessageKey;
use crate::inbound::http::locale::Locale;

pub mod add_book;
pub mod delete_book;
pub mod get_book;
pub mod health;
pub mod list_books;
pub mod login;
pub mod process_url;
pub mod profile;
pub mod register;
pub mod update_book;

/// Successful outcome: status, message key and optional payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiSuccess<T: Serialize> {
    status: StatusCode,
    message: MessageKey,
    data: Option<T>,
}

impl<T: Serialize> ApiSuccess<T> {
    pub fn new(status: StatusCode, message: MessageKey, data: T) -> Self {
        Self {
            status,
            message,
            data: Some(data),
        }
    }

    /// Render with the message translated for `locale`.
    pub fn localized(self, locale: &Locale) -> Response {
        let body = ApiResponseBody {
            code: self.status.as_u16(),
            message: locale.message(self.message).to_string(),
            data: self.data,
        };
        (self.status, Json(body)).into_response()
    }
}

impl ApiSuccess<()> {
    /// Outcome that carries only a message.
    pub fn message_only(status: StatusCode, message: MessageKey) -> Self {
        Self {
            status,
            message,
            data: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(MessageKey),
    BadRequest(MessageKey),
    NotFound(MessageKey),
    Unauthorized(MessageKey),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        }
    }

    pub fn message_key(&self) -> MessageKey {
        match *self {
            ApiError::InternalServerError(key)
            | ApiError::BadRequest(key)
            | ApiError::NotFound(key)
            | ApiError::Unauthorized(key) => key,
        }
    }

    pub fn localized(self, locale: &Locale) -> Response {
        let status = self.status();
        let body: ApiResponseBody<()> = ApiResponseBody {
            code: status.as_u16(),
            message: locale.message(self.message_key()).to_string(),
            data: None,
        };
        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection, "Rejected request body");
        ApiError::BadRequest(MessageKey::ErrorInvalidInput)
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::InvalidSubscriberId(_)
            | AccountError::InvalidHandle(_)
            | AccountError::InvalidName(_)
            | AccountError::InvalidSecret(_) => ApiError::BadRequest(MessageKey::ErrorInvalidInput),
            AccountError::AlreadyExists => ApiError::BadRequest(MessageKey::ErrorConflictAccount),
            AccountError::NotFound(_) => ApiError::NotFound(MessageKey::NotfoundUser),
            AccountError::InvalidCredentials => {
                ApiError::Unauthorized(MessageKey::ErrorInvalidCredentials)
            }
            AccountError::TokenFailed(ref reason) => {
                tracing::error!(error = %reason, "Token generation failed");
                ApiError::InternalServerError(MessageKey::ErrorInternal)
            }
            AccountError::DatabaseError(ref reason) => {
                tracing::error!(error = %reason, "Account store failure");
                ApiError::InternalServerError(MessageKey::ErrorDatabase)
            }
        }
    }
}

impl From<BookError> for ApiError {
    fn from(err: BookError) -> Self {
        match err {
            BookError::InvalidBookId(_) | BookError::InvalidDetails(_) => {
                ApiError::BadRequest(MessageKey::ErrorInvalidInput)
            }
            BookError::NotFound(_) | BookError::Empty => ApiError::NotFound(MessageKey::NotfoundBook),
            BookError::DatabaseError(ref reason) => {
                tracing::error!(error = %reason, "Book store failure");
                ApiError::InternalServerError(MessageKey::ErrorDatabase)
            }
        }
    }
}

impl From<UrlError> for ApiError {
    fn from(err: UrlError) -> Self {
        match err {
            UrlError::InvalidInput(_) => ApiError::BadRequest(MessageKey::ErrorInvalidInput),
            UrlError::InvalidOperation(_) => ApiError::BadRequest(MessageKey::ErrorInvalidOperation),
        }
    }
}

/// Envelope shared by every JSON response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize> {
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// Book fields as sent by clients on add and update.
///
/// Missing fields default to empty so they fail validation with a 400.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct BookRequestBody {
    title: String,
    author: String,
    year: i32,
    isbn: Option<String>,
    genre: Option<String>,
    description: Option<String>,
    cover_image_url: Option<String>,
}

impl BookRequestBody {
    fn try_into_details(self, current_year: i32) -> Result<BookDetails, BookError> {
        let details = BookDetails {
            title: self.title,
            author: self.author,
            year: self.year,
            isbn: self.isbn,
            genre: self.genre,
            description: self.description,
            cover_image_url: self.cover_image_url,
        };
        Ok(details.validated(current_year)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookData {
    pub id: String,
    pub title: String,
    pub author: String,
    pub year: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Book> for BookData {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.to_string(),
            title: book.details.title.clone(),
            author: book.details.author.clone(),
            year: book.details.year,
            isbn: book.details.isbn.clone(),
            genre: book.details.genre.clone(),
            description: book.details.description.clone(),
            cover_image_url: book.details.cover_image_url.clone(),
            created_at: book.created_at,
            updated_at: book.updated_at,
        }
    }
}
