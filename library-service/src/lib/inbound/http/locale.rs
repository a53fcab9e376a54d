use std::convert::Infallible;
use std::sync::Arc;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::extract::Query;
use axum::http::header::ACCEPT_LANGUAGE;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::http::Uri;
use axum::response::Response;
use serde::Deserialize;
use serde::Serialize;

use crate::i18n::Catalog;
use crate::i18n::Language;
use crate::i18n::MessageKey;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

/// Response language negotiated for one request.
///
/// A recognised `?lang=` query value wins, then the `Accept-Language`
/// header, then English.
#[derive(Debug, Clone)]
pub struct Locale {
    catalog: Arc<Catalog>,
    language: Language,
}

#[derive(Debug, Deserialize)]
struct LanguageQuery {
    lang: Option<String>,
}

impl Locale {
    pub fn new(catalog: Arc<Catalog>, language: Language) -> Self {
        Self { catalog, language }
    }

    pub fn negotiate(headers: &HeaderMap, uri: &Uri, catalog: Arc<Catalog>) -> Self {
        let from_query = Query::<LanguageQuery>::try_from_uri(uri)
            .ok()
            .and_then(|Query(query)| query.lang)
            .and_then(|lang| Language::from_tag(&lang));

        let from_header = || {
            headers
                .get(ACCEPT_LANGUAGE)
                .and_then(|value| value.to_str().ok())
                .and_then(Language::from_accept_language)
        };

        let language = from_query.or_else(from_header).unwrap_or_default();
        Self::new(catalog, language)
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn message(&self, key: MessageKey) -> &str {
        self.catalog.translate(self.language, key)
    }

    /// Render a handler outcome as a localized `{code, message, data?}` response.
    pub fn respond<T: Serialize>(&self, result: Result<ApiSuccess<T>, ApiError>) -> Response {
        match result {
            Ok(success) => success.localized(self),
            Err(error) => error.localized(self),
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for Locale {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self::negotiate(
            &parts.headers,
            &parts.uri,
            Arc::clone(&state.catalog),
        ))
    }
}
