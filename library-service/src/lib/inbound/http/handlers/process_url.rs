use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;
use utoipa::ToSchema;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::url::normalize;
use crate::i18n::MessageKey;
use crate::inbound::http::locale::Locale;
use crate::inbound::http::openapi::MessageEnvelope;
use crate::inbound::http::openapi::ProcessUrlEnvelope;

#[utoipa::path(
    post,
    path = "/urls/process",
    tag = "urls",
    request_body = ProcessUrlRequestBody,
    responses(
        (status = 200, description = "Normalized url", body = ProcessUrlEnvelope),
        (status = 400, description = "Unparsable url or unknown operation", body = MessageEnvelope)
    )
)]
pub async fn process_url(
    locale: Locale,
    body: Result<Json<ProcessUrlRequestBody>, JsonRejection>,
) -> Response {
    locale.respond(process(body))
}

fn process(
    body: Result<Json<ProcessUrlRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<ProcessUrlResponseData>, ApiError> {
    let Json(body) = body?;
    let processed_url = normalize(&body.url, &body.operation)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        MessageKey::SuccessProcessUrl,
        ProcessUrlResponseData { processed_url },
    ))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(default)]
pub struct ProcessUrlRequestBody {
    url: String,
    operation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProcessUrlResponseData {
    pub processed_url: String,
}
