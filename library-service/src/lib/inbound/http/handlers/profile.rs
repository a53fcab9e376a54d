use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use axum::Extension;
use serde::Serialize;
use utoipa::ToSchema;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::models::Account;
use crate::i18n::MessageKey;
use crate::inbound::http::locale::Locale;
use crate::inbound::http::openapi::MessageEnvelope;
use crate::inbound::http::openapi::ProfileEnvelope;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

#[utoipa::path(
    get,
    path = "/users/profile",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Profile of the caller", body = ProfileEnvelope),
        (status = 401, description = "Missing, invalid or expired token", body = MessageEnvelope),
        (status = 404, description = "Account not found", body = MessageEnvelope)
    )
)]
pub async fn profile(
    State(state): State<AppState>,
    locale: Locale,
    Extension(caller): Extension<AuthenticatedAccount>,
) -> Response {
    let result: Result<ApiSuccess<ProfileResponseData>, ApiError> = state
        .account_service
        .profile(&caller.account_id)
        .await
        .map_err(ApiError::from)
        .map(|ref account| {
            ApiSuccess::new(StatusCode::OK, MessageKey::SuccessGetProfile, account.into())
        });

    locale.respond(result)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponseData {
    pub id: String,
    pub subscriber_id: String,
    pub name: String,
    pub handle: String,
}

impl From<&Account> for ProfileResponseData {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.to_string(),
            subscriber_id: account.subscriber_id.to_string(),
            name: account.name.as_str().to_string(),
            handle: account.handle.to_string(),
        }
    }
}
