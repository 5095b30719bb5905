use axum::http::StatusCode;
use axum::Extension;

use crate::inbound::http::handlers::AccountData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedAccount;

/// The caller's own account, as resolved by the auth gate.
pub async fn get_profile(
    Extension(AuthenticatedAccount(account)): Extension<AuthenticatedAccount>,
) -> Result<ApiSuccess<AccountData>, ApiError> {
    Ok(ApiSuccess::new(StatusCode::OK, (&account).into()))
}
