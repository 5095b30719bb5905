use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use crate::account::errors::AccountError;
use crate::account::models::AccountId;
use crate::account::models::Role;
use crate::account::ports::AccountServicePort;
use crate::inbound::http::handlers::AccountData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

/// Only the role is read from the body; anything else is ignored.
#[derive(Debug, Deserialize)]
pub struct ChangeRoleRequest {
    pub role: String,
}

pub async fn change_role(
    State(state): State<AppState>,
    Extension(AuthenticatedAccount(actor)): Extension<AuthenticatedAccount>,
    Path(user_id): Path<String>,
    Json(req): Json<ChangeRoleRequest>,
) -> Result<ApiSuccess<AccountData>, ApiError> {
    let target = AccountId::from_string(&user_id).map_err(AccountError::from)?;
    let role: Role = req.role.parse().map_err(AccountError::from)?;

    state
        .account_service
        .change_role(&actor, &target, role)
        .await
        .map_err(ApiError::from)
        .map(|ref account| ApiSuccess::new(StatusCode::OK, account.into()))
}
