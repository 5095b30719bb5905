use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use crate::account::errors::AccountError;
use crate::account::models::AccountId;
use crate::account::ports::AccountServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteAccountResponseData {
    pub message: String,
}

pub async fn delete_account(
    State(state): State<AppState>,
    Extension(AuthenticatedAccount(actor)): Extension<AuthenticatedAccount>,
    Path(user_id): Path<String>,
) -> Result<ApiSuccess<DeleteAccountResponseData>, ApiError> {
    let target = AccountId::from_string(&user_id).map_err(AccountError::from)?;

    state.account_service.delete_account(&target).await?;

    tracing::info!(actor_id = %actor.id, account_id = %target, "Account deleted by admin");

    Ok(ApiSuccess::new(
        StatusCode::OK,
        DeleteAccountResponseData {
            message: "User account deleted".to_string(),
        },
    ))
}
