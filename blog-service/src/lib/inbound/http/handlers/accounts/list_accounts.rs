use axum::extract::State;
use axum::http::StatusCode;

use crate::account::ports::AccountServicePort;
use crate::inbound::http::handlers::AccountData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn list_accounts(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<AccountData>>, ApiError> {
    let accounts = state.account_service.list_accounts().await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        accounts.iter().map(AccountData::from).collect(),
    ))
}
