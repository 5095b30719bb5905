use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;
use crate::post::errors::PostError;
use crate::post::models::PostId;
use crate::post::ports::PostServicePort;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeletePostResponseData {
    pub message: String,
}

pub async fn delete_post(
    State(state): State<AppState>,
    Extension(AuthenticatedAccount(actor)): Extension<AuthenticatedAccount>,
    Path(post_id): Path<String>,
) -> Result<ApiSuccess<DeletePostResponseData>, ApiError> {
    let post_id = PostId::from_string(&post_id).map_err(PostError::from)?;

    state.post_service.delete_post(&actor, &post_id).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        DeletePostResponseData {
            message: "Post deleted".to_string(),
        },
    ))
}
