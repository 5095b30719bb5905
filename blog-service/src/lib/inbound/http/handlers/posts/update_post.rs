use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::PostData;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;
use crate::post::errors::PostError;
use crate::post::models::PostContent;
use crate::post::models::PostId;
use crate::post::models::PostTitle;
use crate::post::models::UpdatePostCommand;
use crate::post::ports::PostServicePort;

/// HTTP request body for updating a post (raw JSON)
#[derive(Debug, Deserialize)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
    pub status: Option<String>,
}

impl UpdatePostRequest {
    fn try_into_command(self) -> Result<UpdatePostCommand, PostError> {
        let title = self.title.map(PostTitle::new).transpose()?;
        let content = self.content.map(PostContent::new).transpose()?;
        let status = self.status.map(|s| s.parse()).transpose()?;

        UpdatePostCommand::new(title, content, self.tags, status)
    }
}

pub async fn update_post(
    State(state): State<AppState>,
    Extension(AuthenticatedAccount(actor)): Extension<AuthenticatedAccount>,
    Path(post_id): Path<String>,
    Json(req): Json<UpdatePostRequest>,
) -> Result<ApiSuccess<PostData>, ApiError> {
    let post_id = PostId::from_string(&post_id).map_err(PostError::from)?;
    let command = req.try_into_command()?;

    state
        .post_service
        .update_post(&actor, &post_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref post| ApiSuccess::new(StatusCode::OK, post.into()))
}
