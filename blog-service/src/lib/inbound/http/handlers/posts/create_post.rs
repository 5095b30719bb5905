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
use crate::post::models::CreatePostCommand;
use crate::post::models::PostContent;
use crate::post::models::PostTitle;
use crate::post::ports::PostServicePort;

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub status: Option<String>,
}

impl CreatePostRequest {
    fn try_into_command(self) -> Result<CreatePostCommand, PostError> {
        let command = CreatePostCommand::new(
            PostTitle::new(self.title)?,
            PostContent::new(self.content)?,
        )
        .with_tags(self.tags);

        match self.status {
            Some(status) => Ok(command.with_status(status.parse()?)),
            None => Ok(command),
        }
    }
}

pub async fn create_post(
    State(state): State<AppState>,
    Extension(AuthenticatedAccount(author)): Extension<AuthenticatedAccount>,
    Json(req): Json<CreatePostRequest>,
) -> Result<ApiSuccess<PostData>, ApiError> {
    let command = req.try_into_command()?;

    state
        .post_service
        .create_post(&author, command)
        .await
        .map_err(ApiError::from)
        .map(|ref post| ApiSuccess::new(StatusCode::CREATED, post.into()))
}
