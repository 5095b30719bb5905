use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::PostData;
use crate::inbound::http::router::AppState;
use crate::post::errors::PostError;
use crate::post::models::PostFilter;
use crate::post::models::PostStatus;
use crate::post::ports::PostServicePort;

/// Optional `?status=` and `?tag=` narrowing.
#[derive(Debug, Default, Deserialize)]
pub struct ListPostsQuery {
    pub status: Option<String>,
    pub tag: Option<String>,
}

pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<ListPostsQuery>,
) -> Result<ApiSuccess<Vec<PostData>>, ApiError> {
    let filter = PostFilter {
        status: query
            .status
            .map(|status| status.parse::<PostStatus>())
            .transpose()
            .map_err(PostError::from)?,
        tag: query.tag,
    };

    let posts = state.post_service.list_posts(filter).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        posts.iter().map(PostData::from).collect(),
    ))
}
