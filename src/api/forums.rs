//! Forum endpoints.

use axum::extract::{Path, Query, State};

use super::{success, ApiResult, PageQuery};
use crate::errors::AppError;
use crate::models::ForumPage;
use crate::AppState;

/// GET /api/forums/:id - View a forum with a page of its topics, ordered
/// by newest activity.
pub async fn get_forum(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<PageQuery>,
) -> ApiResult<ForumPage> {
    let forum = state
        .repo
        .get_forum(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Forum {} not found", id)))?;

    let topics = state
        .repo
        .paginate_topics(forum.id, query.page, state.config.topics_per_page)
        .await?;

    success(ForumPage { forum, topics })
}
