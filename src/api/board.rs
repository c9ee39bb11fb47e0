//! Board index endpoint.

use axum::extract::State;

use super::{success, ApiResult};
use crate::models::{BoardIndex, BoardStats};
use crate::AppState;

/// GET /api - Board index: forum-wide stats plus all categories.
pub async fn board_index(State(state): State<AppState>) -> ApiResult<BoardIndex> {
    let stats = BoardStats {
        user_count: state.repo.count_users().await?,
        topic_count: state.repo.count_topics().await?,
        post_count: state.repo.count_posts().await?,
        newest_user: state.repo.newest_user().await?.map(|u| u.username),
    };

    let categories = state.repo.list_categories().await?;

    success(BoardIndex { stats, categories })
}
