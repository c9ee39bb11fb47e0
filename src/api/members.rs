//! Memberlist endpoint.

use axum::extract::{Query, State};

use super::{success, ApiResult, PageQuery};
use crate::models::{Page, User};
use crate::AppState;

/// GET /api/members - List users in registration order, paginated.
pub async fn list_members(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Page<User>> {
    let users = state
        .repo
        .paginate_users(query.page, state.config.users_per_page)
        .await?;

    success(users)
}
