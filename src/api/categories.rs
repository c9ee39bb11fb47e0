//! Category endpoints.

use axum::extract::{Path, State};

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::models::CategoryPage;
use crate::AppState;

/// GET /api/categories/:id - View a category and its forums.
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<CategoryPage> {
    let category = state
        .repo
        .get_category(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))?;

    let forums = state.repo.list_forums(category.id).await?;

    success(CategoryPage { category, forums })
}
