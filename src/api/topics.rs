//! Topic endpoints.

use axum::{
    extract::{Path, Query, State},
    response::Redirect,
    Json,
};

use super::posts::post_location;
use super::{success, ApiResult, PageQuery};
use crate::auth::CurrentUser;
use crate::errors::AppError;
use crate::models::{NewTopicForm, QuickreplyForm, TopicPage};
use crate::AppState;

/// GET /api/topics/:id - View a topic with a page of its posts.
pub async fn get_topic(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<PageQuery>,
) -> ApiResult<TopicPage> {
    let topic = state
        .repo
        .get_topic(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Topic {} not found", id)))?;

    let posts = state
        .repo
        .paginate_posts(topic.id, query.page, state.config.posts_per_page)
        .await?;

    success(TopicPage {
        topic,
        posts,
        per_page: state.config.posts_per_page,
    })
}

/// POST /api/topics/:id - Quick reply from the topic page.
///
/// Redirects to the new post's location within the topic.
pub async fn quick_reply(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
    Json(form): Json<QuickreplyForm>,
) -> Result<Redirect, AppError> {
    form.validate().map_err(AppError::Validation)?;

    let topic = state
        .repo
        .get_topic(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Topic {} not found", id)))?;

    let post = state.repo.create_post(topic.id, user.id, &form.content).await?;

    // Fresh read so the redirect lands on the page the new post is on
    let post_count = state
        .repo
        .get_topic(topic.id)
        .await?
        .map_or(0, |t| t.post_count);

    Ok(Redirect::to(&post_location(
        topic.id,
        post.id,
        post_count,
        state.config.posts_per_page,
    )))
}

/// POST /api/forums/:id/topics - Start a new topic in a forum.
pub async fn create_topic(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(forum_id): Path<i64>,
    Json(form): Json<NewTopicForm>,
) -> Result<Redirect, AppError> {
    form.validate().map_err(AppError::Validation)?;

    let forum = state
        .repo
        .get_forum(forum_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Forum {} not found", forum_id)))?;

    let topic = state.repo.create_topic(forum.id, user.id, &form).await?;

    Ok(Redirect::to(&format!("/api/topics/{}", topic.id)))
}

/// DELETE /api/topics/:id - Delete a topic and all of its posts.
///
/// Redirects to the parent forum.
pub async fn delete_topic(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Redirect, AppError> {
    let topic = state
        .repo
        .get_topic(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Topic {} not found", id)))?;

    state.repo.delete_topic(topic.id).await?;

    Ok(Redirect::to(&format!("/api/forums/{}", topic.forum_id)))
}
