//! Post endpoints and the post-locator arithmetic.

use axum::{
    extract::{Path, State},
    response::Redirect,
    Json,
};

use crate::auth::CurrentUser;
use crate::errors::AppError;
use crate::models::ReplyForm;
use crate::AppState;

/// GET /api/posts/:id - Redirect to the post's location within its topic.
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Redirect, AppError> {
    let post = state
        .repo
        .get_post(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post {} not found", id)))?;

    let topic = state
        .repo
        .get_topic(post.topic_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Topic {} not found", post.topic_id)))?;

    Ok(Redirect::to(&post_location(
        topic.id,
        post.id,
        topic.post_count,
        state.config.posts_per_page,
    )))
}

/// POST /api/topics/:id/posts - Reply to a topic.
///
/// Redirects to the new post's location.
pub async fn create_post(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(topic_id): Path<i64>,
    Json(form): Json<ReplyForm>,
) -> Result<Redirect, AppError> {
    form.validate().map_err(AppError::Validation)?;

    let topic = state
        .repo
        .get_topic(topic_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Topic {} not found", topic_id)))?;

    let post = state.repo.create_post(topic.id, user.id, &form.content).await?;

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

/// PUT /api/posts/:id - Edit a post's content.
///
/// Stamps the modification time and redirects to the topic.
pub async fn update_post(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i64>,
    Json(form): Json<ReplyForm>,
) -> Result<Redirect, AppError> {
    form.validate().map_err(AppError::Validation)?;

    let post = state
        .repo
        .get_post(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post {} not found", id)))?;

    state.repo.update_post(post.id, &form.content).await?;

    Ok(Redirect::to(&format!("/api/topics/{}", post.topic_id)))
}

/// DELETE /api/posts/:id - Delete a post.
///
/// Deleting the first post deletes the whole topic and redirects to the
/// parent forum; deleting a reply redirects back to the topic.
pub async fn delete_post(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Redirect, AppError> {
    let post = state
        .repo
        .get_post(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post {} not found", id)))?;

    if post.first_post {
        let topic = state
            .repo
            .get_topic(post.topic_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Topic {} not found", post.topic_id)))?;

        state.repo.delete_topic(topic.id).await?;
        return Ok(Redirect::to(&format!("/api/forums/{}", topic.forum_id)));
    }

    state.repo.delete_reply(&post).await?;
    Ok(Redirect::to(&format!("/api/topics/{}", post.topic_id)))
}

/// Redirect target pointing at a post within its topic's paginated view.
pub(super) fn post_location(topic_id: i64, post_id: i64, post_count: i64, per_page: u32) -> String {
    format!(
        "/api/topics/{}?page={}#pid{}",
        topic_id,
        post_page(post_count, per_page),
        post_id
    )
}

/// Page within a topic on which its newest post lands.
///
/// Low-volume topics pin to page 1; past ten posts the embedded quick-reply
/// block pushes the tail onto one extra page. The threshold is a constant,
/// independent of the configured page size.
fn post_page(post_count: i64, per_page: u32) -> i64 {
    let mut page = (post_count as u64).div_ceil(u64::from(per_page)) as i64;
    if post_count > 10 {
        page += 1;
    } else {
        page = 1;
    }
    page
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_page_high_volume_gets_extra_page() {
        // ceil(25 / 10) = 3, plus one past the threshold
        assert_eq!(post_page(25, 10), 4);
    }

    #[test]
    fn test_post_page_low_volume_pins_to_one() {
        assert_eq!(post_page(5, 10), 1);
        assert_eq!(post_page(10, 10), 1);
    }

    #[test]
    fn test_post_page_just_past_threshold() {
        // ceil(11 / 10) = 2, plus one
        assert_eq!(post_page(11, 10), 3);
    }

    #[test]
    fn test_post_location_carries_anchor() {
        assert_eq!(post_location(7, 42, 25, 10), "/api/topics/7?page=4#pid42");
    }
}
