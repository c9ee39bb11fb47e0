//! Board index payload.

use serde::Serialize;

use super::Category;

/// Board-wide statistics shown on the index page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardStats {
    pub user_count: i64,
    pub topic_count: i64,
    pub post_count: i64,
    /// Username of the most recently registered user, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub newest_user: Option<String>,
}

/// Payload for the board index: stats plus every category.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardIndex {
    pub stats: BoardStats,
    pub categories: Vec<Category>,
}
