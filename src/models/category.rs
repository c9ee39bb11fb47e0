//! Category model.

use serde::{Deserialize, Serialize};

use super::Forum;

/// Top-level grouping of forums.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub position: i64,
}

/// Payload for the category page: the category plus its forums.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPage {
    pub category: Category,
    pub forums: Vec<Forum>,
}
