//! Forum model.

use serde::{Deserialize, Serialize};

use super::{Page, Topic};

/// Container of topics within a category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Forum {
    pub id: i64,
    pub category_id: i64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub position: i64,
}

/// Payload for the forum page: the forum plus one page of its topics,
/// newest activity first.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForumPage {
    pub forum: Forum,
    pub topics: Page<Topic>,
}
