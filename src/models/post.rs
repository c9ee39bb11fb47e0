//! Post model and the reply submission forms.

use serde::{Deserialize, Serialize};

/// A single message within a topic.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub topic_id: i64,
    pub user_id: i64,
    pub content: String,
    /// Whether this is the topic's originating post. Deleting it deletes
    /// the topic.
    pub first_post: bool,
    pub created_at: String,
    /// Set on edit, absent until then.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_modified: Option<String>,
}

/// Abbreviated reply form embedded in the topic page.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickreplyForm {
    pub content: String,
}

impl QuickreplyForm {
    pub fn validate(&self) -> Result<(), String> {
        if self.content.trim().is_empty() {
            return Err("Content is required".to_string());
        }
        Ok(())
    }
}

/// Full reply form, also used for editing an existing post.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyForm {
    pub content: String,
}

impl ReplyForm {
    pub fn validate(&self) -> Result<(), String> {
        if self.content.trim().is_empty() {
            return Err("Content is required".to_string());
        }
        Ok(())
    }
}
