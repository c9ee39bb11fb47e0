//! Topic model and the new-topic submission form.

use serde::{Deserialize, Serialize};

use super::{Page, Post};

/// A discussion thread containing ordered posts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: i64,
    pub forum_id: i64,
    /// Author of the topic's first post.
    pub user_id: i64,
    pub title: String,
    /// Number of posts in the topic. Maintained by the repository on
    /// every post mutation.
    pub post_count: i64,
    /// Id of the newest post. Forums order their topic listings by this.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_post_id: Option<i64>,
    pub created_at: String,
}

/// Payload for the topic page: the topic plus one page of its posts.
///
/// `per_page` is echoed so the embedded quick-reply block can anchor new
/// posts to the right page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicPage {
    pub topic: Topic,
    pub posts: Page<Post>,
    pub per_page: u32,
}

/// Submission form for starting a new topic.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTopicForm {
    pub title: String,
    pub content: String,
}

impl NewTopicForm {
    /// Field-level validation. The failure message names the field, the
    /// way the form would re-render it.
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Title is required".to_string());
        }
        if self.content.trim().is_empty() {
            return Err("Content is required".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_topic_form_requires_title() {
        let form = NewTopicForm {
            title: "   ".to_string(),
            content: "hello".to_string(),
        };
        assert_eq!(form.validate(), Err("Title is required".to_string()));
    }

    #[test]
    fn test_new_topic_form_requires_content() {
        let form = NewTopicForm {
            title: "hello".to_string(),
            content: "".to_string(),
        };
        assert_eq!(form.validate(), Err("Content is required".to_string()));
    }

    #[test]
    fn test_new_topic_form_valid() {
        let form = NewTopicForm {
            title: "hello".to_string(),
            content: "world".to_string(),
        };
        assert!(form.validate().is_ok());
    }
}
