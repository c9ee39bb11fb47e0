//! User and session models.

use serde::{Deserialize, Serialize};

/// A registered board member.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    /// Number of posts authored. Maintained by the repository on every
    /// post mutation.
    pub post_count: i64,
    pub created_at: String,
}

/// A login session mapping a bearer token to a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub token: String,
    pub user_id: i64,
    pub created_at: String,
}
