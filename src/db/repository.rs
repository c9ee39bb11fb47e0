//! Database repository for all board queries and mutations.
//!
//! Uses prepared statements, and transactions wherever a mutation touches
//! the denormalized counters (topic post counts, last-post ids, user post
//! counts) alongside the row itself.

use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{Category, Forum, NewTopicForm, Page, Post, Session, Topic, User};

/// Database repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ==================== USER OPERATIONS ====================

    /// Create a new user.
    pub async fn create_user(&self, username: &str) -> Result<User, AppError> {
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query("INSERT INTO users (username, post_count, created_at) VALUES (?, 0, ?)")
            .bind(username)
            .bind(&now)
            .execute(&self.pool)
            .await?;

        Ok(User {
            id: result.last_insert_rowid(),
            username: username.to_string(),
            post_count: 0,
            created_at: now,
        })
    }

    /// Get a user by ID.
    pub async fn get_user(&self, id: i64) -> Result<Option<User>, AppError> {
        let row = sqlx::query("SELECT id, username, post_count, created_at FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(user_from_row))
    }

    /// Count all users.
    pub async fn count_users(&self) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT COUNT(*) AS cnt FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("cnt"))
    }

    /// Get the most recently registered user.
    pub async fn newest_user(&self) -> Result<Option<User>, AppError> {
        let row = sqlx::query(
            "SELECT id, username, post_count, created_at FROM users ORDER BY id DESC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(user_from_row))
    }

    /// List users in registration order, page-sliced.
    pub async fn paginate_users(&self, page: u32, per_page: u32) -> Result<Page<User>, AppError> {
        let page = page.max(1);
        let total = self.count_users().await?;

        let rows = sqlx::query(
            "SELECT id, username, post_count, created_at FROM users ORDER BY id LIMIT ? OFFSET ?",
        )
        .bind(i64::from(per_page))
        .bind(offset(page, per_page))
        .fetch_all(&self.pool)
        .await?;

        let items = rows.iter().map(user_from_row).collect();
        Ok(Page::new(items, page, per_page, total))
    }

    // ==================== SESSION OPERATIONS ====================

    /// Create a session for a user and return its token.
    pub async fn create_session(&self, user_id: i64) -> Result<Session, AppError> {
        let token = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query("INSERT INTO sessions (token, user_id, created_at) VALUES (?, ?, ?)")
            .bind(&token)
            .bind(user_id)
            .bind(&now)
            .execute(&self.pool)
            .await?;

        Ok(Session {
            token,
            user_id,
            created_at: now,
        })
    }

    /// Resolve a session token to its user.
    pub async fn get_session_user(&self, token: &str) -> Result<Option<User>, AppError> {
        let row = sqlx::query(
            r#"SELECT u.id, u.username, u.post_count, u.created_at
               FROM sessions s JOIN users u ON u.id = s.user_id
               WHERE s.token = ?"#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(user_from_row))
    }

    // ==================== CATEGORY OPERATIONS ====================

    /// Create a new category.
    pub async fn create_category(
        &self,
        title: &str,
        description: Option<&str>,
        position: i64,
    ) -> Result<Category, AppError> {
        let result =
            sqlx::query("INSERT INTO categories (title, description, position) VALUES (?, ?, ?)")
                .bind(title)
                .bind(description)
                .bind(position)
                .execute(&self.pool)
                .await?;

        Ok(Category {
            id: result.last_insert_rowid(),
            title: title.to_string(),
            description: description.map(|s| s.to_string()),
            position,
        })
    }

    /// List all categories.
    pub async fn list_categories(&self) -> Result<Vec<Category>, AppError> {
        let rows = sqlx::query(
            "SELECT id, title, description, position FROM categories ORDER BY position, id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(category_from_row).collect())
    }

    /// Get a category by ID.
    pub async fn get_category(&self, id: i64) -> Result<Option<Category>, AppError> {
        let row = sqlx::query("SELECT id, title, description, position FROM categories WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(category_from_row))
    }

    // ==================== FORUM OPERATIONS ====================

    /// Create a new forum in a category.
    pub async fn create_forum(
        &self,
        category_id: i64,
        title: &str,
        description: Option<&str>,
        position: i64,
    ) -> Result<Forum, AppError> {
        let result = sqlx::query(
            "INSERT INTO forums (category_id, title, description, position) VALUES (?, ?, ?, ?)",
        )
        .bind(category_id)
        .bind(title)
        .bind(description)
        .bind(position)
        .execute(&self.pool)
        .await?;

        Ok(Forum {
            id: result.last_insert_rowid(),
            category_id,
            title: title.to_string(),
            description: description.map(|s| s.to_string()),
            position,
        })
    }

    /// List the forums of a category.
    pub async fn list_forums(&self, category_id: i64) -> Result<Vec<Forum>, AppError> {
        let rows = sqlx::query(
            r#"SELECT id, category_id, title, description, position
               FROM forums WHERE category_id = ? ORDER BY position, id"#,
        )
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(forum_from_row).collect())
    }

    /// Get a forum by ID.
    pub async fn get_forum(&self, id: i64) -> Result<Option<Forum>, AppError> {
        let row = sqlx::query(
            "SELECT id, category_id, title, description, position FROM forums WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(forum_from_row))
    }

    // ==================== TOPIC OPERATIONS ====================

    /// Get a topic by ID.
    pub async fn get_topic(&self, id: i64) -> Result<Option<Topic>, AppError> {
        let row = sqlx::query(
            r#"SELECT id, forum_id, user_id, title, post_count, last_post_id, created_at
               FROM topics WHERE id = ?"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(topic_from_row))
    }

    /// Count all topics.
    pub async fn count_topics(&self) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT COUNT(*) AS cnt FROM topics")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("cnt"))
    }

    /// List a forum's topics ordered by newest activity, page-sliced.
    pub async fn paginate_topics(
        &self,
        forum_id: i64,
        page: u32,
        per_page: u32,
    ) -> Result<Page<Topic>, AppError> {
        let page = page.max(1);

        let total_row = sqlx::query("SELECT COUNT(*) AS cnt FROM topics WHERE forum_id = ?")
            .bind(forum_id)
            .fetch_one(&self.pool)
            .await?;
        let total: i64 = total_row.get("cnt");

        let rows = sqlx::query(
            r#"SELECT id, forum_id, user_id, title, post_count, last_post_id, created_at
               FROM topics WHERE forum_id = ?
               ORDER BY last_post_id DESC
               LIMIT ? OFFSET ?"#,
        )
        .bind(forum_id)
        .bind(i64::from(per_page))
        .bind(offset(page, per_page))
        .fetch_all(&self.pool)
        .await?;

        let items = rows.iter().map(topic_from_row).collect();
        Ok(Page::new(items, page, per_page, total))
    }

    /// Create a topic together with its first post.
    ///
    /// The topic row, the post row and the author's post count move in one
    /// transaction so the counters never drift.
    pub async fn create_topic(
        &self,
        forum_id: i64,
        user_id: i64,
        form: &NewTopicForm,
    ) -> Result<Topic, AppError> {
        let now = Utc::now().to_rfc3339();
        let mut tx = self.pool.begin().await?;

        let topic_result = sqlx::query(
            r#"INSERT INTO topics (forum_id, user_id, title, post_count, created_at)
               VALUES (?, ?, ?, 0, ?)"#,
        )
        .bind(forum_id)
        .bind(user_id)
        .bind(&form.title)
        .bind(&now)
        .execute(&mut *tx)
        .await?;
        let topic_id = topic_result.last_insert_rowid();

        let post_result = sqlx::query(
            r#"INSERT INTO posts (topic_id, user_id, content, first_post, created_at)
               VALUES (?, ?, ?, 1, ?)"#,
        )
        .bind(topic_id)
        .bind(user_id)
        .bind(&form.content)
        .bind(&now)
        .execute(&mut *tx)
        .await?;
        let post_id = post_result.last_insert_rowid();

        sqlx::query("UPDATE topics SET post_count = 1, last_post_id = ? WHERE id = ?")
            .bind(post_id)
            .bind(topic_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("UPDATE users SET post_count = post_count + 1 WHERE id = ?")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(Topic {
            id: topic_id,
            forum_id,
            user_id,
            title: form.title.clone(),
            post_count: 1,
            last_post_id: Some(post_id),
            created_at: now,
        })
    }

    /// Delete a topic and everything in it.
    ///
    /// Collects the distinct posting users first and recomputes their post
    /// counts after the cascade, the statistic adjustment the models rely on.
    pub async fn delete_topic(&self, id: i64) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let involved_rows = sqlx::query("SELECT DISTINCT user_id FROM posts WHERE topic_id = ?")
            .bind(id)
            .fetch_all(&mut *tx)
            .await?;
        let involved: Vec<i64> = involved_rows.iter().map(|r| r.get("user_id")).collect();

        sqlx::query("DELETE FROM posts WHERE topic_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM topics WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Topic {} not found", id)));
        }

        for user_id in involved {
            sqlx::query(
                "UPDATE users SET post_count = (SELECT COUNT(*) FROM posts WHERE user_id = ?) WHERE id = ?",
            )
            .bind(user_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    // ==================== POST OPERATIONS ====================

    /// Get a post by ID.
    pub async fn get_post(&self, id: i64) -> Result<Option<Post>, AppError> {
        let row = sqlx::query(
            r#"SELECT id, topic_id, user_id, content, first_post, created_at, date_modified
               FROM posts WHERE id = ?"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(post_from_row))
    }

    /// Count all posts.
    pub async fn count_posts(&self) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT COUNT(*) AS cnt FROM posts")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("cnt"))
    }

    /// List a topic's posts oldest first, page-sliced.
    pub async fn paginate_posts(
        &self,
        topic_id: i64,
        page: u32,
        per_page: u32,
    ) -> Result<Page<Post>, AppError> {
        let page = page.max(1);

        let total_row = sqlx::query("SELECT COUNT(*) AS cnt FROM posts WHERE topic_id = ?")
            .bind(topic_id)
            .fetch_one(&self.pool)
            .await?;
        let total: i64 = total_row.get("cnt");

        let rows = sqlx::query(
            r#"SELECT id, topic_id, user_id, content, first_post, created_at, date_modified
               FROM posts WHERE topic_id = ?
               ORDER BY id
               LIMIT ? OFFSET ?"#,
        )
        .bind(topic_id)
        .bind(i64::from(per_page))
        .bind(offset(page, per_page))
        .fetch_all(&self.pool)
        .await?;

        let items = rows.iter().map(post_from_row).collect();
        Ok(Page::new(items, page, per_page, total))
    }

    /// Create a reply in a topic, bumping the topic and user counters.
    pub async fn create_post(
        &self,
        topic_id: i64,
        user_id: i64,
        content: &str,
    ) -> Result<Post, AppError> {
        let now = Utc::now().to_rfc3339();
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"INSERT INTO posts (topic_id, user_id, content, first_post, created_at)
               VALUES (?, ?, ?, 0, ?)"#,
        )
        .bind(topic_id)
        .bind(user_id)
        .bind(content)
        .bind(&now)
        .execute(&mut *tx)
        .await?;
        let post_id = result.last_insert_rowid();

        sqlx::query(
            "UPDATE topics SET post_count = post_count + 1, last_post_id = ? WHERE id = ?",
        )
        .bind(post_id)
        .bind(topic_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("UPDATE users SET post_count = post_count + 1 WHERE id = ?")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(Post {
            id: post_id,
            topic_id,
            user_id,
            content: content.to_string(),
            first_post: false,
            created_at: now,
            date_modified: None,
        })
    }

    /// Overwrite a post's content and stamp its modification time.
    pub async fn update_post(&self, id: i64, content: &str) -> Result<Post, AppError> {
        let existing = self
            .get_post(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Post {} not found", id)))?;

        let now = Utc::now().to_rfc3339();

        sqlx::query("UPDATE posts SET content = ?, date_modified = ? WHERE id = ?")
            .bind(content)
            .bind(&now)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(Post {
            content: content.to_string(),
            date_modified: Some(now),
            ..existing
        })
    }

    /// Delete a reply, repairing the topic's counters and the author's
    /// post count.
    ///
    /// First posts are not deleted here; callers route those through
    /// [`Repository::delete_topic`].
    pub async fn delete_reply(&self, post: &Post) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(post.id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Post {} not found", post.id)));
        }

        sqlx::query(
            r#"UPDATE topics
               SET post_count = post_count - 1,
                   last_post_id = (SELECT MAX(id) FROM posts WHERE topic_id = ?)
               WHERE id = ?"#,
        )
        .bind(post.topic_id)
        .bind(post.topic_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("UPDATE users SET post_count = post_count - 1 WHERE id = ?")
            .bind(post.user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}

fn offset(page: u32, per_page: u32) -> i64 {
    i64::from(page - 1) * i64::from(per_page)
}

// Helper functions for row conversion

fn user_from_row(row: &sqlx::sqlite::SqliteRow) -> User {
    User {
        id: row.get("id"),
        username: row.get("username"),
        post_count: row.get("post_count"),
        created_at: row.get("created_at"),
    }
}

fn category_from_row(row: &sqlx::sqlite::SqliteRow) -> Category {
    Category {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        position: row.get("position"),
    }
}

fn forum_from_row(row: &sqlx::sqlite::SqliteRow) -> Forum {
    Forum {
        id: row.get("id"),
        category_id: row.get("category_id"),
        title: row.get("title"),
        description: row.get("description"),
        position: row.get("position"),
    }
}

fn topic_from_row(row: &sqlx::sqlite::SqliteRow) -> Topic {
    Topic {
        id: row.get("id"),
        forum_id: row.get("forum_id"),
        user_id: row.get("user_id"),
        title: row.get("title"),
        post_count: row.get("post_count"),
        last_post_id: row.get("last_post_id"),
        created_at: row.get("created_at"),
    }
}

fn post_from_row(row: &sqlx::sqlite::SqliteRow) -> Post {
    let first_post: i32 = row.get("first_post");
    Post {
        id: row.get("id"),
        topic_id: row.get("topic_id"),
        user_id: row.get("user_id"),
        content: row.get("content"),
        first_post: first_post != 0,
        created_at: row.get("created_at"),
        date_modified: row.get("date_modified"),
    }
}
