use async_trait::async_trait;
use uuid::Uuid;

use crate::blogs::repo_types::{Blog, BlogChanges, BlogRow, NewBlog};
use crate::store::{PgStore, StoreError};

#[async_trait]
pub trait BlogStore: Send + Sync {
    /// All blogs in insertion order, owners populated.
    async fn list_blogs(&self) -> Result<Vec<Blog>, StoreError>;
    async fn find_blog(&self, id: Uuid) -> Result<Option<Blog>, StoreError>;
    /// Validates and inserts; the owner must exist.
    async fn insert_blog(&self, blog: NewBlog) -> Result<Blog, StoreError>;
    async fn update_blog(&self, id: Uuid, changes: BlogChanges) -> Result<Blog, StoreError>;
    async fn delete_blog(&self, id: Uuid) -> Result<(), StoreError>;
}

const BLOG_COLUMNS: &str = "b.id, b.title, b.author, b.url, b.likes, b.user_id, u.username, u.name";

#[async_trait]
impl BlogStore for PgStore {
    async fn list_blogs(&self) -> Result<Vec<Blog>, StoreError> {
        let rows = sqlx::query_as::<_, BlogRow>(&format!(
            r#"
            SELECT {BLOG_COLUMNS}
            FROM blogs b
            JOIN users u ON u.id = b.user_id
            ORDER BY b.created_at, b.id
            "#
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Blog::from).collect())
    }

    async fn find_blog(&self, id: Uuid) -> Result<Option<Blog>, StoreError> {
        let row = sqlx::query_as::<_, BlogRow>(&format!(
            r#"
            SELECT {BLOG_COLUMNS}
            FROM blogs b
            JOIN users u ON u.id = b.user_id
            WHERE b.id = $1
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Blog::from))
    }

    async fn insert_blog(&self, blog: NewBlog) -> Result<Blog, StoreError> {
        let checked = blog.validate()?;
        let row = sqlx::query_as::<_, BlogRow>(&format!(
            r#"
            WITH b AS (
                INSERT INTO blogs (id, title, author, url, likes, user_id)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING id, title, author, url, likes, user_id
            )
            SELECT {BLOG_COLUMNS}
            FROM b
            JOIN users u ON u.id = b.user_id
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(checked.title)
        .bind(blog.author)
        .bind(checked.url)
        .bind(blog.likes)
        .bind(blog.user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if e.as_database_error().is_some_and(|db| db.is_foreign_key_violation()) {
                StoreError::NotFound
            } else {
                StoreError::Database(e)
            }
        })?;
        Ok(row.into())
    }

    async fn update_blog(&self, id: Uuid, changes: BlogChanges) -> Result<Blog, StoreError> {
        changes.validate()?;
        let set_author = changes.author.is_some();
        let row = sqlx::query_as::<_, BlogRow>(&format!(
            r#"
            WITH b AS (
                UPDATE blogs
                SET title = COALESCE($2, title),
                    author = CASE WHEN $6 THEN $3 ELSE author END,
                    url = COALESCE($4, url),
                    likes = COALESCE($5, likes)
                WHERE id = $1
                RETURNING id, title, author, url, likes, user_id
            )
            SELECT {BLOG_COLUMNS}
            FROM b
            JOIN users u ON u.id = b.user_id
            "#
        ))
        .bind(id)
        .bind(changes.title)
        .bind(changes.author.flatten())
        .bind(changes.url)
        .bind(changes.likes)
        .bind(set_author)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Blog::from).ok_or(StoreError::NotFound)
    }

    async fn delete_blog(&self, id: Uuid) -> Result<(), StoreError> {
        // user_blogs rows go with it (ON DELETE CASCADE)
        let result = sqlx::query("DELETE FROM blogs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
