use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::FromRow;
use uuid::Uuid;

use crate::store::{PgStore, StoreError};
use crate::users::repo_types::{BlogSummary, NewUser, User, UserRow};

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn list_users(&self) -> Result<Vec<User>, StoreError>;
    async fn find_user(&self, id: Uuid) -> Result<Option<User>, StoreError>;
    /// Fails with [`StoreError::Duplicate`] when the username is taken.
    async fn insert_user(&self, user: NewUser) -> Result<User, StoreError>;
    /// Appends `blog_id` to the user's owned blogs. Safe under concurrent appends.
    async fn append_blog(&self, user_id: Uuid, blog_id: Uuid) -> Result<(), StoreError>;
}

#[derive(Debug, FromRow)]
struct OwnedBlogRow {
    user_id: Uuid,
    id: Uuid,
    title: String,
    author: Option<String>,
    url: String,
}

impl PgStore {
    async fn owned_blogs(&self, user_id: Option<Uuid>) -> Result<Vec<OwnedBlogRow>, StoreError> {
        let rows = sqlx::query_as::<_, OwnedBlogRow>(
            r#"
            SELECT ub.user_id, b.id, b.title, b.author, b.url
            FROM user_blogs ub
            JOIN blogs b ON b.id = ub.blog_id
            WHERE $1::uuid IS NULL OR ub.user_id = $1
            ORDER BY ub.position
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}

fn group_by_user(rows: Vec<OwnedBlogRow>) -> HashMap<Uuid, Vec<BlogSummary>> {
    let mut grouped: HashMap<Uuid, Vec<BlogSummary>> = HashMap::new();
    for r in rows {
        grouped.entry(r.user_id).or_default().push(BlogSummary {
            id: r.id,
            title: r.title,
            author: r.author,
            url: r.url,
        });
    }
    grouped
}

#[async_trait]
impl UserStore for PgStore {
    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let users = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, name, password_hash
            FROM users
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        let mut blogs = group_by_user(self.owned_blogs(None).await?);
        Ok(users
            .into_iter()
            .map(|u| {
                let owned = blogs.remove(&u.id).unwrap_or_default();
                u.with_blogs(owned)
            })
            .collect())
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let Some(user) = sqlx::query_as::<_, UserRow>(
            r#"SELECT id, username, name, password_hash FROM users WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        else {
            return Ok(None);
        };
        let owned = group_by_user(self.owned_blogs(Some(id)).await?)
            .remove(&id)
            .unwrap_or_default();
        Ok(Some(user.with_blogs(owned)))
    }

    async fn insert_user(&self, user: NewUser) -> Result<User, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (id, username, name, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, name, password_hash
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&user.username)
        .bind(&user.name)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if e.as_database_error().is_some_and(|db| db.is_unique_violation()) {
                StoreError::Duplicate {
                    field: "username",
                    value: user.username.clone(),
                }
            } else {
                StoreError::Database(e)
            }
        })?;
        Ok(row.with_blogs(Vec::new()))
    }

    async fn append_blog(&self, user_id: Uuid, blog_id: Uuid) -> Result<(), StoreError> {
        // one INSERT per append, the list itself is never rewritten
        sqlx::query(
            r#"
            INSERT INTO user_blogs (user_id, blog_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(blog_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
