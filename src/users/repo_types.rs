use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// User record with its owned blogs, in the order they were added.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub name: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: String, // Argon2 hash, not exposed in JSON
    pub blogs: Vec<BlogSummary>,
}

#[derive(Debug, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub name: Option<String>,
    pub password_hash: String,
}

impl UserRow {
    pub fn with_blogs(self, blogs: Vec<BlogSummary>) -> User {
        User {
            id: self.id,
            username: self.username,
            name: self.name,
            password_hash: self.password_hash,
            blogs,
        }
    }
}

/// Projection of a blog embedded in a user listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct BlogSummary {
    pub id: Uuid,
    pub title: String,
    pub author: Option<String>,
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub name: Option<String>,
    pub password_hash: String,
}
