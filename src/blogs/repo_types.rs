use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::store::StoreError;

/// Minimal projection of the owning user embedded in every blog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Owner {
    pub id: Uuid,
    pub username: String,
    pub name: Option<String>,
}

/// Blog record with its owner populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Blog {
    pub id: Uuid,
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: i64,
    pub user: Owner,
}

/// Row shape of `blogs JOIN users`.
#[derive(Debug, FromRow)]
pub struct BlogRow {
    pub id: Uuid,
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: i64,
    pub user_id: Uuid,
    pub username: String,
    pub name: Option<String>,
}

impl From<BlogRow> for Blog {
    fn from(r: BlogRow) -> Self {
        Self {
            id: r.id,
            title: r.title,
            author: r.author,
            url: r.url,
            likes: r.likes,
            user: Owner {
                id: r.user_id,
                username: r.username,
                name: r.name,
            },
        }
    }
}

/// Blog about to be inserted. Required fields are still optional here: the
/// store checks them in [`NewBlog::validate`].
#[derive(Debug, Clone)]
pub struct NewBlog {
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: i64,
    pub user_id: Uuid,
}

/// Validated fields of a [`NewBlog`].
#[derive(Debug)]
pub struct CheckedBlog {
    pub title: String,
    pub url: String,
}

impl NewBlog {
    pub fn validate(&self) -> Result<CheckedBlog, StoreError> {
        let mut missing = Vec::new();
        let title = required(&self.title, "title", &mut missing);
        let url = required(&self.url, "url", &mut missing);
        match (title, url) {
            (Some(title), Some(url)) => Ok(CheckedBlog { title, url }),
            _ => Err(StoreError::Validation(format!(
                "Blog validation failed: {}",
                missing.join(", ")
            ))),
        }
    }
}

fn required(value: &Option<String>, field: &str, missing: &mut Vec<String>) -> Option<String> {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => Some(v.to_string()),
        _ => {
            missing.push(format!("{field}: `{field}` is required"));
            None
        }
    }
}

/// Content fields replaced by an update. `None` keeps the stored value;
/// `author: Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct BlogChanges {
    pub title: Option<String>,
    pub author: Option<Option<String>>,
    pub url: Option<String>,
    pub likes: Option<i64>,
}

impl BlogChanges {
    pub fn validate(&self) -> Result<(), StoreError> {
        let empty: Vec<String> = [("title", &self.title), ("url", &self.url)]
            .into_iter()
            .filter(|(_, v)| v.as_deref().is_some_and(|s| s.trim().is_empty()))
            .map(|(field, _)| format!("{field}: `{field}` must not be empty"))
            .collect();
        if empty.is_empty() {
            Ok(())
        } else {
            Err(StoreError::Validation(format!(
                "Validation failed: {}",
                empty.join(", ")
            )))
        }
    }
}
