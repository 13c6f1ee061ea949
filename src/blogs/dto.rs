use serde::{Deserialize, Deserializer, Serialize};

use crate::blogs::repo_types::Blog;
use crate::blogs::stats::{AuthorBlogs, AuthorLikes};

/// Request body for creating a blog. `title` and `url` are checked by the
/// store so a missing field becomes a validation message, not a parse error.
#[derive(Debug, Deserialize)]
pub struct CreateBlogRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: Option<i64>,
}

/// Request body for updating a blog. Absent fields keep their stored value;
/// `"author": null` clears the author.
#[derive(Debug, Deserialize)]
pub struct UpdateBlogRequest {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub author: Option<Option<String>>,
    pub url: Option<String>,
    pub likes: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct BlogStats {
    pub total_likes: i64,
    pub favorite_blog: Option<Blog>,
    pub most_blogs: Option<AuthorBlogs>,
    pub most_likes: Option<AuthorLikes>,
}

/// Absent => `None`, `null` => `Some(None)`, value => `Some(Some(v))`.
/// Needs `#[serde(default)]` on the field so absence reaches the `None` arm.
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Some(Option::deserialize(deserializer)?))
}
