use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::blogs::repo::BlogStore;
use crate::blogs::repo_types::{Blog, BlogChanges, NewBlog, Owner};
use crate::store::StoreError;
use crate::users::repo::UserStore;
use crate::users::repo_types::{BlogSummary, NewUser, User};

/// Store kept in process memory. Used by the tests and when no database is
/// configured; contents are lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    users: Vec<UserRecord>,
    blogs: Vec<BlogRecord>,
}

struct UserRecord {
    id: Uuid,
    username: String,
    name: Option<String>,
    password_hash: String,
    blogs: Vec<Uuid>,
}

struct BlogRecord {
    id: Uuid,
    title: String,
    author: Option<String>,
    url: String,
    likes: i64,
    user_id: Uuid,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Inner {
    fn user(&self, id: Uuid) -> Option<&UserRecord> {
        self.users.iter().find(|u| u.id == id)
    }

    fn populate(&self, b: &BlogRecord) -> Option<Blog> {
        let owner = self.user(b.user_id)?;
        Some(Blog {
            id: b.id,
            title: b.title.clone(),
            author: b.author.clone(),
            url: b.url.clone(),
            likes: b.likes,
            user: Owner {
                id: owner.id,
                username: owner.username.clone(),
                name: owner.name.clone(),
            },
        })
    }

    fn to_user(&self, u: &UserRecord) -> User {
        let blogs = u
            .blogs
            .iter()
            .filter_map(|id| self.blogs.iter().find(|b| b.id == *id))
            .map(|b| BlogSummary {
                id: b.id,
                title: b.title.clone(),
                author: b.author.clone(),
                url: b.url.clone(),
            })
            .collect();
        User {
            id: u.id,
            username: u.username.clone(),
            name: u.name.clone(),
            password_hash: u.password_hash.clone(),
            blogs,
        }
    }
}

#[async_trait]
impl BlogStore for MemoryStore {
    async fn list_blogs(&self) -> Result<Vec<Blog>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.blogs.iter().filter_map(|b| inner.populate(b)).collect())
    }

    async fn find_blog(&self, id: Uuid) -> Result<Option<Blog>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .blogs
            .iter()
            .find(|b| b.id == id)
            .and_then(|b| inner.populate(b)))
    }

    async fn insert_blog(&self, blog: NewBlog) -> Result<Blog, StoreError> {
        let checked = blog.validate()?;
        let mut inner = self.inner.write().await;
        if inner.user(blog.user_id).is_none() {
            return Err(StoreError::NotFound);
        }
        let record = BlogRecord {
            id: Uuid::new_v4(),
            title: checked.title,
            author: blog.author,
            url: checked.url,
            likes: blog.likes,
            user_id: blog.user_id,
        };
        let saved = inner.populate(&record).ok_or(StoreError::NotFound)?;
        inner.blogs.push(record);
        Ok(saved)
    }

    async fn update_blog(&self, id: Uuid, changes: BlogChanges) -> Result<Blog, StoreError> {
        changes.validate()?;
        let mut inner = self.inner.write().await;
        let record = inner
            .blogs
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(StoreError::NotFound)?;
        if let Some(title) = changes.title {
            record.title = title;
        }
        if let Some(author) = changes.author {
            record.author = author;
        }
        if let Some(url) = changes.url {
            record.url = url;
        }
        if let Some(likes) = changes.likes {
            record.likes = likes;
        }
        let inner = inner.downgrade();
        inner
            .blogs
            .iter()
            .find(|b| b.id == id)
            .and_then(|b| inner.populate(b))
            .ok_or(StoreError::NotFound)
    }

    async fn delete_blog(&self, id: Uuid) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let before = inner.blogs.len();
        inner.blogs.retain(|b| b.id != id);
        if inner.blogs.len() == before {
            return Err(StoreError::NotFound);
        }
        for user in inner.users.iter_mut() {
            user.blogs.retain(|b| *b != id);
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.users.iter().map(|u| inner.to_user(u)).collect())
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.user(id).map(|u| inner.to_user(u)))
    }

    async fn insert_user(&self, user: NewUser) -> Result<User, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.users.iter().any(|u| u.username == user.username) {
            return Err(StoreError::Duplicate {
                field: "username",
                value: user.username,
            });
        }
        let record = UserRecord {
            id: Uuid::new_v4(),
            username: user.username,
            name: user.name,
            password_hash: user.password_hash,
            blogs: Vec::new(),
        };
        let created = inner.to_user(&record);
        inner.users.push(record);
        Ok(created)
    }

    async fn append_blog(&self, user_id: Uuid, blog_id: Uuid) -> Result<(), StoreError> {
        // read and write happen under one write guard
        let mut inner = self.inner.write().await;
        let user = inner
            .users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or(StoreError::NotFound)?;
        if !user.blogs.contains(&blog_id) {
            user.blogs.push(blog_id);
        }
        Ok(())
    }
}
