//! Fixtures shared by the HTTP tests.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use crate::app::build_app;
use crate::auth::JwtKeys;
use crate::blogs::repo::BlogStore;
use crate::blogs::repo_types::{Blog, NewBlog};
use crate::config::AppConfig;
use crate::state::AppState;
use crate::users::repo::UserStore;
use crate::users::repo_types::{NewUser, User};

pub const INITIAL_BLOGS: [(&str, &str, &str, i64); 5] = [
    ("title 1", "author 1", "http://url1.com", 10),
    ("title 2", "author 2", "http://url2.com", 2),
    ("title 3", "author 3", "http://url3.com", 5),
    ("title 4", "author 2", "http://url4.com", 33),
    ("title 5", "author 3", "http://url5.com", 11),
];

pub fn test_state() -> AppState {
    AppState::in_memory(AppConfig::for_tests())
}

pub fn app(state: &AppState) -> Router {
    build_app(state.clone())
}

/// Inserts a user directly, skipping password hashing.
pub async fn seed_user(state: &AppState, username: &str) -> User {
    state
        .store
        .insert_user(NewUser {
            username: username.into(),
            name: Some(format!("{username} name")),
            password_hash: "$argon2id$v=19$placeholder".into(),
        })
        .await
        .expect("seed user")
}

/// Creates the initial blogs owned by `owner`, the way the create handler does.
pub async fn seed_blogs(state: &AppState, owner: &User) -> Vec<Blog> {
    let mut blogs = Vec::new();
    for (title, author, url, likes) in INITIAL_BLOGS {
        let blog = state
            .store
            .insert_blog(NewBlog {
                title: Some(title.into()),
                author: Some(author.into()),
                url: Some(url.into()),
                likes,
                user_id: owner.id,
            })
            .await
            .expect("seed blog");
        state
            .store
            .append_blog(owner.id, blog.id)
            .await
            .expect("append blog");
        blogs.push(blog);
    }
    blogs
}

pub fn token_for(state: &AppState, user: &User) -> String {
    JwtKeys::from(&state.config.jwt)
        .sign(user.id, &user.username)
        .expect("sign token")
}

pub fn request(method: Method, uri: &str, body: Option<Value>, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    }
}

/// Sends `req` and returns the status and body: `Null` when empty, a JSON
/// string when the body is not JSON (axum's own rejections).
pub async fn send(state: &AppState, req: Request<Body>) -> (StatusCode, Value) {
    let res = app(state).oneshot(req).await.expect("infallible");
    let status = res.status();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .expect("read body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, body)
}

/// True when any object in the tree carries a password-like key.
pub fn has_password_field(value: &Value) -> bool {
    match value {
        Value::Object(map) => map
            .iter()
            .any(|(k, v)| k.to_lowercase().contains("password") || has_password_field(v)),
        Value::Array(items) => items.iter().any(has_password_field),
        _ => false,
    }
}
