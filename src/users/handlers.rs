use axum::{extract::State, routing::get, Json, Router};
use tracing::{info, instrument, warn};

use crate::{
    auth::hash_password,
    error::ApiError,
    extract::AppJson,
    state::AppState,
    users::{
        dto::RegisterRequest,
        repo::UserStore,
        repo_types::{NewUser, User},
    },
};

pub const CREDENTIALS_REQUIRED: &str = "Both username and password must be given. Both username and password must be at least 3 characters long.";

const MIN_LEN: usize = 3;

pub fn user_routes() -> Router<AppState> {
    Router::new().route("/users", get(list_users).post(register))
}

fn long_enough(value: &str) -> bool {
    value.chars().count() >= MIN_LEN
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RegisterRequest>,
) -> Result<Json<User>, ApiError> {
    let (Some(username), Some(password)) = (payload.username, payload.password) else {
        warn!("username or password missing");
        return Err(ApiError::BadRequest(CREDENTIALS_REQUIRED.into()));
    };
    if !long_enough(&username) || !long_enough(&password) {
        warn!(%username, "username or password too short");
        return Err(ApiError::BadRequest(CREDENTIALS_REQUIRED.into()));
    }

    let password_hash = hash_password(&password)?;
    let user = state
        .store
        .insert_user(NewUser {
            username,
            name: payload.name,
            password_hash,
        })
        .await
        .inspect_err(|e| warn!(error = %e, "user insert rejected"))?;

    info!(user_id = %user.id, username = %user.username, "user registered");
    Ok(Json(user))
}

#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    let users = state.store.list_users().await?;
    Ok(Json(users))
}
