use serde::Deserialize;

/// Request body for user registration. Fields are optional so that a missing
/// username or password gets the validation message instead of a parse error.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
}
