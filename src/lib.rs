pub mod app;
pub mod auth;
pub mod blogs;
pub mod config;
pub mod error;
pub mod extract;
pub mod state;
pub mod store;
pub mod telemetry;
pub mod users;

#[cfg(test)]
mod test_support;
