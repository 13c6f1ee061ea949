//! Bearer-token authentication.
//!
//! Tokens are issued outside this service with the shared secret; this module
//! only signs them for callers that hold [`JwtKeys`] and verifies them on
//! incoming requests through the [`AuthUser`] extractor.

mod claims;
pub mod extractors;
pub mod services;

pub use extractors::AuthUser;
pub use services::{hash_password, JwtKeys};
