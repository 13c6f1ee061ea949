mod memory;

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

pub use memory::MemoryStore;

use crate::blogs::repo::BlogStore;
use crate::users::repo::UserStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0}")]
    Validation(String),
    #[error("expected `{field}` to be unique. Value: `{value}`")]
    Duplicate { field: &'static str, value: String },
    #[error("record not found")]
    NotFound,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Everything the handlers persist through.
pub trait Store: BlogStore + UserStore {}

impl<T: BlogStore + UserStore> Store for T {}

/// PostgreSQL-backed store.
#[derive(Clone)]
pub struct PgStore {
    pub(crate) pool: PgPool,
}

impl PgStore {
    pub async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .context("connect to database")?;
        Ok(Self { pool })
    }

    pub async fn migrate(&self) -> anyhow::Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("run migrations")?;
        Ok(())
    }
}
