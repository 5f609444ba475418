//! Scene Store for the narrative pipeline core.
//!
//! Provides the `PgSceneStore` implementation of
//! `storypool_core::SceneStore`, backed by the `pipeline_result` table.

pub mod error;
pub mod repo;

pub use error::{DbError, DbResult};
pub use repo::PgSceneStore;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Create a new database connection pool.
pub async fn create_pool(database_url: &str) -> DbResult<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Run database migrations.
pub async fn run_migrations(pool: &PgPool) -> DbResult<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
