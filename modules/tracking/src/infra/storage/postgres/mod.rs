//! sqlx-backed repositories. Row structs stay private to this module; the
//! ports speak domain types only.

mod tasks;
mod users;

pub use tasks::PgTaskRepository;
pub use users::PgUserRepository;

use sqlx::migrate::Migrator;
use sqlx::PgPool;

pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Bring the schema up to date. Idempotent.
pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    MIGRATOR.run(pool).await?;
    Ok(())
}
