use std::{path::Path, time::Duration};

use sqlx::{PgPool, migrate::Migrator, postgres::PgPoolOptions};

use crate::model::error::DatabaseResult;

const MAX_CONNECTIONS: u32 = 10;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct DbConnection {
    pool: PgPool, // cloning is cheap, pool is just a wrapper around Arc<>
}

impl DbConnection {
    /// Lazy pool; the first query opens the first connection.
    pub fn connect(database_uri: &str) -> DatabaseResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect_lazy(database_uri)?;
        Ok(Self { pool })
    }

    /// Applies the schema files found in `dir`, in file-name order.
    pub async fn migrate(&self, dir: &Path) -> DatabaseResult<()> {
        let migrator = Migrator::new(dir).await?;
        tracing::debug!("applying migrations from {}", dir.display());
        migrator.run(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}
