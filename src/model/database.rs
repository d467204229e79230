use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::model::error::DatabaseResult;

const MAX_CONNECTIONS: u32 = 10;

#[derive(Debug, Clone)]
pub struct DbConnection {
    pool: PgPool, // cloning is cheap, pool is just a wrapper around Arc<>
}

impl DbConnection {
    /// Lazily connects, so the server starts even while postgres is still coming up.
    pub fn connect(connection_str: &str) -> DatabaseResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_lazy(connection_str)?;
        Ok(Self { pool })
    }

    pub async fn connect_now(connection_str: &str) -> DatabaseResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect(connection_str)
            .await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}
