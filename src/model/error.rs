use thiserror::Error;

pub type DatabaseResult<T> = std::result::Result<T, DatabaseError>;

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("sqlx migrate error: {0}")]
    SqlxMigrateError(#[from] sqlx::migrate::MigrateError),
    #[error("sqlx error: {0}")]
    SqlxError(#[from] sqlx::Error),
}

impl DatabaseError {
    /// True when postgres rejected a write because of a unique constraint.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            Self::SqlxError(sqlx::Error::Database(e)) => e.is_unique_violation(),
            _ => false,
        }
    }
}
