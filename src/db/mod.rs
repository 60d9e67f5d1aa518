pub mod memory;
pub mod users;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::User;

pub use memory::MemoryUserStore;
pub use users::PgUserStore;

#[derive(Debug)]
pub enum StoreError {
    NotFound,
    Conflict(String),
    Corrupt(String),
    Database(sqlx::Error),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::NotFound => write!(f, "record not found"),
            StoreError::Conflict(msg) => write!(f, "conflict: {msg}"),
            StoreError::Corrupt(msg) => write!(f, "corrupt record: {msg}"),
            StoreError::Database(err) => write!(f, "database error: {err}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                StoreError::Conflict(db_err.message().to_string())
            }
            _ => StoreError::Database(err),
        }
    }
}

/// Persistence operations the user handlers depend on.
///
/// `update` replaces the mutable fields (`name`, `email`, `role`) of the record
/// with the same id; `id` and `business_id` are never rewritten. `update` and
/// `delete` report [`StoreError::NotFound`] when no record matches.
/// `list_for_business` never returns admins.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create(&self, user: &User) -> Result<User, StoreError>;
    async fn update(&self, user: &User) -> Result<User, StoreError>;
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;
    async fn get_by_id(&self, id: Uuid) -> Result<User, StoreError>;
    async fn list_for_business(&self, business_id: Uuid) -> Result<Vec<User>, StoreError>;
}
