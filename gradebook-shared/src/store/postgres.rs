/// PostgreSQL storage backend
///
/// Thin wrapper over the model queries. Its only job beyond delegation is to
/// turn unique-constraint violations into `DuplicateUsername`/`DuplicateRoll`
/// so that two concurrent inserts of the same key resolve to exactly one
/// success.

use super::{Store, StudentStore, UserStore};
use crate::db::pool::health_check;
use crate::error::{RecordError, RecordResult};
use crate::models::student::{CreateStudent, Student, UpdateStudent, ROLL_CONSTRAINT};
use crate::models::user::{CreateUser, User, USERNAME_CONSTRAINT};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

/// Store backed by a PostgreSQL connection pool
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Underlying pool, e.g. for shutdown
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Maps a unique violation on `constraint` to `duplicate`, anything else to a
/// storage error
fn map_unique_violation(err: sqlx::Error, constraint: &str, duplicate: RecordError) -> RecordError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() && db_err.constraint() == Some(constraint) {
            debug!(constraint, "Unique constraint rejected insert");
            return duplicate;
        }
    }
    RecordError::Storage(err)
}

#[async_trait]
impl UserStore for PgStore {
    async fn insert_user(&self, data: CreateUser) -> RecordResult<User> {
        User::create(&self.pool, data)
            .await
            .map_err(|e| map_unique_violation(e, USERNAME_CONSTRAINT, RecordError::DuplicateUsername))
    }

    async fn find_user_by_username(&self, username: &str) -> RecordResult<Option<User>> {
        Ok(User::find_by_username(&self.pool, username).await?)
    }
}

#[async_trait]
impl StudentStore for PgStore {
    async fn insert_student(&self, data: CreateStudent) -> RecordResult<Student> {
        Student::create(&self.pool, data)
            .await
            .map_err(|e| map_unique_violation(e, ROLL_CONSTRAINT, RecordError::DuplicateRoll))
    }

    async fn update_student(&self, roll: &str, data: UpdateStudent) -> RecordResult<Option<Student>> {
        Ok(Student::update(&self.pool, roll, data).await?)
    }

    async fn find_student(&self, roll: &str) -> RecordResult<Option<Student>> {
        Ok(Student::find_by_roll(&self.pool, roll).await?)
    }

    async fn list_students(&self) -> RecordResult<Vec<Student>> {
        Ok(Student::list(&self.pool).await?)
    }

    async fn delete_student(&self, roll: &str) -> RecordResult<bool> {
        Ok(Student::delete(&self.pool, roll).await?)
    }
}

#[async_trait]
impl Store for PgStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> RecordResult<()> {
        Ok(health_check(&self.pool).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_database_errors_stay_storage_errors() {
        let mapped = map_unique_violation(sqlx::Error::RowNotFound, ROLL_CONSTRAINT, RecordError::DuplicateRoll);
        assert!(matches!(mapped, RecordError::Storage(sqlx::Error::RowNotFound)));
    }
}
