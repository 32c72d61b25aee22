/// Storage abstraction for users and students
///
/// The service layers never hold a global connection. They receive a
/// [`Store`] (usually `Arc<dyn Store>`) and call one trait method per logical
/// operation. Each method is a single atomic write or read on the backend.
///
/// # Backends
///
/// - [`postgres::PgStore`]: PostgreSQL through a sqlx pool; uniqueness comes
///   from `UNIQUE` constraints
/// - [`memory::MemoryStore`]: insertion-ordered tables behind one `RwLock`
///
/// # Example
///
/// ```
/// use gradebook_shared::models::student::{CreateStudent, Marks};
/// use gradebook_shared::store::{memory::MemoryStore, StudentStore};
///
/// # async fn example() -> Result<(), gradebook_shared::error::RecordError> {
/// let store = MemoryStore::new();
/// store
///     .insert_student(CreateStudent {
///         roll: "1".to_string(),
///         name: "Alice".to_string(),
///         marks: Marks::new(),
///     })
///     .await?;
/// assert!(store.find_student("1").await?.is_some());
/// # Ok(())
/// # }
/// ```

pub mod memory;
pub mod postgres;

use crate::error::RecordResult;
use crate::models::student::{CreateStudent, Student, UpdateStudent};
use crate::models::user::{CreateUser, User};
use async_trait::async_trait;

/// Persistence for login accounts
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts a user; fails with `DuplicateUsername` if the name is taken
    async fn insert_user(&self, data: CreateUser) -> RecordResult<User>;

    async fn find_user_by_username(&self, username: &str) -> RecordResult<Option<User>>;
}

/// Persistence for student records
#[async_trait]
pub trait StudentStore: Send + Sync {
    /// Inserts a student; fails with `DuplicateRoll` if the roll is taken
    async fn insert_student(&self, data: CreateStudent) -> RecordResult<Student>;

    /// Applies the supplied fields; `Ok(None)` when no student has this roll
    async fn update_student(&self, roll: &str, data: UpdateStudent) -> RecordResult<Option<Student>>;

    async fn find_student(&self, roll: &str) -> RecordResult<Option<Student>>;

    /// Every student in storage order
    async fn list_students(&self) -> RecordResult<Vec<Student>>;

    /// Returns whether a row was removed
    async fn delete_student(&self, roll: &str) -> RecordResult<bool>;
}

/// A complete backend for the service
#[async_trait]
pub trait Store: UserStore + StudentStore {
    /// Short backend name for health reporting
    fn backend(&self) -> &'static str;

    /// Checks that the backend is reachable
    async fn ping(&self) -> RecordResult<()>;
}
