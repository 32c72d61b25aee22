/// Database models for the gradebook
///
/// # Models
///
/// - `user`: Login accounts (username + Argon2id hash)
/// - `student`: Student records with per-subject marks
///
/// Each model owns its SQL. The storage traits in [`crate::store`] wrap these
/// queries and translate constraint violations into domain errors.

pub mod student;
pub mod user;
