//! # Gradebook Shared Library
//!
//! This crate contains the domain core of the gradebook service: user
//! credentials, student records, grading rules and the storage backends that
//! persist them.
//!
//! ## Module Organization
//!
//! - `auth`: Password hashing and verification
//! - `credentials`: Registration and login checks on top of a [`store::UserStore`]
//! - `db`: PostgreSQL pool and migration helpers
//! - `error`: Domain error taxonomy
//! - `grading`: Grade and CGPA step functions
//! - `models`: User and student data types
//! - `projection`: Student records enriched with computed metrics
//! - `store`: Storage traits with PostgreSQL and in-memory backends
//! - `students`: Validated student record operations

pub mod auth;
pub mod credentials;
pub mod db;
pub mod error;
pub mod grading;
pub mod models;
pub mod projection;
pub mod store;
pub mod students;

/// Current version of the gradebook shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
