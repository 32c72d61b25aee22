/// Authentication utilities
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
///
/// Login in the gradebook is a one-shot password check; there are no
/// sessions or tokens to manage.
pub mod password;
