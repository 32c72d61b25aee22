/// Registration and login checks
///
/// Usernames and passwords are trimmed before use, both when registering and
/// when verifying, so `" alice "` and `"alice"` are the same account.

use crate::auth::password::{hash_password, verify_password};
use crate::error::{RecordError, RecordResult};
use crate::models::user::CreateUser;
use crate::store::UserStore;
use tracing::{debug, info};

/// Registers a new account
///
/// # Errors
///
/// - `InvalidInput` if username or password is blank
/// - `DuplicateUsername` if the username is taken
pub async fn register<S>(store: &S, username: &str, password: &str) -> RecordResult<()>
where
    S: UserStore + ?Sized,
{
    let username = username.trim();
    let password = password.trim();
    if username.is_empty() || password.is_empty() {
        return Err(RecordError::InvalidInput(
            "Username and password required".to_string(),
        ));
    }

    let password_hash = hash_password(password)?;
    let user = store
        .insert_user(CreateUser {
            username: username.to_string(),
            password_hash,
        })
        .await?;

    info!(user_id = %user.id, username = %user.username, "User registered");
    Ok(())
}

/// Checks a password against the stored hash
///
/// Read-only. Returns `Ok(false)` for a wrong password.
///
/// # Errors
///
/// `UserNotFound` if no account has this username.
pub async fn verify<S>(store: &S, username: &str, password: &str) -> RecordResult<bool>
where
    S: UserStore + ?Sized,
{
    let username = username.trim();
    let user = store
        .find_user_by_username(username)
        .await?
        .ok_or(RecordError::UserNotFound)?;

    let valid = verify_password(password.trim(), &user.password_hash)?;
    debug!(username, valid, "Password verified");
    Ok(valid)
}

/// Like [`verify`], but a wrong password is `InvalidPassword`
pub async fn login<S>(store: &S, username: &str, password: &str) -> RecordResult<()>
where
    S: UserStore + ?Sized,
{
    if verify(store, username, password).await? {
        Ok(())
    } else {
        Err(RecordError::InvalidPassword)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;

    #[tokio::test]
    async fn test_register_then_verify() {
        let store = MemoryStore::new();
        register(&store, "alice", "wonderland").await.unwrap();

        assert!(verify(&store, "alice", "wonderland").await.unwrap());
        assert!(!verify(&store, "alice", "looking-glass").await.unwrap());
    }

    #[tokio::test]
    async fn test_plaintext_never_stored() {
        let store = MemoryStore::new();
        register(&store, "bob", "plain").await.unwrap();

        let user = store.find_user_by_username("bob").await.unwrap().unwrap();
        assert_ne!(user.password_hash, "plain");
        assert!(user.password_hash.starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn test_register_trims_credentials() {
        let store = MemoryStore::new();
        register(&store, "  carol ", " pw ").await.unwrap();

        assert!(store.find_user_by_username("carol").await.unwrap().is_some());
        assert!(verify(&store, "carol", "pw").await.unwrap());
    }

    #[tokio::test]
    async fn test_register_blank_fields() {
        let store = MemoryStore::new();
        assert!(matches!(
            register(&store, "   ", "pw").await,
            Err(RecordError::InvalidInput(_))
        ));
        assert!(matches!(
            register(&store, "dave", "").await,
            Err(RecordError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_duplicate_username() {
        let store = MemoryStore::new();
        register(&store, "erin", "one").await.unwrap();

        let err = register(&store, "erin", "two").await.unwrap_err();
        assert!(matches!(err, RecordError::DuplicateUsername));
        // First password still works
        assert!(verify(&store, "erin", "one").await.unwrap());
    }

    #[tokio::test]
    async fn test_verify_unknown_user() {
        let store = MemoryStore::new();
        let err = verify(&store, "ghost", "pw").await.unwrap_err();
        assert!(matches!(err, RecordError::UserNotFound));
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let store = MemoryStore::new();
        register(&store, "frank", "right").await.unwrap();

        assert!(login(&store, "frank", "right").await.is_ok());
        assert!(matches!(
            login(&store, "frank", "wrong").await,
            Err(RecordError::InvalidPassword)
        ));
    }
}
