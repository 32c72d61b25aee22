/// In-memory storage backend
///
/// Both tables live behind a single `RwLock`, so a uniqueness check and the
/// insert that follows it cannot interleave with another writer. Vectors keep
/// insertion order, which is the storage order reported by `list_students`.
///
/// Data is lost when the process exits. Used by tests and by
/// `STORAGE_BACKEND=memory`.

use super::{Store, StudentStore, UserStore};
use crate::error::{RecordError, RecordResult};
use crate::models::student::{CreateStudent, Student, UpdateStudent};
use crate::models::user::{CreateUser, User};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    students: Vec<Student>,
}

/// Store holding everything in process memory
///
/// Clones share the same tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert_user(&self, data: CreateUser) -> RecordResult<User> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.username == data.username) {
            return Err(RecordError::DuplicateUsername);
        }

        let user = User {
            id: Uuid::new_v4(),
            username: data.username,
            password_hash: data.password_hash,
            created_at: Utc::now(),
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn find_user_by_username(&self, username: &str) -> RecordResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.username == username).cloned())
    }
}

#[async_trait]
impl StudentStore for MemoryStore {
    async fn insert_student(&self, data: CreateStudent) -> RecordResult<Student> {
        let mut tables = self.tables.write().await;
        if tables.students.iter().any(|s| s.roll == data.roll) {
            return Err(RecordError::DuplicateRoll);
        }

        let now = Utc::now();
        let student = Student {
            id: Uuid::new_v4(),
            roll: data.roll,
            name: data.name,
            marks: data.marks,
            created_at: now,
            updated_at: now,
        };
        tables.students.push(student.clone());
        Ok(student)
    }

    async fn update_student(&self, roll: &str, data: UpdateStudent) -> RecordResult<Option<Student>> {
        let mut tables = self.tables.write().await;
        let Some(student) = tables.students.iter_mut().find(|s| s.roll == roll) else {
            return Ok(None);
        };

        if let Some(name) = data.name {
            student.name = name;
        }
        if let Some(marks) = data.marks {
            student.marks = marks;
        }
        student.updated_at = Utc::now();
        Ok(Some(student.clone()))
    }

    async fn find_student(&self, roll: &str) -> RecordResult<Option<Student>> {
        let tables = self.tables.read().await;
        Ok(tables.students.iter().find(|s| s.roll == roll).cloned())
    }

    async fn list_students(&self) -> RecordResult<Vec<Student>> {
        Ok(self.tables.read().await.students.clone())
    }

    async fn delete_student(&self, roll: &str) -> RecordResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.students.len();
        tables.students.retain(|s| s.roll != roll);
        Ok(tables.students.len() < before)
    }
}

#[async_trait]
impl Store for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> RecordResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::student::Marks;

    fn new_student(roll: &str, name: &str) -> CreateStudent {
        CreateStudent {
            roll: roll.to_string(),
            name: name.to_string(),
            marks: Marks::from([("Math".to_string(), 70.0)]),
        }
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let store = MemoryStore::new();
        let user = CreateUser {
            username: "alice".to_string(),
            password_hash: "hash".to_string(),
        };

        store.insert_user(user.clone()).await.unwrap();
        let err = store.insert_user(user).await.unwrap_err();
        assert!(matches!(err, RecordError::DuplicateUsername));
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order() {
        let store = MemoryStore::new();
        for roll in ["3", "1", "2"] {
            store.insert_student(new_student(roll, "x")).await.unwrap();
        }

        let rolls: Vec<String> = store
            .list_students()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.roll)
            .collect();
        assert_eq!(rolls, vec!["3", "1", "2"]);
    }

    #[tokio::test]
    async fn test_update_missing_roll_returns_none() {
        let store = MemoryStore::new();
        let updated = store
            .update_student("nope", UpdateStudent::default())
            .await
            .unwrap();
        assert!(updated.is_none());
    }

    #[tokio::test]
    async fn test_delete_reports_whether_removed() {
        let store = MemoryStore::new();
        store.insert_student(new_student("1", "Alice")).await.unwrap();

        assert!(store.delete_student("1").await.unwrap());
        assert!(!store.delete_student("1").await.unwrap());
        assert!(store.find_student("1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_concurrent_inserts_one_winner() {
        let store = MemoryStore::new();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.insert_student(new_student("42", "Racer")).await })
            })
            .collect();

        let mut successes = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => successes += 1,
                Err(err) => assert!(matches!(err, RecordError::DuplicateRoll)),
            }
        }
        assert_eq!(successes, 1);
        assert_eq!(store.list_students().await.unwrap().len(), 1);
    }
}
