/// API route handlers
///
/// - `health`: Health check endpoint
/// - `auth`: Registration and login
/// - `students`: Student record CRUD and projected views

pub mod auth;
pub mod health;
pub mod students;

use serde::Serialize;

/// Body for endpoints that only confirm success
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
