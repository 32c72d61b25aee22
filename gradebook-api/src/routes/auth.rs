/// Authentication endpoints
///
/// Login is a one-shot password check. No session or token is issued.
///
/// # Endpoints
///
/// - `POST /register` - Register new user
/// - `POST /login` - Check credentials

use crate::{
    app::AppState,
    error::ApiResult,
    routes::MessageResponse,
};
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use gradebook_shared::credentials;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login request
///
/// Missing fields read as empty strings; an unknown username is a 404 and a
/// wrong password a 401, so nothing is validated up front.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
}

/// Register a new user
///
/// # Endpoint
///
/// ```text
/// POST /register
/// Content-Type: application/json
///
/// { "username": "alice", "password": "wonderland" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Missing fields or username already exists
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Json(req) = payload?;
    req.validate()?;

    credentials::register(state.store.as_ref(), &req.username, &req.password).await?;

    Ok(Json(MessageResponse::new("Registration successful!")))
}

/// Check a username and password
///
/// # Endpoint
///
/// ```text
/// POST /login
/// Content-Type: application/json
///
/// { "username": "alice", "password": "wonderland" }
/// ```
///
/// # Errors
///
/// - `404 Not Found`: No such user
/// - `401 Unauthorized`: Wrong password
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<LoginResponse>> {
    let Json(req) = payload?;

    credentials::login(state.store.as_ref(), &req.username, &req.password).await?;

    Ok(Json(LoginResponse {
        success: true,
        message: "Login successful".to_string(),
    }))
}
