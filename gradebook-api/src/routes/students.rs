/// Student record endpoints
///
/// # Endpoints
///
/// - `POST /add` - Add a student
/// - `PUT /update/:roll` - Update name and/or marks
/// - `GET /show` - All students with computed metrics
/// - `GET /search/:roll` - One student with computed metrics
/// - `DELETE /delete/:roll` - Remove a student

use crate::{
    app::AppState,
    error::ApiResult,
    routes::MessageResponse,
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use gradebook_shared::{
    models::student::Marks,
    projection::{project, project_all, ProjectedRecord},
    students,
};
use serde::Deserialize;
use validator::Validate;

/// Add student request
#[derive(Debug, Deserialize, Validate)]
pub struct AddStudentRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Roll is required"))]
    pub roll: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    /// Subject -> score; omitted means no marks yet
    #[serde(default)]
    pub marks: Marks,
}

/// Update student request
///
/// An absent field (or `null`) is left unchanged. `"marks": {}` clears all
/// marks.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateStudentRequest {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub marks: Option<Marks>,
}

/// Add a student
///
/// # Endpoint
///
/// ```text
/// POST /add
/// Content-Type: application/json
///
/// { "roll": "1", "name": "Alice", "marks": { "Math": 95, "Physics": 85 } }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Missing roll/name or roll already exists
pub async fn add_student(
    State(state): State<AppState>,
    payload: Result<Json<AddStudentRequest>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Json(req) = payload?;
    req.validate()?;

    students::add(state.store.as_ref(), &req.roll, &req.name, req.marks).await?;

    Ok(Json(MessageResponse::new("Student added successfully!")))
}

/// Update a student's name and/or marks
///
/// # Errors
///
/// - `404 Not Found`: No student with this roll
pub async fn update_student(
    State(state): State<AppState>,
    Path(roll): Path<String>,
    payload: Result<Json<UpdateStudentRequest>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Json(req) = payload?;

    students::update(state.store.as_ref(), &roll, req.name.as_deref(), req.marks).await?;

    Ok(Json(MessageResponse::new("Student updated successfully!")))
}

/// List every student with total, percentage, grade and CGPA
pub async fn show_students(State(state): State<AppState>) -> ApiResult<Json<Vec<ProjectedRecord>>> {
    let all = students::list(state.store.as_ref()).await?;
    Ok(Json(project_all(&all)))
}

/// Look up one student by roll
///
/// # Errors
///
/// - `404 Not Found`: No student with this roll
pub async fn search_student(
    State(state): State<AppState>,
    Path(roll): Path<String>,
) -> ApiResult<Json<ProjectedRecord>> {
    let student = students::get(state.store.as_ref(), &roll).await?;
    Ok(Json(project(&student)))
}

/// Delete a student by roll
///
/// # Errors
///
/// - `404 Not Found`: No student with this roll
pub async fn delete_student(
    State(state): State<AppState>,
    Path(roll): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    students::delete(state.store.as_ref(), &roll).await?;
    Ok(Json(MessageResponse::new("Student deleted successfully!")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_distinguishes_empty_from_absent() {
        let omitted: UpdateStudentRequest = serde_json::from_str(r#"{"name": "Bob"}"#).unwrap();
        assert!(omitted.marks.is_none());

        let cleared: UpdateStudentRequest = serde_json::from_str(r#"{"marks": {}}"#).unwrap();
        assert_eq!(cleared.marks, Some(Marks::new()));

        let null: UpdateStudentRequest = serde_json::from_str(r#"{"marks": null}"#).unwrap();
        assert!(null.marks.is_none());
    }

    #[test]
    fn test_add_request_accepts_integer_and_fractional_marks() {
        let req: AddStudentRequest =
            serde_json::from_str(r#"{"roll": "1", "name": "Alice", "marks": {"Math": 95, "Art": 72.5}}"#)
                .unwrap();
        assert_eq!(req.marks["Math"], 95.0);
        assert_eq!(req.marks["Art"], 72.5);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_add_request_missing_name_fails_validation() {
        let req: AddStudentRequest = serde_json::from_str(r#"{"roll": "1"}"#).unwrap();
        assert!(req.marks.is_empty());
        assert!(req.validate().unwrap_err().field_errors().contains_key("name"));
    }
}
