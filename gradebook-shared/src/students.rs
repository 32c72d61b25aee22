/// Student record operations
///
/// Validation lives here; persistence is delegated to a [`StudentStore`].
/// Each function performs exactly one store call.

use crate::error::{RecordError, RecordResult};
use crate::models::student::{CreateStudent, Marks, Student, UpdateStudent};
use crate::store::StudentStore;
use tracing::{debug, info};

/// Adds a new student
///
/// `roll` and `name` are trimmed and must not be blank.
///
/// # Errors
///
/// - `InvalidInput` for a blank roll or name
/// - `DuplicateRoll` if the roll exists; the existing record is untouched
pub async fn add<S>(store: &S, roll: &str, name: &str, marks: Marks) -> RecordResult<Student>
where
    S: StudentStore + ?Sized,
{
    let roll = roll.trim();
    let name = name.trim();
    if roll.is_empty() || name.is_empty() {
        return Err(RecordError::InvalidInput("Roll and Name required".to_string()));
    }

    let student = store
        .insert_student(CreateStudent {
            roll: roll.to_string(),
            name: name.to_string(),
            marks,
        })
        .await?;

    info!(roll = %student.roll, subjects = student.marks.len(), "Student added");
    Ok(student)
}

/// Updates the supplied fields of a student
///
/// A name that is blank after trimming is ignored. `Some` marks replace the
/// whole mapping, including with an empty one.
///
/// # Errors
///
/// `NotFound` if no student has this roll.
pub async fn update<S>(
    store: &S,
    roll: &str,
    name: Option<&str>,
    marks: Option<Marks>,
) -> RecordResult<Student>
where
    S: StudentStore + ?Sized,
{
    let changes = UpdateStudent {
        name: name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string),
        marks,
    };
    debug!(
        roll,
        name = changes.name.is_some(),
        marks = changes.marks.is_some(),
        "Updating student"
    );

    let student = store
        .update_student(roll, changes)
        .await?
        .ok_or(RecordError::NotFound)?;

    info!(roll, "Student updated");
    Ok(student)
}

/// Looks a student up by roll
pub async fn get<S>(store: &S, roll: &str) -> RecordResult<Student>
where
    S: StudentStore + ?Sized,
{
    store.find_student(roll).await?.ok_or(RecordError::NotFound)
}

/// Every stored student, in storage order
pub async fn list<S>(store: &S) -> RecordResult<Vec<Student>>
where
    S: StudentStore + ?Sized,
{
    store.list_students().await
}

/// Deletes a student by roll
///
/// # Errors
///
/// `NotFound` if no row matched.
pub async fn delete<S>(store: &S, roll: &str) -> RecordResult<()>
where
    S: StudentStore + ?Sized,
{
    if !store.delete_student(roll).await? {
        return Err(RecordError::NotFound);
    }

    info!(roll, "Student deleted");
    Ok(())
}
