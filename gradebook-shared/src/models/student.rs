/// Student model and database operations
///
/// # Schema
///
/// ```sql
/// CREATE TABLE students (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     seq BIGSERIAL NOT NULL,
///     roll TEXT NOT NULL UNIQUE,
///     name TEXT NOT NULL,
///     marks JSONB NOT NULL DEFAULT '{}'::jsonb,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// `marks` is persisted as a JSON object but is only ever exposed as
/// [`Marks`]. `seq` fixes the storage order used by [`Student::list`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, PgPool};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Subject name to score
pub type Marks = BTreeMap<String, f64>;

/// Name of the unique constraint on `students.roll`
pub const ROLL_CONSTRAINT: &str = "students_roll_key";

/// A stored student record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: Uuid,

    /// Roll number, unique across all students
    pub roll: String,

    pub name: String,

    /// Scores by subject; may be empty
    pub marks: Marks,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Student {
    /// Score values without their subject names
    pub fn mark_values(&self) -> Vec<f64> {
        self.marks.values().copied().collect()
    }
}

/// Row shape as stored in PostgreSQL
#[derive(sqlx::FromRow)]
struct StudentRow {
    id: Uuid,
    roll: String,
    name: String,
    marks: Json<Marks>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<StudentRow> for Student {
    fn from(row: StudentRow) -> Self {
        Self {
            id: row.id,
            roll: row.roll,
            name: row.name,
            marks: row.marks.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Input for creating a new student
#[derive(Debug, Clone, Default)]
pub struct CreateStudent {
    pub roll: String,
    pub name: String,
    pub marks: Marks,
}

/// Input for a partial update
///
/// `None` leaves the column untouched. `Some(Marks::new())` is a real update
/// that clears every mark.
#[derive(Debug, Clone, Default)]
pub struct UpdateStudent {
    pub name: Option<String>,
    pub marks: Option<Marks>,
}

const COLUMNS: &str = "id, roll, name, marks, created_at, updated_at";

impl Student {
    /// Inserts a new student
    ///
    /// # Errors
    ///
    /// Returns a database error carrying [`ROLL_CONSTRAINT`] when the roll is
    /// taken.
    pub async fn create(pool: &PgPool, data: CreateStudent) -> Result<Self, sqlx::Error> {
        let row = sqlx::query_as::<_, StudentRow>(&format!(
            "INSERT INTO students (roll, name, marks) VALUES ($1, $2, $3) RETURNING {COLUMNS}"
        ))
        .bind(data.roll)
        .bind(data.name)
        .bind(Json(data.marks))
        .fetch_one(pool)
        .await?;

        Ok(row.into())
    }

    /// Finds a student by exact roll
    pub async fn find_by_roll(pool: &PgPool, roll: &str) -> Result<Option<Self>, sqlx::Error> {
        let row = sqlx::query_as::<_, StudentRow>(&format!(
            "SELECT {COLUMNS} FROM students WHERE roll = $1"
        ))
        .bind(roll)
        .fetch_optional(pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Lists every student in insertion order
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let rows = sqlx::query_as::<_, StudentRow>(&format!(
            "SELECT {COLUMNS} FROM students ORDER BY seq"
        ))
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Applies a partial update in a single statement
    ///
    /// # Returns
    ///
    /// The updated student, or None if no student has this roll
    pub async fn update(
        pool: &PgPool,
        roll: &str,
        data: UpdateStudent,
    ) -> Result<Option<Self>, sqlx::Error> {
        let row = sqlx::query_as::<_, StudentRow>(&format!(
            r#"
            UPDATE students
            SET name = COALESCE($2, name),
                marks = COALESCE($3, marks),
                updated_at = NOW()
            WHERE roll = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(roll)
        .bind(data.name)
        .bind(data.marks.map(Json))
        .fetch_optional(pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Deletes a student by roll
    ///
    /// # Returns
    ///
    /// True if a row was deleted
    pub async fn delete(pool: &PgPool, roll: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM students WHERE roll = $1")
            .bind(roll)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_values_drop_subjects() {
        let now = Utc::now();
        let student = Student {
            id: Uuid::new_v4(),
            roll: "1".to_string(),
            name: "Alice".to_string(),
            marks: Marks::from([("Math".to_string(), 95.0), ("Physics".to_string(), 85.0)]),
            created_at: now,
            updated_at: now,
        };

        let mut values = student.mark_values();
        values.sort_by(f64::total_cmp);
        assert_eq!(values, vec![85.0, 95.0]);
    }
}
