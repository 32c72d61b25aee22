/// Externally visible student records
///
/// A [`ProjectedRecord`] is a stored [`Student`] plus the metrics computed
/// from its mark values: total, percentage, grade and CGPA.
///
/// The percentage divides by `max(1, subjects) * 100`, so a student with no
/// marks gets 0.00 rather than a division by zero.

use crate::grading;
use crate::models::student::{Marks, Student};
use serde::{Deserialize, Serialize};

/// Student record with computed academic metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedRecord {
    pub roll: String,
    pub name: String,

    /// Full subject -> score mapping
    pub marks: Marks,

    pub total_marks: f64,

    /// Rounded to two decimal places
    pub percentage: f64,

    pub grade: String,
    pub cgpa: f64,
}

/// Rounds the exact binary value to two decimal places
///
/// Formatting rounds the exact value with ties to even, so `0.125` becomes
/// `0.12` while `0.135` (stored just above the tie) becomes `0.14`.
fn round2(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}

/// Builds the projected record for one student
pub fn project(student: &Student) -> ProjectedRecord {
    let values = student.mark_values();
    let total: f64 = values.iter().sum();
    let subjects = values.len().max(1) as f64;
    let percentage = total / (subjects * 100.0) * 100.0;

    ProjectedRecord {
        roll: student.roll.clone(),
        name: student.name.clone(),
        marks: student.marks.clone(),
        total_marks: total,
        percentage: round2(percentage),
        grade: grading::grade(&values).to_string(),
        cgpa: grading::cgpa(&values),
    }
}

/// Projects many students, preserving order
pub fn project_all(students: &[Student]) -> Vec<ProjectedRecord> {
    students.iter().map(project).collect()
}
