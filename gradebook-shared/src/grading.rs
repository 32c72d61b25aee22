//! Grade and CGPA step functions
//!
//! Both functions look only at the arithmetic mean of the marks. Bands are
//! closed on the lower bound and open on the upper one; the top band also
//! covers anything above 100 since scores are not range-checked.
//!
//! An empty collection is its own case: grade `"N/A"` and CGPA `0.0`, not the
//! bottom band.
//!
//! # Example
//!
//! ```
//! use gradebook_shared::grading::{cgpa, grade};
//!
//! assert_eq!(grade(&[95.0, 85.0]), "A+");
//! assert_eq!(cgpa(&[95.0, 85.0]), 10.0);
//! assert_eq!(grade(&[85.0, 80.0]), "A");
//! assert_eq!(cgpa(&[85.0, 80.0]), 9.0);
//! assert_eq!(grade(&[]), "N/A");
//! assert_eq!(cgpa(&[]), 0.0);
//! ```

/// Grade reported for a student with no marks
pub const NO_GRADE: &str = "N/A";

const GRADE_BANDS: [(f64, &str); 5] = [(90.0, "A+"), (80.0, "A"), (70.0, "B"), (60.0, "C"), (50.0, "D")];
const FAILING_GRADE: &str = "F";

const CGPA_BANDS: [(f64, f64); 6] = [
    (90.0, 10.0),
    (80.0, 9.0),
    (70.0, 8.0),
    (60.0, 7.0),
    (50.0, 6.0),
    (40.0, 5.0),
];
const MIN_CGPA: f64 = 4.0;

/// Arithmetic mean of the marks, 0 for an empty slice
pub fn average(marks: &[f64]) -> f64 {
    if marks.is_empty() {
        return 0.0;
    }
    marks.iter().sum::<f64>() / marks.len() as f64
}

/// Letter grade for the average of `marks`
pub fn grade(marks: &[f64]) -> &'static str {
    if marks.is_empty() {
        return NO_GRADE;
    }
    let avg = average(marks);
    GRADE_BANDS
        .iter()
        .find(|(floor, _)| avg >= *floor)
        .map_or(FAILING_GRADE, |(_, label)| *label)
}

/// Grade point for the average of `marks`
pub fn cgpa(marks: &[f64]) -> f64 {
    if marks.is_empty() {
        return 0.0;
    }
    let avg = average(marks);
    CGPA_BANDS
        .iter()
        .find(|(floor, _)| avg >= *floor)
        .map_or(MIN_CGPA, |(_, points)| *points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average() {
        assert_eq!(average(&[]), 0.0);
        assert_eq!(average(&[95.0, 85.0]), 90.0);
        assert_eq!(average(&[1.0, 2.0, 3.0, 4.0]), 2.5);
    }

    #[test]
    fn test_empty_marks_are_special_cased() {
        assert_eq!(grade(&[]), "N/A");
        assert_eq!(cgpa(&[]), 0.0);
    }

    #[test]
    fn test_grade_band_edges() {
        let cases = [
            (100.0, "A+"),
            (90.0, "A+"),
            (89.99, "A"),
            (80.0, "A"),
            (79.5, "B"),
            (70.0, "B"),
            (60.0, "C"),
            (59.0, "D"),
            (50.0, "D"),
            (49.99, "F"),
            (0.0, "F"),
        ];
        for (avg, expected) in cases {
            assert_eq!(grade(&[avg]), expected, "average {}", avg);
        }
    }

    #[test]
    fn test_cgpa_band_edges() {
        let cases = [
            (100.0, 10.0),
            (90.0, 10.0),
            (85.0, 9.0),
            (70.0, 8.0),
            (69.9, 7.0),
            (50.0, 6.0),
            (40.0, 5.0),
            (39.99, 4.0),
            (0.0, 4.0),
        ];
        for (avg, expected) in cases {
            assert_eq!(cgpa(&[avg]), expected, "average {}", avg);
        }
    }

    #[test]
    fn test_monotonic_in_average() {
        let rank = |label: &str| ["F", "D", "C", "B", "A", "A+"].iter().position(|g| *g == label).unwrap();

        let mut previous_grade = 0;
        let mut previous_cgpa = 0.0;
        for step in 0..=1000 {
            let avg = step as f64 / 10.0;
            let current_grade = rank(grade(&[avg]));
            let current_cgpa = cgpa(&[avg]);
            assert!(current_grade >= previous_grade, "grade decreased at {}", avg);
            assert!(current_cgpa >= previous_cgpa, "cgpa decreased at {}", avg);
            previous_grade = current_grade;
            previous_cgpa = current_cgpa;
        }
    }

    #[test]
    fn test_average_of_exactly_ninety_is_top_band() {
        assert_eq!(grade(&[95.0, 85.0]), "A+");
        assert_eq!(cgpa(&[95.0, 85.0]), 10.0);
        assert_eq!(grade(&[85.0, 80.0]), "A");
        assert_eq!(cgpa(&[85.0, 80.0]), 9.0);
    }

    #[test]
    fn test_uses_average_not_individual_marks() {
        // 100 and 0 average to 50
        assert_eq!(grade(&[100.0, 0.0]), "D");
        assert_eq!(cgpa(&[100.0, 0.0]), 6.0);
    }
}
