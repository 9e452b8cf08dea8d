//! Grade record model

use super::Grade;
use serde::Serialize;

/// One student's marks in one course.
///
/// The grade is always derived from the marks; there is no way to set it
/// independently.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeRecord {
    student_id: String,
    student_name: String,
    course_code: String,
    marks: f64,
    grade: Grade,
}

impl GradeRecord {
    /// Create a record, deriving the grade from `marks`
    ///
    /// # Arguments
    /// * `student_id` - External student identifier
    /// * `student_name` - Name as typed at entry time
    /// * `course_code` - Course code (callers uppercase it)
    /// * `marks` - Numeric marks, not range-checked
    #[must_use]
    pub fn new(student_id: String, student_name: String, course_code: String, marks: f64) -> Self {
        Self {
            student_id,
            student_name,
            course_code,
            marks,
            grade: Grade::from_marks(marks),
        }
    }

    /// Student identifier
    #[must_use]
    pub fn student_id(&self) -> &str {
        &self.student_id
    }

    /// Student name on file
    #[must_use]
    pub fn student_name(&self) -> &str {
        &self.student_name
    }

    /// Course code
    #[must_use]
    pub fn course_code(&self) -> &str {
        &self.course_code
    }

    /// Numeric marks
    #[must_use]
    pub const fn marks(&self) -> f64 {
        self.marks
    }

    /// Letter grade derived from the marks
    #[must_use]
    pub const fn grade(&self) -> Grade {
        self.grade
    }

    /// Whether this record belongs to the `(student_id, course_code)` pair
    #[must_use]
    pub fn matches(&self, student_id: &str, course_code: &str) -> bool {
        self.student_id == student_id && self.course_code == course_code
    }

    /// Replace the marks and re-derive the grade
    pub fn set_marks(&mut self, marks: f64) {
        self.marks = marks;
        self.grade = Grade::from_marks(marks);
    }

    /// Replace the name on file
    pub fn set_student_name(&mut self, student_name: String) {
        self.student_name = student_name;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_is_derived() {
        let mut record = GradeRecord::new(
            "S1".to_string(),
            "Alice".to_string(),
            "CS101".to_string(),
            85.0,
        );
        assert_eq!(record.grade(), Grade::A);

        record.set_marks(40.0);
        assert_eq!(record.grade(), Grade::F);
        assert!((record.marks() - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_serialized_grade_follows_marks() {
        let mut record = GradeRecord::new(
            "S1".to_string(),
            "Alice".to_string(),
            "CS101".to_string(),
            91.5,
        );
        record.set_marks(62.0);
        let text = toml::to_string(&record).unwrap();
        assert!(text.contains("grade = \"C\""), "{text}");
        assert!(text.contains("marks = 62.0"), "{text}");
    }

    #[test]
    fn test_matches_on_both_keys() {
        let record = GradeRecord::new(
            "S1".to_string(),
            "Alice".to_string(),
            "CS101".to_string(),
            85.0,
        );
        assert!(record.matches("S1", "CS101"));
        assert!(!record.matches("S1", "CS102"));
        assert!(!record.matches("S2", "CS101"));
    }
}
