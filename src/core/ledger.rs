//! Gradebook ledger: grading rules and the record collection
//!
//! The ledger owns an in-memory sequence of [`GradeRecord`]s and keeps at most
//! one record per `(student ID, course code)` pair. It performs no I/O; the
//! [`Gradebook`](crate::core::gradebook::Gradebook) facade loads a ledger from
//! a table store, applies one operation and writes the whole sequence back.

use crate::core::catalog::CourseCatalog;
use crate::core::error::{GradebookError, Result};
use crate::core::models::stats::mean;
use crate::core::models::{
    Course, CourseResult, GpaFormula, Grade, GradeRecord, ReportStats, StudentSummary,
};
use std::collections::HashMap;

/// Outcome of [`GradebookLedger::record_marks`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertResult {
    /// A new record was appended
    Created,
    /// An existing record for the same student and course was overwritten
    Updated,
}

/// Map marks onto a letter grade (see [`Grade::from_marks`])
#[must_use]
pub fn grade_for(marks: f64) -> Grade {
    Grade::from_marks(marks)
}

/// Grade points for a letter grade (see [`Grade::gpa_point`])
#[must_use]
pub const fn gpa_point(grade: Grade) -> f64 {
    grade.gpa_point()
}

/// Parse user-entered marks.
///
/// The value must be a finite number. It is rounded to two decimals, the
/// precision the records table stores. Rounding never lifts marks into a
/// higher grade band: `89.996` is kept as `89.99` (grade A) rather than
/// `90.00`, so the stored marks carry the grade of the entered value and
/// derive it again after a reload.
///
/// # Errors
/// `Validation` if the input is blank, `Parse` if it is not a finite number
pub fn parse_marks(raw: &str) -> Result<f64> {
    let trimmed = required(raw, "marks")?;
    let marks = trimmed
        .parse::<f64>()
        .map_err(|_| GradebookError::parse(trimmed, "marks must be numeric"))?;
    if !marks.is_finite() {
        return Err(GradebookError::parse(trimmed, "marks must be a finite number"));
    }

    let mut rounded = round_to_cents(marks);
    if Grade::from_marks(rounded) != Grade::from_marks(marks) {
        // rounded up onto a band floor
        rounded = round_to_cents(rounded - 0.01);
    }
    if !rounded.is_finite() {
        return Err(GradebookError::parse(trimmed, "marks must be a finite number"));
    }
    Ok(rounded)
}

/// Round to two decimals through the decimal text the table stores
fn round_to_cents(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}

fn required<'a>(value: &'a str, field: &'static str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(GradebookError::Validation { field })
    } else {
        Ok(trimmed)
    }
}

/// In-memory collection of grade records plus the operations on it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GradebookLedger {
    records: Vec<GradeRecord>,
}

impl GradebookLedger {
    /// Create an empty ledger
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Build a ledger from stored records, in stored order.
    ///
    /// Should the input hold more than one record for the same pair, the later
    /// one replaces the earlier in place, restoring the one-record-per-pair
    /// invariant.
    #[must_use]
    pub fn from_records(records: Vec<GradeRecord>) -> Self {
        let mut ledger = Self::new();
        for record in records {
            if let Some(existing) = ledger
                .records
                .iter_mut()
                .find(|r| r.matches(record.student_id(), record.course_code()))
            {
                *existing = record;
            } else {
                ledger.records.push(record);
            }
        }
        ledger
    }

    /// All records in insertion order
    #[must_use]
    pub fn records(&self) -> &[GradeRecord] {
        &self.records
    }

    /// Consume the ledger, returning its records
    #[must_use]
    pub fn into_records(self) -> Vec<GradeRecord> {
        self.records
    }

    /// Number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the ledger holds no records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record marks for a student in a course, replacing any existing record
    /// for the same pair.
    ///
    /// The course code is uppercased. On update the stored name is replaced by
    /// `student_name`, whatever was on file before.
    ///
    /// # Arguments
    /// * `catalog` - When given, the course code must exist in it
    ///
    /// # Errors
    /// * `Validation` if any input is blank
    /// * `CourseNotFound` if a catalog is given and lacks the course
    /// * `Parse` if `marks` is not a finite number
    pub fn record_marks(
        &mut self,
        student_id: &str,
        student_name: &str,
        course_code: &str,
        marks: &str,
        catalog: Option<&CourseCatalog>,
    ) -> Result<UpsertResult> {
        let student_id = required(student_id, "student ID")?;
        let student_name = required(student_name, "student name")?;
        let course_code = Course::normalize_code(required(course_code, "course code")?);
        required(marks, "marks")?;

        if let Some(catalog) = catalog {
            if !catalog.exists(&course_code) {
                return Err(GradebookError::CourseNotFound(course_code));
            }
        }

        let marks = parse_marks(marks)?;

        if let Some(record) = self
            .records
            .iter_mut()
            .find(|r| r.matches(student_id, &course_code))
        {
            record.set_student_name(student_name.to_string());
            record.set_marks(marks);
            return Ok(UpsertResult::Updated);
        }

        self.records.push(GradeRecord::new(
            student_id.to_string(),
            student_name.to_string(),
            course_code,
            marks,
        ));
        Ok(UpsertResult::Created)
    }

    /// Change the marks of an existing record, keeping the name on file
    ///
    /// # Errors
    /// * `Validation` if any input is blank
    /// * `Parse` if `marks` is not a finite number
    /// * `RecordNotFound` if no record exists for the pair
    pub fn edit_marks(
        &mut self,
        student_id: &str,
        course_code: &str,
        marks: &str,
    ) -> Result<GradeRecord> {
        let student_id = required(student_id, "student ID")?;
        let course_code = Course::normalize_code(required(course_code, "course code")?);
        let marks = parse_marks(marks)?;

        let record = self
            .records
            .iter_mut()
            .find(|r| r.matches(student_id, &course_code))
            .ok_or_else(|| GradebookError::RecordNotFound {
                student_id: student_id.to_string(),
                course_code: course_code.clone(),
            })?;
        record.set_marks(marks);
        Ok(record.clone())
    }

    /// Remove the record for a pair.
    ///
    /// Removing a pair that has no record is not an error; the collection is
    /// left unchanged.
    ///
    /// # Returns
    /// `true` if a record was removed
    pub fn delete_record(&mut self, student_id: &str, course_code: &str) -> bool {
        let student_id = student_id.trim();
        let course_code = Course::normalize_code(course_code);
        let before = self.records.len();
        self.records.retain(|r| !r.matches(student_id, &course_code));
        self.records.len() != before
    }

    /// All records for a student in insertion order
    ///
    /// # Errors
    /// * `Validation` if `student_id` is blank
    /// * `NotFound` if the student has no records
    pub fn records_for(&self, student_id: &str) -> Result<Vec<&GradeRecord>> {
        let student_id = required(student_id, "student ID")?;
        let found: Vec<&GradeRecord> = self
            .records
            .iter()
            .filter(|r| r.student_id() == student_id)
            .collect();
        if found.is_empty() {
            return Err(GradebookError::NotFound(student_id.to_string()));
        }
        Ok(found)
    }

    /// Aggregate report for one student
    ///
    /// # Errors
    /// * `Validation` if `student_id` is blank
    /// * `NotFound` if the student has no records
    pub fn report_for(&self, student_id: &str, formula: GpaFormula) -> Result<ReportStats> {
        let records = self.records_for(student_id)?;

        let marks: Vec<f64> = records.iter().map(|r| r.marks()).collect();
        let grades: Vec<Grade> = records.iter().map(|r| r.grade()).collect();
        let average_marks = mean(marks.iter().copied());
        let highest = marks.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let lowest = marks.iter().copied().fold(f64::INFINITY, f64::min);

        Ok(ReportStats {
            student_id: records[0].student_id().to_string(),
            student_name: records[0].student_name().to_string(),
            average_marks,
            highest,
            lowest,
            gpa: formula.apply(&grades, average_marks),
            gpa_formula: formula,
            courses: records
                .iter()
                .map(|r| CourseResult {
                    course_code: r.course_code().to_string(),
                    marks: r.marks(),
                    grade: r.grade(),
                })
                .collect(),
        })
    }

    /// One summary row per student, in order of each student's first record.
    ///
    /// When a student's rows carry different names, the name from the last
    /// row scanned is reported.
    #[must_use]
    pub fn all_students_summary(&self, formula: GpaFormula) -> Vec<StudentSummary> {
        struct Group<'a> {
            student_id: &'a str,
            name: &'a str,
            marks: Vec<f64>,
            grades: Vec<Grade>,
        }

        let mut groups: Vec<Group> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();

        for record in &self.records {
            let slot = *index.entry(record.student_id()).or_insert_with(|| {
                groups.push(Group {
                    student_id: record.student_id(),
                    name: record.student_name(),
                    marks: Vec::new(),
                    grades: Vec::new(),
                });
                groups.len() - 1
            });
            let group = &mut groups[slot];
            group.name = record.student_name();
            group.marks.push(record.marks());
            group.grades.push(record.grade());
        }

        groups
            .into_iter()
            .map(|g| {
                let average_marks = mean(g.marks.iter().copied());
                StudentSummary {
                    student_id: g.student_id.to_string(),
                    name: g.name.to_string(),
                    course_count: g.marks.len(),
                    average_marks,
                    gpa: formula.apply(&g.grades, average_marks),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger_with(rows: &[(&str, &str, &str, &str)]) -> GradebookLedger {
        let mut ledger = GradebookLedger::new();
        for (id, name, code, marks) in rows {
            ledger.record_marks(id, name, code, marks, None).unwrap();
        }
        ledger
    }

    #[test]
    fn test_parse_marks_never_rounds_into_higher_band() {
        for (raw, expected) in [
            ("89.995", 89.99),
            ("89.996", 89.99),
            ("89.999", 89.99),
            ("79.9999", 79.99),
            ("49.995", 49.99),
        ] {
            let marks = parse_marks(raw).unwrap();
            assert!((marks - expected).abs() < 1e-9, "{raw} -> {marks}");
            assert_eq!(grade_for(marks), grade_for(raw.parse().unwrap()), "{raw}");
        }
    }

    #[test]
    fn test_parse_marks_huge_values_stay_finite() {
        let marks = parse_marks("1e307").unwrap();
        assert!(marks.is_finite());
        assert!((marks - 1e307).abs() / 1e307 < 1e-12);
        assert!(matches!(parse_marks("1e309"), Err(GradebookError::Parse { .. })));
    }

    #[test]
    fn test_parse_marks() {
        assert!((parse_marks(" 72.5 ").unwrap() - 72.5).abs() < f64::EPSILON);
        assert!((parse_marks("72.345").unwrap() - 72.35).abs() < 1e-9);
        assert!((parse_marks("90.004").unwrap() - 90.0).abs() < f64::EPSILON);
        assert!(matches!(
            parse_marks("   "),
            Err(GradebookError::Validation { field: "marks" })
        ));
        assert!(matches!(parse_marks("ninety"), Err(GradebookError::Parse { .. })));
        assert!(matches!(parse_marks("inf"), Err(GradebookError::Parse { .. })));
    }

    #[test]
    fn test_record_marks_created_then_updated() {
        let mut ledger = GradebookLedger::new();
        let first = ledger
            .record_marks("S1", "Alice", "cs101", "85", None)
            .unwrap();
        let second = ledger
            .record_marks("S1", "Alicia", "CS101", "40", None)
            .unwrap();

        assert_eq!(first, UpsertResult::Created);
        assert_eq!(second, UpsertResult::Updated);
        assert_eq!(ledger.len(), 1);

        let record = &ledger.records()[0];
        assert_eq!(record.course_code(), "CS101");
        assert_eq!(record.student_name(), "Alicia");
        assert_eq!(record.grade(), Grade::F);
    }

    #[test]
    fn test_record_marks_keeps_grade_below_band_floor() {
        let ledger = ledger_with(&[
            ("S1", "Alice", "CS101", "89.995"),
            ("S2", "Bob", "CS101", "89.996"),
            ("S3", "Cara", "CS101", "90"),
        ]);
        let records = ledger.records();
        assert_eq!(records[0].grade(), Grade::A);
        assert_eq!(records[1].grade(), Grade::A);
        assert!((records[1].marks() - 89.99).abs() < 1e-9);
        assert_eq!(records[2].grade(), Grade::S);
        for record in records {
            assert_eq!(grade_for(record.marks()), record.grade());
        }
    }

    #[test]
    fn test_record_marks_requires_every_field() {
        let mut ledger = GradebookLedger::new();
        let cases = [
            ("", "Alice", "CS101", "80", "student ID"),
            ("S1", " ", "CS101", "80", "student name"),
            ("S1", "Alice", "", "80", "course code"),
            ("S1", "Alice", "CS101", "", "marks"),
        ];
        for (id, name, code, marks, expected) in cases {
            match ledger.record_marks(id, name, code, marks, None) {
                Err(GradebookError::Validation { field }) => assert_eq!(field, expected),
                other => panic!("expected validation error for {expected}, got {other:?}"),
            }
        }
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_record_marks_checks_catalog() {
        let mut catalog = CourseCatalog::default();
        catalog.add_course("CS101", "Intro").unwrap();
        let mut ledger = GradebookLedger::new();

        let err = ledger
            .record_marks("S1", "Alice", "MA101", "70", Some(&catalog))
            .unwrap_err();
        assert!(matches!(err, GradebookError::CourseNotFound(code) if code == "MA101"));

        assert_eq!(
            ledger
                .record_marks("S1", "Alice", "cs101", "70", Some(&catalog))
                .unwrap(),
            UpsertResult::Created
        );
    }

    #[test]
    fn test_edit_marks_keeps_name() {
        let mut ledger = ledger_with(&[("S1", "Alice", "CS101", "85")]);
        let edited = ledger.edit_marks("S1", "cs101", "55").unwrap();
        assert_eq!(edited.student_name(), "Alice");
        assert_eq!(edited.grade(), Grade::D);

        assert!(matches!(
            ledger.edit_marks("S2", "CS101", "55"),
            Err(GradebookError::RecordNotFound { .. })
        ));
    }

    #[test]
    fn test_delete_missing_is_noop() {
        let mut ledger = ledger_with(&[("S1", "Alice", "CS101", "85")]);
        let before = ledger.clone();
        assert!(!ledger.delete_record("S1", "MA101"));
        assert_eq!(ledger, before);
        assert!(ledger.delete_record("S1", "cs101"));
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_report_for_keeps_insertion_order() {
        let ledger = ledger_with(&[
            ("S1", "Alice", "MA201", "95"),
            ("S2", "Bob", "CS101", "60"),
            ("S1", "Alice", "CS101", "85"),
            ("S1", "Alice", "PH101", "72"),
        ]);
        let report = ledger.report_for("S1", GpaFormula::GradePoints).unwrap();

        let codes: Vec<&str> = report.courses.iter().map(|c| c.course_code.as_str()).collect();
        assert_eq!(codes, vec!["MA201", "CS101", "PH101"]);
        assert!((report.average_marks - 84.0).abs() < 1e-9);
        assert!((report.highest - 95.0).abs() < f64::EPSILON);
        assert!((report.lowest - 72.0).abs() < f64::EPSILON);
        assert!((report.gpa - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_report_for_unknown_student() {
        let ledger = ledger_with(&[("S1", "Alice", "CS101", "85")]);
        assert!(matches!(
            ledger.report_for("S9", GpaFormula::GradePoints),
            Err(GradebookError::NotFound(id)) if id == "S9"
        ));
    }

    #[test]
    fn test_summary_groups_in_first_appearance_order() {
        let ledger = ledger_with(&[
            ("S2", "Bob", "CS101", "60"),
            ("S1", "Alice", "CS101", "90"),
            ("S2", "Robert", "MA101", "80"),
        ]);
        let summary = ledger.all_students_summary(GpaFormula::GradePoints);

        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].student_id, "S2");
        assert_eq!(summary[0].name, "Robert");
        assert_eq!(summary[0].course_count, 2);
        assert!((summary[0].average_marks - 70.0).abs() < 1e-9);
        assert!((summary[0].gpa - 3.0).abs() < 1e-9);
        assert_eq!(summary[1].student_id, "S1");
    }

    #[test]
    fn test_from_records_collapses_duplicate_pairs() {
        let records = vec![
            GradeRecord::new("S1".into(), "Alice".into(), "CS101".into(), 50.0),
            GradeRecord::new("S1".into(), "Alice".into(), "MA101".into(), 60.0),
            GradeRecord::new("S1".into(), "Alice".into(), "CS101".into(), 90.0),
        ];
        let ledger = GradebookLedger::from_records(records);
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.records()[0].grade(), Grade::S);
    }
}
