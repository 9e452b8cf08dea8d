//! Session-gated gradebook facade
//!
//! Each operation takes the caller's [`Session`] explicitly, checks its role,
//! and runs one read-all / mutate / write-all cycle against the record table.
//! Nothing here is synchronized: two processes writing the same data directory
//! at once can lose updates.

use crate::core::auth::Authenticator;
use crate::core::catalog::CourseRegistry;
use crate::core::error::{GradebookError, Result};
use crate::core::ledger::{GradebookLedger, UpsertResult};
use crate::core::models::{
    Course, GpaFormula, GradeRecord, ReportStats, Session, StudentSummary, UserAccount,
};
use crate::core::storage::{CsvTable, DataTables, TableStore};
use crate::info;
use std::path::Path;

/// Grading behaviour switches, normally taken from the `[grading]` config section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradingOptions {
    /// GPA formula used by reports and summaries
    pub gpa_formula: GpaFormula,
    /// Reject marks for course codes missing from the catalog
    pub require_known_course: bool,
}

impl Default for GradingOptions {
    fn default() -> Self {
        Self {
            gpa_formula: GpaFormula::GradePoints,
            require_known_course: true,
        }
    }
}

/// Gradebook over a record table and a course table
#[derive(Debug)]
pub struct Gradebook<R, C> {
    records: R,
    registry: CourseRegistry<C>,
    options: GradingOptions,
}

/// Gradebook stored as CSV files
pub type CsvGradebook = Gradebook<CsvTable<GradeRecord>, CsvTable<Course>>;

/// Open the CSV tables under `data_dir`, bootstrapping missing files, and
/// return the gradebook together with the authenticator for the same directory
///
/// # Errors
/// Returns an error if a table file cannot be created
pub fn open_csv(
    data_dir: &Path,
    options: GradingOptions,
) -> Result<(CsvGradebook, Authenticator<CsvTable<UserAccount>>)> {
    let tables = DataTables::open(data_dir)?;
    Ok((
        Gradebook::new(tables.records, tables.courses, options),
        Authenticator::new(tables.accounts),
    ))
}

impl<R, C> Gradebook<R, C>
where
    R: TableStore<GradeRecord>,
    C: TableStore<Course>,
{
    /// Create a gradebook over the given tables
    pub const fn new(records: R, courses: C, options: GradingOptions) -> Self {
        Self {
            records,
            registry: CourseRegistry::new(courses),
            options,
        }
    }

    /// Active grading options
    pub const fn options(&self) -> &GradingOptions {
        &self.options
    }

    /// Underlying record table
    pub const fn record_store(&self) -> &R {
        &self.records
    }

    fn load(&self) -> Result<GradebookLedger> {
        Ok(GradebookLedger::from_records(self.records.load_all()?))
    }

    fn commit(&mut self, ledger: &GradebookLedger) -> Result<()> {
        self.records.save_all(ledger.records())
    }

    fn require_admin(session: &Session, action: &'static str) -> Result<()> {
        if session.is_admin() {
            Ok(())
        } else {
            Err(GradebookError::PermissionDenied {
                role: session.role,
                action,
            })
        }
    }

    fn require_self_or_admin(session: &Session, student_id: &str, action: &'static str) -> Result<()> {
        if session.is_admin() || session.username == student_id.trim() {
            Ok(())
        } else {
            Err(GradebookError::PermissionDenied {
                role: session.role,
                action,
            })
        }
    }

    /// Record (insert or replace) marks for a student in a course. Admin only.
    ///
    /// # Errors
    /// See [`GradebookLedger::record_marks`]; `PermissionDenied` for students
    pub fn record_marks(
        &mut self,
        session: &Session,
        student_id: &str,
        student_name: &str,
        course_code: &str,
        marks: &str,
    ) -> Result<UpsertResult> {
        Self::require_admin(session, "record marks")?;
        let catalog = if self.options.require_known_course {
            Some(self.registry.catalog()?)
        } else {
            None
        };

        let mut ledger = self.load()?;
        let outcome =
            ledger.record_marks(student_id, student_name, course_code, marks, catalog.as_ref())?;
        self.commit(&ledger)?;

        info!(
            "{outcome:?} record for {} - {} by {}",
            student_id.trim(),
            Course::normalize_code(course_code),
            session.username
        );
        Ok(outcome)
    }

    /// Change the marks of an existing record. Admin only.
    ///
    /// # Errors
    /// See [`GradebookLedger::edit_marks`]; `PermissionDenied` for students
    pub fn edit_marks(
        &mut self,
        session: &Session,
        student_id: &str,
        course_code: &str,
        marks: &str,
    ) -> Result<GradeRecord> {
        Self::require_admin(session, "edit marks")?;
        let mut ledger = self.load()?;
        let record = ledger.edit_marks(student_id, course_code, marks)?;
        self.commit(&ledger)?;
        info!(
            "Marks for {} - {} set to {:.2} ({})",
            record.student_id(),
            record.course_code(),
            record.marks(),
            record.grade()
        );
        Ok(record)
    }

    /// Delete the record for a pair; deleting a missing pair is not an error.
    /// Admin only.
    ///
    /// # Returns
    /// `true` if a record was removed
    ///
    /// # Errors
    /// `PermissionDenied` for students; storage errors
    pub fn delete_record(
        &mut self,
        session: &Session,
        student_id: &str,
        course_code: &str,
    ) -> Result<bool> {
        Self::require_admin(session, "delete records")?;
        let mut ledger = self.load()?;
        let removed = ledger.delete_record(student_id, course_code);
        self.commit(&ledger)?;
        if removed {
            info!(
                "Deleted {} for {}",
                Course::normalize_code(course_code),
                student_id.trim()
            );
        }
        Ok(removed)
    }

    /// A student's records in insertion order. Students may only list their own.
    ///
    /// # Errors
    /// See [`GradebookLedger::records_for`]; `PermissionDenied`
    pub fn search_records(&self, session: &Session, student_id: &str) -> Result<Vec<GradeRecord>> {
        Self::require_self_or_admin(session, student_id, "view another student's records")?;
        let ledger = self.load()?;
        let found = ledger.records_for(student_id)?;
        Ok(found.into_iter().cloned().collect())
    }

    /// Report for a student. Students may only request their own.
    ///
    /// # Errors
    /// See [`GradebookLedger::report_for`]; `PermissionDenied`
    pub fn report_for(&self, session: &Session, student_id: &str) -> Result<ReportStats> {
        Self::require_self_or_admin(session, student_id, "view another student's report")?;
        self.load()?
            .report_for(student_id, self.options.gpa_formula)
    }

    /// Report for the session's own username, used as the student ID
    ///
    /// # Errors
    /// `NotFound` if there are no records under the username
    pub fn own_report(&self, session: &Session) -> Result<ReportStats> {
        self.report_for(session, &session.username)
    }

    /// Summary row per student. Available to every role.
    ///
    /// # Errors
    /// Storage errors
    pub fn all_students_summary(&self, _session: &Session) -> Result<Vec<StudentSummary>> {
        Ok(self
            .load()?
            .all_students_summary(self.options.gpa_formula))
    }

    /// Add a course to the catalog. Admin only.
    ///
    /// # Errors
    /// See [`CourseRegistry::add_course`]; `PermissionDenied`
    pub fn add_course(&mut self, session: &Session, code: &str, name: &str) -> Result<Course> {
        Self::require_admin(session, "add courses")?;
        self.registry.add_course(code, name)
    }

    /// Courses in the catalog. Available to every role.
    ///
    /// # Errors
    /// Storage errors
    pub fn courses(&self, _session: &Session) -> Result<Vec<Course>> {
        self.registry.courses()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{Grade, Role};
    use crate::core::storage::MemoryTable;

    type MemoryGradebook = Gradebook<MemoryTable<GradeRecord>, MemoryTable<Course>>;

    fn admin() -> Session {
        Session::new("admin".to_string(), Role::Admin)
    }

    fn student(id: &str) -> Session {
        Session::new(id.to_string(), Role::Student)
    }

    fn gradebook(options: GradingOptions) -> MemoryGradebook {
        Gradebook::new(MemoryTable::default(), MemoryTable::default(), options)
    }

    #[test]
    fn test_strict_mode_requires_course() {
        let mut book = gradebook(GradingOptions::default());
        assert!(matches!(
            book.record_marks(&admin(), "S1", "Alice", "CS101", "85"),
            Err(GradebookError::CourseNotFound(_))
        ));
        assert_eq!(book.record_store().save_count(), 0);

        book.add_course(&admin(), "CS101", "Intro").unwrap();
        assert_eq!(
            book.record_marks(&admin(), "S1", "Alice", "CS101", "85")
                .unwrap(),
            UpsertResult::Created
        );
        assert_eq!(book.record_store().save_count(), 1);
    }

    #[test]
    fn test_loose_mode_skips_course_check() {
        let mut book = gradebook(GradingOptions {
            require_known_course: false,
            ..GradingOptions::default()
        });
        assert!(book
            .record_marks(&admin(), "S1", "Alice", "CS101", "85")
            .is_ok());
    }

    #[test]
    fn test_students_cannot_mutate() {
        let mut book = gradebook(GradingOptions::default());
        let s1 = student("S1");
        assert!(matches!(
            book.add_course(&s1, "CS101", "Intro"),
            Err(GradebookError::PermissionDenied { .. })
        ));
        assert!(matches!(
            book.record_marks(&s1, "S1", "Alice", "CS101", "99"),
            Err(GradebookError::PermissionDenied { .. })
        ));
        assert!(matches!(
            book.delete_record(&s1, "S1", "CS101"),
            Err(GradebookError::PermissionDenied { .. })
        ));
    }

    #[test]
    fn test_students_see_only_their_own_report() {
        let mut book = gradebook(GradingOptions::default());
        book.add_course(&admin(), "CS101", "Intro").unwrap();
        book.record_marks(&admin(), "S1", "Alice", "CS101", "85")
            .unwrap();
        book.record_marks(&admin(), "S2", "Bob", "CS101", "65")
            .unwrap();

        let own = book.own_report(&student("S1")).unwrap();
        assert_eq!(own.student_name, "Alice");
        assert!(matches!(
            book.report_for(&student("S1"), "S2"),
            Err(GradebookError::PermissionDenied { .. })
        ));
        assert_eq!(book.all_students_summary(&student("S1")).unwrap().len(), 2);
    }

    #[test]
    fn test_marks_over_twenty_option() {
        let mut book = gradebook(GradingOptions {
            gpa_formula: GpaFormula::MarksOverTwenty,
            require_known_course: false,
        });
        book.record_marks(&admin(), "S1", "Alice", "CS101", "85")
            .unwrap();
        let report = book.report_for(&admin(), "S1").unwrap();
        assert!((report.gpa - 4.25).abs() < 1e-9);
        assert_eq!(report.gpa_formula, GpaFormula::MarksOverTwenty);
    }

    #[test]
    fn test_edits_existing_table_contents() {
        let seeded = vec![
            GradeRecord::new(
                "S1".to_string(),
                "Alice".to_string(),
                "CS101".to_string(),
                72.0,
            ),
            GradeRecord::new(
                "S2".to_string(),
                "Bob".to_string(),
                "CS101".to_string(),
                55.0,
            ),
        ];
        let mut book = Gradebook::new(
            MemoryTable::new(seeded),
            MemoryTable::default(),
            GradingOptions::default(),
        );

        let edited = book.edit_marks(&admin(), "S2", "cs101", "89.996").unwrap();
        assert_eq!(edited.grade(), Grade::A);

        let rows = book.record_store().rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].grade(), Grade::B);
        assert_eq!(rows[1].student_name(), "Bob");
        assert!((rows[1].marks() - 89.99).abs() < 1e-9);
        assert_eq!(book.record_store().save_count(), 1);
    }
}
