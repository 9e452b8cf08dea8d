//! Error taxonomy for gradebook operations
//!
//! Every variant is recoverable by the caller: the operation that produced it
//! did not take effect and the stored tables are unchanged.

use crate::core::models::Role;
use std::path::PathBuf;

/// Errors produced by ledger, registry, account and storage operations
#[derive(Debug, thiserror::Error)]
pub enum GradebookError {
    /// A required field was empty after trimming.
    #[error("Missing required field: {field}")]
    Validation {
        /// Name of the empty field
        field: &'static str,
    },
    /// User input could not be parsed (e.g. non-numeric marks).
    #[error("Invalid value '{input}': {reason}")]
    Parse {
        /// The rejected input
        input: String,
        /// Why it was rejected
        reason: String,
    },
    /// A stored row could not be turned into a record.
    #[error("Malformed row in {} at line {line}: {reason}", path.display())]
    MalformedRow {
        /// Table file containing the row
        path: PathBuf,
        /// 1-based line number (header is line 1)
        line: u64,
        /// Why the row was rejected
        reason: String,
    },
    /// Marks were submitted for a course code that is not in the catalog.
    #[error("Course code '{0}' not found. Add it first.")]
    CourseNotFound(String),
    /// Signup with a username that already exists.
    #[error("Username '{0}' already exists")]
    DuplicateUsername(String),
    /// A course with this code is already in the catalog.
    #[error("Course code '{0}' already exists")]
    DuplicateCourse(String),
    /// No records exist for the requested student.
    #[error("No records for student ID '{0}'")]
    NotFound(String),
    /// No record exists for the requested student/course pair.
    #[error("No record for student ID '{student_id}' in course '{course_code}'")]
    RecordNotFound {
        /// Student ID that was looked up
        student_id: String,
        /// Course code that was looked up
        course_code: String,
    },
    /// Username/password pair did not match any account.
    #[error("Invalid username or password")]
    AuthFailure,
    /// The session's role may not perform this action.
    #[error("A {role} account may not {action}")]
    PermissionDenied {
        /// Role of the session that attempted the action
        role: Role,
        /// Short description of the refused action
        action: &'static str,
    },
    /// Filesystem failure while reading or writing a table or report.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// CSV encoding/decoding failure not tied to a single row.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// Report template rendering failed.
    #[error("Failed to render report: {0}")]
    Render(#[from] askama::Error),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, GradebookError>;

impl GradebookError {
    /// Build a `Parse` error for a rejected input value
    pub fn parse(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Parse {
            input: input.into(),
            reason: reason.into(),
        }
    }
}
