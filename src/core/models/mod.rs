//! Data models for `Gradebook`

pub mod account;
pub mod course;
pub mod grade;
pub mod record;
pub mod stats;

pub use account::{Role, Session, UserAccount};
pub use course::Course;
pub use grade::Grade;
pub use record::GradeRecord;
pub use stats::{CourseResult, GpaFormula, MarksShare, ReportStats, StudentSummary};
