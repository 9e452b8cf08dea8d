//! All-students summary export to CSV
//!
//! Writes the class summary table next to the rendered reports so it can be
//! opened in a spreadsheet. Numbers are written with two decimals.

use crate::core::error::Result;
use crate::core::models::StudentSummary;
use crate::debug;
use std::path::Path;

/// Column header of the summary export
pub const SUMMARY_HEADER: [&str; 5] = ["Student ID", "Name", "Courses Count", "Avg Marks", "GPA"];

/// Write summary rows as CSV to `path`
///
/// # Errors
/// Returns an error if the file cannot be created or written
pub fn export_summary_csv(rows: &[StudentSummary], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(SUMMARY_HEADER)?;
    for row in rows {
        writer.write_record([
            row.student_id.clone(),
            row.name.clone(),
            row.course_count.to_string(),
            format!("{:.2}", row.average_marks),
            format!("{:.2}", row.gpa),
        ])?;
    }
    writer.flush()?;

    debug!("Wrote {} summary rows to {}", rows.len(), path.display());
    Ok(())
}
