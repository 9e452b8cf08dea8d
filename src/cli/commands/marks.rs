//! Marks command handler

use super::{fail, login, Credentials};
use crate::args::MarksSubcommand;
use gradebook::config::Config;
use gradebook::core::ledger::UpsertResult;
use gradebook::core::Result;
use gradebook::verbose;

/// Dispatch marks subcommands
pub fn run(subcommand: &MarksSubcommand, config: &Config, credentials: Credentials) {
    let (action, result) = match subcommand {
        MarksSubcommand::Record {
            student_id,
            name,
            course,
            marks,
        } => (
            "Record marks",
            record(config, credentials, student_id, name, course, marks),
        ),
        MarksSubcommand::Edit {
            student_id,
            course,
            marks,
        } => (
            "Edit marks",
            edit(config, credentials, student_id, course, marks),
        ),
        MarksSubcommand::Delete { student_id, course } => (
            "Delete record",
            delete(config, credentials, student_id, course),
        ),
        MarksSubcommand::List { student_id } => {
            ("List records", list(config, credentials, student_id))
        }
    };
    if let Err(e) = result {
        fail(action, &e);
    }
}

fn record(
    config: &Config,
    credentials: Credentials,
    student_id: &str,
    name: &str,
    course: &str,
    marks: &str,
) -> Result<()> {
    let (mut gradebook, session) = login(config, credentials)?;
    let outcome = gradebook.record_marks(&session, student_id, name, course, marks)?;
    let label = match outcome {
        UpsertResult::Created => "Saved",
        UpsertResult::Updated => "Updated",
    };
    println!("✓ {label}");
    verbose!(
        "  {} - {} ({})",
        student_id.trim(),
        course.trim().to_uppercase(),
        name.trim()
    );
    Ok(())
}

fn edit(
    config: &Config,
    credentials: Credentials,
    student_id: &str,
    course: &str,
    marks: &str,
) -> Result<()> {
    let (mut gradebook, session) = login(config, credentials)?;
    let record = gradebook.edit_marks(&session, student_id, course, marks)?;
    println!(
        "✓ Updated {} - {}: {:.2} ({})",
        record.student_id(),
        record.course_code(),
        record.marks(),
        record.grade()
    );
    Ok(())
}

fn delete(config: &Config, credentials: Credentials, student_id: &str, course: &str) -> Result<()> {
    let (mut gradebook, session) = login(config, credentials)?;
    if gradebook.delete_record(&session, student_id, course)? {
        println!("✓ Deleted");
    } else {
        println!("✓ Nothing to delete");
    }
    Ok(())
}

fn list(config: &Config, credentials: Credentials, student_id: &str) -> Result<()> {
    let (gradebook, session) = login(config, credentials)?;
    let records = gradebook.search_records(&session, student_id)?;

    println!("{:<10} {:<20} {:<10} {:>7}  Grade", "ID", "Name", "Course", "Marks");
    for record in &records {
        println!(
            "{:<10} {:<20} {:<10} {:>7.2}  {}",
            record.student_id(),
            record.student_name(),
            record.course_code(),
            record.marks(),
            record.grade()
        );
    }
    Ok(())
}
