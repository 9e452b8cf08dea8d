//! Course command handler

use super::{fail, login, Credentials};
use crate::args::CourseSubcommand;
use gradebook::config::Config;
use gradebook::core::Result;

/// Dispatch course subcommands
pub fn run(subcommand: &CourseSubcommand, config: &Config, credentials: Credentials) {
    match subcommand {
        CourseSubcommand::Add { code, name } => {
            if let Err(e) = add(config, credentials, code, name) {
                fail("Course add", &e);
            }
        }
        CourseSubcommand::List => {
            if let Err(e) = list(config, credentials) {
                fail("Course list", &e);
            }
        }
    }
}

fn add(config: &Config, credentials: Credentials, code: &str, name: &str) -> Result<()> {
    let (mut gradebook, session) = login(config, credentials)?;
    let course = gradebook.add_course(&session, code, name)?;
    println!("✓ Course added: {} - {}", course.code, course.name);
    Ok(())
}

fn list(config: &Config, credentials: Credentials) -> Result<()> {
    let (gradebook, session) = login(config, credentials)?;
    let courses = gradebook.courses(&session)?;
    if courses.is_empty() {
        println!("No courses yet");
        return Ok(());
    }

    let width = courses.iter().map(|c| c.code.len()).max().unwrap_or(0).max(4);
    println!("{:<width$}  Name", "Code");
    for course in &courses {
        println!("{:<width$}  {}", course.code, course.name);
    }
    Ok(())
}
