//! Report command handler
//!
//! Renders a single student's performance report or the all-students summary
//! as Markdown or HTML, and optionally exports the summary table to CSV.

use super::{fail, login, Credentials};
use crate::args::ReportSubcommand;
use gradebook::config::Config;
use gradebook::core::models::ReportStats;
use gradebook::core::report::{reporter_for, ReportContext, ReportFormat};
use gradebook::core::summary_export::export_summary_csv;
use gradebook::core::{GradebookError, Result};
use gradebook::{info, verbose};
use std::fs;
use std::path::{Path, PathBuf};

/// Dispatch report subcommands
pub fn run(subcommand: &ReportSubcommand, config: &Config, credentials: Credentials) {
    let result = match subcommand {
        ReportSubcommand::Student {
            student_id,
            format,
            output,
        } => student_report(
            config,
            credentials,
            student_id.as_deref(),
            format,
            output.as_deref(),
        ),
        ReportSubcommand::All {
            format,
            output,
            csv,
        } => class_report(config, credentials, format, output.as_deref(), csv.as_deref()),
    };
    if let Err(e) = result {
        fail("Report generation", &e);
    }
}

fn parse_format(format_str: &str) -> Result<ReportFormat> {
    format_str
        .parse::<ReportFormat>()
        .map_err(|reason: String| GradebookError::parse(format_str, reason))
}

/// Resolve the output path: explicit `-o`, else `<reports_dir>/<stem>.<ext>`
fn output_path(
    output: Option<&Path>,
    config: &Config,
    ctx: &ReportContext,
    format: ReportFormat,
) -> Result<PathBuf> {
    let path = match output {
        Some(path) => path.to_path_buf(),
        None => config
            .reports_dir()
            .join(format!("{}.{}", ctx.file_stem(), format.extension())),
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(path)
}

fn print_stats(stats: &ReportStats) {
    println!(
        "{} ({}): {} courses, average {:.2}, highest {:.2}, lowest {:.2}, GPA {:.2}",
        stats.student_name,
        stats.student_id,
        stats.course_count(),
        stats.average_marks,
        stats.highest,
        stats.lowest,
        stats.gpa
    );
    for course in &stats.courses {
        verbose!("  {:<10} {:>7.2}  {}", course.course_code, course.marks, course.grade);
    }
}

fn student_report(
    config: &Config,
    credentials: Credentials,
    student_id: Option<&str>,
    format_str: &str,
    output: Option<&Path>,
) -> Result<()> {
    let format = parse_format(format_str)?;
    let (gradebook, session) = login(config, credentials)?;
    let stats = match student_id {
        Some(id) => gradebook.report_for(&session, id)?,
        None => gradebook.own_report(&session)?,
    };
    print_stats(&stats);

    let ctx = ReportContext::Student(&stats);
    let path = output_path(output, config, &ctx, format)?;
    reporter_for(format).generate(&ctx, &path)?;
    info!("Report for {} written to {}", stats.student_id, path.display());
    println!("✓ Report generated: {}", path.display());
    Ok(())
}

fn class_report(
    config: &Config,
    credentials: Credentials,
    format_str: &str,
    output: Option<&Path>,
    csv_path: Option<&Path>,
) -> Result<()> {
    let format = parse_format(format_str)?;
    let (gradebook, session) = login(config, credentials)?;
    let rows = gradebook.all_students_summary(&session)?;
    println!("{} students", rows.len());

    let ctx = ReportContext::Class {
        rows: &rows,
        formula: gradebook.options().gpa_formula,
    };
    let path = output_path(output, config, &ctx, format)?;
    reporter_for(format).generate(&ctx, &path)?;
    info!("Class summary written to {}", path.display());
    println!("✓ Report generated: {}", path.display());

    if let Some(csv_path) = csv_path {
        export_summary_csv(&rows, csv_path)?;
        println!("✓ Summary exported: {}", csv_path.display());
    }
    Ok(())
}
