//! Integration tests for report rendering

use gradebook::core::ledger::GradebookLedger;
use gradebook::core::models::GpaFormula;
use gradebook::core::report::{reporter_for, ReportContext, ReportFormat, ReportGenerator};
use gradebook::core::report::{HtmlReporter, MarkdownReporter};
use tempfile::TempDir;

fn sample_ledger() -> GradebookLedger {
    let mut ledger = GradebookLedger::new();
    for (id, name, code, marks) in [
        ("S1", "Alice", "CS101", "90"),
        ("S1", "Alice", "MA101", "30"),
        ("S2", "Bob <b>", "CS101", "55"),
    ] {
        ledger.record_marks(id, name, code, marks, None).unwrap();
    }
    ledger
}

#[test]
fn markdown_student_report() {
    let stats = sample_ledger()
        .report_for("S1", GpaFormula::GradePoints)
        .unwrap();
    let out = MarkdownReporter::new()
        .render(&ReportContext::Student(&stats))
        .unwrap();

    assert!(out.starts_with("# Performance Report - Alice (S1)"));
    assert!(out.contains("| Average Marks | 60.00 |"));
    assert!(out.contains("| GPA (grade-points) | 2.50 |"));
    assert!(out.contains("| CS101 | 90.00 | S |"));
    assert!(out.contains("| MA101 | 30.00 | F |"));
    assert!(out.contains("| CS101 | 75.0% |"));
    assert!(out.contains("| MA101 | 25.0% |"));
}

#[test]
fn html_student_report_draws_pie() {
    let stats = sample_ledger()
        .report_for("S1", GpaFormula::GradePoints)
        .unwrap();
    let out = HtmlReporter::new()
        .render(&ReportContext::Student(&stats))
        .unwrap();

    assert!(out.contains("<title>Performance Report - Alice (S1)</title>"));
    assert!(out.contains("conic-gradient(#4e79a7 0.00% 75.00%, #f28e2b 75.00% 100.00%)"));
    assert!(out.contains("CS101: 75.0%"));
}

#[test]
fn html_summary_escapes_names() {
    let ledger = sample_ledger();
    let rows = ledger.all_students_summary(GpaFormula::GradePoints);
    let out = HtmlReporter::new()
        .render(&ReportContext::Class {
            rows: &rows,
            formula: GpaFormula::GradePoints,
        })
        .unwrap();

    assert!(out.contains("All Students Report"));
    assert!(out.contains("Bob &lt;b&gt;"));
    assert!(!out.contains("Bob <b>"));
}

#[test]
fn markdown_summary_lists_every_student() {
    let ledger = sample_ledger();
    let rows = ledger.all_students_summary(GpaFormula::MarksOverTwenty);
    let out = MarkdownReporter::new()
        .render(&ReportContext::Class {
            rows: &rows,
            formula: GpaFormula::MarksOverTwenty,
        })
        .unwrap();

    assert!(out.contains("GPA formula: marks-over-twenty"));
    assert!(out.contains("| S1 | Alice | 2 | 60.00 | 3.00 |"));
    assert!(out.contains("| S2 | Bob <b> | 1 | 55.00 | 2.75 |"));
}

#[test]
fn generate_writes_file() {
    let dir = TempDir::new().unwrap();
    let stats = sample_ledger()
        .report_for("S2", GpaFormula::GradePoints)
        .unwrap();
    let ctx = ReportContext::Student(&stats);
    let format: ReportFormat = "md".parse().unwrap();
    let path = dir
        .path()
        .join(format!("{}.{}", ctx.file_stem(), format.extension()));

    reporter_for(format).generate(&ctx, &path).unwrap();

    assert!(path.ends_with("S2_report.md"));
    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("Bob <b>"));
}
