//! Report generation for student and class results
//!
//! This module renders per-student reports (course breakdown plus a marks
//! distribution pie chart) and the all-students summary in Markdown or HTML.

pub mod formats;

use crate::core::error::Result;
use crate::core::models::{GpaFormula, Grade, ReportStats, StudentSummary};
use std::fmt::Write;
use std::fs;
use std::path::Path;

pub use formats::{HtmlReporter, MarkdownReporter, ReportFormat};

/// Slice colours for the distribution chart, reused cyclically
const PIE_COLORS: [&str; 8] = [
    "#4e79a7", "#f28e2b", "#e15759", "#76b7b2", "#59a14f", "#edc948", "#b07aa1", "#ff9da7",
];

/// Data handed to a report generator
#[derive(Debug, Clone, Copy)]
pub enum ReportContext<'a> {
    /// Single-student performance report
    Student(&'a ReportStats),
    /// All-students summary table
    Class {
        /// Summary rows in first-appearance order
        rows: &'a [StudentSummary],
        /// Formula used to compute the GPA column
        formula: GpaFormula,
    },
}

impl ReportContext<'_> {
    /// Report title
    #[must_use]
    pub fn title(&self) -> String {
        match self {
            Self::Student(stats) => format!(
                "Performance Report - {} ({})",
                stats.student_name, stats.student_id
            ),
            Self::Class { .. } => "All Students Report".to_string(),
        }
    }

    /// File stem used when no output path is given
    #[must_use]
    pub fn file_stem(&self) -> String {
        match self {
            Self::Student(stats) => format!("{}_report", sanitize(&stats.student_id)),
            Self::Class { .. } => "all_students_report".to_string(),
        }
    }
}

/// Keep file-name-safe characters only
fn sanitize(value: &str) -> String {
    let cleaned: String = value
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "student".to_string()
    } else {
        cleaned
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Render report content as a string
    ///
    /// # Errors
    /// Returns an error if template rendering fails
    fn render(&self, ctx: &ReportContext) -> Result<String>;

    /// Render and write the report to `output_path`
    ///
    /// # Errors
    /// Returns an error if rendering or writing fails
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<()> {
        let content = self.render(ctx)?;
        fs::write(output_path, content)?;
        Ok(())
    }
}

/// Pick the generator for a format
#[must_use]
pub fn reporter_for(format: ReportFormat) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Markdown => Box::new(MarkdownReporter::new()),
        ReportFormat::Html => Box::new(HtmlReporter::new()),
    }
}

/// One course line prepared for templates
#[derive(Debug, Clone)]
pub(crate) struct CourseLine {
    pub code: String,
    pub marks: String,
    pub grade: Grade,
    pub share: String,
    pub color: &'static str,
}

/// Student report values pre-formatted for templates
#[derive(Debug, Clone)]
pub(crate) struct StudentView {
    pub title: String,
    pub student_id: String,
    pub student_name: String,
    pub course_count: usize,
    pub average: String,
    pub highest: String,
    pub lowest: String,
    pub gpa: String,
    pub formula: GpaFormula,
    pub lines: Vec<CourseLine>,
    pub pie_style: String,
}

impl StudentView {
    pub(crate) fn new(stats: &ReportStats, title: String) -> Self {
        let shares = stats.distribution();
        let lines = stats
            .courses
            .iter()
            .zip(&shares)
            .enumerate()
            .map(|(idx, (course, share))| CourseLine {
                code: course.course_code.clone(),
                marks: format!("{:.2}", course.marks),
                grade: course.grade,
                share: format!("{:.1}%", share.percent),
                color: PIE_COLORS[idx % PIE_COLORS.len()],
            })
            .collect();

        Self {
            title,
            student_id: stats.student_id.clone(),
            student_name: stats.student_name.clone(),
            course_count: stats.course_count(),
            average: format!("{:.2}", stats.average_marks),
            highest: format!("{:.2}", stats.highest),
            lowest: format!("{:.2}", stats.lowest),
            gpa: format!("{:.2}", stats.gpa),
            formula: stats.gpa_formula,
            lines,
            pie_style: pie_gradient(&shares.iter().map(|s| s.percent).collect::<Vec<_>>()),
        }
    }
}

/// CSS `background` value drawing the distribution as a conic gradient
fn pie_gradient(percents: &[f64]) -> String {
    if percents.iter().all(|p| *p <= 0.0) {
        return "background: #dddddd".to_string();
    }

    let mut stops = Vec::with_capacity(percents.len());
    let mut start = 0.0;
    for (idx, percent) in percents.iter().enumerate() {
        let end = start + percent;
        let mut stop = String::new();
        let _ = write!(
            stop,
            "{} {start:.2}% {end:.2}%",
            PIE_COLORS[idx % PIE_COLORS.len()]
        );
        stops.push(stop);
        start = end;
    }
    format!("background: conic-gradient({})", stops.join(", "))
}

/// Summary row pre-formatted for templates
#[derive(Debug, Clone)]
pub(crate) struct SummaryLine {
    pub student_id: String,
    pub name: String,
    pub course_count: usize,
    pub average: String,
    pub gpa: String,
}

impl SummaryLine {
    pub(crate) fn from_rows(rows: &[StudentSummary]) -> Vec<Self> {
        rows.iter()
            .map(|r| Self {
                student_id: r.student_id.clone(),
                name: r.name.clone(),
                course_count: r.course_count,
                average: format!("{:.2}", r.average_marks),
                gpa: format!("{:.2}", r.gpa),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pie_gradient_stops() {
        let css = pie_gradient(&[75.0, 25.0]);
        assert_eq!(
            css,
            "background: conic-gradient(#4e79a7 0.00% 75.00%, #f28e2b 75.00% 100.00%)"
        );
    }

    #[test]
    fn test_pie_gradient_empty_total() {
        assert_eq!(pie_gradient(&[0.0, 0.0]), "background: #dddddd");
    }

    #[test]
    fn test_file_stem_is_sanitized() {
        let stats = ReportStats {
            student_id: "S 1/2".to_string(),
            student_name: "Alice".to_string(),
            average_marks: 0.0,
            highest: 0.0,
            lowest: 0.0,
            gpa: 0.0,
            gpa_formula: GpaFormula::GradePoints,
            courses: Vec::new(),
        };
        assert_eq!(ReportContext::Student(&stats).file_stem(), "S_1_2_report");
    }
}
