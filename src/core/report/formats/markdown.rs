//! Markdown report generator
//!
//! Generates student and class reports as Markdown tables. The marks
//! distribution is listed as percentages since Markdown has no charts.

use crate::core::error::Result;
use crate::core::get_version;
use crate::core::models::GpaFormula;
use crate::core::report::{ReportContext, ReportGenerator, StudentView, SummaryLine};
use askama::Template;

#[derive(Template)]
#[template(path = "student_report.md", escape = "none")]
struct StudentReportTemplate<'a> {
    view: &'a StudentView,
    version: &'a str,
}

#[derive(Template)]
#[template(path = "class_summary.md", escape = "none")]
struct ClassSummaryTemplate<'a> {
    title: &'a str,
    rows: &'a [SummaryLine],
    formula: GpaFormula,
    version: &'a str,
}

/// Markdown report generator
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for MarkdownReporter {
    fn render(&self, ctx: &ReportContext) -> Result<String> {
        let title = ctx.title();
        let content = match ctx {
            ReportContext::Student(stats) => {
                let view = StudentView::new(stats, title);
                StudentReportTemplate {
                    view: &view,
                    version: get_version(),
                }
                .render()?
            }
            ReportContext::Class { rows, formula } => {
                let lines = SummaryLine::from_rows(rows);
                ClassSummaryTemplate {
                    title: &title,
                    rows: &lines,
                    formula: *formula,
                    version: get_version(),
                }
                .render()?
            }
        };
        Ok(content)
    }
}
