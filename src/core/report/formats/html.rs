//! HTML report generator
//!
//! Generates self-contained HTML reports with embedded CSS. The marks
//! distribution is drawn as a CSS conic-gradient pie with a colour legend, so
//! the page needs no scripts or chart library.

use crate::core::error::Result;
use crate::core::get_version;
use crate::core::models::GpaFormula;
use crate::core::report::{ReportContext, ReportGenerator, StudentView, SummaryLine};
use askama::Template;

#[derive(Template)]
#[template(path = "student_report.html")]
struct StudentReportTemplate<'a> {
    view: &'a StudentView,
    version: &'a str,
}

#[derive(Template)]
#[template(path = "class_summary.html")]
struct ClassSummaryTemplate<'a> {
    title: &'a str,
    rows: &'a [SummaryLine],
    formula: GpaFormula,
    version: &'a str,
}

/// HTML report generator
pub struct HtmlReporter;

impl HtmlReporter {
    /// Create a new HTML reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for HtmlReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for HtmlReporter {
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
