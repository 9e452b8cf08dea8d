//! Aggregate statistics produced by the ledger for reports

use super::Grade;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a GPA is derived from a student's records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GpaFormula {
    /// Mean of per-course grade points (canonical)
    #[default]
    GradePoints,
    /// Average marks divided by 20
    MarksOverTwenty,
}

impl GpaFormula {
    /// Compute a GPA from per-course grades and their average marks
    #[must_use]
    pub fn apply(self, grades: &[Grade], average_marks: f64) -> f64 {
        match self {
            Self::GradePoints => mean(grades.iter().map(|g| g.gpa_point())),
            Self::MarksOverTwenty => average_marks / 20.0,
        }
    }

    /// Kebab-case label as used in the config file
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GradePoints => "grade-points",
            Self::MarksOverTwenty => "marks-over-twenty",
        }
    }
}

impl fmt::Display for GpaFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GpaFormula {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "grade-points" | "points" => Ok(Self::GradePoints),
            "marks-over-twenty" | "marks/20" => Ok(Self::MarksOverTwenty),
            _ => Err(format!(
                "Unknown GPA formula: '{s}' (expected grade-points or marks-over-twenty)"
            )),
        }
    }
}

/// Arithmetic mean, 0.0 for an empty sequence
pub(crate) fn mean(values: impl IntoIterator<Item = f64>) -> f64 {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0_u32), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / f64::from(count)
    }
}

/// One course line in a student report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseResult {
    /// Course code
    pub course_code: String,
    /// Marks in the course
    pub marks: f64,
    /// Grade derived from the marks
    pub grade: Grade,
}

/// A course's share of a student's total marks (pie chart slice)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarksShare {
    /// Course code
    pub course_code: String,
    /// Marks in the course
    pub marks: f64,
    /// Percentage of the student's total marks, 0..=100
    pub percent: f64,
}

/// Per-student report statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportStats {
    /// Student identifier
    pub student_id: String,
    /// Name taken from the student's first record
    pub student_name: String,
    /// Mean marks across courses
    pub average_marks: f64,
    /// Highest marks
    pub highest: f64,
    /// Lowest marks
    pub lowest: f64,
    /// GPA under the configured formula
    pub gpa: f64,
    /// Formula used for `gpa`
    pub gpa_formula: GpaFormula,
    /// Courses in ledger insertion order
    pub courses: Vec<CourseResult>,
}

impl ReportStats {
    /// Number of courses in the report
    #[must_use]
    pub fn course_count(&self) -> usize {
        self.courses.len()
    }

    /// Each course's share of the total marks.
    ///
    /// Shares are computed from the marks clamped at zero so that a negative
    /// mark cannot produce a negative slice. When the total is zero every share
    /// is zero.
    #[must_use]
    pub fn distribution(&self) -> Vec<MarksShare> {
        let total: f64 = self.courses.iter().map(|c| c.marks.max(0.0)).sum();
        self.courses
            .iter()
            .map(|c| MarksShare {
                course_code: c.course_code.clone(),
                marks: c.marks,
                percent: if total > 0.0 {
                    c.marks.max(0.0) / total * 100.0
                } else {
                    0.0
                },
            })
            .collect()
    }
}

/// One row of the all-students summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentSummary {
    /// Student identifier
    pub student_id: String,
    /// Name from the last row scanned for this student
    pub name: String,
    /// Number of course records
    pub course_count: usize,
    /// Mean marks across courses
    pub average_marks: f64,
    /// GPA under the configured formula
    pub gpa: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats_with(marks: &[(&str, f64)]) -> ReportStats {
        ReportStats {
            student_id: "S1".to_string(),
            student_name: "Alice".to_string(),
            average_marks: 0.0,
            highest: 0.0,
            lowest: 0.0,
            gpa: 0.0,
            gpa_formula: GpaFormula::GradePoints,
            courses: marks
                .iter()
                .map(|(code, m)| CourseResult {
                    course_code: (*code).to_string(),
                    marks: *m,
                    grade: Grade::from_marks(*m),
                })
                .collect(),
        }
    }

    #[test]
    fn test_grade_point_formula() {
        let gpa = GpaFormula::GradePoints.apply(&[Grade::S, Grade::A, Grade::B], 0.0);
        assert!((gpa - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_marks_over_twenty_formula() {
        let gpa = GpaFormula::MarksOverTwenty.apply(&[Grade::S], 85.0);
        assert!((gpa - 4.25).abs() < 1e-9);
    }

    #[test]
    fn test_formula_parse() {
        assert_eq!("grade-points".parse::<GpaFormula>(), Ok(GpaFormula::GradePoints));
        assert_eq!("MARKS_OVER_TWENTY".parse::<GpaFormula>(), Ok(GpaFormula::MarksOverTwenty));
        assert!("weighted".parse::<GpaFormula>().is_err());
    }

    #[test]
    fn test_mean_of_empty_is_zero() {
        assert!(mean(std::iter::empty()).abs() < f64::EPSILON);
    }

    #[test]
    fn test_distribution_percentages() {
        let stats = stats_with(&[("CS101", 75.0), ("MA101", 25.0)]);
        let shares = stats.distribution();
        assert_eq!(shares.len(), 2);
        assert!((shares[0].percent - 75.0).abs() < 1e-9);
        assert!((shares[1].percent - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_distribution_all_zero() {
        let stats = stats_with(&[("CS101", 0.0), ("MA101", 0.0)]);
        assert!(stats.distribution().iter().all(|s| s.percent == 0.0));
    }
}
