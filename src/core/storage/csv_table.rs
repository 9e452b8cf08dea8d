//! CSV-backed tables
//!
//! Each table is one CSV file with a fixed header row. Rows are decoded into
//! loose string structs first and then converted into strict models, so a row
//! with a missing column or a bad value is reported with its line number
//! instead of leaking partial data into the ledger.

use super::TableStore;
use crate::core::error::{GradebookError, Result};
use crate::core::models::{Course, Grade, GradeRecord, UserAccount};
use crate::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// File name of the grade records table
pub const STUDENTS_FILE: &str = "students.csv";
/// File name of the course catalog table
pub const COURSES_FILE: &str = "courses.csv";
/// File name of the accounts table
pub const USERS_FILE: &str = "users.csv";

/// A model that can be stored as one row of a CSV table
pub trait CsvRow: Sized {
    /// Raw row shape as read from and written to the file
    type Row: Serialize + DeserializeOwned;

    /// Column names, in file order
    const HEADER: &'static [&'static str];

    /// Convert a raw row into the model
    ///
    /// # Errors
    /// Returns a human-readable reason if the row is invalid
    fn from_row(row: Self::Row) -> std::result::Result<Self, String>;

    /// Convert the model into a raw row
    fn to_row(&self) -> Self::Row;

    /// Rows written when the table file is first created
    fn seed() -> Vec<Self> {
        Vec::new()
    }
}

/// Raw row of `students.csv`
#[derive(Debug, Serialize, Deserialize)]
pub struct RecordRow {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "CourseCode")]
    course_code: String,
    #[serde(rename = "Marks")]
    marks: String,
    #[serde(rename = "Grade")]
    grade: String,
}

impl CsvRow for GradeRecord {
    type Row = RecordRow;
    const HEADER: &'static [&'static str] = &["ID", "Name", "CourseCode", "Marks", "Grade"];

    fn from_row(row: RecordRow) -> std::result::Result<Self, String> {
        if row.id.is_empty() {
            return Err("empty ID".to_string());
        }
        if row.course_code.is_empty() {
            return Err("empty CourseCode".to_string());
        }
        let marks = row
            .marks
            .parse::<f64>()
            .ok()
            .filter(|m| m.is_finite())
            .ok_or_else(|| format!("non-numeric Marks '{}'", row.marks))?;
        let stored: Grade = row.grade.parse()?;

        let record = Self::new(row.id, row.name, row.course_code, marks);
        if record.grade() != stored {
            warn!(
                "Stored grade {stored} for {} in {} does not match marks {marks:.2}; using {}",
                record.student_id(),
                record.course_code(),
                record.grade()
            );
        }
        Ok(record)
    }

    fn to_row(&self) -> RecordRow {
        RecordRow {
            id: self.student_id().to_string(),
            name: self.student_name().to_string(),
            course_code: self.course_code().to_string(),
            marks: format!("{:.2}", self.marks()),
            grade: self.grade().to_string(),
        }
    }
}

/// Raw row of `courses.csv`
#[derive(Debug, Serialize, Deserialize)]
pub struct CourseRow {
    #[serde(rename = "CourseCode")]
    code: String,
    #[serde(rename = "CourseName")]
    name: String,
}

impl CsvRow for Course {
    type Row = CourseRow;
    const HEADER: &'static [&'static str] = &["CourseCode", "CourseName"];

    fn from_row(row: CourseRow) -> std::result::Result<Self, String> {
        let code = Self::normalize_code(&row.code);
        if code.is_empty() {
            return Err("empty CourseCode".to_string());
        }
        Ok(Self::new(code, row.name))
    }

    fn to_row(&self) -> CourseRow {
        CourseRow {
            code: self.code.clone(),
            name: self.name.clone(),
        }
    }
}

/// Raw row of `users.csv`
#[derive(Debug, Serialize, Deserialize)]
pub struct AccountRow {
    #[serde(rename = "Username")]
    username: String,
    #[serde(rename = "Password")]
    password: String,
    #[serde(rename = "Role")]
    role: String,
}

impl CsvRow for UserAccount {
    type Row = AccountRow;
    const HEADER: &'static [&'static str] = &["Username", "Password", "Role"];

    fn from_row(row: AccountRow) -> std::result::Result<Self, String> {
        if row.username.is_empty() {
            return Err("empty Username".to_string());
        }
        let role = row.role.parse()?;
        Ok(Self::new(row.username, row.password, role))
    }

    fn to_row(&self) -> AccountRow {
        AccountRow {
            username: self.username.clone(),
            password: self.password.clone(),
            role: self.role.to_string(),
        }
    }

    fn seed() -> Vec<Self> {
        vec![Self::default_admin()]
    }
}

/// One table stored as a CSV file
#[derive(Debug)]
pub struct CsvTable<T> {
    path: PathBuf,
    _rows: PhantomData<T>,
}

impl<T: CsvRow> CsvTable<T> {
    /// Open the table at `path`, creating the file (header plus seed rows) if
    /// it does not exist yet
    ///
    /// # Errors
    /// Returns an error if the parent directory or the file cannot be created
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let table = Self {
            path,
            _rows: PhantomData,
        };
        if !table.path.exists() {
            let seed = T::seed();
            write_rows(&table.path, &seed)?;
            info!(
                "Created {} with {} seed row(s)",
                table.path.display(),
                seed.len()
            );
        }
        Ok(table)
    }

    /// Path of the backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn malformed(&self, line: u64, reason: String) -> GradebookError {
        GradebookError::MalformedRow {
            path: self.path.clone(),
            line,
            reason,
        }
    }
}

impl<T: CsvRow> TableStore<T> for CsvTable<T> {
    fn load_all(&self) -> Result<Vec<T>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(&self.path)?;
        let headers = reader.headers()?.clone();

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            let line = record.position().map_or(0, csv::Position::line);
            let raw: T::Row = record
                .deserialize(Some(&headers))
                .map_err(|e| self.malformed(line, e.to_string()))?;
            rows.push(T::from_row(raw).map_err(|reason| self.malformed(line, reason))?);
        }

        debug!("Loaded {} row(s) from {}", rows.len(), self.path.display());
        Ok(rows)
    }

    fn save_all(&mut self, rows: &[T]) -> Result<()> {
        write_rows(&self.path, rows)?;
        debug!("Saved {} row(s) to {}", rows.len(), self.path.display());
        Ok(())
    }
}

/// Write header and rows to a sibling temp file, then rename it over `path`
fn write_rows<T: CsvRow>(path: &Path, rows: &[T]) -> Result<()> {
    let tmp_path = path.with_extension("csv.tmp");
    {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&tmp_path)?;
        writer.write_record(T::HEADER)?;
        for row in rows {
            writer.serialize(row.to_row())?;
        }
        writer.flush()?;
    }
    fs::rename(&tmp_path, path)?;
    Ok(())
}

/// The three tables of a gradebook data directory
#[derive(Debug)]
pub struct DataTables {
    /// `students.csv`
    pub records: CsvTable<GradeRecord>,
    /// `courses.csv`
    pub courses: CsvTable<Course>,
    /// `users.csv`
    pub accounts: CsvTable<UserAccount>,
}

impl DataTables {
    /// Open (and bootstrap if needed) every table under `data_dir`
    ///
    /// # Errors
    /// Returns an error if any table file cannot be created
    pub fn open(data_dir: &Path) -> Result<Self> {
        Ok(Self {
            records: CsvTable::open(data_dir.join(STUDENTS_FILE))?,
            courses: CsvTable::open(data_dir.join(COURSES_FILE))?,
            accounts: CsvTable::open(data_dir.join(USERS_FILE))?,
        })
    }
}
