//! Course catalog and its store-backed registry

use crate::core::error::{GradebookError, Result};
use crate::core::models::Course;
use crate::core::storage::TableStore;
use crate::info;

/// In-memory set of courses keyed by unique code, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseCatalog {
    courses: Vec<Course>,
}

impl CourseCatalog {
    /// Build a catalog from stored courses
    #[must_use]
    pub const fn from_courses(courses: Vec<Course>) -> Self {
        Self { courses }
    }

    /// Whether a course with this code exists (code is normalized first)
    #[must_use]
    pub fn exists(&self, code: &str) -> bool {
        let code = Course::normalize_code(code);
        self.courses.iter().any(|c| c.code == code)
    }

    /// Look up a course by code
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&Course> {
        let code = Course::normalize_code(code);
        self.courses.iter().find(|c| c.code == code)
    }

    /// Add a course. The code is uppercased and both fields are trimmed.
    ///
    /// # Errors
    /// * `Validation` if code or name is blank
    /// * `DuplicateCourse` if the code is already present
    pub fn add_course(&mut self, code: &str, name: &str) -> Result<&Course> {
        let code = Course::normalize_code(code);
        let name = name.trim();
        if code.is_empty() {
            return Err(GradebookError::Validation {
                field: "course code",
            });
        }
        if name.is_empty() {
            return Err(GradebookError::Validation {
                field: "course name",
            });
        }
        if self.exists(&code) {
            return Err(GradebookError::DuplicateCourse(code));
        }
        self.courses.push(Course::new(code, name.to_string()));
        Ok(&self.courses[self.courses.len() - 1])
    }

    /// All courses in insertion order
    #[must_use]
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }
}

/// Course catalog persisted through a [`TableStore`]
#[derive(Debug)]
pub struct CourseRegistry<C> {
    store: C,
}

impl<C: TableStore<Course>> CourseRegistry<C> {
    /// Wrap a course table
    pub const fn new(store: C) -> Self {
        Self { store }
    }

    /// Load the current catalog
    ///
    /// # Errors
    /// Returns an error if the table cannot be read
    pub fn catalog(&self) -> Result<CourseCatalog> {
        Ok(CourseCatalog::from_courses(self.store.load_all()?))
    }

    /// Add a course and persist the catalog
    ///
    /// # Errors
    /// See [`CourseCatalog::add_course`]; also storage errors
    pub fn add_course(&mut self, code: &str, name: &str) -> Result<Course> {
        let mut catalog = self.catalog()?;
        let course = catalog.add_course(code, name)?.clone();
        self.store.save_all(catalog.courses())?;
        info!("Course {} added: {}", course.code, course.name);
        Ok(course)
    }

    /// Whether the course exists in the stored catalog
    ///
    /// # Errors
    /// Returns an error if the table cannot be read
    pub fn exists(&self, code: &str) -> Result<bool> {
        Ok(self.catalog()?.exists(code))
    }

    /// All stored courses in insertion order
    ///
    /// # Errors
    /// Returns an error if the table cannot be read
    pub fn courses(&self) -> Result<Vec<Course>> {
        self.store.load_all()
    }

    /// Access the underlying store
    pub const fn store(&self) -> &C {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::storage::MemoryTable;

    #[test]
    fn test_add_course_normalizes_code() {
        let mut catalog = CourseCatalog::default();
        let course = catalog.add_course(" cs101 ", " Intro ").unwrap();
        assert_eq!(course.code, "CS101");
        assert_eq!(course.name, "Intro");
        assert!(catalog.exists("Cs101"));
        assert!(catalog.get("cs101").is_some());
    }

    #[test]
    fn test_duplicate_course_rejected() {
        let mut catalog = CourseCatalog::default();
        catalog.add_course("CS101", "Intro").unwrap();
        assert!(matches!(
            catalog.add_course("cs101", "Other"),
            Err(GradebookError::DuplicateCourse(code)) if code == "CS101"
        ));
        assert_eq!(catalog.courses().len(), 1);
    }

    #[test]
    fn test_blank_fields_rejected() {
        let mut catalog = CourseCatalog::default();
        assert!(catalog.add_course("", "Intro").is_err());
        assert!(catalog.add_course("CS101", "  ").is_err());
    }

    #[test]
    fn test_registry_persists() {
        let mut registry = CourseRegistry::new(MemoryTable::<Course>::default());
        registry.add_course("cs101", "Intro").unwrap();
        assert!(registry.exists("CS101").unwrap());
        assert!(!registry.exists("MA101").unwrap());
        assert_eq!(registry.store().save_count(), 1);

        assert!(registry.add_course("CS101", "Again").is_err());
        assert_eq!(registry.store().save_count(), 1);
    }
}
