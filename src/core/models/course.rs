//! Course model

use serde::{Deserialize, Serialize};

/// Represents a course in the admin-managed catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Course code, unique across the catalog (e.g., "CS101")
    pub code: String,

    /// Course name (e.g., "Introduction to Programming")
    pub name: String,
}

impl Course {
    /// Create a new course
    ///
    /// # Arguments
    /// * `code` - Course code
    /// * `name` - Full course name
    #[must_use]
    pub const fn new(code: String, name: String) -> Self {
        Self { code, name }
    }

    /// Normalize a course code the way it is keyed everywhere (trimmed, uppercase)
    #[must_use]
    pub fn normalize_code(code: &str) -> String {
        code.trim().to_uppercase()
    }
}
