//! In-memory table, used for tests and ephemeral gradebooks

use super::TableStore;
use crate::core::error::Result;

/// A table held entirely in memory
#[derive(Debug, Clone)]
pub struct MemoryTable<T> {
    rows: Vec<T>,
    saves: usize,
}

impl<T> Default for MemoryTable<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            saves: 0,
        }
    }
}

impl<T: Clone> MemoryTable<T> {
    /// Create a table pre-populated with `rows`
    #[must_use]
    pub const fn new(rows: Vec<T>) -> Self {
        Self { rows, saves: 0 }
    }

    /// Current contents
    #[must_use]
    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    /// Number of `save_all` calls so far
    #[must_use]
    pub const fn save_count(&self) -> usize {
        self.saves
    }
}

impl<T: Clone> TableStore<T> for MemoryTable<T> {
    fn load_all(&self) -> Result<Vec<T>> {
        Ok(self.rows.clone())
    }

    fn save_all(&mut self, rows: &[T]) -> Result<()> {
        self.rows = rows.to_vec();
        self.saves += 1;
        Ok(())
    }
}
