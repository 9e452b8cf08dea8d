//! Storage for the three gradebook tables
//!
//! The ledger, catalog and account book only work on in-memory sequences. They
//! reach persistence through [`TableStore`], which reads or replaces a whole
//! table at a time. [`CsvTable`] stores a table as a CSV file and
//! [`MemoryTable`] keeps it in memory.

pub mod csv_table;
pub mod memory;

pub use csv_table::{CsvRow, CsvTable, DataTables};
pub use memory::MemoryTable;

use crate::core::error::Result;

/// Whole-table persistence for rows of type `T`
pub trait TableStore<T> {
    /// Read every row in stored order
    ///
    /// # Errors
    /// Returns an error if the table cannot be read or a row is malformed
    fn load_all(&self) -> Result<Vec<T>>;

    /// Replace the stored table with `rows`
    ///
    /// # Errors
    /// Returns an error if the table cannot be written; the previous contents
    /// are left in place
    fn save_all(&mut self, rows: &[T]) -> Result<()>;
}
