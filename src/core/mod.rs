//! Core module for grading rules, storage and reporting

pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod gradebook;
pub mod ledger;
pub mod models;
pub mod report;
pub mod storage;
pub mod summary_export;

pub use error::{GradebookError, Result};

/// Returns the current version of the `Gradebook` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
