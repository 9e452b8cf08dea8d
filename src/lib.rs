//! Shared library for `Gradebook`
//! Contains the grading rules, storage tables, reports and configuration used by the CLI

pub mod core;
pub mod logger;

pub use core::config;
pub use core::get_version;
