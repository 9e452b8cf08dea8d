//! CLI argument definitions for the gradebook

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use gradebook::config::ConfigOverrides;
use gradebook::core::models::{GpaFormula, Role};
use gradebook::logger::Level;

/// CLI log level argument
///
/// Converts to lowercase strings for config storage and to `logger::Level`
/// for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Level::from(*self))
    }
}

/// Account role accepted by `signup`
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum RoleArg {
    /// Full access
    Admin,
    /// Own report and read-only summary
    Student,
}

impl From<RoleArg> for Role {
    fn from(arg: RoleArg) -> Self {
        match arg {
            RoleArg::Admin => Self::Admin,
            RoleArg::Student => Self::Student,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `data_dir`, `gpa_formula`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum CourseSubcommand {
    /// Add a course to the catalog (admin).
    Add {
        /// Course code, stored uppercase
        #[arg(value_name = "CODE")]
        code: String,
        /// Course name
        #[arg(value_name = "NAME")]
        name: String,
    },
    /// List all courses.
    List,
}

#[derive(Debug, Subcommand)]
pub enum MarksSubcommand {
    /// Record marks for a student in a course, replacing any existing record (admin).
    Record {
        /// Student ID
        #[arg(value_name = "ID")]
        student_id: String,
        /// Student name
        #[arg(value_name = "NAME")]
        name: String,
        /// Course code
        #[arg(value_name = "COURSE")]
        course: String,
        /// Marks, a decimal number
        #[arg(value_name = "MARKS", allow_hyphen_values = true)]
        marks: String,
    },
    /// Change the marks of an existing record (admin).
    Edit {
        /// Student ID
        #[arg(value_name = "ID")]
        student_id: String,
        /// Course code
        #[arg(value_name = "COURSE")]
        course: String,
        /// New marks
        #[arg(value_name = "MARKS", allow_hyphen_values = true)]
        marks: String,
    },
    /// Delete a student's record in a course (admin).
    Delete {
        /// Student ID
        #[arg(value_name = "ID")]
        student_id: String,
        /// Course code
        #[arg(value_name = "COURSE")]
        course: String,
    },
    /// List a student's records.
    List {
        /// Student ID
        #[arg(value_name = "ID")]
        student_id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum ReportSubcommand {
    /// Generate a performance report for one student.
    ///
    /// Without an ID the logged-in user's own report is generated.
    Student {
        /// Student ID (defaults to the logged-in username)
        #[arg(value_name = "ID")]
        student_id: Option<String>,

        /// Report format: markdown (md) or html
        #[arg(short, long, value_name = "FORMAT", default_value = "html")]
        format: String,

        /// Output file path (defaults to the configured reports directory)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Generate the all-students summary report.
    All {
        /// Report format: markdown (md) or html
        #[arg(short, long, value_name = "FORMAT", default_value = "html")]
        format: String,

        /// Output file path (defaults to the configured reports directory)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Also export the summary table as CSV to this path
        #[arg(long, value_name = "FILE")]
        csv: Option<PathBuf>,
    },
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Create a new account.
    Signup {
        /// Unique username; for students this is also the student ID
        #[arg(value_name = "USERNAME")]
        username: String,
        /// Password
        #[arg(value_name = "PASSWORD")]
        password: String,
        /// Account role
        #[arg(long, value_enum, default_value_t = RoleArg::Student)]
        role: RoleArg,
    },
    /// Manage the course catalog.
    Course {
        #[command(subcommand)]
        subcommand: CourseSubcommand,
    },
    /// Record, edit, delete and list marks.
    Marks {
        #[command(subcommand)]
        subcommand: MarksSubcommand,
    },
    /// Generate student or class reports.
    Report {
        #[command(subcommand)]
        subcommand: ReportSubcommand,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "gradebook",
    about = "Gradebook command-line interface",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override the data directory holding the CSV tables
    #[arg(long = "data-dir", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the reports output directory
    #[arg(long = "reports-dir", value_name = "DIR")]
    pub reports_dir: Option<PathBuf>,

    /// Override the GPA formula (grade-points | marks-over-twenty)
    #[arg(long = "gpa-formula", value_name = "FORMULA")]
    pub gpa_formula: Option<GpaFormula>,

    // --- Login ---
    /// Username to log in with
    #[arg(short = 'u', long = "user", value_name = "USERNAME", global = true)]
    pub user: Option<String>,

    /// Password to log in with
    #[arg(short = 'p', long = "password", value_name = "PASSWORD", global = true)]
    pub password: Option<String>,

    /// Subcommand to execute.
    /// A subcommand is required to run the CLI.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides for this run
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        let path_string = |p: &PathBuf| p.to_string_lossy().to_string();
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: self.config_log_file.as_ref().map(path_string),
            verbose: self.config_verbose,
            data_dir: self.data_dir.as_ref().map(path_string),
            reports_dir: self.reports_dir.as_ref().map(path_string),
            gpa_formula: self.gpa_formula,
        }
    }

    /// Login credentials, if both were given
    pub fn credentials(&self) -> Option<(&str, &str)> {
        Some((self.user.as_deref()?, self.password.as_deref()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_cli(command: Command) -> Cli {
        Cli {
            log_level: None,
            verbose: false,
            debug_flag: false,
            log_file: None,
            config_level: None,
            config_log_file: None,
            config_verbose: None,
            data_dir: None,
            reports_dir: None,
            gpa_formula: None,
            user: None,
            password: None,
            command,
        }
    }

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevelArg::Error.to_string(), "error");
        assert_eq!(LogLevelArg::Warn.to_string(), "warn");
        assert_eq!(LogLevelArg::Info.to_string(), "info");
        assert_eq!(LogLevelArg::Debug.to_string(), "debug");
    }

    #[test]
    fn test_log_level_to_logger_level() {
        assert_eq!(Level::from(LogLevelArg::Error), Level::Error);
        assert_eq!(Level::from(LogLevelArg::Warn), Level::Warn);
        assert_eq!(Level::from(LogLevelArg::Info), Level::Info);
        assert_eq!(Level::from(LogLevelArg::Debug), Level::Debug);
    }

    #[test]
    fn test_to_config_overrides_empty() {
        let cli = bare_cli(Command::Config { subcommand: None });
        let overrides = cli.to_config_overrides();
        assert!(overrides.level.is_none());
        assert!(overrides.file.is_none());
        assert!(overrides.verbose.is_none());
        assert!(overrides.data_dir.is_none());
        assert!(overrides.reports_dir.is_none());
        assert!(overrides.gpa_formula.is_none());
    }

    #[test]
    fn test_to_config_overrides_with_values() {
        let mut cli = bare_cli(Command::Config { subcommand: None });
        cli.config_level = Some(LogLevelArg::Debug);
        cli.config_log_file = Some(PathBuf::from("/tmp/test.log"));
        cli.config_verbose = Some(true);
        cli.data_dir = Some(PathBuf::from("/data"));
        cli.reports_dir = Some(PathBuf::from("/reports"));
        cli.gpa_formula = Some(GpaFormula::MarksOverTwenty);

        let overrides = cli.to_config_overrides();
        assert_eq!(overrides.level, Some("debug".to_string()));
        assert_eq!(overrides.file, Some("/tmp/test.log".to_string()));
        assert_eq!(overrides.verbose, Some(true));
        assert_eq!(overrides.data_dir, Some("/data".to_string()));
        assert_eq!(overrides.reports_dir, Some("/reports".to_string()));
        assert_eq!(overrides.gpa_formula, Some(GpaFormula::MarksOverTwenty));
    }

    #[test]
    fn test_credentials_need_both_parts() {
        let mut cli = bare_cli(Command::Course {
            subcommand: CourseSubcommand::List,
        });
        cli.user = Some("admin".to_string());
        assert!(cli.credentials().is_none());
        cli.password = Some("admin".to_string());
        assert_eq!(cli.credentials(), Some(("admin", "admin")));
    }

    #[test]
    fn test_parse_marks_record_with_negative_marks() {
        let cli = Cli::try_parse_from([
            "gradebook", "-u", "admin", "-p", "admin", "marks", "record", "S1", "Alice", "CS101",
            "-5",
        ])
        .unwrap();
        match cli.command {
            Command::Marks {
                subcommand: MarksSubcommand::Record { marks, .. },
            } => assert_eq!(marks, "-5"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_signup_defaults_to_student() {
        let cli = Cli::try_parse_from(["gradebook", "signup", "S1", "pw"]).unwrap();
        match cli.command {
            Command::Signup { role, .. } => assert_eq!(role, RoleArg::Student),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_gpa_formula_override() {
        let cli = Cli::try_parse_from([
            "gradebook",
            "--gpa-formula",
            "marks-over-twenty",
            "course",
            "list",
        ])
        .unwrap();
        assert_eq!(cli.gpa_formula, Some(GpaFormula::MarksOverTwenty));
    }
}
