//! CLI command handlers for the gradebook.
//!
//! Each command is implemented in its own submodule. Handlers print `✓ …` on
//! success; failures are logged, printed as `✗ …` and end the process with a
//! non-zero exit code.

pub mod account;
pub mod config;
pub mod course;
pub mod marks;
pub mod report;

use gradebook::config::Config;
use gradebook::core::auth::Authenticator;
use gradebook::core::gradebook::{open_csv, CsvGradebook};
use gradebook::core::models::{Session, UserAccount};
use gradebook::core::storage::CsvTable;
use gradebook::core::{GradebookError, Result};
use gradebook::{debug, error};

/// Login name and password taken from `--user` / `--password`
pub type Credentials<'a> = Option<(&'a str, &'a str)>;

/// Open the gradebook tables in the configured data directory
pub fn open(config: &Config) -> Result<(CsvGradebook, Authenticator<CsvTable<UserAccount>>)> {
    let data_dir = config.data_dir();
    debug!("Opening data directory {}", data_dir.display());
    open_csv(&data_dir, config.grading_options())
}

/// Open the tables and log in with the given credentials
pub fn login(config: &Config, credentials: Credentials) -> Result<(CsvGradebook, Session)> {
    let Some((username, password)) = credentials else {
        return Err(GradebookError::Validation {
            field: "--user/--password",
        });
    };
    let (gradebook, auth) = open(config)?;
    let session = auth.authenticate(username, password)?;
    Ok((gradebook, session))
}

/// Report a failed command and exit
pub fn fail(action: &str, err: &GradebookError) -> ! {
    error!("{action} failed: {err}");
    eprintln!("✗ {action} failed: {err}");
    std::process::exit(1);
}
