//! Configuration module for the gradebook
//!
//! Settings live in a TOML file under the platform config directory and are
//! seeded from compiled-in defaults on first run. CLI flags can override any
//! value for a single invocation through [`ConfigOverrides`].

use crate::core::gradebook::GradingOptions;
use crate::core::models::GpaFormula;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Compiled-in defaults, chosen by build profile.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Variable expanded to the gradebook config directory
const DIR_VARIABLE: &str = "$GRADEBOOK";

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path, empty for console only
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Paths configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory holding students.csv, courses.csv and users.csv
    #[serde(default)]
    pub data_dir: String,
    /// Directory for rendered reports
    #[serde(default)]
    pub reports_dir: String,
}

const fn default_true() -> bool {
    true
}

/// Grading rules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradingConfig {
    /// GPA formula used by reports and the summary
    #[serde(default)]
    pub gpa_formula: GpaFormula,
    /// Reject marks for courses missing from the catalog
    #[serde(default = "default_true")]
    pub require_known_course: bool,
}

impl Default for GradingConfig {
    fn default() -> Self {
        Self {
            gpa_formula: GpaFormula::default(),
            require_known_course: true,
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
    /// Grading settings
    #[serde(default)]
    pub grading: GradingConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override data directory
    pub data_dir: Option<String>,
    /// Override reports output directory
    pub reports_dir: Option<String>,
    /// Override GPA formula
    pub gpa_formula: Option<GpaFormula>,
}

impl Config {
    /// Get the `$GRADEBOOK` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/gradebook`
    /// - macOS: `~/Library/Application Support/gradebook`
    /// - Windows: `%APPDATA%\gradebook`
    #[must_use]
    pub fn get_gradebook_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("gradebook")
    }

    /// Fill empty string fields from `defaults`.
    ///
    /// Used on load so that fields added in newer versions get a value while
    /// user settings are kept.
    ///
    /// # Returns
    ///
    /// `true` if any field changed
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        fn fill(target: &mut String, default: &str) -> bool {
            if target.is_empty() && !default.is_empty() {
                default.clone_into(target);
                true
            } else {
                false
            }
        }

        let mut changed = fill(&mut self.logging.level, &defaults.logging.level);
        changed |= fill(&mut self.logging.file, &defaults.logging.file);
        changed |= fill(&mut self.paths.data_dir, &defaults.paths.data_dir);
        changed |= fill(&mut self.paths.reports_dir, &defaults.paths.reports_dir);
        changed
    }

    /// Apply CLI-provided overrides for this run only
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file = Self::expand_variables(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }
        if let Some(data_dir) = &overrides.data_dir {
            self.paths.data_dir = Self::expand_variables(data_dir);
        }
        if let Some(reports_dir) = &overrides.reports_dir {
            self.paths.reports_dir = Self::expand_variables(reports_dir);
        }
        if let Some(formula) = overrides.gpa_formula {
            self.grading.gpa_formula = formula;
        }
    }

    /// Full path of the user config file (`config.toml`, or `dconfig.toml` in
    /// debug builds) inside [`get_gradebook_dir`](Self::get_gradebook_dir)
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_gradebook_dir().join(CONFIG_FILE_NAME)
    }

    /// Replace `$GRADEBOOK` with the config directory
    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let dir = Self::get_gradebook_dir();
            value.replace(DIR_VARIABLE, &dir.to_string_lossy())
        } else {
            value.to_string()
        }
    }

    /// Parse a config from TOML, expanding `$GRADEBOOK` in path values.
    ///
    /// Missing fields take their serde defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or does not match the schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.paths.data_dir = Self::expand_variables(&config.paths.data_dir);
        config.paths.reports_dir = Self::expand_variables(&config.paths.reports_dir);

        Ok(config)
    }

    /// Compiled-in default configuration for this build profile
    ///
    /// # Panics
    /// Panics if the embedded defaults are not valid TOML, which the test suite
    /// rules out.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load the config file, creating it from defaults on first run.
    ///
    /// An existing file has empty fields back-filled from defaults and is
    /// re-saved when that changed anything. Any read or parse problem falls
    /// back to the defaults.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if !config_file.exists() {
            let _ = defaults.save();
            return defaults;
        }

        match fs::read_to_string(&config_file)
            .ok()
            .and_then(|content| Self::from_toml(&content).ok())
        {
            Some(mut config) => {
                if config.merge_defaults(&defaults) {
                    let _ = config.save();
                }
                config
            }
            None => defaults,
        }
    }

    /// Write the config to the user config file, creating its directory
    ///
    /// # Errors
    /// Returns an error if serialization fails or the file cannot be written
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_file = Self::get_config_file_path();
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(&config_file, toml_str)?;
        Ok(())
    }

    /// Get a configuration value by key
    ///
    /// Supported keys: `level`, `file`, `verbose`, `data_dir`, `reports_dir`,
    /// `gpa_formula`, `require_known_course` (dashes are accepted in place of
    /// underscores).
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key.replace('-', "_").as_str() {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "data_dir" => Some(self.paths.data_dir.clone()),
            "reports_dir" => Some(self.paths.reports_dir.clone()),
            "gpa_formula" => Some(self.grading.gpa_formula.to_string()),
            "require_known_course" => Some(self.grading.require_known_course.to_string()),
            _ => None,
        }
    }

    /// Set a configuration value by key. Call [`save`](Self::save) to persist.
    ///
    /// # Errors
    /// Returns an error for an unknown key or a value of the wrong type
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        let parse_bool = |name: &str| {
            value
                .parse::<bool>()
                .map_err(|_| format!("Invalid boolean value for '{name}': '{value}'"))
        };

        match key.replace('-', "_").as_str() {
            "level" => {
                let level = value.trim().to_lowercase();
                if level.parse::<crate::logger::Level>().is_err() {
                    return Err(format!("Invalid log level: '{value}'"));
                }
                self.logging.level = level;
            }
            "file" => self.logging.file = Self::expand_variables(value),
            "verbose" => self.logging.verbose = parse_bool("verbose")?,
            "data_dir" => self.paths.data_dir = Self::expand_variables(value),
            "reports_dir" => self.paths.reports_dir = Self::expand_variables(value),
            "gpa_formula" => self.grading.gpa_formula = value.parse()?,
            "require_known_course" => {
                self.grading.require_known_course = parse_bool("require_known_course")?;
            }
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset one key to its value in `defaults`. Call [`save`](Self::save) to persist.
    ///
    /// # Errors
    /// Returns an error if the key is not recognized
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key.replace('-', "_").as_str() {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "data_dir" => self.paths.data_dir.clone_from(&defaults.paths.data_dir),
            "reports_dir" => self.paths.reports_dir.clone_from(&defaults.paths.reports_dir),
            "gpa_formula" => self.grading.gpa_formula = defaults.grading.gpa_formula,
            "require_known_course" => {
                self.grading.require_known_course = defaults.grading.require_known_course;
            }
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Delete the config file so the next [`load`](Self::load) recreates it.
    /// A missing file is not an error.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be removed
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }

    /// Directory holding the CSV tables
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(&self.paths.data_dir)
    }

    /// Directory for rendered reports
    #[must_use]
    pub fn reports_dir(&self) -> PathBuf {
        PathBuf::from(&self.paths.reports_dir)
    }

    /// Grading switches handed to the gradebook
    #[must_use]
    pub const fn grading_options(&self) -> GradingOptions {
        GradingOptions {
            gpa_formula: self.grading.gpa_formula,
            require_known_course: self.grading.require_known_course,
        }
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  data_dir = \"{}\"", self.paths.data_dir)?;
        writeln!(f, "  reports_dir = \"{}\"", self.paths.reports_dir)?;

        writeln!(f, "\n[grading]")?;
        writeln!(f, "  gpa_formula = \"{}\"", self.grading.gpa_formula)?;
        writeln!(
            f,
            "  require_known_course = {}",
            self.grading.require_known_course
        )?;

        Ok(())
    }
}
