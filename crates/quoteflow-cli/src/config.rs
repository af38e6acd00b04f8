//! CLI configuration
//!
//! Settings come from `quoteflow.yaml` when present, then CLI flags and
//! `QUOTEFLOW_*` environment variables override them.

use crate::error::{CliError, CliResult};
use quoteflow::{DriverConfig, PURCHASE_VEHICLE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "quoteflow.yaml";

/// CLI verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Verbosity {
    /// Quiet - minimal output
    Quiet,
    /// Normal - default output
    #[default]
    Normal,
    /// Verbose - extra output
    Verbose,
    /// Debug - maximum output
    Debug,
}

impl Verbosity {
    /// Map `-q` and the `-v` count to a level
    #[must_use]
    pub const fn from_flags(quiet: bool, verbose: u8) -> Self {
        if quiet {
            return Self::Quiet;
        }
        match verbose {
            0 => Self::Normal,
            1 => Self::Verbose,
            _ => Self::Debug,
        }
    }

    /// Check if quiet mode
    #[must_use]
    pub const fn is_quiet(self) -> bool {
        matches!(self, Self::Quiet)
    }

    /// Check if verbose or higher
    #[must_use]
    pub const fn is_verbose(self) -> bool {
        matches!(self, Self::Verbose | Self::Debug)
    }
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorChoice {
    /// Always use colors
    Always,
    /// Use colors when output is a terminal
    #[default]
    Auto,
    /// Never use colors
    Never,
}

impl ColorChoice {
    /// Should use colors based on output detection
    #[must_use]
    pub fn should_color(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => std::io::IsTerminal::is_terminal(&std::io::stdout()),
        }
    }
}

/// Settings for one journey run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Test data file (csv, tsv, or a workbook)
    pub data: PathBuf,
    /// Story name shown in logs and reports
    pub story: String,
    /// Browser settings
    pub driver: DriverConfig,
    /// Directory for reports and failure screenshots
    pub output_dir: PathBuf,
    /// Capture a screenshot when a step fails
    pub screenshot_on_failure: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            data: PathBuf::from("quote.csv"),
            story: PURCHASE_VEHICLE.to_string(),
            driver: DriverConfig::default(),
            output_dir: PathBuf::from("target/quoteflow"),
            screenshot_on_failure: true,
        }
    }
}

impl RunConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a YAML config file
    pub fn load(path: &Path) -> CliResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            CliError::config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_yaml(&text)
    }

    /// Parse YAML text
    pub fn from_yaml(text: &str) -> CliResult<Self> {
        Ok(serde_yaml_ng::from_str(text)?)
    }

    /// Load `explicit`, or `quoteflow.yaml` if it exists, or the defaults
    pub fn discover(explicit: Option<&Path>) -> CliResult<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    Self::load(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> CliResult<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Set the data file
    #[must_use]
    pub fn with_data(mut self, data: impl Into<PathBuf>) -> Self {
        self.data = data.into();
        self
    }

    /// Set the output directory
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Show the browser window
    #[must_use]
    pub fn with_headed(mut self, headed: bool) -> Self {
        self.driver.headless = !headed;
        self
    }

    /// Set the chromium binary
    #[must_use]
    pub fn with_chromium_path(mut self, path: impl Into<String>) -> Self {
        self.driver = self.driver.chromium_path(path);
        self
    }

    /// Disable the chromium sandbox
    #[must_use]
    pub fn with_no_sandbox(mut self) -> Self {
        self.driver = self.driver.no_sandbox();
        self
    }

    /// Set the implicit element wait
    #[must_use]
    pub fn with_element_timeout(mut self, timeout: Duration) -> Self {
        self.driver = self.driver.element_timeout(timeout);
        self
    }

    /// Set screenshot capture on failure
    #[must_use]
    pub const fn with_screenshot_on_failure(mut self, enabled: bool) -> Self {
        self.screenshot_on_failure = enabled;
        self
    }

    /// File stem shared by the report and the screenshot
    #[must_use]
    pub fn artifact_stem(&self) -> String {
        let slug: String = self
            .story
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
            .collect();
        let slug = slug.trim_matches('-');
        if slug.is_empty() {
            "journey".to_string()
        } else {
            slug.to_string()
        }
    }

    /// Path of the JSON report
    #[must_use]
    pub fn report_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}-report.json", self.artifact_stem()))
    }

    /// Path of the failure screenshot
    #[must_use]
    pub fn screenshot_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}-failure.png", self.artifact_stem()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    mod verbosity_tests {
        use super::*;

        #[test]
        fn test_from_flags() {
            assert_eq!(Verbosity::from_flags(true, 3), Verbosity::Quiet);
            assert_eq!(Verbosity::from_flags(false, 0), Verbosity::Normal);
            assert_eq!(Verbosity::from_flags(false, 1), Verbosity::Verbose);
            assert_eq!(Verbosity::from_flags(false, 2), Verbosity::Debug);
            assert!(Verbosity::Debug.is_verbose());
            assert!(!Verbosity::Normal.is_quiet());
        }

        #[test]
        fn test_color_choice_fixed() {
            assert!(ColorChoice::Always.should_color());
            assert!(!ColorChoice::Never.should_color());
        }
    }

    mod run_config_tests {
        use super::*;

        #[test]
        fn test_defaults() {
            let config = RunConfig::new();
            assert_eq!(config.story, "Purchase Vehicle");
            assert!(config.driver.headless);
            assert!(config.screenshot_on_failure);
        }

        #[test]
        fn test_partial_yaml_keeps_defaults() {
            let config = RunConfig::from_yaml(
                "data: fixtures/quote.tsv\ndriver:\n  element_timeout_ms: 2500\n",
            )
            .unwrap();
            assert_eq!(config.data, PathBuf::from("fixtures/quote.tsv"));
            assert_eq!(config.driver.element_timeout_ms, 2500);
            assert_eq!(config.driver.poll_interval_ms, 100);
            assert_eq!(config.output_dir, PathBuf::from("target/quoteflow"));
        }

        #[test]
        fn test_yaml_round_trip() {
            let config = RunConfig::new()
                .with_data("a.csv")
                .with_headed(true)
                .with_no_sandbox();
            let back = RunConfig::from_yaml(&config.to_yaml().unwrap()).unwrap();
            assert_eq!(back, config);
            assert!(!back.driver.headless);
            assert!(!back.driver.sandbox);
        }

        #[test]
        fn test_invalid_yaml_is_error() {
            let err = RunConfig::from_yaml("driver: [1, 2").unwrap_err();
            assert!(err.to_string().contains("YAML"));
        }

        #[test]
        fn test_load_missing_file() {
            let err = RunConfig::load(Path::new("/nonexistent/quoteflow.yaml")).unwrap_err();
            assert!(err.to_string().contains("Configuration"));
        }

        #[test]
        fn test_discover_explicit_file() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("custom.yaml");
            std::fs::write(&path, "story: Smoke\n").unwrap();
            let config = RunConfig::discover(Some(&path)).unwrap();
            assert_eq!(config.story, "Smoke");
        }

        #[test]
        fn test_artifact_paths() {
            let config = RunConfig::new().with_output_dir("out");
            assert_eq!(
                config.report_path(),
                PathBuf::from("out/purchase-vehicle-report.json")
            );
            assert_eq!(
                config.screenshot_path(),
                PathBuf::from("out/purchase-vehicle-failure.png")
            );
        }

        #[test]
        fn test_element_timeout_override() {
            let config = RunConfig::new().with_element_timeout(Duration::from_millis(750));
            assert_eq!(config.driver.element_timeout_ms, 750);
        }
    }
}
