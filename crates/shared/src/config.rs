//! Application configuration management.

use serde::Deserialize;

/// Separator width used when none is configured.
pub const DEFAULT_SEPARATOR_WIDTH: usize = 40;

/// Application configuration.
///
/// Every field has a default, so an empty configuration is valid.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Report export configuration.
    #[serde(default)]
    pub export: ExportConfig,
    /// Report rendering configuration.
    #[serde(default)]
    pub report: ReportConfig,
}

/// Report export configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// Directory that exported reports are written to.
    #[serde(default = "default_directory")]
    pub directory: String,
    /// Prefix of generated report filenames.
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            file_prefix: default_file_prefix(),
        }
    }
}

fn default_directory() -> String {
    ".".to_string()
}

fn default_file_prefix() -> String {
    "bill_split".to_string()
}

/// Report rendering configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// Width of the dashed separator lines.
    #[serde(default = "default_separator_width")]
    pub separator_width: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            separator_width: default_separator_width(),
        }
    }
}

const fn default_separator_width() -> usize {
    DEFAULT_SEPARATOR_WIDTH
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, later ones winning: `config/default`, `config/{RUN_MODE}`,
    /// then `BILLSPLIT__*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("BILLSPLIT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
