//! Configuration management for txlens
//!
//! This module handles loading, validation, and management of
//! txlens configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use error::{ConfigError, ConfigErrorSeverity};

// ==================== Configuration Types ====================

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8081
}

/// Data source configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DataConfig {
    /// JSON file holding an array of transactions. `None` serves the built-in fixture.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Query behaviour
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct QueryConfig {
    /// Which fields the free-text query is matched against
    #[serde(default)]
    pub text_scope: TextScope,
    /// Sort key used when a request does not name one
    #[serde(default)]
    pub default_sort_by: SortBy,
    /// Sort direction used when a request does not name one
    #[serde(default)]
    pub default_sort_order: SortOrder,
}

/// Fields searched by the free-text query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextScope {
    /// Match against the description only
    Description,
    /// Match against the description or the category
    DescriptionAndCategory,
}

impl Default for TextScope {
    fn default() -> Self {
        TextScope::Description
    }
}

impl std::str::FromStr for TextScope {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "description" => Ok(TextScope::Description),
            "description_and_category" => Ok(TextScope::DescriptionAndCategory),
            _ => Err(format!("Invalid text scope: {}", s)),
        }
    }
}

impl std::fmt::Display for TextScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TextScope::Description => write!(f, "description"),
            TextScope::DescriptionAndCategory => write!(f, "description_and_category"),
        }
    }
}

/// Sort key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    /// Calendar date
    Date,
    /// Signed amount
    Amount,
}

impl Default for SortBy {
    fn default() -> Self {
        SortBy::Date
    }
}

impl std::str::FromStr for SortBy {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "date" => Ok(SortBy::Date),
            "amount" => Ok(SortBy::Amount),
            _ => Err(format!("Invalid sortBy: {} (expected date or amount)", s)),
        }
    }
}

impl std::fmt::Display for SortBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortBy::Date => write!(f, "date"),
            SortBy::Amount => write!(f, "amount"),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl Default for SortOrder {
    fn default() -> Self {
        SortOrder::Desc
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(format!("Invalid sortOrder: {} (expected asc or desc)", s)),
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortOrder::Asc => write!(f, "asc"),
            SortOrder::Desc => write!(f, "desc"),
        }
    }
}

/// Currency and number formatting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyConfig {
    /// Currency code shown next to amounts
    #[serde(default = "default_currency")]
    pub code: String,
    /// Number of decimal places
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,
    /// Thousands separator
    #[serde(default = "default_thousands_sep")]
    pub thousands_separator: String,
    /// Decimal separator
    #[serde(default = "default_decimal_sep")]
    pub decimal_separator: String,
    /// Currency code position ("before" or "after")
    #[serde(default)]
    pub symbol_position: SymbolPosition,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            code: default_currency(),
            decimal_places: default_decimal_places(),
            thousands_separator: default_thousands_sep(),
            decimal_separator: default_decimal_sep(),
            symbol_position: SymbolPosition::default(),
        }
    }
}

fn default_currency() -> String {
    "EUR".to_string()
}

fn default_decimal_places() -> u32 {
    2
}

fn default_thousands_sep() -> String {
    ".".to_string()
}

fn default_decimal_sep() -> String {
    ",".to_string()
}

/// Currency symbol position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolPosition {
    Before,
    After,
}

impl Default for SymbolPosition {
    fn default() -> Self {
        SymbolPosition::After
    }
}

/// Display settings for the HTML pages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// chrono format string for dates in the list
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
        }
    }
}

fn default_date_format() -> String {
    "%d/%m/%Y".to_string()
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Data source settings
    #[serde(default)]
    pub data: DataConfig,
    /// Query settings
    #[serde(default)]
    pub query: QueryConfig,
    /// Currency settings
    #[serde(default)]
    pub currency: CurrencyConfig,
    /// Display settings
    #[serde(default)]
    pub display: DisplayConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            message: format!("{}: {}", path.display(), e),
        })?;
        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content).map_err(|e| ConfigError::InvalidYaml {
            message: e.to_string(),
        })?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        if self.currency.decimal_places > 10 {
            return Err(ConfigError::InvalidValue {
                field: "currency.decimal_places".to_string(),
                reason: "Decimal places must be between 0 and 10".to_string(),
            });
        }

        if self.currency.thousands_separator == self.currency.decimal_separator {
            return Err(ConfigError::InvalidValue {
                field: "currency.thousands_separator".to_string(),
                reason: "Thousands and decimal separators must differ".to_string(),
            });
        }

        if self.display.date_format.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "display.date_format".to_string(),
                reason: "Date format must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }

    /// Address the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_yaml_uses_defaults() {
        let config = Config::from_yaml("{}").unwrap();
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.server.host, "0.0.0.0");
        assert!(config.data.path.is_none());
        assert_eq!(config.query.text_scope, TextScope::Description);
        assert_eq!(config.query.default_sort_by, SortBy::Date);
        assert_eq!(config.query.default_sort_order, SortOrder::Desc);
        assert_eq!(config.currency.code, "EUR");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_generated_default_parses() {
        let config = Config::from_yaml(Config::generate_default()).unwrap();
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.currency.symbol_position, SymbolPosition::After);
        assert_eq!(config.display.date_format, "%d/%m/%Y");
    }

    #[test]
    fn test_partial_yaml() {
        let yaml = r#"
server:
  port: 9000
data:
  path: ./fixtures/tx.json
query:
  text_scope: description_and_category
  default_sort_by: amount
  default_sort_order: asc
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.data.path, Some(PathBuf::from("./fixtures/tx.json")));
        assert_eq!(config.query.text_scope, TextScope::DescriptionAndCategory);
        assert_eq!(config.query.default_sort_by, SortBy::Amount);
        assert_eq!(config.query.default_sort_order, SortOrder::Asc);
        assert_eq!(config.bind_address(), "0.0.0.0:9000");
    }

    #[test]
    fn test_invalid_port() {
        let result = Config::from_yaml("server:\n  port: 0\n");
        assert!(matches!(result, Err(ConfigError::InvalidValue { ref field, .. }) if field == "server.port"));
    }

    #[test]
    fn test_same_separators_rejected() {
        let yaml = "currency:\n  thousands_separator: \",\"\n  decimal_separator: \",\"\n";
        assert!(Config::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_unknown_enum_is_invalid_yaml() {
        let result = Config::from_yaml("query:\n  default_sort_by: payee\n");
        assert!(matches!(result, Err(ConfigError::InvalidYaml { .. })));
    }

    #[test]
    fn test_missing_file() {
        let result = Config::load(Path::new("/definitely/not/here/config.yaml"));
        assert!(matches!(result, Err(ConfigError::FileNotFound { .. })));
    }

    #[test]
    fn test_unreadable_path_keeps_io_message() {
        let dir = std::env::temp_dir();
        let err = Config::load(&dir).unwrap_err();
        match &err {
            ConfigError::IoError { message } => {
                assert!(message.contains(&dir.display().to_string()));
                assert!(message.len() > dir.display().to_string().len() + 2);
            }
            other => panic!("expected IoError, got {:?}", other),
        }
        assert_eq!(err.severity(), ConfigErrorSeverity::Error);
    }

    #[test]
    fn test_sort_params_from_str() {
        assert_eq!("date".parse::<SortBy>().unwrap(), SortBy::Date);
        assert_eq!("AMOUNT".parse::<SortBy>().unwrap(), SortBy::Amount);
        assert!("payee".parse::<SortBy>().is_err());
        assert_eq!("asc".parse::<SortOrder>().unwrap(), SortOrder::Asc);
        assert_eq!("Desc".parse::<SortOrder>().unwrap(), SortOrder::Desc);
        assert!("sideways".parse::<SortOrder>().is_err());
        assert_eq!(
            "description_and_category".parse::<TextScope>().unwrap(),
            TextScope::DescriptionAndCategory
        );
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for by in [SortBy::Date, SortBy::Amount] {
            assert_eq!(by.to_string().parse::<SortBy>().unwrap(), by);
        }
        for order in [SortOrder::Asc, SortOrder::Desc] {
            assert_eq!(order.to_string().parse::<SortOrder>().unwrap(), order);
        }
    }
}
