//! # Config Loader
//!
//! Configuration string tokenizing and settings file loading.
//!
//! Responsibilities:
//! - Split configuration strings into tokens and quote them back
//! - Parse TOML/JSON settings files
//! - Validate settings
//!
//! # Example
//!
//! ```
//! use config_loader::{join_options, split_options};
//!
//! let tokens = split_options(r#"Disk -output-file "my data.arff""#).unwrap();
//! assert_eq!(tokens, ["Disk", "-output-file", "my data.arff"]);
//! assert_eq!(join_options(&tokens), r#"Disk -output-file "my data.arff""#);
//! ```

mod parser;
mod tokenizer;
mod validator;

pub use contracts::TeeSettings;
pub use parser::ConfigFormat;
pub use tokenizer::{join_options, quote, split_options};

use contracts::ContractError;
use std::path::Path;

/// Settings loader
///
/// Provides static methods to load settings from files or strings.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load settings from file path
    ///
    /// Automatically detects format from file extension (.toml / .json).
    ///
    /// # Errors
    /// - File read failure
    /// - Unsupported format
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_path(path: &Path) -> Result<TeeSettings, ContractError> {
        let format = Self::detect_format(path)?;
        let content = Self::read_file(path)?;
        Self::load_from_str(&content, format)
    }

    /// Load settings from string
    ///
    /// # Errors
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_str(
        content: &str,
        format: ConfigFormat,
    ) -> Result<TeeSettings, ContractError> {
        Self::parse_and_validate(content, format)
    }

    /// Serialize TeeSettings to TOML string
    pub fn to_toml(settings: &TeeSettings) -> Result<String, ContractError> {
        toml::to_string_pretty(settings)
            .map_err(|e| ContractError::config_parse(format!("TOML serialize error: {e}")))
    }

    /// Serialize TeeSettings to JSON string
    pub fn to_json(settings: &TeeSettings) -> Result<String, ContractError> {
        serde_json::to_string_pretty(settings)
            .map_err(|e| ContractError::config_parse(format!("JSON serialize error: {e}")))
    }
}

impl ConfigLoader {
    /// Infer settings format from file extension
    fn detect_format(path: &Path) -> Result<ConfigFormat, ContractError> {
        let ext = path.extension().and_then(|e| e.to_str()).ok_or_else(|| {
            ContractError::config_parse("cannot determine file format from extension")
        })?;

        ConfigFormat::from_extension(ext).ok_or_else(|| {
            ContractError::config_parse(format!("unsupported config format: .{ext}"))
        })
    }

    /// Read settings file content
    fn read_file(path: &Path) -> Result<String, ContractError> {
        Ok(std::fs::read_to_string(path)?)
    }

    /// Parse and validate settings content
    fn parse_and_validate(
        content: &str,
        format: ConfigFormat,
    ) -> Result<TeeSettings, ContractError> {
        let settings = parser::parse(content, format)?;
        validator::validate(&settings)?;
        Ok(settings)
    }
}
