//! Configuration parsing and validation for ceasefire
//!
//! Supports TOML configuration with:
//! - Versioned schema
//! - A single `[vote]` table controlling quorum ratio and timing gates
//! - Validation with clear error messages

mod rules;
mod schema;
mod validation;

pub use rules::*;
pub use schema::*;
pub use validation::*;

use std::path::Path;
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation failed: {errors:?}")]
    ValidationFailed { errors: Vec<ValidationError> },

    #[error("Unsupported config version: {0}")]
    UnsupportedVersion(u32),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Load and validate configuration from a TOML file
pub fn load_config(path: impl AsRef<Path>) -> ConfigResult<VoteRules> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate configuration from a TOML string
pub fn parse_config(content: &str) -> ConfigResult<VoteRules> {
    let raw: RawConfig = toml::from_str(content)?;

    // Check version
    if raw.config_version != CURRENT_CONFIG_VERSION {
        return Err(ConfigError::UnsupportedVersion(raw.config_version));
    }

    // Validate
    let errors = validate_config(&raw);
    if !errors.is_empty() {
        return Err(ConfigError::ValidationFailed { errors });
    }

    Ok(VoteRules::from_raw(raw))
}

/// Current supported config version
pub const CURRENT_CONFIG_VERSION: u32 = 1;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::Duration;

    #[test]
    fn parse_minimal_config() {
        let config = r#"
            config_version = 1
        "#;

        let rules = parse_config(config).unwrap();
        assert_eq!(rules.required_votes, 1.0);
        assert_eq!(rules.timeout, Duration::from_secs(30));
        assert_eq!(rules.cooldown, Duration::from_secs(300));
        assert_eq!(rules.start_lockout, Duration::from_secs(1200));
    }

    #[test]
    fn parse_full_config() {
        let config = r#"
            config_version = 1

            [vote]
            required_votes = 0.5
            timeout_seconds = 45
            cooldown_seconds = 120
            start_lockout_seconds = 600
        "#;

        let rules = parse_config(config).unwrap();
        assert_eq!(rules.required_votes, 0.5);
        assert_eq!(rules.timeout, Duration::from_secs(45));
        assert_eq!(rules.cooldown, Duration::from_secs(120));
        assert_eq!(rules.start_lockout, Duration::from_secs(600));
    }

    #[test]
    fn reject_wrong_version() {
        let config = "config_version = 99";

        let result = parse_config(config);
        assert!(matches!(result, Err(ConfigError::UnsupportedVersion(99))));
    }

    #[test]
    fn reject_out_of_range_ratio() {
        let config = r#"
            config_version = 1

            [vote]
            required_votes = 1.5
        "#;

        let result = parse_config(config);
        assert!(matches!(result, Err(ConfigError::ValidationFailed { .. })));
    }

    #[test]
    fn load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "config_version = 1").unwrap();
        writeln!(file, "[vote]").unwrap();
        writeln!(file, "required_votes = 0.75").unwrap();

        let rules = load_config(file.path()).unwrap();
        assert_eq!(rules.required_votes, 0.75);
    }

    #[test]
    fn load_config_missing_file() {
        let result = load_config("/nonexistent/ceasefire.toml");
        assert!(matches!(result, Err(ConfigError::ReadError(_))));
    }
}
