//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::FlagConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<FlagConfig, ConfigError> {
    let config: FlagConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<FlagConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    tracing::debug!(path = %path.display(), flags = config.backend.flags.len(), "Configuration loaded");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BackendKind;
    use std::io::Write;

    #[test]
    fn test_parse_static_config() {
        let config = parse_config(
            r#"
            [backend]
            kind = "static"

            [[backend.flags]]
            name = "login-rollout"
            rate = 0.1

            [[backend.flags]]
            name = "dark-mode"
            rate = 1.0

            [logging]
            filter = "flag_backend=debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.backend.kind, BackendKind::Static);
        assert_eq!(config.backend.flags.len(), 2);
        assert_eq!(config.backend.flags[0].name, "login-rollout");
        assert_eq!(config.logging.filter, "flag_backend=debug");
    }

    #[test]
    fn test_empty_config_defaults_to_off() {
        let config = parse_config("").unwrap();
        assert_eq!(config.backend.kind, BackendKind::Off);
        assert!(config.backend.flags.is_empty());
        assert_eq!(config.logging.filter, "flag_backend=info");
    }

    #[test]
    fn test_unknown_kind_is_parse_error() {
        let err = parse_config("[backend]\nkind = \"redis\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation_errors_are_collected() {
        let err = parse_config(
            r#"
            [backend]
            kind = "static"
            flags = [
                { name = "", rate = 0.5 },
                { name = "a", rate = 3.0 },
            ]
            "#,
        )
        .unwrap_err();

        match err {
            ConfigError::Validation(errors) => assert_eq!(errors.len(), 2),
            other => panic!("unexpected: {}", other),
        }
    }

    #[test]
    fn test_off_config_ignores_bad_flags() {
        let config = parse_config(
            "[backend]\nkind = \"off\"\nflags = [{ name = \"a\", rate = 3.0 }, { name = \"a\", rate = 0.1 }]\n",
        )
        .unwrap();

        assert_eq!(config.backend.kind, BackendKind::Off);
        assert_eq!(config.backend.flags.len(), 2);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[backend]\nkind = \"static\"\nflags = [{{ name = \"x\", rate = 0.5 }}]").unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.backend.flags[0].rate, 0.5);
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/nonexistent/flags.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
