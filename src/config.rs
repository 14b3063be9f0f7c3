use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Parse error for {field}: {value} - {source}")]
    Parse {
        field: String,
        value: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

/// Compiler configuration, validated the way the teacher's `ServerConfig` is.
///
/// There is no host/port here - this crate has no client-server surface - but
/// the shape (a `Validate`-derived struct with a `Default` impl and a
/// `from_cli` constructor) is the teacher's, generalized to the two knobs
/// this compiler actually exposes.
#[derive(Clone, Debug, Validate, Serialize, Deserialize)]
pub struct CompilerConfig {
    /// Upper bound on the number of `MATCH` stages a single query may have.
    #[validate(range(min = 1, max = 256, message = "max_stages must be between 1 and 256"))]
    pub max_stages: u32,

    /// Whether `SKIP` is honoured as `LIMIT n OFFSET skip` (see DESIGN.md
    /// Open Question decisions). When false, a query using `SKIP` fails with
    /// `SqlGenError::Unsupported`.
    pub honour_skip: bool,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            max_stages: 32,
            honour_skip: true,
        }
    }
}

impl CompilerConfig {
    /// Create configuration from CLI arguments with validation.
    pub fn from_cli(cli: CliConfig) -> Result<Self, ConfigError> {
        let config = Self {
            max_stages: cli.max_stages,
            honour_skip: !cli.disable_skip,
        };
        config.validate()?;
        Ok(config)
    }
}

/// CLI configuration (parsed from command line arguments).
#[derive(Clone, Debug)]
pub struct CliConfig {
    pub max_stages: u32,
    pub disable_skip: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CompilerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_stages, 32);
        assert!(config.honour_skip);
    }

    #[test]
    fn test_invalid_max_stages() {
        let config = CompilerConfig {
            max_stages: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_cli() {
        let cli = CliConfig {
            max_stages: 4,
            disable_skip: true,
        };
        let config = CompilerConfig::from_cli(cli).unwrap();
        assert_eq!(config.max_stages, 4);
        assert!(!config.honour_skip);
    }
}
