/// Centralized error types for flowsketch using thiserror
///
/// Provides domain-specific error types for better error handling and user-facing messages.
use thiserror::Error;

/// Main error type for the sketch toolchain
#[derive(Error, Debug)]
pub enum SketchError {
    #[error("Grammar error: {0}")]
    Grammar(#[from] GrammarError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// Errors related to grammar selection and parser setup
#[derive(Error, Debug)]
pub enum GrammarError {
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("Failed to load {language} grammar: {reason}")]
    LoadFailed { language: String, reason: String },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration file: {0}")]
    LoadFailed(String),

    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    #[error("Invalid configuration value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Failed to save configuration: {0}")]
    SaveFailed(String),

    #[error("Configuration file not found: {0}")]
    FileNotFound(String),
}

// Conversion from anyhow::Error to SketchError
impl From<anyhow::Error> for SketchError {
    fn from(err: anyhow::Error) -> Self {
        SketchError::Other(format!("{:#}", err))
    }
}

// Helper methods for SketchError
impl SketchError {
    /// Create a new error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        SketchError::Other(msg.into())
    }

    /// Check if this is a user error (bad input) vs system error
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            SketchError::Grammar(GrammarError::UnsupportedLanguage(_))
                | SketchError::Config(ConfigError::InvalidValue { .. })
        )
    }
}
