/// Configuration system for flowsketch
///
/// Supports loading from multiple sources with priority:
/// CLI args > Environment variables > Config file > Defaults
use crate::error::{ConfigError, SketchError};
use crate::sketch::SourceLanguage;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Sketch builder configuration
    pub sketch: SketchConfig,

    /// Lint check configuration
    pub lint: LintConfig,
}

/// Sketch builder configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SketchConfig {
    /// Language assumed when none is given and the file extension is unknown
    #[serde(default = "default_language")]
    pub language: String,
}

/// Lint check configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LintConfig {
    /// Named-node count above which a function is flagged as too complex
    #[serde(default = "default_max_function_nodes")]
    pub max_function_nodes: usize,
}

// Default value functions
fn default_language() -> String {
    "python".to_string()
}

fn default_max_function_nodes() -> usize {
    50
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
        }
    }
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            max_function_nodes: default_max_function_nodes(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn from_file(path: &Path) -> Result<Self, SketchError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()).into());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::LoadFailed(format!("Failed to read config file: {}", e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| ConfigError::ParseFailed(format!("Invalid TOML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default location or create default
    pub fn load_or_default() -> Result<Self, SketchError> {
        let config_path = crate::paths::PlatformPaths::default_config_path();

        if config_path.exists() {
            tracing::info!("Loading config from: {}", config_path.display());
            Self::from_file(&config_path)
        } else {
            tracing::info!("No config file found, using defaults");
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<(), SketchError> {
        // Create parent directory if needed
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfigError::SaveFailed(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::SaveFailed(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| ConfigError::SaveFailed(format!("Failed to write config file: {}", e)))?;

        tracing::info!("Saved config to: {}", path.display());
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), SketchError> {
        // Validate fallback language
        if self.sketch.language.parse::<SourceLanguage>().is_err() {
            return Err(ConfigError::InvalidValue {
                key: "sketch.language".to_string(),
                reason: format!(
                    "must be 'python', 'rust', or 'javascript', got '{}'",
                    self.sketch.language
                ),
            }
            .into());
        }

        // Validate complexity threshold
        if self.lint.max_function_nodes == 0 {
            return Err(ConfigError::InvalidValue {
                key: "lint.max_function_nodes".to_string(),
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        // Fallback language
        if let Ok(language) = std::env::var("FLOWSKETCH_LANG") {
            self.sketch.language = language;
        }

        // Complexity threshold
        if let Ok(max_nodes) = std::env::var("FLOWSKETCH_MAX_FUNCTION_NODES")
            && let Ok(max) = max_nodes.parse()
        {
            self.lint.max_function_nodes = max;
        }
    }

    /// Create a new Config with defaults and environment overrides
    pub fn new() -> Result<Self, SketchError> {
        let mut config = Self::load_or_default()?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }
}
