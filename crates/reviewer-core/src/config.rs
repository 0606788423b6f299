use crate::error::{Result, ReviewerError};
use crate::instruction::{DEFAULT_MODEL, SYSTEM_INSTRUCTION};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable holding the Gemini API key
pub const API_KEY_ENV: &str = "GOOGLE_GEMINI_KEY";

/// Default Gemini REST endpoint
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Secret API key. Never shows up in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a key, rejecting blank values
    pub fn new(key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(ReviewerError::ConfigMissing { key: API_KEY_ENV.to_string() });
        }
        Ok(Self(key.trim().to_string()))
    }

    /// Read the key from `GOOGLE_GEMINI_KEY`
    pub fn from_env() -> Result<Self> {
        let key = env::var(API_KEY_ENV)
            .map_err(|_| ReviewerError::ConfigMissing { key: API_KEY_ENV.to_string() })?;
        Self::new(key)
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Immutable settings for a prompt forwarder, built once at startup
#[derive(Debug, Clone)]
pub struct ForwarderConfig {
    pub api_key: ApiKey,
    pub model: String,
    pub system_instruction: String,
    pub base_url: String,
    pub timeout: Option<Duration>,
}

impl ForwarderConfig {
    /// Create a configuration with the built-in model and reviewer instruction
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            api_key,
            model: DEFAULT_MODEL.to_string(),
            system_instruction: SYSTEM_INSTRUCTION.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }

    /// Defaults layered with environment overrides
    pub fn from_env() -> Result<Self> {
        LayeredConfig::with_defaults().load_from_env().forwarder_config()
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = instruction.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Full `generateContent` URL for the configured model
    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

/// Layered configuration for the non-secret forwarder settings
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub model: ConfigValue<String>,
    pub base_url: ConfigValue<String>,
    pub timeout_secs: ConfigValue<Option<u64>>,
    pub system_instruction: ConfigValue<String>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            model: ConfigValue::new(DEFAULT_MODEL.to_string(), ConfigSource::Default),
            base_url: ConfigValue::new(DEFAULT_BASE_URL.to_string(), ConfigSource::Default),
            timeout_secs: ConfigValue::new(None, ConfigSource::Default),
            system_instruction: ConfigValue::new(
                SYSTEM_INSTRUCTION.to_string(),
                ConfigSource::Default,
            ),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ReviewerError::ConfigInvalid {
            key: "file".to_string(),
            reason: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| ReviewerError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(model) = file_config.model {
            self.model.update(model, ConfigSource::File);
        }

        if let Some(base_url) = file_config.base_url {
            self.base_url.update(base_url, ConfigSource::File);
        }

        if let Some(timeout_secs) = file_config.timeout_secs {
            if timeout_secs == 0 {
                return Err(ReviewerError::ConfigInvalid {
                    key: "timeout_secs".to_string(),
                    reason: "Timeout must be at least one second".to_string(),
                });
            }
            self.timeout_secs.update(Some(timeout_secs), ConfigSource::File);
        }

        // Relative instruction paths resolve against the config file's directory
        if let Some(instruction_path) = file_config.system_instruction_file {
            let resolved = match path.parent() {
                Some(dir) if instruction_path.is_relative() => dir.join(&instruction_path),
                _ => instruction_path,
            };
            let instruction = read_instruction_file(&resolved)?;
            self.system_instruction.update(instruction, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // REVIEWER_MODEL
        if let Ok(model) = env::var("REVIEWER_MODEL") {
            if !model.trim().is_empty() {
                self.model.update(model.trim().to_string(), ConfigSource::Environment);
            }
        }

        // REVIEWER_BASE_URL
        if let Ok(base_url) = env::var("REVIEWER_BASE_URL") {
            if !base_url.trim().is_empty() {
                self.base_url.update(base_url.trim().to_string(), ConfigSource::Environment);
            }
        }

        // REVIEWER_TIMEOUT_SECS
        if let Ok(timeout_str) = env::var("REVIEWER_TIMEOUT_SECS") {
            match parse_timeout_secs(&timeout_str) {
                Ok(secs) => self.timeout_secs.update(Some(secs), ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid REVIEWER_TIMEOUT_SECS value '{}': expected a positive number of seconds",
                    timeout_str
                ),
            }
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(model) = overrides.model {
            self.model.update(model, ConfigSource::Cli);
        }

        if let Some(base_url) = overrides.base_url {
            self.base_url.update(base_url, ConfigSource::Cli);
        }

        if let Some(timeout_secs) = overrides.timeout_secs {
            self.timeout_secs.update(Some(timeout_secs), ConfigSource::Cli);
        }
    }

    /// Combine the layered settings with an API key
    pub fn to_forwarder_config(&self, api_key: ApiKey) -> ForwarderConfig {
        ForwarderConfig {
            api_key,
            model: self.model.value.clone(),
            system_instruction: self.system_instruction.value.clone(),
            base_url: self.base_url.value.clone(),
            timeout: self.timeout_secs.value.map(Duration::from_secs),
        }
    }

    /// Resolve the API key from the environment and build the forwarder settings
    pub fn forwarder_config(&self) -> Result<ForwarderConfig> {
        Ok(self.to_forwarder_config(ApiKey::from_env()?))
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert("model".to_string(), (self.model.value.clone(), self.model.source));

        map.insert("base_url".to_string(), (self.base_url.value.clone(), self.base_url.source));

        let timeout = match self.timeout_secs.value {
            Some(secs) => format!("{}s", secs),
            None => "none".to_string(),
        };
        map.insert("timeout".to_string(), (timeout, self.timeout_secs.source));

        let instruction = match self.system_instruction.source {
            ConfigSource::Default => {
                format!("built-in ({} chars)", self.system_instruction.value.chars().count())
            }
            _ => format!("custom ({} chars)", self.system_instruction.value.chars().count()),
        };
        map.insert(
            "system_instruction".to_string(),
            (instruction, self.system_instruction.source),
        );

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    model: Option<String>,
    base_url: Option<String>,
    timeout_secs: Option<u64>,
    system_instruction_file: Option<PathBuf>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Parse a timeout in whole seconds
pub fn parse_timeout_secs(s: &str) -> Result<u64> {
    match s.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(ReviewerError::ConfigInvalid {
            key: "timeout_secs".to_string(),
            reason: format!("Invalid timeout: {}. Use a positive number of seconds", s),
        }),
    }
}

fn read_instruction_file(path: &Path) -> Result<String> {
    let instruction = fs::read_to_string(path).map_err(|e| ReviewerError::ConfigInvalid {
        key: "system_instruction_file".to_string(),
        reason: format!("Failed to read {}: {}", path.display(), e),
    })?;

    if instruction.trim().is_empty() {
        return Err(ReviewerError::ConfigInvalid {
            key: "system_instruction_file".to_string(),
            reason: format!("{} is empty", path.display()),
        });
    }

    Ok(instruction)
}
