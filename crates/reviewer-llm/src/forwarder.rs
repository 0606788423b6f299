use std::sync::Arc;

use reviewer_core::config::ForwarderConfig;
use reviewer_core::error::{Result, ReviewerError};
use reviewer_core::ports::Generator;

use crate::gemini::GeminiClient;

/// Forwards a single prompt to the configured generator and returns its text
///
/// Stateless apart from the read-only configuration, so one instance can
/// serve any number of concurrent calls.
#[derive(Clone)]
pub struct PromptForwarder {
    config: Arc<ForwarderConfig>,
    generator: Arc<dyn Generator>,
}

impl PromptForwarder {
    pub fn new(config: ForwarderConfig, generator: Arc<dyn Generator>) -> Self {
        Self {
            config: Arc::new(config),
            generator,
        }
    }

    /// Forwarder backed by the Gemini REST API
    pub fn gemini(config: ForwarderConfig) -> Result<Self> {
        let client = GeminiClient::new(&config)?;
        Ok(Self::new(config, Arc::new(client)))
    }

    /// Gemini forwarder configured from defaults and environment variables
    pub fn from_env() -> Result<Self> {
        Self::gemini(ForwarderConfig::from_env()?)
    }

    /// Send `prompt` with the fixed model and system instruction
    ///
    /// Failures from the generator are returned unchanged.
    pub async fn generate_content(&self, prompt: &str) -> Result<String> {
        let text = self.generator.submit(prompt, &self.config).await?;

        if text.is_empty() {
            return Err(ReviewerError::MalformedResponse {
                reason: format!("{} returned an empty response", self.generator.name()),
            });
        }

        Ok(text)
    }

    pub fn config(&self) -> &ForwarderConfig {
        &self.config
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    pub fn provider(&self) -> &str {
        self.generator.name()
    }
}

impl std::fmt::Debug for PromptForwarder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptForwarder")
            .field("config", &self.config)
            .field("generator", &self.generator.name())
            .finish()
    }
}
