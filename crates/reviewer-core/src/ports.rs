//! Port definitions

use async_trait::async_trait;

use crate::config::ForwarderConfig;
use crate::error::Result;

/// Port for single-shot text generation
#[async_trait]
pub trait Generator: Send + Sync {
    /// Submit a prompt with the configured model and system instruction
    ///
    /// # Arguments
    /// * `prompt` - The user content to send
    /// * `config` - Model, system instruction, and credentials
    ///
    /// # Returns
    /// Text of the first generated candidate
    async fn submit(&self, prompt: &str, config: &ForwarderConfig) -> Result<String>;

    /// Get the name/identifier of the backing provider
    fn name(&self) -> &str;
}
