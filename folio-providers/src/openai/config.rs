//! OpenAI backend configuration

use crate::constants::{DEEPSEEK_DEFAULT_BASE_URL, OPENAI_DEFAULT_BASE_URL};

/// Configuration for an OpenAI-wire backend
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    /// API key for authentication
    pub api_key: String,
    /// Base URL for the API
    pub base_url: String,
    /// Optional organization ID
    pub organization_id: Option<String>,
}

impl OpenAIConfig {
    /// Create a new configuration with an API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: OPENAI_DEFAULT_BASE_URL.to_string(),
            organization_id: None,
        }
    }

    /// Create a configuration for the DeepSeek endpoint
    pub fn deepseek(api_key: impl Into<String>) -> Self {
        Self::new(api_key).with_base_url(DEEPSEEK_DEFAULT_BASE_URL)
    }

    /// Set a custom base URL (for OpenAI-compatible endpoints)
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the organization ID
    pub fn with_organization(mut self, org: impl Into<String>) -> Self {
        self.organization_id = Some(org.into());
        self
    }

    /// Get the URL for chat completions
    pub fn chat_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_url() {
        let config = OpenAIConfig::new("sk-test");
        assert_eq!(
            config.chat_url(),
            "https://api.openai.com/v1/chat/completions"
        );

        let config = OpenAIConfig::deepseek("sk-test");
        assert_eq!(
            config.chat_url(),
            "https://api.deepseek.com/v1/chat/completions"
        );
    }
}
