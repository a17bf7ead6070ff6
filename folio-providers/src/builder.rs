//! Builder pattern for backend construction
//!
//! Fluent construction for backends with custom configuration: all
//! configuration methods return `self`, and `build()` is the terminal
//! method that constructs the final provider.

use crate::http::HttpClient;
use folio_core::Error;
use std::sync::Arc;

/// Common builder trait for all backends
pub trait ProviderBuilder: Sized {
    /// The provider type being built
    type Provider;

    /// Set a custom HTTP client
    ///
    /// Useful for testing or special networking requirements.
    fn with_client(self, client: Arc<dyn HttpClient>) -> Self;

    /// Build the provider
    fn build(self) -> Result<Self::Provider, Error>;
}

/// Builder for OpenAI-wire backends
///
/// # Example
///
/// ```no_run
/// use folio_providers::builder::{OpenAIBuilder, ProviderBuilder};
///
/// let provider = OpenAIBuilder::new("sk-...")
///     .base_url("https://api.deepseek.com/v1")
///     .build()
///     .expect("Failed to build backend");
/// ```
pub struct OpenAIBuilder {
    api_key: String,
    base_url: Option<String>,
    organization: Option<String>,
    client: Option<Arc<dyn HttpClient>>,
}

impl OpenAIBuilder {
    /// Create a new builder with an API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: None,
            organization: None,
            client: None,
        }
    }

    /// Set the base URL (for OpenAI-compatible endpoints)
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the organization ID
    pub fn organization(mut self, org: impl Into<String>) -> Self {
        self.organization = Some(org.into());
        self
    }
}

impl ProviderBuilder for OpenAIBuilder {
    type Provider = crate::OpenAI;

    fn with_client(mut self, client: Arc<dyn HttpClient>) -> Self {
        self.client = Some(client);
        self
    }

    fn build(self) -> Result<Self::Provider, Error> {
        use crate::http::ReqwestClient;
        use crate::openai::OpenAIConfig;

        let mut config = OpenAIConfig::new(self.api_key);
        if let Some(base_url) = self.base_url {
            config = config.with_base_url(base_url);
        }
        if let Some(org) = self.organization {
            config = config.with_organization(org);
        }

        let client = match self.client {
            Some(client) => client,
            None => Arc::new(ReqwestClient::new()?),
        };

        Ok(crate::OpenAI::new(config, client))
    }
}
