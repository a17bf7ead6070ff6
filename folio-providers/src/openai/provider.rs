//! OpenAI-wire provider implementation

use crate::http::{create_headers, HttpClient, ReqwestClient};
use crate::openai::{config::OpenAIConfig, converter::OpenAIConverter, parser::OpenAIParser};
use crate::openai::stream::OpenAIStream;
use async_trait::async_trait;
use folio_core::{Error, Provider, Request, Response};
use reqwest::header::{HeaderMap, HeaderValue};
use std::sync::Arc;

/// Chat-completion backend speaking the OpenAI wire protocol
///
/// One instance is one endpoint/credential pair. Pointing `base_url` at an
/// OpenAI-compatible service (DeepSeek, Azure deployments, local gateways)
/// makes this the client for that service too.
///
/// # Example
///
/// ```no_run
/// use folio_providers::OpenAI;
/// use folio_providers::openai::OpenAIConfig;
///
/// let primary = OpenAI::with_api_key("sk-...");
/// let secondary = OpenAI::from_config(
///     OpenAIConfig::new("sk-...").with_base_url("https://api.deepseek.com/v1"),
/// ).expect("secondary backend");
/// ```
#[derive(Clone)]
pub struct OpenAI {
    client: Arc<dyn HttpClient>,
    config: OpenAIConfig,
    converter: OpenAIConverter,
    parser: OpenAIParser,
}

impl OpenAI {
    /// Create a new provider with the given configuration and client
    pub fn new(config: OpenAIConfig, client: Arc<dyn HttpClient>) -> Self {
        let provider = if config.base_url.contains("deepseek") {
            "deepseek"
        } else {
            "openai"
        };
        Self {
            client,
            config,
            converter: OpenAIConverter,
            parser: OpenAIParser { provider },
        }
    }

    /// Create a new provider with just an API key
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        let client = Arc::new(ReqwestClient::new().expect("Failed to create HTTP client"));
        Self::new(OpenAIConfig::new(api_key), client)
    }

    /// Create a new provider from a configuration, building the default
    /// HTTP client
    pub fn from_config(config: OpenAIConfig) -> Result<Self, Error> {
        let client = Arc::new(ReqwestClient::new()?);
        Ok(Self::new(config, client))
    }

    /// Backend name used for error attribution and diagnostics
    pub fn name(&self) -> &'static str {
        self.parser.provider
    }

    fn headers(&self) -> Result<HeaderMap, Error> {
        let additional = match &self.config.organization_id {
            Some(org) => {
                let mut extra = HeaderMap::new();
                extra.insert(
                    "OpenAI-Organization",
                    HeaderValue::from_str(org).map_err(|e| {
                        Error::Configuration(format!("Invalid organization id: {}", e))
                    })?,
                );
                Some(extra)
            }
            None => None,
        };
        create_headers(&self.config.api_key, additional)
    }
}

#[async_trait]
impl Provider for OpenAI {
    type Stream = OpenAIStream;

    async fn request(&self, request: Request) -> Result<Response, Error> {
        let body = self.converter.convert_request(&request)?;

        let headers = self.headers()?;
        let response = self
            .client
            .post(self.name(), &self.config.chat_url(), headers, body)
            .await?;

        self.parser.parse_response(response)
    }

    async fn stream(&self, request: Request) -> Result<Self::Stream, Error> {
        let mut body = self.converter.convert_request(&request)?;
        body["stream"] = serde_json::json!(true);

        let headers = self.headers()?;
        let bytes = self
            .client
            .post_stream(self.name(), &self.config.chat_url(), headers, body)
            .await?;

        Ok(OpenAIStream::new(bytes, self.parser))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_name_follows_base_url() {
        let client: Arc<dyn HttpClient> = Arc::new(ReqwestClient::new().unwrap());
        let openai = OpenAI::new(OpenAIConfig::new("sk-a"), client.clone());
        assert_eq!(openai.name(), "openai");

        let deepseek = OpenAI::new(OpenAIConfig::deepseek("sk-b"), client);
        assert_eq!(deepseek.name(), "deepseek");
    }
}
