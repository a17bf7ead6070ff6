//! Constants for backend implementations

/// Default OpenAI base URL
pub const OPENAI_DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default primary model
pub const OPENAI_DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default DeepSeek base URL (OpenAI-compatible endpoint)
pub const DEEPSEEK_DEFAULT_BASE_URL: &str = "https://api.deepseek.com/v1";

/// Default secondary model
pub const DEEPSEEK_DEFAULT_MODEL: &str = "deepseek-chat";

/// Environment variable holding the primary credential
pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Environment variable holding the secondary credential
pub const DEEPSEEK_API_KEY_VAR: &str = "DEEPSEEK_API_KEY";

/// Environment variable overriding the secondary base URL
pub const DEEPSEEK_BASE_URL_VAR: &str = "DEEPSEEK_BASE_URL";

/// Environment variable overriding the primary model id
pub const PRIMARY_MODEL_VAR: &str = "FOLIO_PRIMARY_MODEL";

/// Environment variable overriding the secondary model id
pub const SECONDARY_MODEL_VAR: &str = "FOLIO_SECONDARY_MODEL";
