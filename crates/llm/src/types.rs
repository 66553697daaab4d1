//! Provider Types
//!
//! Core types for provider client interactions.

use serde::{Deserialize, Serialize};
use slideforge_core::{CoreError, CoreResult};

/// Supported LLM provider types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    OpenAI,
    Anthropic,
    Gemini,
}

impl std::fmt::Display for ProviderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderType::OpenAI => write!(f, "openai"),
            ProviderType::Anthropic => write!(f, "anthropic"),
            ProviderType::Gemini => write!(f, "gemini"),
        }
    }
}

impl Default for ProviderType {
    fn default() -> Self {
        ProviderType::OpenAI
    }
}

/// A provider selection plus its API key.
///
/// Persisted by the session store and never transmitted anywhere except as a
/// bearer authorization header on outbound provider calls.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProviderCredential {
    /// The selected provider
    pub provider: ProviderType,
    /// Opaque API key; empty string means "not configured"
    pub api_key: String,
}

impl ProviderCredential {
    /// Create a credential for a provider.
    pub fn new(provider: ProviderType, api_key: impl Into<String>) -> Self {
        Self {
            provider,
            api_key: api_key.into(),
        }
    }

    /// Whether a non-blank API key is configured.
    pub fn has_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

/// Configuration for a provider client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// The provider type
    pub provider: ProviderType,
    /// API key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Base URL override (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Model name to use
    pub model: String,
    /// Request timeout in seconds; elapsed timeouts are treated as failures
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

/// Default model for presentation structuring
pub fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider: ProviderType::OpenAI,
            api_key: None,
            base_url: None,
            model: default_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ProviderConfig {
    /// Build a config from a credential, using the default model.
    pub fn from_credential(credential: &ProviderCredential) -> Self {
        Self {
            provider: credential.provider,
            api_key: if credential.has_key() {
                Some(credential.api_key.clone())
            } else {
                None
            },
            ..Default::default()
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> CoreResult<()> {
        if self.model.trim().is_empty() {
            return Err(CoreError::validation("model must not be empty"));
        }
        if self.timeout_secs == 0 {
            return Err(CoreError::validation("timeout must be non-zero"));
        }
        Ok(())
    }
}

/// A single slide in a structured presentation outline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlideOutline {
    /// Slide heading
    pub heading: String,
    /// Bullet points for the slide body
    #[serde(default)]
    pub points: Vec<String>,
}

/// The structured outline returned by the provider.
///
/// Parsed best-effort from the completion message content; malformed payloads
/// are reported as `ProviderError::Parse` and the caller falls back to a
/// locally synthesized outline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresentationStructure {
    /// Presentation title
    pub title: String,
    /// Ordered slide outlines
    #[serde(default)]
    pub slides: Vec<SlideOutline>,
    /// One-paragraph summary
    #[serde(default)]
    pub summary: Option<String>,
    /// Estimated speaking duration, e.g. "15-20 minutes"
    #[serde(default)]
    pub estimated_duration: Option<String>,
}

impl PresentationStructure {
    /// Number of slides in the outline.
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }
}

/// Connection probe outcome for a configured provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
    /// No probe has run yet
    Unknown,
    /// Endpoint reachable and returned at least one model
    Connected,
    /// Probe failed (network, auth, or empty model list)
    Error,
}

impl Default for ConnectionStatus {
    fn default() -> Self {
        ConnectionStatus::Unknown
    }
}

/// Error types for provider operations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProviderError {
    /// Authentication failed (invalid API key)
    AuthenticationFailed { message: String },
    /// Rate limit exceeded
    RateLimited { message: String },
    /// Model not found or not available
    ModelNotFound { model: String },
    /// Invalid request (bad parameters)
    InvalidRequest { message: String },
    /// Server error from the provider
    ServerError {
        message: String,
        status: Option<u16>,
    },
    /// Network/connection error (includes elapsed timeouts)
    NetworkError { message: String },
    /// Response parsing error (malformed payload or outline)
    ParseError { message: String },
    /// Other error
    Other { message: String },
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderError::AuthenticationFailed { message } => {
                write!(f, "Authentication failed: {}", message)
            }
            ProviderError::RateLimited { message } => {
                write!(f, "Rate limited: {}", message)
            }
            ProviderError::ModelNotFound { model } => {
                write!(f, "Model not found: {}", model)
            }
            ProviderError::InvalidRequest { message } => {
                write!(f, "Invalid request: {}", message)
            }
            ProviderError::ServerError { message, status } => {
                if let Some(s) = status {
                    write!(f, "Server error ({}): {}", s, message)
                } else {
                    write!(f, "Server error: {}", message)
                }
            }
            ProviderError::NetworkError { message } => {
                write!(f, "Network error: {}", message)
            }
            ProviderError::ParseError { message } => {
                write!(f, "Parse error: {}", message)
            }
            ProviderError::Other { message } => {
                write!(f, "Error: {}", message)
            }
        }
    }
}

impl std::error::Error for ProviderError {}

/// Result type for provider operations
pub type ProviderResult<T> = Result<T, ProviderError>;
