//! Structure Provider Trait
//!
//! Defines the common interface the generation pipeline uses to talk to a
//! provider, so tests can substitute a scripted implementation.

use async_trait::async_trait;

use super::types::{PresentationStructure, ProviderError, ProviderResult};

/// Trait implemented by provider clients.
///
/// Provides a unified interface for:
/// - Presentation structuring (fetch_structure)
/// - Connectivity probing (test_connection / list_models)
#[async_trait]
pub trait StructureProvider: Send + Sync {
    /// Returns the provider name for identification.
    fn name(&self) -> &'static str;

    /// Returns the current model being used.
    fn model(&self) -> &str;

    /// Fetch a structured presentation outline for the given content.
    ///
    /// # Arguments
    /// * `content` - The user-pasted source text
    /// * `guidance` - Optional free-form structuring guidance (may be empty)
    ///
    /// # Errors
    /// Any network failure, non-2xx response, or unparsable payload. The
    /// pipeline catches these at the structuring stage boundary and falls
    /// back to a synthesized outline.
    async fn fetch_structure(
        &self,
        content: &str,
        guidance: &str,
    ) -> ProviderResult<PresentationStructure>;

    /// List available models for this credential.
    async fn list_models(&self) -> ProviderResult<Vec<String>>;

    /// Probe connectivity: reachable and at least one model listed.
    ///
    /// Never raises; every failure mode maps to `false`.
    async fn test_connection(&self) -> bool {
        match self.list_models().await {
            Ok(models) => !models.is_empty(),
            Err(_) => false,
        }
    }
}

/// Helper function to create an error for missing API key
pub fn missing_api_key_error(provider: &str) -> ProviderError {
    ProviderError::AuthenticationFailed {
        message: format!("API key not configured for {}", provider),
    }
}

/// Helper function to parse HTTP error status codes
pub fn parse_http_error(status: u16, body: &str, provider: &str) -> ProviderError {
    match status {
        401 => ProviderError::AuthenticationFailed {
            message: format!("{}: Invalid API key", provider),
        },
        403 => ProviderError::AuthenticationFailed {
            message: format!("{}: Access denied", provider),
        },
        404 => ProviderError::ModelNotFound {
            model: body.to_string(),
        },
        429 => ProviderError::RateLimited {
            message: body.to_string(),
        },
        400 => ProviderError::InvalidRequest {
            message: body.to_string(),
        },
        500..=599 => ProviderError::ServerError {
            message: body.to_string(),
            status: Some(status),
        },
        _ => ProviderError::Other {
            message: format!("HTTP {}: {}", status, body),
        },
    }
}
