//! SlideForge LLM
//!
//! Provider client for presentation structuring. Wraps a single outbound
//! chat-completion call (OpenAI-style endpoint) behind a provider trait so the
//! generation pipeline can be driven by a mock in tests, plus a models-listing
//! connectivity probe.
//!
//! Credentials are explicit values passed in at construction time; there is no
//! ambient module-level client.

pub mod http_client;
pub mod openai;
pub mod provider;
pub mod types;

// Re-export main types
pub use http_client::build_http_client;
pub use openai::OpenAIProvider;
pub use provider::StructureProvider;
pub use types::*;
