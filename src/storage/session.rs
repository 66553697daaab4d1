//! JSON Session Persistence
//!
//! Handles reading and writing the persisted session file: the content draft,
//! the selected provider and API key, and the default model. Loaded once at
//! startup and written on every change; a missing file or key means "no prior
//! value". Writes are last-write-wins with no locking.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use slideforge_llm::{default_model, ProviderCredential, ProviderType};
use tracing::debug;

use crate::models::draft::ContentDraft;
use crate::utils::error::AppResult;
use crate::utils::paths::{ensure_slideforge_dir, session_path};

/// The persisted key-value set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SessionSnapshot {
    /// User-pasted content
    pub content: String,
    /// Structuring guidance
    pub guidance: String,
    /// Selected provider
    pub provider: ProviderType,
    /// Opaque API key
    pub api_key: String,
    /// Default model for content generation
    pub model: String,
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            content: String::new(),
            guidance: String::new(),
            provider: ProviderType::default(),
            api_key: String::new(),
            model: default_model(),
        }
    }
}

/// Session store backed by a JSON file.
#[derive(Debug)]
pub struct SessionStore {
    path: PathBuf,
    snapshot: SessionSnapshot,
}

impl SessionStore {
    /// Create a store at the default path, loading any existing session.
    pub fn new() -> AppResult<Self> {
        ensure_slideforge_dir()?;
        Self::at_path(session_path()?)
    }

    /// Create a store at an explicit path, loading any existing session.
    pub fn at_path(path: PathBuf) -> AppResult<Self> {
        let snapshot = if path.exists() {
            Self::load_from_file(&path)?
        } else {
            SessionSnapshot::default()
        };

        Ok(Self { path, snapshot })
    }

    /// Load a snapshot from a file
    fn load_from_file(path: &PathBuf) -> AppResult<SessionSnapshot> {
        let content = fs::read_to_string(path)?;
        let snapshot: SessionSnapshot = serde_json::from_str(&content)?;
        Ok(snapshot)
    }

    /// Save a snapshot to a file with pretty formatting
    fn save_to_file(path: &PathBuf, snapshot: &SessionSnapshot) -> AppResult<()> {
        let content = serde_json::to_string_pretty(snapshot)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> &SessionSnapshot {
        &self.snapshot
    }

    /// The persisted content draft.
    pub fn draft(&self) -> ContentDraft {
        ContentDraft::new(self.snapshot.content.clone(), self.snapshot.guidance.clone())
    }

    /// The persisted credential.
    pub fn credential(&self) -> ProviderCredential {
        ProviderCredential::new(self.snapshot.provider, self.snapshot.api_key.clone())
    }

    /// The persisted default model.
    pub fn model(&self) -> &str {
        &self.snapshot.model
    }

    /// Update the content text and persist.
    pub fn set_content(&mut self, content: impl Into<String>) -> AppResult<()> {
        self.snapshot.content = content.into();
        self.save()
    }

    /// Update the guidance text and persist.
    pub fn set_guidance(&mut self, guidance: impl Into<String>) -> AppResult<()> {
        self.snapshot.guidance = guidance.into();
        self.save()
    }

    /// Update the selected provider and persist.
    pub fn set_provider(&mut self, provider: ProviderType) -> AppResult<()> {
        self.snapshot.provider = provider;
        self.save()
    }

    /// Update the API key and persist.
    pub fn set_api_key(&mut self, api_key: impl Into<String>) -> AppResult<()> {
        self.snapshot.api_key = api_key.into();
        self.save()
    }

    /// Update the default model and persist.
    pub fn set_model(&mut self, model: impl Into<String>) -> AppResult<()> {
        self.snapshot.model = model.into();
        self.save()
    }

    /// Save the current snapshot to disk.
    pub fn save(&self) -> AppResult<()> {
        debug!(path = %self.path.display(), "persisting session");
        Self::save_to_file(&self.path, &self.snapshot)
    }

    /// Reload the snapshot from disk.
    pub fn reload(&mut self) -> AppResult<()> {
        self.snapshot = Self::load_from_file(&self.path)?;
        Ok(())
    }
}
