//! Session State
//!
//! Owns everything a generation session holds: the persisted draft and
//! credential, the attached template, the template library, the last generated
//! artifact, and the at-most-one active pipeline run.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{mpsc, RwLock};
use tokio_util::sync::CancellationToken;
use tracing::error;

use slideforge_llm::{
    ConnectionStatus, OpenAIProvider, ProviderConfig, ProviderCredential, ProviderType,
    StructureProvider,
};

use crate::models::artifact::GeneratedArtifact;
use crate::models::draft::ContentDraft;
use crate::models::template::{TemplateArtifact, TemplateRecord};
use crate::services::library::{FilterState, TemplateLibrary, TemplateUpload};
use crate::services::pipeline::{GenerationPipeline, PipelineEvent, RunOutcome};
use crate::services::readiness::can_generate;
use crate::services::upload::accept_upload;
use crate::storage::SessionStore;
use crate::utils::error::{AppError, AppResult};

/// State for one generation session.
pub struct SessionState {
    /// Persisted session store (draft, credential, model)
    store: Arc<RwLock<SessionStore>>,
    /// The attached template, if any; replaced wholesale on upload
    template: Arc<RwLock<Option<TemplateArtifact>>>,
    /// Template library collection
    library: Arc<RwLock<TemplateLibrary>>,
    /// Artifact from the last completed run; cleared when a new run starts
    artifact: Arc<RwLock<Option<GeneratedArtifact>>>,
    /// Outcome of the last connectivity probe
    connection: Arc<RwLock<ConnectionStatus>>,
    /// Cancel token of the active run, if one is running
    active: Arc<RwLock<Option<CancellationToken>>>,
    /// Pipeline controller
    pipeline: GenerationPipeline,
}

impl SessionState {
    /// Create a session around a store, with default pipeline timing.
    pub fn new(store: SessionStore) -> Self {
        Self::with_pipeline(store, GenerationPipeline::new())
    }

    /// Create a session with explicit pipeline timing.
    pub fn with_pipeline(store: SessionStore, pipeline: GenerationPipeline) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            template: Arc::new(RwLock::new(None)),
            library: Arc::new(RwLock::new(TemplateLibrary::with_sample_catalog())),
            artifact: Arc::new(RwLock::new(None)),
            connection: Arc::new(RwLock::new(ConnectionStatus::Unknown)),
            active: Arc::new(RwLock::new(None)),
            pipeline,
        }
    }

    // ── Draft & Credential ─────────────────────────────────────────────

    /// The current content draft.
    pub async fn draft(&self) -> ContentDraft {
        self.store.read().await.draft()
    }

    /// The current provider credential.
    pub async fn credential(&self) -> ProviderCredential {
        self.store.read().await.credential()
    }

    /// Update and persist the content text.
    pub async fn set_content(&self, content: impl Into<String>) -> AppResult<()> {
        self.store.write().await.set_content(content)
    }

    /// Update and persist the guidance text.
    pub async fn set_guidance(&self, guidance: impl Into<String>) -> AppResult<()> {
        self.store.write().await.set_guidance(guidance)
    }

    /// Update and persist the selected provider.
    pub async fn set_provider(&self, provider: ProviderType) -> AppResult<()> {
        self.store.write().await.set_provider(provider)
    }

    /// Update and persist the API key.
    pub async fn set_api_key(&self, api_key: impl Into<String>) -> AppResult<()> {
        self.store.write().await.set_api_key(api_key)
    }

    /// Update and persist the default model.
    pub async fn set_model(&self, model: impl Into<String>) -> AppResult<()> {
        self.store.write().await.set_model(model)
    }

    // ── Template Attachment ────────────────────────────────────────────

    /// The attached template, if any.
    pub async fn template(&self) -> Option<TemplateArtifact> {
        self.template.read().await.clone()
    }

    /// Validate an upload and attach it, replacing any previous template.
    ///
    /// A rejected upload leaves the previous attachment untouched.
    pub async fn attach_template(&self, file_name: &str, size: u64) -> AppResult<TemplateArtifact> {
        let artifact = accept_upload(file_name, size)?;
        *self.template.write().await = Some(artifact.clone());
        Ok(artifact)
    }

    /// Attach the built-in default template.
    pub async fn use_default_template(&self) -> TemplateArtifact {
        let artifact = TemplateArtifact::default_template();
        *self.template.write().await = Some(artifact.clone());
        artifact
    }

    /// Clear the attached template.
    pub async fn remove_template(&self) {
        *self.template.write().await = None;
    }

    // ── Generation ─────────────────────────────────────────────────────

    /// Whether the readiness gate currently allows generation.
    pub async fn is_ready(&self) -> bool {
        let draft = self.draft().await;
        let template = self.template.read().await;
        let credential = self.credential().await;
        can_generate(&draft, template.as_ref(), &credential)
    }

    /// Whether a run is currently active.
    pub async fn is_generating(&self) -> bool {
        self.active.read().await.is_some()
    }

    /// The artifact produced by the last completed run.
    pub async fn generated_artifact(&self) -> Option<GeneratedArtifact> {
        self.artifact.read().await.clone()
    }

    /// Start a generation run, driving it to completion.
    ///
    /// Rejects when the readiness gate fails or a run is already active. The
    /// previous artifact is cleared when the run starts; on completion the new
    /// artifact is stored, on cancellation or abort nothing is.
    pub async fn generate(&self, events: mpsc::Sender<PipelineEvent>) -> AppResult<RunOutcome> {
        let draft = self.draft().await;
        let credential = self.credential().await;
        let template = self.template().await;

        if !can_generate(&draft, template.as_ref(), &credential) {
            return Err(AppError::validation(
                "content, template, and API key are all required",
            ));
        }
        let template = template.ok_or_else(|| AppError::validation("no template attached"))?;

        let mut config = ProviderConfig::from_credential(&credential);
        let model = self.store.read().await.model().to_string();
        if !model.trim().is_empty() {
            config.model = model;
        }
        config.validate()?;
        let provider: Arc<dyn StructureProvider> = Arc::new(OpenAIProvider::new(config));

        let cancel = CancellationToken::new();
        {
            let mut active = self.active.write().await;
            if active.is_some() {
                return Err(AppError::validation("a generation run is already active"));
            }
            *active = Some(cancel.clone());
        }

        // An artifact only exists while no run is active.
        *self.artifact.write().await = None;

        let result = self
            .pipeline
            .run(&draft, &template, &credential, provider, events.clone(), cancel)
            .await;

        *self.active.write().await = None;

        match result {
            Ok(RunOutcome::Completed(artifact)) => {
                *self.artifact.write().await = Some(artifact.clone());
                Ok(RunOutcome::Completed(artifact))
            }
            Ok(RunOutcome::Cancelled) => Ok(RunOutcome::Cancelled),
            Err(e) => {
                error!(error = %e, "generation run aborted");
                let _ = events
                    .send(PipelineEvent::Failed {
                        message: e.to_string(),
                    })
                    .await;
                Err(e)
            }
        }
    }

    /// Signal the active run to cancel. No-op when nothing is running.
    pub async fn cancel(&self) {
        if let Some(token) = self.active.read().await.as_ref() {
            token.cancel();
        }
    }

    // ── Connectivity ───────────────────────────────────────────────────

    /// Probe the configured provider and record the outcome.
    pub async fn test_connection(&self) -> bool {
        let credential = self.credential().await;
        let reachable = match credential.provider {
            ProviderType::OpenAI if credential.has_key() => {
                let config = ProviderConfig::from_credential(&credential);
                OpenAIProvider::new(config).test_connection().await
            }
            _ => false,
        };

        *self.connection.write().await = if reachable {
            ConnectionStatus::Connected
        } else {
            ConnectionStatus::Error
        };
        reachable
    }

    /// Outcome of the last connectivity probe.
    pub async fn connection_status(&self) -> ConnectionStatus {
        *self.connection.read().await
    }

    // ── Template Library ───────────────────────────────────────────────

    /// The filtered, sorted library view, anchored at the current time.
    pub async fn library_view(&self, filters: &FilterState) -> Vec<TemplateRecord> {
        self.library.read().await.view(filters, Utc::now())
    }

    /// Number of templates in the library.
    pub async fn template_count(&self) -> usize {
        self.library.read().await.len()
    }

    /// Add a validated upload to the library; returns the new record id.
    pub async fn add_template(&self, upload: &TemplateUpload) -> AppResult<String> {
        self.library.write().await.add_upload(upload, Utc::now())
    }

    /// Duplicate a library template; returns the copy's id.
    pub async fn duplicate_template(&self, id: &str) -> AppResult<String> {
        self.library.write().await.duplicate(id, Utc::now())
    }

    /// Delete a library template.
    pub async fn delete_template(&self, id: &str) -> AppResult<()> {
        self.library.write().await.remove(id)
    }

    /// Delete several library templates; returns how many were removed.
    pub async fn delete_templates(&self, ids: &[String]) -> usize {
        self.library.write().await.remove_many(ids)
    }
}
