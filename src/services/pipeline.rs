//! Generation Pipeline
//!
//! Drives a run through the five fixed stages in order, committing a progress
//! checkpoint per stage and emitting each transition to an observer channel.
//! The provider call happens during `structuring`; any provider failure is
//! logged and the run degrades to a locally synthesized outline rather than
//! failing the user-visible operation.
//!
//! Timing is simulation only: each stage pauses on a configurable delay so a
//! host UI can observe the transitions. Tests run with zero delays.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use slideforge_core::Stage;
use slideforge_llm::{
    PresentationStructure, ProviderCredential, ProviderType, StructureProvider,
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::models::artifact::GeneratedArtifact;
use crate::models::draft::ContentDraft;
use crate::models::template::TemplateArtifact;
use crate::services::readiness::can_generate;
use crate::utils::error::{AppError, AppResult};

// ============================================================================
// Timing
// ============================================================================

/// Simulated per-stage delays.
#[derive(Debug, Clone)]
pub struct PipelineTiming {
    pub parsing: Duration,
    pub structuring: Duration,
    pub extracting: Duration,
    pub generating: Duration,
    pub finalizing: Duration,
}

impl Default for PipelineTiming {
    fn default() -> Self {
        Self {
            parsing: Duration::from_millis(1000),
            structuring: Duration::from_millis(1500),
            extracting: Duration::from_millis(1000),
            generating: Duration::from_millis(2000),
            finalizing: Duration::from_millis(1000),
        }
    }
}

impl PipelineTiming {
    /// Zero delays everywhere, for tests and headless callers.
    pub fn instant() -> Self {
        Self {
            parsing: Duration::ZERO,
            structuring: Duration::ZERO,
            extracting: Duration::ZERO,
            generating: Duration::ZERO,
            finalizing: Duration::ZERO,
        }
    }

    fn delay_for(&self, stage: Stage) -> Duration {
        match stage {
            Stage::Parsing => self.parsing,
            Stage::Structuring => self.structuring,
            Stage::Extracting => self.extracting,
            Stage::Generating => self.generating,
            Stage::Finalizing => self.finalizing,
        }
    }
}

// ============================================================================
// Run Types
// ============================================================================

/// Event emitted to observers as the run progresses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PipelineEvent {
    /// A stage was entered and its progress checkpoint committed
    StageEntered { stage: Stage, progress: u8 },
    /// The run finished and produced an artifact
    Completed { artifact: GeneratedArtifact },
    /// The run was terminated by the cancel signal; no artifact
    Cancelled,
    /// The run aborted on an unexpected failure; state was reset
    Failed { message: String },
}

/// Transient state of the active run. Created when generation starts,
/// destroyed on completion, cancellation, or abort.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineRun {
    /// Current stage, `None` before the first transition
    pub stage: Option<Stage>,
    /// Progress in [0, 100]; non-decreasing within a run
    pub progress: u8,
    /// Whether the cancel signal terminated the run
    pub cancelled: bool,
}

impl PipelineRun {
    fn new() -> Self {
        Self {
            stage: None,
            progress: 0,
            cancelled: false,
        }
    }

    fn enter(&mut self, stage: Stage) {
        debug_assert!(stage.checkpoint() >= self.progress);
        self.stage = Some(stage);
        self.progress = stage.checkpoint();
    }
}

/// How a run ended.
#[derive(Debug, Clone)]
pub enum RunOutcome {
    /// The run completed and produced an artifact
    Completed(GeneratedArtifact),
    /// The run was cancelled; all partial state was discarded
    Cancelled,
}

impl RunOutcome {
    /// The produced artifact, if the run completed.
    pub fn artifact(self) -> Option<GeneratedArtifact> {
        match self {
            RunOutcome::Completed(artifact) => Some(artifact),
            RunOutcome::Cancelled => None,
        }
    }

    /// Whether the run was cancelled.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, RunOutcome::Cancelled)
    }
}

// ============================================================================
// Pipeline
// ============================================================================

/// The generation pipeline controller.
#[derive(Debug, Clone)]
pub struct GenerationPipeline {
    timing: PipelineTiming,
}

impl Default for GenerationPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl GenerationPipeline {
    /// Create a pipeline with the default stage delays.
    pub fn new() -> Self {
        Self {
            timing: PipelineTiming::default(),
        }
    }

    /// Create a pipeline with explicit stage delays.
    pub fn with_timing(timing: PipelineTiming) -> Self {
        Self { timing }
    }

    /// Execute one generation run.
    ///
    /// The provider is an explicit argument so callers (and tests) control the
    /// credential it was built from. It is only invoked when the credential
    /// selects OpenAI with a non-blank key; every other configuration takes
    /// the synthesized-outline path.
    ///
    /// The cancel token is checked before every stage transition and while a
    /// stage delay is pending; a cancelled run discards all partial state.
    pub async fn run(
        &self,
        draft: &ContentDraft,
        template: &TemplateArtifact,
        credential: &ProviderCredential,
        provider: Arc<dyn StructureProvider>,
        events: mpsc::Sender<PipelineEvent>,
        cancel: CancellationToken,
    ) -> AppResult<RunOutcome> {
        if !can_generate(draft, Some(template), credential) {
            return Err(AppError::validation(
                "content, template, and API key are all required",
            ));
        }

        let mut run = PipelineRun::new();
        let mut structure: Option<PresentationStructure> = None;

        for stage in Stage::ALL {
            if cancel.is_cancelled() {
                run.cancelled = true;
                let _ = events.send(PipelineEvent::Cancelled).await;
                return Ok(RunOutcome::Cancelled);
            }

            run.enter(stage);
            debug!(stage = %stage, progress = run.progress, "entered pipeline stage");
            let _ = events
                .send(PipelineEvent::StageEntered {
                    stage,
                    progress: run.progress,
                })
                .await;

            if stage == Stage::Structuring && should_structure(credential) {
                match provider.fetch_structure(&draft.text, &draft.guidance).await {
                    Ok(parsed) => structure = Some(parsed),
                    Err(e) => {
                        // This stage never aborts the run: the artifact falls
                        // back to a synthesized outline.
                        warn!(error = %e, "provider structuring failed, using fallback outline");
                    }
                }
            }

            tokio::select! {
                _ = cancel.cancelled() => {
                    run.cancelled = true;
                    let _ = events.send(PipelineEvent::Cancelled).await;
                    return Ok(RunOutcome::Cancelled);
                }
                _ = tokio::time::sleep(self.timing.delay_for(stage)) => {}
            }
        }

        let artifact = GeneratedArtifact::from_structure(structure.as_ref());
        let _ = events
            .send(PipelineEvent::Completed {
                artifact: artifact.clone(),
            })
            .await;
        Ok(RunOutcome::Completed(artifact))
    }
}

/// Whether the structuring stage should call the provider at all.
fn should_structure(credential: &ProviderCredential) -> bool {
    credential.provider == ProviderType::OpenAI && credential.has_key()
}

// ============================================================================
// Tests
// ============================================================================
