//! Session Integration Tests
//!
//! Tests for session persistence, template attachment, single-run
//! enforcement, and cancellation through `SessionState`. These tests use
//! temporary directories to create isolated session files.

use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;
use tokio::sync::mpsc;

use slideforge::storage::SessionStore;
use slideforge::{AppError, GenerationPipeline, PipelineEvent, PipelineTiming, SessionState};
use slideforge_llm::ProviderType;

// ============================================================================
// Helper Functions
// ============================================================================

fn store_in(dir: &TempDir) -> SessionStore {
    SessionStore::at_path(dir.path().join("session.json")).unwrap()
}

fn instant_session(dir: &TempDir) -> SessionState {
    SessionState::with_pipeline(
        store_in(dir),
        GenerationPipeline::with_timing(PipelineTiming::instant()),
    )
}

/// Make the session ready on the mock-only path (no network possible).
async fn make_ready(state: &SessionState) {
    state.set_provider(ProviderType::Anthropic).await.unwrap();
    state.set_content("Board update: revenue, churn, roadmap").await.unwrap();
    state.set_api_key("key-abc").await.unwrap();
    state.use_default_template().await;
}

// ============================================================================
// Persistence
// ============================================================================

#[tokio::test]
async fn test_session_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    {
        let state = instant_session(&dir);
        state.set_content("Persisted content").await.unwrap();
        state.set_guidance("Persisted guidance").await.unwrap();
        state.set_provider(ProviderType::Gemini).await.unwrap();
        state.set_api_key("gk-42").await.unwrap();
    }

    // A fresh state over the same file sees the previous values.
    let state = instant_session(&dir);
    let draft = state.draft().await;
    assert_eq!(draft.text, "Persisted content");
    assert_eq!(draft.guidance, "Persisted guidance");

    let credential = state.credential().await;
    assert_eq!(credential.provider, ProviderType::Gemini);
    assert_eq!(credential.api_key, "gk-42");
}

#[tokio::test]
async fn test_template_attachment_is_not_persisted() {
    let dir = tempfile::tempdir().unwrap();

    {
        let state = instant_session(&dir);
        state.attach_template("deck.pptx", 2048).await.unwrap();
    }

    let state = instant_session(&dir);
    assert!(state.template().await.is_none());
}

// ============================================================================
// Generation Through the Session
// ============================================================================

#[tokio::test]
async fn test_full_generation_cycle() {
    let dir = tempfile::tempdir().unwrap();
    let state = instant_session(&dir);
    make_ready(&state).await;

    assert!(state.is_ready().await);
    assert!(state.generated_artifact().await.is_none());

    let (tx, mut rx) = mpsc::channel(32);
    let outcome = state.generate(tx).await.unwrap();
    let artifact = outcome.artifact().unwrap();

    assert_eq!(state.generated_artifact().await.unwrap().name, artifact.name);
    assert!(!state.is_generating().await);

    let mut progress = Vec::new();
    while let Ok(event) = rx.try_recv() {
        if let PipelineEvent::StageEntered { progress: p, .. } = event {
            progress.push(p);
        }
    }
    assert_eq!(progress, vec![20, 40, 60, 80, 100]);
}

#[tokio::test]
async fn test_new_run_clears_previous_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let state = SessionState::with_pipeline(
        store_in(&dir),
        GenerationPipeline::with_timing(PipelineTiming {
            parsing: Duration::from_millis(150),
            ..PipelineTiming::instant()
        }),
    );
    let state = Arc::new(state);
    make_ready(&state).await;

    let (tx, _rx) = mpsc::channel(32);
    state.generate(tx).await.unwrap();
    assert!(state.generated_artifact().await.is_some());

    let (tx, mut rx) = mpsc::channel(32);
    let handle = {
        let state = state.clone();
        tokio::spawn(async move { state.generate(tx).await })
    };

    // Once the first transition is observed the old artifact must be gone.
    let _ = rx.recv().await.unwrap();
    assert!(state.generated_artifact().await.is_none());
    assert!(state.is_generating().await);

    handle.await.unwrap().unwrap();
    assert!(state.generated_artifact().await.is_some());
}

#[tokio::test]
async fn test_second_concurrent_run_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let state = SessionState::with_pipeline(
        store_in(&dir),
        GenerationPipeline::with_timing(PipelineTiming {
            parsing: Duration::from_millis(200),
            ..PipelineTiming::instant()
        }),
    );
    let state = Arc::new(state);
    make_ready(&state).await;

    let (tx, mut rx) = mpsc::channel(32);
    let handle = {
        let state = state.clone();
        tokio::spawn(async move { state.generate(tx).await })
    };

    // Wait until the run is observably active, then try to start another.
    let _ = rx.recv().await.unwrap();
    let (tx2, _rx2) = mpsc::channel(8);
    let err = state.generate(tx2).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_cancel_through_session_discards_run() {
    let dir = tempfile::tempdir().unwrap();
    let state = SessionState::with_pipeline(
        store_in(&dir),
        GenerationPipeline::with_timing(PipelineTiming {
            parsing: Duration::from_millis(200),
            ..PipelineTiming::instant()
        }),
    );
    let state = Arc::new(state);
    make_ready(&state).await;

    let (tx, mut rx) = mpsc::channel(32);
    let handle = {
        let state = state.clone();
        tokio::spawn(async move { state.generate(tx).await })
    };

    let _ = rx.recv().await.unwrap();
    state.cancel().await;

    let outcome = handle.await.unwrap().unwrap();
    assert!(outcome.is_cancelled());
    assert!(state.generated_artifact().await.is_none());
    assert!(!state.is_generating().await);
}
