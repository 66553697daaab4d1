//! SlideForge Core
//!
//! Foundational error types and the generation stage machine for the
//! SlideForge workspace. This crate has zero dependencies on application-level
//! code (HTTP clients, storage, async runtime).
//!
//! ## Module Organization
//!
//! - `error` - Core error types (`CoreError`, `CoreResult`)
//! - `stage` - The generation stage machine (`Stage`)
//!
//! ## Design Principles
//!
//! 1. **Zero external dependencies beyond serde/thiserror** - keeps build times minimal
//! 2. **Pure logic only** - stage progression carries no timing or I/O, so it is
//!    testable without real delays and drivable from any async primitive
//! 3. **Unidirectional dependency** - this crate depends on nothing else in the workspace

pub mod error;
pub mod stage;

// ── Error Types ────────────────────────────────────────────────────────
pub use error::{CoreError, CoreResult};

// ── Stage Machine ──────────────────────────────────────────────────────
pub use stage::Stage;
