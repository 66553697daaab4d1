//! Integration Tests Module
//!
//! End-to-end tests for the SlideForge engine. Tests cover the staged
//! generation pipeline (progress, fallback, cancellation), session state and
//! persistence, and template library filtering, sorting, and maintenance.

// Pipeline progression, provider fallback, and cancellation tests
mod pipeline_test;

// Session state, persistence, and single-run enforcement tests
mod session_test;

// Template library filter/sort and collection maintenance tests
mod library_test;
