//! Storage
//!
//! Local persistence for the session: a single JSON key-value file.

pub mod session;

pub use session::{SessionSnapshot, SessionStore};
