//! Data Models
//!
//! Contains all data structures used throughout the application.

pub mod artifact;
pub mod draft;
pub mod template;

pub use artifact::*;
pub use draft::*;
pub use template::*;
