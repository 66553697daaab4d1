//! Cross-Platform Path Utilities
//!
//! Functions for resolving the application directory and session file.

use std::path::PathBuf;

use crate::utils::error::{AppError, AppResult};

/// Get the user's home directory
pub fn home_dir() -> AppResult<PathBuf> {
    dirs::home_dir().ok_or_else(|| AppError::config("Could not determine home directory"))
}

/// Get the SlideForge directory (~/.slideforge/)
pub fn slideforge_dir() -> AppResult<PathBuf> {
    Ok(home_dir()?.join(".slideforge"))
}

/// Get the session file path (~/.slideforge/session.json)
pub fn session_path() -> AppResult<PathBuf> {
    Ok(slideforge_dir()?.join("session.json"))
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &PathBuf) -> AppResult<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Get the SlideForge directory, creating if it doesn't exist
pub fn ensure_slideforge_dir() -> AppResult<PathBuf> {
    let path = slideforge_dir()?;
    ensure_dir(&path)?;
    Ok(path)
}
