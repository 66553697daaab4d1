//! Template Upload Boundary
//!
//! Validates incoming template files by extension and size. Accepted files are
//! treated as opaque byte blobs referenced by name and size only.

use std::path::Path;

use crate::models::template::TemplateArtifact;
use crate::utils::error::{AppError, AppResult};

/// Maximum accepted template size (50 MB).
pub const MAX_TEMPLATE_BYTES: u64 = 50 * 1024 * 1024;

/// Accepted template extensions, compared case-insensitively.
const ACCEPTED_EXTENSIONS: [&str; 2] = ["pptx", "potx"];

/// Validate an uploaded template file reference.
pub fn validate_upload(file_name: &str, size: u64) -> AppResult<()> {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase());

    match extension {
        Some(ext) if ACCEPTED_EXTENSIONS.contains(&ext.as_str()) => {}
        _ => {
            return Err(AppError::validation(
                "Please select a valid PowerPoint file (.pptx or .potx)",
            ))
        }
    }

    if size > MAX_TEMPLATE_BYTES {
        return Err(AppError::validation("File size must be less than 50MB"));
    }

    Ok(())
}

/// Validate an upload and produce the attachable artifact.
pub fn accept_upload(file_name: &str, size: u64) -> AppResult<TemplateArtifact> {
    validate_upload(file_name, size)?;
    Ok(TemplateArtifact::new(file_name, size))
}

/// Derive a display name from a file name by dropping the template extension.
pub fn template_name_from_file(file_name: &str) -> String {
    let lower = file_name.to_lowercase();
    for ext in ACCEPTED_EXTENSIONS {
        if lower.ends_with(&format!(".{}", ext)) {
            return file_name[..file_name.len() - ext.len() - 1].to_string();
        }
    }
    file_name.to_string()
}
