//! Readiness Gate
//!
//! Precondition check enabling the generate action.

use slideforge_llm::ProviderCredential;

use crate::models::draft::ContentDraft;
use crate::models::template::TemplateArtifact;

/// Whether a generation run may start.
///
/// True iff the draft has non-blank content, a template artifact is attached,
/// and the credential carries a non-blank API key. Total over its inputs; no
/// side effects and no error conditions.
pub fn can_generate(
    draft: &ContentDraft,
    template: Option<&TemplateArtifact>,
    credential: &ProviderCredential,
) -> bool {
    draft.has_content() && template.is_some() && credential.has_key()
}
