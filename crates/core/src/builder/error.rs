use thiserror::Error;

use crate::document::id::SectionId;
use crate::generate::GenerateError;
use crate::merge::MergeError;
use crate::section::content::PatchError;

#[derive(Debug, Error)]
pub enum BuilderError {
    #[error("a page generation request is already in flight")]
    PageGenerationInFlight,

    #[error("an image generation request is already in flight for section `{0}`")]
    ImageGenerationInFlight(SectionId),

    #[error("business description cannot be empty")]
    EmptyDescription,

    #[error("section `{0}` not found")]
    SectionNotFound(SectionId),

    #[error("section `{0}` has no background image")]
    NoImageSlot(SectionId),

    #[error(transparent)]
    Patch(#[from] PatchError),

    #[error("content generation failed: {0}")]
    Generate(#[from] GenerateError),

    #[error("generated content could not be applied: {0}")]
    Merge(#[from] MergeError),
}
