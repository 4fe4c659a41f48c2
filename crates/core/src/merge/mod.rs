//! Folding generated content into a page.

pub mod merger;
pub mod payload;

use thiserror::Error;

use crate::section::kind::SectionKind;

pub use merger::{merge_generated, merge_response, GENERATED_HERO_IMAGE};
pub use payload::{parse_generated_page, GeneratedPage};

/// Why a generated payload could not be merged. The page is never modified
/// when one of these is returned.
#[derive(Debug, Error)]
pub enum MergeError {
    #[error("generation service returned an empty response")]
    EmptyResponse,
    #[error("generated payload is not well-formed: {0}")]
    Malformed(String),
    #[error("generated payload contains no sections")]
    NoSections,
    #[error("generated {kind} section #{index} is not well-formed: {message}")]
    Section {
        index: usize,
        kind: SectionKind,
        message: String,
    },
}
