//! Document validation for pages submitted from outside the builder.
use std::collections::HashSet;

use thiserror::Error;

use super::model::{Document, NewDocument, Theme};
use crate::section::content::{Section, SectionContent};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("document must contain at least one section")]
    NoSections,
    #[error("duplicate section id `{0}`")]
    DuplicateSectionId(String),
    #[error("duplicate item id `{item_id}` in section `{section_id}`")]
    DuplicateItemId { section_id: String, item_id: String },
    #[error("section id cannot be empty")]
    EmptySectionId,
    #[error("theme primary colour cannot be empty")]
    EmptyPrimaryColor,
}

/// Check the structural invariants of a page presented for editing.
pub fn validate_document(doc: &Document) -> Result<(), ValidationError> {
    validate_parts(&doc.theme, &doc.sections)
}

/// Same checks as [`validate_document`], for a page not yet inserted.
pub fn validate_new_document(doc: &NewDocument) -> Result<(), ValidationError> {
    validate_parts(&doc.theme, &doc.sections)
}

fn validate_parts(theme: &Theme, sections: &[Section]) -> Result<(), ValidationError> {
    if sections.is_empty() {
        return Err(ValidationError::NoSections);
    }
    if theme.primary_color.trim().is_empty() {
        return Err(ValidationError::EmptyPrimaryColor);
    }

    let mut seen = HashSet::new();
    for section in sections {
        if section.id.as_str().is_empty() {
            return Err(ValidationError::EmptySectionId);
        }
        if !seen.insert(section.id.as_str()) {
            return Err(ValidationError::DuplicateSectionId(section.id.to_string()));
        }

        let item_ids: Vec<&str> = match &section.content {
            SectionContent::Features(c) => c.features.iter().map(|f| f.id.as_str()).collect(),
            SectionContent::Testimonials(c) => {
                c.testimonials.iter().map(|t| t.id.as_str()).collect()
            }
            _ => Vec::new(),
        };
        let mut items = HashSet::new();
        for item_id in item_ids {
            if !items.insert(item_id) {
                return Err(ValidationError::DuplicateItemId {
                    section_id: section.id.to_string(),
                    item_id: item_id.to_string(),
                });
            }
        }
    }
    Ok(())
}
