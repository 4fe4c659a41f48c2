//! Edit operations on a [`Document`].
//!
//! Each operation takes the current page by reference and returns the next
//! page value; the input is never modified.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::id::{ItemId, SectionId};
use super::model::{Document, FormConfig, ThankYouPage, Theme};
use crate::section::content::{ContentPatch, PatchError, Section, SectionContent};
use crate::section::kind::SectionKind;
use crate::section::registry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl Document {
    /// Append a section of `kind` with the registry's default payload.
    /// Returns the next page and the new section's id.
    pub fn add_section(&self, kind: SectionKind) -> (Self, SectionId) {
        let section = Section::new(registry::default_content(kind));
        let id = section.id.clone();
        debug!(section_id = %id, %kind, "section added");

        let mut next = self.clone();
        next.sections.push(section);
        (next, id)
    }

    /// Drop the section with `id`. Removing an absent section is a no-op.
    pub fn remove_section(&self, id: &SectionId) -> Self {
        let mut next = self.clone();
        next.sections.retain(|s| &s.id != id);
        next
    }

    /// Swap the section at `index` with its neighbour in `direction`.
    /// Moving past either end does nothing.
    pub fn move_section(&self, index: usize, direction: Direction) -> Self {
        let mut next = self.clone();
        let len = next.sections.len();
        match direction {
            Direction::Up if index > 0 && index < len => next.sections.swap(index, index - 1),
            Direction::Down if index + 1 < len => next.sections.swap(index, index + 1),
            _ => {}
        }
        next
    }

    /// Shallow-merge `patch` into the content of section `id`.
    ///
    /// An unknown section id leaves the page unchanged. A patch naming a
    /// field the section's kind does not have is rejected.
    pub fn update_section_content(
        &self,
        id: &SectionId,
        patch: &ContentPatch,
    ) -> Result<Self, PatchError> {
        let mut next = self.clone();
        if let Some(section) = next.sections.iter_mut().find(|s| &s.id == id) {
            section.content = section.content.merged(patch)?;
            debug!(section_id = %id, fields = patch.len(), "section content updated");
        }
        Ok(next)
    }

    /// Append a default entry to a features or testimonials section.
    /// Other kinds and unknown ids are left alone.
    pub fn add_list_item(&self, id: &SectionId) -> Self {
        let mut next = self.clone();
        if let Some(section) = next.sections.iter_mut().find(|s| &s.id == id) {
            match &mut section.content {
                SectionContent::Features(c) => c.features.push(registry::new_feature_item()),
                SectionContent::Testimonials(c) => {
                    c.testimonials.push(registry::new_testimonial())
                }
                _ => {}
            }
        }
        next
    }

    /// Remove one feature or testimonial entry by id.
    pub fn remove_list_item(&self, id: &SectionId, item: &ItemId) -> Self {
        let mut next = self.clone();
        if let Some(section) = next.sections.iter_mut().find(|s| &s.id == id) {
            match &mut section.content {
                SectionContent::Features(c) => c.features.retain(|f| &f.id != item),
                SectionContent::Testimonials(c) => c.testimonials.retain(|t| &t.id != item),
                _ => {}
            }
        }
        next
    }

    pub fn set_theme(&self, theme: Theme) -> Self {
        Self {
            theme,
            ..self.clone()
        }
    }

    pub fn set_primary_color(&self, color: impl Into<String>) -> Self {
        self.set_theme(Theme {
            primary_color: color.into(),
            ..self.theme.clone()
        })
    }

    pub fn set_font(&self, font: impl Into<String>) -> Self {
        self.set_theme(Theme {
            font: font.into(),
            ..self.theme.clone()
        })
    }

    pub fn set_form_config(&self, form_config: FormConfig) -> Self {
        Self {
            form_config,
            ..self.clone()
        }
    }

    pub fn set_thank_you_page(&self, thank_you_page: ThankYouPage) -> Self {
        Self {
            thank_you_page,
            ..self.clone()
        }
    }

    pub fn set_name(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }

    pub fn set_description(&self, description: Option<String>) -> Self {
        Self {
            description,
            ..self.clone()
        }
    }

    pub fn set_published(&self, published: bool) -> Self {
        Self {
            published,
            ..self.clone()
        }
    }
}
