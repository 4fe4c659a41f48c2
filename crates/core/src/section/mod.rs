pub mod content;
pub mod kind;
pub mod registry;

pub use content::{ContentPatch, PatchError, Section, SectionContent};
pub use kind::SectionKind;
