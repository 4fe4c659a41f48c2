//! Core of the landing-page builder: the page model, section registry, edit
//! operations, in-memory store, generated-content merge and live preview.

pub mod builder;
pub mod document;
pub mod events;
pub mod generate;
pub mod merge;
pub mod mutation;
pub mod preview;
pub mod section;
pub mod store;

pub use builder::{Builder, BuilderError};
pub use document::{Document, DocumentId, NewDocument, SectionId};
pub use section::{Section, SectionContent, SectionKind};
pub use store::DocumentStore;
