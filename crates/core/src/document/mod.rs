pub mod edit;
pub mod id;
pub mod model;
pub mod sample;
pub mod validate;

pub use edit::Direction;
pub use id::{DocumentId, ItemId, SectionId};
pub use model::{Document, FormConfig, FormField, NewDocument, ThankYouPage, Theme};
pub use validate::{validate_document, validate_new_document, ValidationError};
