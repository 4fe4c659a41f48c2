//! Identifier types for documents, sections and list items.
//!
//! Identifiers are UUIDv7 strings. They are opaque to callers: equality is the
//! only meaningful operation, and a fresh value never collides with any value
//! previously handed out, so nothing checks for collisions at runtime.
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Mint a fresh identifier.
            pub fn generate() -> Self {
                Self(Uuid::now_v7().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

string_id!(
    /// Identifier of a stored landing page. Empty while the page is a draft.
    DocumentId
);

string_id!(
    /// Identifier of one section, stable for the section's lifetime.
    SectionId
);

string_id!(
    /// Identifier of a feature or testimonial entry inside a section.
    ItemId
);

impl DocumentId {
    /// The placeholder carried by a page that has not been persisted yet.
    pub fn draft() -> Self {
        Self(String::new())
    }

    pub fn is_draft(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::draft()
    }
}
