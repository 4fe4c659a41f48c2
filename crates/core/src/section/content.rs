//! Kind-specific section payloads.
//!
//! Every payload field is defaulted on deserialization, so a section read
//! from storage or from a patch never carries a missing field.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use super::kind::SectionKind;
use crate::document::id::{ItemId, SectionId};

/// Shallow content patch: top-level payload field name to its new value.
pub type ContentPatch = Map<String, Value>;

#[derive(Debug, Error)]
pub enum PatchError {
    #[error("`{field}` is not a field of a {kind} section")]
    UnknownField { kind: SectionKind, field: String },
    #[error("invalid value for a {kind} section: {source}")]
    InvalidValue {
        kind: SectionKind,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeroContent {
    pub headline: String,
    pub subheadline: String,
    pub image_url: String,
    pub button_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureItem {
    pub id: ItemId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeaturesContent {
    pub features: Vec<FeatureItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    pub id: ItemId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub quote: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TestimonialsContent {
    pub testimonials: Vec<Testimonial>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormContent {
    pub headline: String,
    pub subheadline: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextContent {
    pub html: String,
}

/// Payload of the declared-but-unrendered kinds (`about`, `cta`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlainContent {
    pub headline: String,
    pub subheadline: String,
    pub description: String,
    pub button_text: String,
}

/// Tagged section payload; the variant is the section's kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionContent {
    Hero(HeroContent),
    Features(FeaturesContent),
    About(PlainContent),
    Cta(PlainContent),
    Testimonials(TestimonialsContent),
    Text(TextContent),
    Form(FormContent),
}

impl SectionContent {
    pub fn kind(&self) -> SectionKind {
        match self {
            Self::Hero(_) => SectionKind::Hero,
            Self::Features(_) => SectionKind::Features,
            Self::About(_) => SectionKind::About,
            Self::Cta(_) => SectionKind::Cta,
            Self::Testimonials(_) => SectionKind::Testimonials,
            Self::Text(_) => SectionKind::Text,
            Self::Form(_) => SectionKind::Form,
        }
    }

    /// Decode a JSON payload as the content of `kind`. `null` decodes to the
    /// all-empty payload.
    pub fn from_value(kind: SectionKind, value: Value) -> Result<Self, serde_json::Error> {
        let value = if value.is_null() {
            Value::Object(Map::new())
        } else {
            value
        };
        Ok(match kind {
            SectionKind::Hero => Self::Hero(serde_json::from_value(value)?),
            SectionKind::Features => Self::Features(serde_json::from_value(value)?),
            SectionKind::About => Self::About(serde_json::from_value(value)?),
            SectionKind::Cta => Self::Cta(serde_json::from_value(value)?),
            SectionKind::Testimonials => Self::Testimonials(serde_json::from_value(value)?),
            SectionKind::Text => Self::Text(serde_json::from_value(value)?),
            SectionKind::Form => Self::Form(serde_json::from_value(value)?),
        })
    }

    pub fn to_value(&self) -> Value {
        let encoded = match self {
            Self::Hero(c) => serde_json::to_value(c),
            Self::Features(c) => serde_json::to_value(c),
            Self::About(c) | Self::Cta(c) => serde_json::to_value(c),
            Self::Testimonials(c) => serde_json::to_value(c),
            Self::Text(c) => serde_json::to_value(c),
            Self::Form(c) => serde_json::to_value(c),
        };
        // Plain structs of strings and vectors always encode.
        encoded.unwrap_or(Value::Null)
    }

    /// Shallow-merge `patch` into this payload. Keys absent from the patch
    /// keep their values; keys that are not fields of this kind are rejected.
    pub fn merged(&self, patch: &ContentPatch) -> Result<Self, PatchError> {
        let kind = self.kind();
        let mut fields = match self.to_value() {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        for (key, value) in patch {
            if !fields.contains_key(key) {
                return Err(PatchError::UnknownField {
                    kind,
                    field: key.clone(),
                });
            }
            fields.insert(key.clone(), value.clone());
        }
        Self::from_value(kind, Value::Object(fields))
            .map_err(|source| PatchError::InvalidValue { kind, source })
    }

    /// Headline and subheadline, for kinds that carry them.
    pub fn headlines(&self) -> Option<(&str, &str)> {
        match self {
            Self::Hero(c) => Some((&c.headline, &c.subheadline)),
            Self::Form(c) => Some((&c.headline, &c.subheadline)),
            Self::About(c) | Self::Cta(c) => Some((&c.headline, &c.subheadline)),
            _ => None,
        }
    }
}

/// One ordered, typed block of a landing page.
///
/// Serialized as `{ "id", "type", "content" }`. The kind is derived from the
/// payload variant, so it cannot change without replacing the section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSection", into = "RawSection")]
pub struct Section {
    pub id: SectionId,
    pub content: SectionContent,
}

impl Section {
    pub fn new(content: SectionContent) -> Self {
        Self {
            id: SectionId::generate(),
            content,
        }
    }

    pub fn kind(&self) -> SectionKind {
        self.content.kind()
    }
}

#[derive(Serialize, Deserialize)]
struct RawSection {
    id: SectionId,
    #[serde(rename = "type")]
    kind: SectionKind,
    #[serde(default)]
    content: Value,
}

impl TryFrom<RawSection> for Section {
    type Error = serde_json::Error;

    fn try_from(raw: RawSection) -> Result<Self, Self::Error> {
        Ok(Self {
            id: raw.id,
            content: SectionContent::from_value(raw.kind, raw.content)?,
        })
    }
}

impl From<Section> for RawSection {
    fn from(section: Section) -> Self {
        Self {
            kind: section.kind(),
            content: section.content.to_value(),
            id: section.id,
        }
    }
}
