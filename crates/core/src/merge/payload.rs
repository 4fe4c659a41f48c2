//! Shape of the page payload returned by the generation service.
//!
//! Generated sections carry no identifiers, neither on the section nor on
//! list entries. Missing fields default; the overall shape is checked
//! strictly.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::MergeError;
use crate::mutation::types::ThemePatch;
use crate::section::kind::SectionKind;

#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedPage {
    #[serde(default)]
    pub theme: Option<ThemePatch>,
    pub sections: Vec<GeneratedSection>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedSection {
    #[serde(rename = "type", alias = "kind")]
    pub kind: SectionKind,
    #[serde(default)]
    pub content: Value,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeneratedHero {
    #[serde(deserialize_with = "null_as_default")]
    pub headline: String,
    #[serde(deserialize_with = "null_as_default")]
    pub subheadline: String,
    pub image_url: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub button_text: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GeneratedFeatures {
    #[serde(deserialize_with = "null_as_default")]
    pub features: Vec<GeneratedFeature>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GeneratedFeature {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub icon: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GeneratedTestimonials {
    #[serde(deserialize_with = "null_as_default")]
    pub testimonials: Vec<GeneratedTestimonial>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GeneratedTestimonial {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub role: String,
    #[serde(deserialize_with = "null_as_default")]
    pub quote: String,
    pub avatar: Option<String>,
}

/// Read an explicit `null` as the field's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Parse the raw service response into a [`GeneratedPage`].
///
/// The response must be a single JSON object with at least one section.
pub fn parse_generated_page(raw: &str) -> Result<GeneratedPage, MergeError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(MergeError::EmptyResponse);
    }

    let page: GeneratedPage =
        serde_json::from_str(trimmed).map_err(|e| MergeError::Malformed(e.to_string()))?;
    if page.sections.is_empty() {
        return Err(MergeError::NoSections);
    }
    Ok(page)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_documented_shape() {
        let page = parse_generated_page(
            r##"{
                "theme": { "primaryColor": "#16a34a" },
                "sections": [
                    { "type": "hero", "content": { "headline": "Calm", "subheadline": "Yoga", "buttonText": "Join" } },
                    { "type": "features", "content": { "features": [{ "title": "Small groups", "description": "", "icon": "check" }] } }
                ]
            }"##,
        )
        .unwrap();
        assert_eq!(page.sections.len(), 2);
        assert_eq!(page.sections[0].kind, SectionKind::Hero);
        assert_eq!(
            page.theme.unwrap().primary_color.as_deref(),
            Some("#16a34a")
        );
    }

    #[test]
    fn empty_and_blank_responses_fail() {
        assert!(matches!(parse_generated_page(""), Err(MergeError::EmptyResponse)));
        assert!(matches!(parse_generated_page("  \n"), Err(MergeError::EmptyResponse)));
    }

    #[test]
    fn non_objects_and_unknown_kinds_fail() {
        assert!(matches!(parse_generated_page("[]"), Err(MergeError::Malformed(_))));
        assert!(matches!(
            parse_generated_page(r#"{"sections":[{"type":"carousel"}]}"#),
            Err(MergeError::Malformed(_))
        ));
        assert!(matches!(parse_generated_page("not json"), Err(MergeError::Malformed(_))));
    }

    #[test]
    fn null_fields_read_as_defaults() {
        let hero: GeneratedHero = serde_json::from_value(serde_json::json!({
            "headline": null,
            "subheadline": "Yoga",
            "imageUrl": null,
            "buttonText": null
        }))
        .unwrap();
        assert_eq!(hero.headline, "");
        assert_eq!(hero.subheadline, "Yoga");
        assert_eq!(hero.image_url, None);

        let quotes: GeneratedTestimonials = serde_json::from_value(serde_json::json!({
            "testimonials": [{ "name": "Dana", "role": null, "quote": null }]
        }))
        .unwrap();
        assert_eq!(quotes.testimonials[0].role, "");

        let empty: GeneratedFeatures =
            serde_json::from_value(serde_json::json!({ "features": null })).unwrap();
        assert!(empty.features.is_empty());
    }

    #[test]
    fn a_page_without_sections_fails() {
        assert!(matches!(
            parse_generated_page(r#"{"sections":[]}"#),
            Err(MergeError::NoSections)
        ));
    }
}
