//! Turn a generated payload into well-formed sections and fold it into a page.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{info, warn};

use super::payload::{
    parse_generated_page, GeneratedFeatures, GeneratedHero, GeneratedPage, GeneratedSection,
    GeneratedTestimonials,
};
use super::MergeError;
use crate::document::id::ItemId;
use crate::document::model::Document;
use crate::section::content::{
    FeatureItem, FeaturesContent, HeroContent, PlainContent, Section, SectionContent,
    Testimonial, TestimonialsContent,
};
use crate::section::kind::SectionKind;

/// Image given to generated hero sections that arrive without one.
pub const GENERATED_HERO_IMAGE: &str =
    "https://images.unsplash.com/photo-1600880292203-757bb62b4baf?auto=format&fit=crop&q=80";

/// Build identified sections from a generated payload, in payload order.
pub fn build_sections(page: &GeneratedPage) -> Result<Vec<Section>, MergeError> {
    page.sections
        .iter()
        .enumerate()
        .map(|(index, generated)| build_section(index, generated))
        .collect()
}

fn build_section(index: usize, generated: &GeneratedSection) -> Result<Section, MergeError> {
    let kind = generated.kind;
    let content = match kind {
        SectionKind::Hero => {
            let hero: GeneratedHero = decode(index, kind, &generated.content)?;
            let image_url = hero
                .image_url
                .filter(|url| !url.trim().is_empty())
                .unwrap_or_else(|| GENERATED_HERO_IMAGE.to_string());
            SectionContent::Hero(HeroContent {
                headline: hero.headline,
                subheadline: hero.subheadline,
                image_url,
                button_text: hero.button_text,
            })
        }
        SectionKind::Features => {
            let features: GeneratedFeatures = decode(index, kind, &generated.content)?;
            SectionContent::Features(FeaturesContent {
                features: features
                    .features
                    .into_iter()
                    .map(|f| FeatureItem {
                        id: ItemId::generate(),
                        title: f.title,
                        description: f.description,
                        icon: f.icon,
                    })
                    .collect(),
            })
        }
        SectionKind::Testimonials => {
            let testimonials: GeneratedTestimonials = decode(index, kind, &generated.content)?;
            SectionContent::Testimonials(TestimonialsContent {
                testimonials: testimonials
                    .testimonials
                    .into_iter()
                    .map(|t| Testimonial {
                        id: ItemId::generate(),
                        name: t.name,
                        role: t.role,
                        quote: t.quote,
                        avatar: t.avatar.filter(|a| !a.trim().is_empty()),
                    })
                    .collect(),
            })
        }
        SectionKind::Form | SectionKind::Text => {
            SectionContent::from_value(kind, generated.content.clone()).map_err(|e| MergeError::Section {
                index,
                kind,
                message: e.to_string(),
            })?
        }
        SectionKind::About => SectionContent::About(decode::<PlainContent>(
            index,
            kind,
            &generated.content,
        )?),
        SectionKind::Cta => {
            SectionContent::Cta(decode::<PlainContent>(index, kind, &generated.content)?)
        }
    };
    Ok(Section::new(content))
}

fn decode<T: DeserializeOwned + Default>(
    index: usize,
    kind: SectionKind,
    content: &Value,
) -> Result<T, MergeError> {
    if content.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(content.clone()).map_err(|e| MergeError::Section {
        index,
        kind,
        message: e.to_string(),
    })
}

/// Replace the sections of `doc` with the generated ones and merge the theme
/// field by field. On error the caller keeps `doc` as it was.
pub fn merge_generated(doc: &Document, page: &GeneratedPage) -> Result<Document, MergeError> {
    let sections = build_sections(page)?;
    let theme = match &page.theme {
        Some(patch) => patch.merged_into(&doc.theme),
        None => doc.theme.clone(),
    };

    info!(
        document_id = %doc.id,
        replaced = doc.sections.len(),
        sections = sections.len(),
        "generated content merged"
    );
    Ok(Document {
        theme,
        sections,
        ..doc.clone()
    })
}

/// Parse a raw service response and merge it into `doc`.
pub fn merge_response(doc: &Document, raw: &str) -> Result<Document, MergeError> {
    let page = parse_generated_page(raw).inspect_err(|e| {
        warn!(document_id = %doc.id, error = %e, "generated payload rejected");
    })?;
    merge_generated(doc, &page)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::section::SectionKind;

    const PAYLOAD: &str = r##"{
        "theme": { "primaryColor": "#db2777" },
        "sections": [
            { "type": "hero", "content": { "headline": "Calm mornings", "subheadline": "Beginner yoga", "buttonText": "Book" } },
            { "type": "features", "content": { "features": [
                { "title": "Small groups", "description": "Max eight", "icon": "users" },
                { "title": "Mats included", "description": "", "icon": "check" }
            ] } },
            { "type": "testimonials", "content": { "testimonials": [
                { "name": "Noa", "role": "Student", "quote": "Loved it" }
            ] } },
            { "type": "form", "content": { "headline": "Ready?", "subheadline": "Join us" } }
        ]
    }"##;

    #[test]
    fn merge_replaces_sections_and_assigns_fresh_ids() {
        let (doc, _) = Document::draft().add_section(SectionKind::Features);
        let old_ids: HashSet<_> = doc.sections.iter().map(|s| s.id.clone()).collect();

        let merged = merge_response(&doc, PAYLOAD).unwrap();
        assert_eq!(merged.sections.len(), 4);
        assert!(merged.sections.iter().all(|s| !old_ids.contains(&s.id)));

        let SectionContent::Features(features) = &merged.sections[1].content else {
            panic!("expected features");
        };
        let SectionContent::Testimonials(testimonials) = &merged.sections[2].content else {
            panic!("expected testimonials");
        };
        assert_eq!(features.features.len(), 2);
        assert_eq!(testimonials.testimonials.len(), 1);

        let item_ids: HashSet<_> = features
            .features
            .iter()
            .map(|f| f.id.clone())
            .chain(testimonials.testimonials.iter().map(|t| t.id.clone()))
            .collect();
        assert_eq!(item_ids.len(), 3);
    }

    #[test]
    fn hero_without_image_gets_one() {
        let merged = merge_response(&Document::draft(), PAYLOAD).unwrap();
        let SectionContent::Hero(hero) = &merged.sections[0].content else {
            panic!("expected hero");
        };
        assert_eq!(hero.image_url, GENERATED_HERO_IMAGE);
        assert_eq!(hero.headline, "Calm mornings");
    }

    #[test]
    fn hero_keeps_a_generated_image() {
        let raw = r#"{"sections":[{"type":"hero","content":{"imageUrl":"https://img/x.png"}}]}"#;
        let merged = merge_response(&Document::draft(), raw).unwrap();
        let SectionContent::Hero(hero) = &merged.sections[0].content else {
            panic!("expected hero");
        };
        assert_eq!(hero.image_url, "https://img/x.png");
    }

    #[test]
    fn theme_is_merged_field_by_field() {
        let doc = Document::draft().set_font("Heebo");
        let merged = merge_response(&doc, PAYLOAD).unwrap();
        assert_eq!(merged.theme.primary_color, "#db2777");
        assert_eq!(merged.theme.font, "Heebo");
        assert_eq!(merged.name, doc.name);
        assert_eq!(merged.form_config, doc.form_config);
    }

    #[test]
    fn malformed_section_content_fails_the_whole_merge() {
        let raw = r#"{"sections":[
            {"type":"hero","content":{"headline":"ok"}},
            {"type":"features","content":{"features":"not a list"}}
        ]}"#;
        let err = merge_response(&Document::draft(), raw).unwrap_err();
        assert!(matches!(err, MergeError::Section { index: 1, .. }));
    }

    #[test]
    fn service_supplied_item_ids_are_replaced() {
        let raw = r#"{"sections":[{"type":"features","content":{"features":[{"id":"dup","title":"a"},{"id":"dup","title":"b"}]}}]}"#;
        let merged = merge_response(&Document::draft(), raw).unwrap();
        let SectionContent::Features(c) = &merged.sections[0].content else {
            panic!("expected features");
        };
        assert_ne!(c.features[0].id, c.features[1].id);
        assert_ne!(c.features[0].id, "dup");
    }
}
