//! Default payloads for sections added from the builder palette.
//!
//! Sections produced by content generation carry their own payload and never
//! pass through here.

use super::content::{
    FeatureItem, FeaturesContent, FormContent, HeroContent, PlainContent, SectionContent,
    Testimonial, TestimonialsContent, TextContent,
};
use super::kind::SectionKind;
use crate::document::id::ItemId;

pub const DEFAULT_HERO_IMAGE: &str = "https://images.unsplash.com/photo-1519389950473-47ba0277781c";

/// The literal initial payload of a freshly added section of `kind`.
pub fn default_content(kind: SectionKind) -> SectionContent {
    match kind {
        SectionKind::Hero => SectionContent::Hero(HeroContent {
            headline: "כותרת ראשית".into(),
            subheadline: "תיאור קצר".into(),
            image_url: DEFAULT_HERO_IMAGE.into(),
            button_text: "לחץ כאן".into(),
        }),
        SectionKind::Features => SectionContent::Features(FeaturesContent {
            features: vec![FeatureItem {
                id: ItemId::from("f1"),
                title: "יתרון לדוגמה".into(),
                description: "הסבר קצר".into(),
                icon: "check".into(),
            }],
        }),
        SectionKind::Testimonials => SectionContent::Testimonials(TestimonialsContent {
            testimonials: vec![Testimonial {
                id: ItemId::from("t1"),
                name: "לקוח מרוצה".into(),
                role: "מנכ״ל".into(),
                quote: "שירות מדהים!".into(),
                avatar: None,
            }],
        }),
        SectionKind::Text => SectionContent::Text(TextContent {
            html: "<h2>כותרת פסקה</h2><p>כתוב כאן טקסט חופשי...</p>".into(),
        }),
        SectionKind::Form => SectionContent::Form(FormContent {
            headline: "הצטרפו אלינו".into(),
            subheadline: "מלאו פרטים".into(),
        }),
        SectionKind::About => SectionContent::About(PlainContent::default()),
        SectionKind::Cta => SectionContent::Cta(PlainContent::default()),
    }
}

/// A new feature entry appended from the features editor.
pub fn new_feature_item() -> FeatureItem {
    FeatureItem {
        id: ItemId::generate(),
        title: "יתרון חדש".into(),
        description: "תיאור".into(),
        icon: "check".into(),
    }
}

/// A new testimonial entry appended from the testimonials editor.
pub fn new_testimonial() -> Testimonial {
    Testimonial {
        id: ItemId::generate(),
        name: "לקוח חדש".into(),
        role: String::new(),
        quote: "כתוב כאן המלצה...".into(),
        avatar: None,
    }
}
