//! Projection of a page into its preview tree.

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use super::vnode::VNode;
use crate::document::model::{Document, FormField, Theme};
use crate::section::content::{
    FeaturesContent, FormContent, HeroContent, Section, SectionContent, TestimonialsContent,
    TextContent,
};

const AVATAR_FALLBACK: &str = "https://api.dicebear.com/7.x/initials/svg?seed=";

/// Preview frame the page is rendered into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Viewport {
    #[default]
    #[serde(alias = "desktop")]
    Wide,
    #[serde(alias = "mobile")]
    Narrow,
}

impl Viewport {
    fn feature_columns(self) -> usize {
        match self {
            Viewport::Wide => 3,
            Viewport::Narrow => 1,
        }
    }

    fn testimonial_columns(self) -> usize {
        match self {
            Viewport::Wide => 2,
            Viewport::Narrow => 1,
        }
    }
}

/// Render `doc` for `viewport`. Sections appear in page order; kinds without
/// a renderer produce nothing.
pub fn render_preview(doc: &Document, viewport: Viewport) -> VNode {
    let frame = VNode::element("div")
        .with_key("preview")
        .with_style("font-family", doc.theme.font.as_str());
    let frame = match viewport {
        Viewport::Wide => frame
            .with_class("preview preview-wide")
            .with_style("width", "100%"),
        Viewport::Narrow => frame
            .with_class("preview preview-narrow")
            .with_style("width", "375px")
            .with_style("height", "667px"),
    };

    frame
        .with_children(
            doc.sections
                .iter()
                .filter_map(|section| render_section(doc, section, viewport)),
        )
        .with_child(render_footer(doc))
}

fn render_section(doc: &Document, section: &Section, viewport: Viewport) -> Option<VNode> {
    let node = match &section.content {
        SectionContent::Hero(hero) => render_hero(&doc.theme, hero),
        SectionContent::Features(features) => render_features(&doc.theme, features, viewport),
        SectionContent::Testimonials(testimonials) => render_testimonials(testimonials, viewport),
        SectionContent::Form(form) => render_form(doc, form),
        SectionContent::Text(text) => render_text(text),
        SectionContent::About(_) | SectionContent::Cta(_) => return None,
    };
    Some(
        node.with_key(section.id.as_str())
            .with_attr("data-section", section.kind().as_str()),
    )
}

fn render_hero(theme: &Theme, hero: &HeroContent) -> VNode {
    let mut body = VNode::element("div")
        .with_class("hero-body")
        .with_child(VNode::element("h1").with_child(VNode::text(&hero.headline)))
        .with_child(VNode::element("p").with_child(VNode::text(&hero.subheadline)));
    if !hero.button_text.is_empty() {
        body = body.with_child(
            VNode::element("button")
                .with_class("hero-button")
                .with_child(VNode::text(&hero.button_text)),
        );
    }

    let mut node = VNode::element("section")
        .with_class("hero")
        .with_style("background-color", theme.primary_color.as_str())
        .with_child(VNode::element("div").with_class("hero-overlay"));
    if !hero.image_url.is_empty() {
        node = node.with_child(
            VNode::element("div").with_class("hero-image").with_child(
                VNode::element("img")
                    .with_attr("src", hero.image_url.as_str())
                    .with_attr("alt", "Hero"),
            ),
        );
    }
    node.with_child(body)
}

fn grid(columns: usize) -> VNode {
    VNode::element("div")
        .with_class(format!("grid grid-cols-{columns}"))
        .with_style("grid-template-columns", format!("repeat({columns}, 1fr)"))
}

fn render_features(theme: &Theme, features: &FeaturesContent, viewport: Viewport) -> VNode {
    let cards = features.features.iter().map(|f| {
        VNode::element("div")
            .with_class("feature-card")
            .with_key(f.id.as_str())
            .with_child(
                VNode::element("span")
                    .with_class("feature-icon")
                    .with_attr("data-icon", f.icon.as_str())
                    .with_style("color", theme.primary_color.as_str()),
            )
            .with_child(VNode::element("h3").with_child(VNode::text(&f.title)))
            .with_child(VNode::element("p").with_child(VNode::text(&f.description)))
    });

    VNode::element("section")
        .with_class("features")
        .with_child(grid(viewport.feature_columns()).with_children(cards))
}

fn avatar_for(name: &str, avatar: Option<&str>) -> String {
    match avatar {
        Some(url) if !url.is_empty() => url.to_string(),
        _ => format!("{AVATAR_FALLBACK}{}", urlencoding::encode(name)),
    }
}

fn render_testimonials(testimonials: &TestimonialsContent, viewport: Viewport) -> VNode {
    let cards = testimonials.testimonials.iter().map(|t| {
        VNode::element("div")
            .with_class("testimonial-card")
            .with_key(t.id.as_str())
            .with_child(
                VNode::element("img")
                    .with_class("avatar")
                    .with_attr("src", avatar_for(&t.name, t.avatar.as_deref()))
                    .with_attr("alt", t.name.as_str()),
            )
            .with_child(
                VNode::element("div")
                    .with_child(
                        VNode::element("p")
                            .with_class("quote")
                            .with_child(VNode::text(format!("\"{}\"", t.quote))),
                    )
                    .with_child(VNode::element("h4").with_child(VNode::text(&t.name)))
                    .with_child(
                        VNode::element("span")
                            .with_class("role")
                            .with_child(VNode::text(&t.role)),
                    ),
            )
    });

    VNode::element("section")
        .with_class("testimonials")
        .with_child(VNode::element("h2").with_child(VNode::text("מה הלקוחות אומרים")))
        .with_child(grid(viewport.testimonial_columns()).with_children(cards))
}

fn placeholder(field: &FormField) -> &'static str {
    match field {
        FormField::Name => "שם מלא",
        FormField::Phone => "טלפון",
        FormField::Email => "אימייל",
        FormField::Custom(_) => "",
    }
}

fn input_type(field: &FormField) -> &'static str {
    match field {
        FormField::Phone => "tel",
        FormField::Email => "email",
        _ => "text",
    }
}

fn render_form(doc: &Document, form: &FormContent) -> VNode {
    let config = &doc.form_config;
    let primary = doc.theme.primary_color.as_str();

    let mut card = VNode::element("div").with_class("form-card");
    if !form.headline.is_empty() {
        card = card.with_child(VNode::element("h2").with_child(VNode::text(&form.headline)));
    }
    if !form.subheadline.is_empty() {
        card = card.with_child(VNode::element("p").with_child(VNode::text(&form.subheadline)));
    }

    // Only the well-known fields render, always in name, phone, email order.
    // Custom field references are resolved elsewhere and skipped here.
    let inputs = FormField::WELL_KNOWN
        .into_iter()
        .filter(|field| config.includes(field))
        .map(|field| {
            VNode::element("input")
                .with_key(field.as_str())
                .with_attr("name", field.as_str())
                .with_attr("type", input_type(&field))
                .with_attr("placeholder", placeholder(&field))
                .with_style("--ring-color", primary)
        });

    let fields = VNode::element("form")
        .with_class("form-fields")
        .with_child(VNode::element("h3").with_child(VNode::text(&config.title)))
        .with_children(inputs)
        .with_child(
            VNode::element("button")
                .with_attr("type", "submit")
                .with_style("background-color", primary)
                .with_child(VNode::text(&config.button_text)),
        );

    VNode::element("section")
        .with_class("lead-form")
        .with_child(card.with_child(fields))
}

fn render_text(text: &TextContent) -> VNode {
    VNode::element("section")
        .with_class("text")
        .with_child(
            VNode::element("div")
                .with_class("prose")
                .with_child(VNode::raw(text.html.as_str())),
        )
}

fn render_footer(doc: &Document) -> VNode {
    let notice = match doc.created_at {
        Some(created) => format!("© {} כל הזכויות שמורות", created.year()),
        None => "© כל הזכויות שמורות".to_string(),
    };
    VNode::element("footer")
        .with_class("footer")
        .with_child(VNode::element("p").with_child(VNode::text(notice)))
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::document::sample::sample_document;
    use crate::section::content::{PlainContent, Testimonial};
    use crate::section::SectionKind;

    fn inputs(tree: &VNode) -> Vec<String> {
        tree.find_all(&|n| n.tag() == Some("input"))
            .into_iter()
            .filter_map(|n| n.attr("name").map(str::to_string))
            .collect()
    }

    fn with_fields(fields: &[&str]) -> Document {
        let (doc, _) = Document::draft().add_section(SectionKind::Form);
        let mut config = doc.form_config.clone();
        config.fields = fields.iter().map(|f| FormField::from(*f)).collect();
        doc.set_form_config(config)
    }

    #[test]
    fn sections_render_in_document_order() {
        let doc = sample_document();
        let tree = render_preview(&doc, Viewport::Wide);
        let keys: Vec<&str> = tree.children().iter().filter_map(VNode::key).collect();
        assert_eq!(keys, vec!["hero1", "feat1", "test1", "form1"]);
    }

    #[test]
    fn rendering_leaves_the_document_untouched() {
        let doc = sample_document();
        let snapshot = doc.clone();
        let _ = render_preview(&doc, Viewport::Narrow);
        assert_eq!(doc, snapshot);
    }

    #[test]
    fn form_fields_render_in_fixed_order() {
        let doc = with_fields(&["email", "name", "phone"]);
        let tree = render_preview(&doc, Viewport::Wide);
        assert_eq!(inputs(&tree), vec!["name", "phone", "email"]);
    }

    #[test]
    fn unselected_and_custom_fields_never_render() {
        let doc = with_fields(&["budget", "email"]);
        let tree = render_preview(&doc, Viewport::Wide);
        assert_eq!(inputs(&tree), vec!["email"]);
    }

    #[test]
    fn form_heading_and_button_come_from_form_config() {
        let doc = with_fields(&["name"]);
        let tree = render_preview(&doc, Viewport::Wide);
        let form = tree
            .find_all(&|n| n.tag() == Some("form"))
            .into_iter()
            .next()
            .unwrap();
        let text = form.text_content();
        assert!(text.contains(&doc.form_config.title));
        assert!(text.contains(&doc.form_config.button_text));
    }

    #[test]
    fn hero_uses_theme_colour() {
        let doc = Document::draft().set_primary_color("#16a34a");
        let tree = render_preview(&doc, Viewport::Wide);
        let hero = &tree.children()[0];
        assert_eq!(hero.style("background-color"), Some("#16a34a"));
        assert_eq!(
            tree.find_all(&|n| n.tag() == Some("img")).len(),
            1,
            "hero image rendered"
        );
    }

    #[test]
    fn avatar_falls_back_to_name_placeholder() {
        let (doc, id) = Document::draft().add_section(SectionKind::Testimonials);
        let mut doc = doc;
        let idx = doc.section_index(&id).unwrap();
        doc.sections[idx].content = SectionContent::Testimonials(TestimonialsContent {
            testimonials: vec![Testimonial {
                id: "t1".into(),
                name: "Noa Levi".into(),
                role: String::new(),
                quote: "Great".into(),
                avatar: None,
            }],
        });

        let tree = render_preview(&doc, Viewport::Wide);
        let avatar = tree
            .find_all(&|n| n.attr("class") == Some("avatar"))
            .into_iter()
            .next()
            .unwrap();
        assert_eq!(
            avatar.attr("src"),
            Some("https://api.dicebear.com/7.x/initials/svg?seed=Noa%20Levi")
        );
    }

    #[test]
    fn unsupported_kinds_render_nothing() {
        let mut doc = Document::draft();
        doc.sections
            .push(Section::new(SectionContent::About(PlainContent::default())));
        doc.sections
            .push(Section::new(SectionContent::Cta(PlainContent::default())));
        let tree = render_preview(&doc, Viewport::Wide);
        // hero + footer
        assert_eq!(tree.children().len(), 2);
    }

    #[test]
    fn narrow_viewport_collapses_grids() {
        let doc = sample_document();
        let wide = render_preview(&doc, Viewport::Wide);
        let narrow = render_preview(&doc, Viewport::Narrow);
        assert_eq!(narrow.style("width"), Some("375px"));
        assert_eq!(
            wide.find_all(&|n| n.attr("class") == Some("grid grid-cols-3")).len(),
            1
        );
        assert_eq!(
            narrow.find_all(&|n| n.attr("class") == Some("grid grid-cols-1")).len(),
            2
        );
    }

    #[test]
    fn text_sections_are_emitted_verbatim() {
        let (doc, _) = Document::draft().add_section(SectionKind::Text);
        let tree = render_preview(&doc, Viewport::Wide);
        let raw = tree.find_all(&|n| matches!(n, VNode::Raw { .. }));
        assert_eq!(raw.len(), 1);
        assert!(raw[0].text_content().starts_with("<h2>"));
    }

    #[test]
    fn footer_year_follows_creation_date() {
        let mut doc = Document::draft();
        doc.created_at = Some(Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap());
        let tree = render_preview(&doc, Viewport::Wide);
        let footer = tree.children().last().unwrap();
        assert!(footer.text_content().contains("2024"));
    }
}
