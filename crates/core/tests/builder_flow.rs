use async_trait::async_trait;
use serde_json::json;

use landing_builder_core::builder::{Builder, EditorTab, SidebarView};
use landing_builder_core::document::validate_document;
use landing_builder_core::generate::{ContentGenerator, GenerateError};
use landing_builder_core::preview::{Viewport, VNode};
use landing_builder_core::section::{SectionContent, SectionKind};
use landing_builder_core::DocumentStore;

struct FixedPage(&'static str);

#[async_trait]
impl ContentGenerator for FixedPage {
    async fn generate_page(&self, _: &str) -> Result<String, GenerateError> {
        Ok(self.0.to_string())
    }

    async fn describe_image(&self, _: &str, _: &str) -> Result<String, GenerateError> {
        Ok("bright studio with plants".to_string())
    }

    fn image_endpoint(&self) -> &str {
        "https://image.pollinations.ai"
    }
}

fn section_keys(tree: &VNode) -> Vec<String> {
    tree.find_all(&|n| n.attr("data-section").is_some())
        .into_iter()
        .filter_map(|n| n.key().map(str::to_string))
        .collect()
}

#[test]
fn edit_save_and_list() {
    let mut store = DocumentStore::new();
    let mut builder = Builder::new_draft();

    let features = builder.add_section(SectionKind::Features);
    let SectionContent::Features(current) = &builder.document().section(&features).unwrap().content
    else {
        panic!("expected features");
    };
    let item_id = current.features[0].id.clone();

    let patch = json!({
        "features": [{ "id": item_id, "title": "Fast", "description": "", "icon": "zap" }]
    });
    builder
        .update_section_content(&features, patch.as_object().unwrap())
        .unwrap();

    let outcome = builder.save(&mut store);
    assert!(outcome.created);

    let pages = store.list();
    assert_eq!(pages.len(), 1);
    let SectionContent::Features(saved) = &pages[0].sections[1].content else {
        panic!("expected features");
    };
    assert_eq!(saved.features.len(), 1);
    assert_eq!(saved.features[0].title, "Fast");
    assert!(validate_document(&pages[0]).is_ok());
}

#[test]
fn preview_and_sidebar_follow_section_order() {
    let mut builder = Builder::new_draft();
    builder.add_section(SectionKind::Testimonials);
    builder.add_section(SectionKind::Form);

    let order: Vec<String> = builder
        .document()
        .sections
        .iter()
        .map(|s| s.id.to_string())
        .collect();
    assert_eq!(section_keys(&builder.preview()), order);

    builder.set_viewport(Viewport::Narrow);
    assert_eq!(section_keys(&builder.preview()), order);

    let SidebarView::Content { sections, .. } = builder.sidebar() else {
        panic!("expected content tab");
    };
    let listed: Vec<String> = sections.iter().map(|e| e.id.to_string()).collect();
    assert_eq!(listed, order);

    builder.select_tab(EditorTab::Design);
    assert_eq!(builder.sidebar().tab(), EditorTab::Design);
}

#[tokio::test]
async fn generated_page_is_saved_with_fresh_ids() {
    let generator = FixedPage(
        r##"{
            "theme": { "primaryColor": "#16a34a", "font": "Heebo" },
            "sections": [
                { "type": "hero", "content": { "headline": "Bakery", "subheadline": "Fresh bread" } },
                { "type": "features", "content": { "features": [{ "title": "Sourdough" }] } },
                { "type": "form", "content": { "headline": "Order now" } }
            ]
        }"##,
    );

    let mut store = DocumentStore::new();
    let mut builder = Builder::new_draft();
    builder.generate_page(&generator, "a bakery").await.unwrap();

    let hero = builder.document().sections[0].id.clone();
    let url = builder.generate_hero_image(&generator, &hero).await.unwrap();
    assert!(url.starts_with("https://image.pollinations.ai/prompt/"));

    let outcome = builder.save(&mut store);
    let saved = store.get(&outcome.id).unwrap();
    assert_eq!(saved.theme.font, "Heebo");
    assert_eq!(saved.description.as_deref(), Some("a bakery"));
    assert_eq!(saved.cover_image(), Some(url.as_str()));
    assert!(validate_document(saved).is_ok());
}
