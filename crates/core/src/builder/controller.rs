//! Editing session for one landing page.
//!
//! The session owns the working copy of the page plus view state (active
//! tab, preview viewport, expanded section) and the in-flight markers of the
//! two generation paths. Generation is split into `begin_*` and `complete_*`
//! steps so a caller can run the service call however it likes; the `async`
//! helpers chain both steps around a [`ContentGenerator`].

use std::collections::HashSet;

use serde_json::json;
use tracing::{debug, info, warn};

use super::error::BuilderError;
use super::sidebar::{self, EditorTab, SidebarEntry, SidebarView};
use crate::document::edit::Direction;
use crate::document::id::{DocumentId, ItemId, SectionId};
use crate::document::model::{Document, FormConfig, NewDocument, ThankYouPage, Theme};
use crate::generate::{image_url_for, ContentGenerator, GenerateError};
use crate::merge::merge_response;
use crate::mutation::types::DocumentPatch;
use crate::preview::{render_page_html, render_preview, VNode, Viewport};
use crate::section::content::{ContentPatch, SectionContent};
use crate::section::kind::SectionKind;
use crate::store::DocumentStore;

/// Outstanding whole-page generation. Obtained from
/// [`Builder::begin_page_generation`] and consumed by
/// [`Builder::complete_page_generation`].
#[derive(Debug)]
#[must_use = "a started generation must be completed to release its in-flight marker"]
pub struct PageGeneration {
    business_description: String,
}

impl PageGeneration {
    pub fn business_description(&self) -> &str {
        &self.business_description
    }
}

/// Outstanding hero-image generation for one section.
#[derive(Debug)]
#[must_use = "a started generation must be completed to release its in-flight marker"]
pub struct ImageGeneration {
    section_id: SectionId,
    headline: String,
    subheadline: String,
}

impl ImageGeneration {
    pub fn section_id(&self) -> &SectionId {
        &self.section_id
    }

    pub fn headline(&self) -> &str {
        &self.headline
    }

    pub fn subheadline(&self) -> &str {
        &self.subheadline
    }
}

/// Result of [`Builder::save`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    pub id: DocumentId,
    /// `true` when the save inserted a new page.
    pub created: bool,
}

#[derive(Debug, Clone)]
pub struct Builder {
    document: Document,
    tab: EditorTab,
    viewport: Viewport,
    expanded: Option<SectionId>,
    generating_page: bool,
    generating_images: HashSet<SectionId>,
}

impl Builder {
    /// Start a session on a fresh draft, with its hero section expanded.
    pub fn new_draft() -> Self {
        Self::from_document(Document::draft())
    }

    /// Start a session on an existing page value.
    pub fn from_document(document: Document) -> Self {
        let expanded = document.sections.first().map(|s| s.id.clone());
        Self {
            document,
            tab: EditorTab::default(),
            viewport: Viewport::default(),
            expanded,
            generating_page: false,
            generating_images: HashSet::new(),
        }
    }

    /// Load a stored page for editing.
    pub fn open(store: &DocumentStore, id: &DocumentId) -> Option<Self> {
        store.get(id).cloned().map(Self::from_document)
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }

    // -----------------------------------------------------------------------
    // View state
    // -----------------------------------------------------------------------

    pub fn tab(&self) -> EditorTab {
        self.tab
    }

    pub fn select_tab(&mut self, tab: EditorTab) {
        self.tab = tab;
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn expanded(&self) -> Option<&SectionId> {
        self.expanded.as_ref()
    }

    /// Expand `id`, collapsing whatever was expanded; toggling the expanded
    /// section collapses it.
    pub fn toggle_section(&mut self, id: &SectionId) {
        if self.expanded.as_ref() == Some(id) {
            self.expanded = None;
        } else if self.document.section(id).is_some() {
            self.expanded = Some(id.clone());
        }
    }

    pub fn is_generating_page(&self) -> bool {
        self.generating_page
    }

    pub fn is_generating_image(&self, id: &SectionId) -> bool {
        self.generating_images.contains(id)
    }

    // -----------------------------------------------------------------------
    // Edits
    // -----------------------------------------------------------------------

    /// Append a section of `kind` and expand it.
    pub fn add_section(&mut self, kind: SectionKind) -> SectionId {
        let (next, id) = self.document.add_section(kind);
        self.document = next;
        self.expanded = Some(id.clone());
        id
    }

    pub fn remove_section(&mut self, id: &SectionId) {
        self.document = self.document.remove_section(id);
        if self.expanded.as_ref() == Some(id) {
            self.expanded = None;
        }
    }

    pub fn move_section(&mut self, index: usize, direction: Direction) {
        self.document = self.document.move_section(index, direction);
    }

    pub fn update_section_content(
        &mut self,
        id: &SectionId,
        patch: &ContentPatch,
    ) -> Result<(), BuilderError> {
        self.document = self
            .document
            .update_section_content(id, patch)
            .inspect_err(|e| warn!(section_id = %id, error = %e, "patch rejected"))?;
        Ok(())
    }

    pub fn add_list_item(&mut self, id: &SectionId) {
        self.document = self.document.add_list_item(id);
    }

    pub fn remove_list_item(&mut self, id: &SectionId, item: &ItemId) {
        self.document = self.document.remove_list_item(id, item);
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.document = self.document.set_theme(theme);
    }

    pub fn set_primary_color(&mut self, color: impl Into<String>) {
        self.document = self.document.set_primary_color(color);
    }

    pub fn set_font(&mut self, font: impl Into<String>) {
        self.document = self.document.set_font(font);
    }

    pub fn set_form_config(&mut self, form_config: FormConfig) {
        self.document = self.document.set_form_config(form_config);
    }

    pub fn set_thank_you_page(&mut self, thank_you_page: ThankYouPage) {
        self.document = self.document.set_thank_you_page(thank_you_page);
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.document = self.document.set_name(name);
    }

    /// Set or clear the business description used as generation context.
    pub fn set_description(&mut self, description: Option<String>) {
        self.document = self.document.set_description(description);
    }

    pub fn set_published(&mut self, published: bool) {
        self.document = self.document.set_published(published);
    }

    // -----------------------------------------------------------------------
    // Page generation
    // -----------------------------------------------------------------------

    /// Mark a page generation as in flight.
    pub fn begin_page_generation(
        &mut self,
        business_description: &str,
    ) -> Result<PageGeneration, BuilderError> {
        let business_description = business_description.trim();
        if business_description.is_empty() {
            return Err(BuilderError::EmptyDescription);
        }
        if self.generating_page {
            return Err(BuilderError::PageGenerationInFlight);
        }

        self.generating_page = true;
        debug!(document_id = %self.document.id, "page generation started");
        Ok(PageGeneration {
            business_description: business_description.to_string(),
        })
    }

    /// Apply the service response of `request`. On any failure the page is
    /// left exactly as it was.
    pub fn complete_page_generation(
        &mut self,
        request: PageGeneration,
        response: Result<String, GenerateError>,
    ) -> Result<(), BuilderError> {
        self.generating_page = false;

        let raw = response.inspect_err(|e| {
            warn!(document_id = %self.document.id, error = %e, "page generation failed");
        })?;
        let mut merged = merge_response(&self.document, &raw)?;
        merged.description = Some(request.business_description);

        self.expanded = merged.sections.first().map(|s| s.id.clone());
        self.document = merged;
        info!(document_id = %self.document.id, "page generation applied");
        Ok(())
    }

    /// Generate the whole page from a business description.
    pub async fn generate_page(
        &mut self,
        generator: &dyn ContentGenerator,
        business_description: &str,
    ) -> Result<(), BuilderError> {
        let request = self.begin_page_generation(business_description)?;
        let response = generator
            .generate_page(request.business_description())
            .await;
        self.complete_page_generation(request, response)
    }

    // -----------------------------------------------------------------------
    // Hero image generation
    // -----------------------------------------------------------------------

    /// Mark an image generation for section `id` as in flight. Different
    /// sections may generate concurrently; the same section may not.
    pub fn begin_image_generation(
        &mut self,
        id: &SectionId,
    ) -> Result<ImageGeneration, BuilderError> {
        let section = self
            .document
            .section(id)
            .ok_or_else(|| BuilderError::SectionNotFound(id.clone()))?;
        let SectionContent::Hero(hero) = &section.content else {
            return Err(BuilderError::NoImageSlot(id.clone()));
        };
        let request = ImageGeneration {
            section_id: id.clone(),
            headline: hero.headline.clone(),
            subheadline: hero.subheadline.clone(),
        };

        if !self.generating_images.insert(id.clone()) {
            return Err(BuilderError::ImageGenerationInFlight(id.clone()));
        }
        debug!(section_id = %id, "image generation started");
        Ok(request)
    }

    /// Turn the service's description into an image URL and store it on the
    /// requesting section only. Returns the new URL.
    pub fn complete_image_generation(
        &mut self,
        request: ImageGeneration,
        image_endpoint: &str,
        response: Result<String, GenerateError>,
    ) -> Result<String, BuilderError> {
        self.generating_images.remove(&request.section_id);

        let description = response.inspect_err(|e| {
            warn!(section_id = %request.section_id, error = %e, "image generation failed");
        })?;
        let url = image_url_for(image_endpoint, &description)?;

        let patch = json!({ "imageUrl": url });
        if let Some(patch) = patch.as_object() {
            self.document = self
                .document
                .update_section_content(&request.section_id, patch)?;
        }
        info!(section_id = %request.section_id, %url, "hero image applied");
        Ok(url)
    }

    /// Generate a background image for hero section `id`.
    pub async fn generate_hero_image(
        &mut self,
        generator: &dyn ContentGenerator,
        id: &SectionId,
    ) -> Result<String, BuilderError> {
        let request = self.begin_image_generation(id)?;
        let response = generator
            .describe_image(request.headline(), request.subheadline())
            .await;
        self.complete_image_generation(request, generator.image_endpoint(), response)
    }

    // -----------------------------------------------------------------------
    // Persistence & projections
    // -----------------------------------------------------------------------

    /// Insert the page if it is a draft, otherwise overwrite the stored page.
    pub fn save(&mut self, store: &mut DocumentStore) -> SaveOutcome {
        if self.document.is_draft() {
            let created = store.create(NewDocument::from(self.document.clone()));
            let id = created.id.clone();
            self.document = created;
            SaveOutcome { id, created: true }
        } else {
            let id = self.document.id.clone();
            store.update(&id, DocumentPatch::full(&self.document));
            SaveOutcome { id, created: false }
        }
    }

    pub fn preview(&self) -> VNode {
        render_preview(&self.document, self.viewport)
    }

    pub fn preview_html(&self) -> String {
        render_page_html(&self.document, self.viewport)
    }

    pub fn sidebar(&self) -> SidebarView {
        match self.tab {
            EditorTab::Content => {
                let last = self.document.sections.len().saturating_sub(1);
                let sections = self
                    .document
                    .sections
                    .iter()
                    .enumerate()
                    .map(|(index, section)| SidebarEntry {
                        id: section.id.clone(),
                        kind: section.kind(),
                        label: section.kind().label(),
                        expanded: self.expanded.as_ref() == Some(&section.id),
                        can_move_up: index > 0,
                        can_move_down: index < last,
                        generating_image: self.generating_images.contains(&section.id),
                    })
                    .collect();
                SidebarView::Content {
                    sections,
                    palette: sidebar::palette(),
                    generating_page: self.generating_page,
                }
            }
            EditorTab::Design => sidebar::design_view(&self.document.theme),
            EditorTab::Settings => SidebarView::Settings {
                name: self.document.name.clone(),
                form_config: self.document.form_config.clone(),
                thank_you_page: self.document.thank_you_page.clone(),
            },
        }
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new_draft()
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::document::sample::sample_document;

    const PAGE: &str = r##"{
        "theme": { "primaryColor": "#2563eb" },
        "sections": [
            { "type": "hero", "content": { "headline": "Calm", "subheadline": "Yoga", "buttonText": "Join" } },
            { "type": "features", "content": { "features": [{ "title": "A" }, { "title": "B" }] } },
            { "type": "testimonials", "content": { "testimonials": [{ "name": "Noa", "quote": "Great" }] } }
        ]
    }"##;

    struct Canned {
        page: Result<String, ()>,
        image: Result<String, ()>,
    }

    #[async_trait]
    impl ContentGenerator for Canned {
        async fn generate_page(&self, _: &str) -> Result<String, GenerateError> {
            self.page
                .clone()
                .map_err(|_| GenerateError::Network("connection refused".into()))
        }

        async fn describe_image(&self, _: &str, _: &str) -> Result<String, GenerateError> {
            self.image.clone().map_err(|_| GenerateError::EmptyResponse)
        }

        fn image_endpoint(&self) -> &str {
            "https://image.example"
        }
    }

    fn canned(page: &str) -> Canned {
        Canned {
            page: Ok(page.to_string()),
            image: Ok("misty sunrise".into()),
        }
    }

    fn hero_id(builder: &Builder) -> SectionId {
        builder.document().sections[0].id.clone()
    }

    #[test]
    fn new_draft_expands_its_hero() {
        let builder = Builder::new_draft();
        assert_eq!(builder.expanded(), Some(&hero_id(&builder)));
        assert_eq!(builder.tab(), EditorTab::Content);
        assert_eq!(builder.viewport(), Viewport::Wide);
    }

    #[test]
    fn at_most_one_section_is_expanded() {
        let mut builder = Builder::new_draft();
        let hero = hero_id(&builder);
        let added = builder.add_section(SectionKind::Text);
        assert_eq!(builder.expanded(), Some(&added));

        builder.toggle_section(&hero);
        assert_eq!(builder.expanded(), Some(&hero));
        builder.toggle_section(&hero);
        assert_eq!(builder.expanded(), None);

        builder.toggle_section(&SectionId::from("missing"));
        assert_eq!(builder.expanded(), None);
    }

    #[test]
    fn removing_the_expanded_section_collapses_it() {
        let mut builder = Builder::new_draft();
        let added = builder.add_section(SectionKind::Form);
        builder.remove_section(&added);
        assert_eq!(builder.expanded(), None);
        assert_eq!(builder.document().sections.len(), 1);
    }

    #[test]
    fn view_state_does_not_touch_the_page() {
        let mut builder = Builder::new_draft();
        let before = builder.document().clone();
        builder.select_tab(EditorTab::Settings);
        builder.set_viewport(Viewport::Narrow);
        assert_eq!(builder.document(), &before);
        assert!(matches!(builder.sidebar(), SidebarView::Settings { .. }));
        assert!(builder.preview_html().contains("preview-narrow"));
    }

    #[test]
    fn sidebar_mirrors_section_order() {
        let mut builder = Builder::new_draft();
        builder.add_section(SectionKind::Features);
        builder.move_section(1, Direction::Up);

        let SidebarView::Content { sections, .. } = builder.sidebar() else {
            panic!("expected content tab");
        };
        assert_eq!(sections[0].kind, SectionKind::Features);
        assert!(!sections[0].can_move_up);
        assert!(sections[0].can_move_down);
        assert!(sections[0].expanded);
        assert!(!sections[1].can_move_down);
    }

    #[tokio::test]
    async fn generation_replaces_sections_and_merges_theme() {
        let mut builder = Builder::new_draft();
        builder.set_font("Assistant");
        let old_hero = hero_id(&builder);

        builder
            .generate_page(&canned(PAGE), "yoga studio")
            .await
            .unwrap();

        let doc = builder.document();
        assert_eq!(doc.sections.len(), 3);
        assert!(doc.section(&old_hero).is_none());
        assert_eq!(doc.theme.primary_color, "#2563eb");
        assert_eq!(doc.theme.font, "Assistant");
        assert_eq!(doc.description.as_deref(), Some("yoga studio"));
        assert!(!builder.is_generating_page());
    }

    #[tokio::test]
    async fn failed_generation_leaves_the_page_untouched() {
        for generator in [
            canned(""),
            canned("{ not json"),
            canned(r#"{"sections": []}"#),
            Canned {
                page: Err(()),
                image: Err(()),
            },
        ] {
            let mut builder = Builder::new_draft();
            let before = builder.document().clone();

            let result = builder.generate_page(&generator, "yoga").await;
            assert!(result.is_err());
            assert_eq!(builder.document(), &before);
            assert!(!builder.is_generating_page());
        }
    }

    #[test]
    fn only_one_page_generation_at_a_time() {
        let mut builder = Builder::new_draft();
        let first = builder.begin_page_generation("yoga").unwrap();
        assert!(matches!(
            builder.begin_page_generation("yoga"),
            Err(BuilderError::PageGenerationInFlight)
        ));
        assert!(builder.is_generating_page());

        builder
            .complete_page_generation(first, Err(GenerateError::EmptyResponse))
            .unwrap_err();
        assert!(builder.begin_page_generation("yoga").is_ok());
    }

    #[test]
    fn blank_description_is_rejected() {
        let mut builder = Builder::new_draft();
        assert!(matches!(
            builder.begin_page_generation("   "),
            Err(BuilderError::EmptyDescription)
        ));
        assert!(!builder.is_generating_page());
    }

    #[test]
    fn image_generation_is_keyed_by_section() {
        let mut builder = Builder::from_document(sample_document());
        let mut second_hero = crate::document::model::Document::draft().sections[0].clone();
        second_hero.id = SectionId::from("hero2");
        let mut doc = builder.document().clone();
        doc.sections.push(second_hero);
        builder = Builder::from_document(doc);

        let hero1 = SectionId::from("hero1");
        let hero2 = SectionId::from("hero2");
        let first = builder.begin_image_generation(&hero1).unwrap();
        let _second = builder.begin_image_generation(&hero2).unwrap();
        assert!(matches!(
            builder.begin_image_generation(&hero1),
            Err(BuilderError::ImageGenerationInFlight(_))
        ));

        let url = builder
            .complete_image_generation(first, "https://image.example", Ok("calm sea".into()))
            .unwrap();
        assert_eq!(url, "https://image.example/prompt/calm%20sea");
        assert!(!builder.is_generating_image(&hero1));
        assert!(builder.is_generating_image(&hero2));
    }

    #[tokio::test]
    async fn image_generation_touches_only_its_section() {
        let mut builder = Builder::from_document(sample_document());
        let before = builder.document().clone();
        let hero = SectionId::from("hero1");

        let url = builder
            .generate_hero_image(&canned(PAGE), &hero)
            .await
            .unwrap();

        let after = builder.document();
        let SectionContent::Hero(h) = &after.sections[0].content else {
            panic!("expected hero");
        };
        assert_eq!(h.image_url, url);
        assert_eq!(after.sections[1..], before.sections[1..]);
        assert_eq!(after.theme, before.theme);
    }

    #[test]
    fn image_generation_requires_a_hero() {
        let mut builder = Builder::from_document(sample_document());
        assert!(matches!(
            builder.begin_image_generation(&SectionId::from("feat1")),
            Err(BuilderError::NoImageSlot(_))
        ));
        assert!(matches!(
            builder.begin_image_generation(&SectionId::from("nope")),
            Err(BuilderError::SectionNotFound(_))
        ));
    }

    #[test]
    fn save_creates_then_updates() {
        let mut store = DocumentStore::new();
        let mut builder = Builder::new_draft();

        let first = builder.save(&mut store);
        assert!(first.created);
        assert_eq!(store.len(), 1);
        assert!(!builder.document().is_draft());

        builder.set_name("Renamed");
        let second = builder.save(&mut store);
        assert!(!second.created);
        assert_eq!(second.id, first.id);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&first.id).unwrap().name, "Renamed");
    }

    #[test]
    fn save_writes_a_cleared_description() {
        let mut store = DocumentStore::new().with_sample();
        let mut builder = Builder::open(&store, &DocumentId::from("lp1")).unwrap();
        builder.set_description(None);

        let outcome = builder.save(&mut store);
        assert!(!outcome.created);
        assert_eq!(store.get(&outcome.id), Some(builder.document()));
    }

    #[test]
    fn open_loads_an_existing_page() {
        let store = DocumentStore::new().with_sample();
        let builder = Builder::open(&store, &DocumentId::from("lp1")).unwrap();
        assert_eq!(builder.document().sections.len(), 4);
        assert!(Builder::open(&store, &DocumentId::from("nope")).is_none());
    }
}
