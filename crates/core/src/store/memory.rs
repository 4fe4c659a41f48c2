//! In-memory collection of landing pages.
//!
//! Operations against an unknown id are silent no-ops; nothing here reports
//! a missing page as an error.

use chrono::Utc;
use tracing::{debug, info};

use crate::document::id::DocumentId;
use crate::document::model::{Document, NewDocument};
use crate::document::sample::sample_document;
use crate::events::bus::EventBus;
use crate::events::types::{PageEvent, StoreEvent};
use crate::mutation::types::DocumentPatch;

#[derive(Debug, Default)]
pub struct DocumentStore {
    /// Most recently created first.
    documents: Vec<Document>,
    events: Option<EventBus>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish every mutation on `bus`.
    pub fn with_events(mut self, bus: EventBus) -> Self {
        self.events = Some(bus);
        self
    }

    /// Seed the demonstration page.
    pub fn with_sample(mut self) -> Self {
        self.documents.push(sample_document());
        self
    }

    /// Insert `doc` at the head with a fresh id and the current time.
    pub fn create(&mut self, doc: NewDocument) -> Document {
        let doc = doc.into_document(DocumentId::generate(), Utc::now());
        info!(document_id = %doc.id, name = %doc.name, "page created");

        self.documents.insert(0, doc.clone());
        self.emit(StoreEvent::Created(page_event(&doc, Vec::new())));
        doc
    }

    /// Shallow-merge `patch` into the page with `id`, if there is one.
    pub fn update(&mut self, id: &DocumentId, patch: DocumentPatch) {
        let Some(doc) = self.documents.iter_mut().find(|d| &d.id == id) else {
            debug!(document_id = %id, "update of unknown page ignored");
            return;
        };

        let fields: Vec<String> = patch
            .touched_fields()
            .into_iter()
            .map(str::to_string)
            .collect();
        patch.apply(doc);
        info!(document_id = %id, ?fields, "page updated");

        let event = StoreEvent::Updated(page_event(doc, fields));
        self.emit(event);
    }

    /// Remove the page with `id`, if there is one.
    pub fn delete(&mut self, id: &DocumentId) {
        let Some(index) = self.documents.iter().position(|d| &d.id == id) else {
            debug!(document_id = %id, "delete of unknown page ignored");
            return;
        };

        let doc = self.documents.remove(index);
        info!(document_id = %id, "page deleted");
        self.emit(StoreEvent::Deleted(page_event(&doc, Vec::new())));
    }

    pub fn get(&self, id: &DocumentId) -> Option<&Document> {
        self.documents.iter().find(|d| &d.id == id)
    }

    /// All pages, most recently created first.
    pub fn list(&self) -> &[Document] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    fn emit(&self, event: StoreEvent) {
        if let Some(bus) = &self.events {
            bus.emit(event);
        }
    }
}

fn page_event(doc: &Document, fields: Vec<String>) -> PageEvent {
    PageEvent {
        document_id: doc.id.to_string(),
        name: doc.name.clone(),
        fields,
        timestamp: Utc::now(),
    }
}
