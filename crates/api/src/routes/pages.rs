use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Json, Router,
};
use landing_builder_core::document::{validate_document, validate_new_document};
use landing_builder_core::mutation::DocumentPatch;
use landing_builder_core::preview::{render_page_html, Viewport};
use landing_builder_core::{Builder, BuilderError, Document, DocumentId, NewDocument, SectionId};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/pages", get(list_pages).post(create_page))
        .route(
            "/v1/pages/{id}",
            get(get_page).patch(update_page).delete(delete_page),
        )
        .route("/v1/pages/{id}/preview", get(preview_page))
        .route("/v1/pages/{id}/generate", post(generate_page))
        .route(
            "/v1/pages/{id}/sections/{section_id}/image",
            post(generate_image),
        )
}

/// Dashboard row for one page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PageSummary {
    id: DocumentId,
    name: String,
    published: bool,
    section_count: usize,
    cover_image: Option<String>,
    created_at: Option<String>,
}

impl From<&Document> for PageSummary {
    fn from(doc: &Document) -> Self {
        Self {
            id: doc.id.clone(),
            name: doc.name.clone(),
            published: doc.published,
            section_count: doc.sections.len(),
            cover_image: doc.cover_image().map(str::to_string),
            created_at: doc.created_at.map(|t| t.to_rfc3339()),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct PreviewQuery {
    #[serde(default)]
    viewport: Viewport,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    business_description: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageResponse {
    image_url: String,
    page: Document,
}

fn not_found(id: &DocumentId) -> ApiError {
    ApiError::NotFound(format!("page `{id}` not found"))
}

async fn load(state: &AppState, id: &DocumentId) -> ApiResult<Document> {
    state
        .store()
        .read()
        .await
        .get(id)
        .cloned()
        .ok_or_else(|| not_found(id))
}

async fn list_pages(State(state): State<AppState>) -> Json<Vec<PageSummary>> {
    let store = state.store().read().await;
    Json(store.list().iter().map(PageSummary::from).collect())
}

async fn create_page(
    State(state): State<AppState>,
    Json(page): Json<NewDocument>,
) -> ApiResult<(StatusCode, Json<Document>)> {
    validate_new_document(&page)?;
    let created = state.store().write().await.create(page);
    Ok((StatusCode::CREATED, Json(created)))
}

async fn get_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Document>> {
    Ok(Json(load(&state, &DocumentId::from(id)).await?))
}

async fn update_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<DocumentPatch>,
) -> ApiResult<Json<Document>> {
    let id = DocumentId::from(id);
    let mut store = state.store().write().await;
    let mut candidate = store.get(&id).cloned().ok_or_else(|| not_found(&id))?;
    if patch.is_empty() {
        return Ok(Json(candidate));
    }

    patch.clone().apply(&mut candidate);
    validate_document(&candidate)?;
    store.update(&id, patch);
    Ok(Json(candidate))
}

async fn delete_page(State(state): State<AppState>, Path(id): Path<String>) -> StatusCode {
    state.store().write().await.delete(&DocumentId::from(id));
    StatusCode::NO_CONTENT
}

async fn preview_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<PreviewQuery>,
) -> ApiResult<Html<String>> {
    let doc = load(&state, &DocumentId::from(id)).await?;
    Ok(Html(render_page_html(&doc, query.viewport)))
}

/// Regenerate the page's theme and sections from a business description.
///
/// The service call runs without holding the store; the response is merged
/// into the page as stored when the call returns, so edits made meanwhile keep
/// their theme fields.
async fn generate_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<GenerateRequest>,
) -> ApiResult<Json<Document>> {
    let id = DocumentId::from(id);
    let _claim = state
        .claim(format!("page:{id}"))
        .ok_or_else(|| ApiError::Conflict(format!("page `{id}` is already being generated")))?;

    let mut snapshot = Builder::from_document(load(&state, &id).await?);
    let pending = snapshot.begin_page_generation(&request.business_description)?;
    let response = state
        .generator()
        .generate_page(pending.business_description())
        .await;

    let mut store = state.store().write().await;
    let current = store.get(&id).cloned().ok_or_else(|| not_found(&id))?;
    let mut builder = Builder::from_document(current);
    builder.complete_page_generation(pending, response)?;
    let generated = builder.into_document();
    info!(document_id = %id, sections = generated.sections.len(), "generated page stored");

    store.update(
        &id,
        DocumentPatch {
            description: Some(generated.description),
            theme: Some(generated.theme),
            sections: Some(generated.sections),
            ..Default::default()
        },
    );
    store.get(&id).cloned().map(Json).ok_or_else(|| not_found(&id))
}

/// Generate a background image for one hero section. Only that section's
/// `imageUrl` is written, against the page as stored when the call returns.
async fn generate_image(
    State(state): State<AppState>,
    Path((id, section_id)): Path<(String, String)>,
) -> ApiResult<Json<ImageResponse>> {
    let id = DocumentId::from(id);
    let section_id = SectionId::from(section_id);
    let _claim = state
        .claim(format!("image:{id}:{section_id}"))
        .ok_or_else(|| {
            ApiError::Conflict(format!("section `{section_id}` is already generating an image"))
        })?;

    let mut snapshot = Builder::from_document(load(&state, &id).await?);
    let pending = snapshot.begin_image_generation(&section_id)?;
    let response = state
        .generator()
        .describe_image(pending.headline(), pending.subheadline())
        .await;

    let mut store = state.store().write().await;
    let current = store.get(&id).cloned().ok_or_else(|| not_found(&id))?;
    if current.section(&section_id).is_none() {
        return Err(BuilderError::SectionNotFound(section_id).into());
    }
    let mut builder = Builder::from_document(current);
    let image_url =
        builder.complete_image_generation(pending, state.generator().image_endpoint(), response)?;

    store.update(
        &id,
        DocumentPatch {
            sections: Some(builder.into_document().sections),
            ..Default::default()
        },
    );
    let page = store.get(&id).cloned().ok_or_else(|| not_found(&id))?;
    Ok(Json(ImageResponse { image_url, page }))
}
