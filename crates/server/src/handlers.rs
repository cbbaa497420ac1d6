//! REST handlers for `/api/homepage-sections`

use axum::{
    Json,
    extract::{
        Multipart, Path, Query, State,
        multipart::MultipartRejection,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use homestretch_core::{HomepageId, MAIN_HOMEPAGE, SectionId};
use homestretch_sections::{CreateSection, ImageSlot, ReorderEntry, Section, UpdateSection};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::AppError;
use crate::state::AppState;
use crate::uploads::{read_image, store_image};

/// Optional homepage filter accepted by the list endpoints
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomepageQuery {
    pub homepage_id: Option<HomepageId>,
}

// ============================================================================
// Reads
// ============================================================================

/// `GET /homepage-sections`
pub async fn list_sections(
    State(state): State<AppState>,
    query: Result<Query<HomepageQuery>, QueryRejection>,
) -> Result<Json<Vec<Section>>, AppError> {
    let Query(query) = query?;
    Ok(Json(state.store.list(query.homepage_id).await))
}

/// `GET /homepage-sections/types/{type}`
pub async fn list_sections_by_type(
    State(state): State<AppState>,
    section_type: Result<Path<String>, PathRejection>,
    query: Result<Query<HomepageQuery>, QueryRejection>,
) -> Result<Json<Vec<Section>>, AppError> {
    let Path(section_type) = section_type?;
    let Query(query) = query?;
    Ok(Json(state.store.list_by_type(&section_type, query.homepage_id).await))
}

/// `GET /homepage-sections/hero`
pub async fn get_hero(
    State(state): State<AppState>,
    query: Result<Query<HomepageQuery>, QueryRejection>,
) -> Result<Json<Section>, AppError> {
    let Query(query) = query?;
    let homepage_id = query.homepage_id.unwrap_or(MAIN_HOMEPAGE);
    Ok(Json(state.store.hero(homepage_id).await?))
}

/// `GET /homepage-sections/{id}`
pub async fn get_section(
    State(state): State<AppState>,
    id: Result<Path<SectionId>, PathRejection>,
) -> Result<Json<Section>, AppError> {
    let Path(id) = id?;
    Ok(Json(state.store.get(id).await?))
}

// ============================================================================
// Mutations
// ============================================================================

/// `POST /homepage-sections`
pub async fn create_section(
    State(state): State<AppState>,
    payload: Result<Json<CreateSection>, JsonRejection>,
) -> Result<(StatusCode, Json<Section>), AppError> {
    let Json(input) = payload?;
    let section = state.store.create(input).await?;
    Ok((StatusCode::CREATED, Json(section)))
}

/// `PUT|PATCH /homepage-sections/{id}`
pub async fn update_section(
    State(state): State<AppState>,
    id: Result<Path<SectionId>, PathRejection>,
    payload: Result<Json<UpdateSection>, JsonRejection>,
) -> Result<Json<Section>, AppError> {
    let Path(id) = id?;
    let Json(patch) = payload?;
    Ok(Json(state.store.update(id, patch).await?))
}

/// `PUT /homepage-sections/hero`
pub async fn update_hero(
    State(state): State<AppState>,
    query: Result<Query<HomepageQuery>, QueryRejection>,
    payload: Result<Json<UpdateSection>, JsonRejection>,
) -> Result<Json<Section>, AppError> {
    let Query(query) = query?;
    let Json(patch) = payload?;
    let homepage_id = query.homepage_id.unwrap_or(MAIN_HOMEPAGE);
    Ok(Json(state.store.update_hero(homepage_id, patch).await?))
}

/// `DELETE /homepage-sections/{id}`
pub async fn delete_section(
    State(state): State<AppState>,
    id: Result<Path<SectionId>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = id?;
    state.store.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /homepage-sections/reorder`
pub async fn reorder_sections(
    State(state): State<AppState>,
    payload: Result<Json<Vec<ReorderEntry>>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Json(entries) = payload?;
    state.store.reorder(&entries).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Uploads
// ============================================================================

/// `POST /homepage-sections/{id}/upload-hero-image`
pub async fn upload_hero_image(
    State(state): State<AppState>,
    id: Result<Path<SectionId>, PathRejection>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Section>, AppError> {
    let Path(id) = id?;
    upload_image(state, id, ImageSlot::Hero, multipart?).await
}

/// `POST /homepage-sections/{id}/upload-story-image`
pub async fn upload_story_image(
    State(state): State<AppState>,
    id: Result<Path<SectionId>, PathRejection>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Section>, AppError> {
    let Path(id) = id?;
    upload_image(state, id, ImageSlot::Story, multipart?).await
}

async fn upload_image(
    state: AppState,
    id: SectionId,
    slot: ImageSlot,
    multipart: Multipart,
) -> Result<Json<Section>, AppError> {
    // fail before writing anything when the section cannot take the image
    state.store.check_image_slot(id, slot).await?;

    let upload = read_image(multipart, state.config.max_upload_bytes).await?;
    let file_name = store_image(&state.config.upload_dir, &upload).await?;
    let url = state.config.upload_url(&file_name);

    Ok(Json(state.store.attach_image(id, slot, &url).await?))
}

// ============================================================================
// Health
// ============================================================================

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": crate::VERSION,
        "sections": state.store.len().await,
    }))
}
