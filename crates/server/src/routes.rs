//! Router assembly
//!
//! ```text
//! GET  /                          public homepage
//! GET  /admin/preview             preview (admin)
//! GET  /health                    liveness
//! GET  /uploads/*                 uploaded images
//! /api/homepage-sections/...      REST resource, mutations need admin
//! ```

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::StatusCode,
    middleware,
    routing::{get, post, put},
};
use tower_http::{
    cors::CorsLayer, services::ServeDir, timeout::TimeoutLayer, trace::TraceLayer,
};

use crate::auth::require_admin;
use crate::handlers::{
    create_section, delete_section, get_hero, get_section, health, list_sections,
    list_sections_by_type, reorder_sections, update_hero, update_section, upload_hero_image,
    upload_story_image,
};
use crate::pages;
use crate::state::AppState;

/// Room for multipart framing on top of the file itself
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Build the complete application router
pub fn create_router(state: AppState) -> Router {
    let admin_pages = Router::new()
        .route("/admin/preview", get(pages::preview))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    Router::new()
        .route("/", get(pages::homepage))
        .route("/health", get(health))
        .merge(admin_pages)
        .nest("/api", api_routes(&state))
        .nest_service(
            &state.config.public_upload_path,
            ServeDir::new(&state.config.upload_dir),
        )
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            state.config.request_timeout(),
        ))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// The `/homepage-sections` resource; reads are public
fn api_routes(state: &AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/homepage-sections", get(list_sections))
        .route("/homepage-sections/types/{type}", get(list_sections_by_type))
        .route("/homepage-sections/hero", get(get_hero))
        .route("/homepage-sections/{id}", get(get_section));

    let uploads = Router::new()
        .route("/homepage-sections/{id}/upload-hero-image", post(upload_hero_image))
        .route("/homepage-sections/{id}/upload-story-image", post(upload_story_image))
        .layer(DefaultBodyLimit::max(
            state.config.max_upload_bytes + MULTIPART_OVERHEAD,
        ));

    let admin = Router::new()
        .route("/homepage-sections", post(create_section))
        .route("/homepage-sections/reorder", post(reorder_sections))
        .route("/homepage-sections/hero", put(update_hero))
        .route(
            "/homepage-sections/{id}",
            put(update_section)
                .patch(update_section)
                .delete(delete_section),
        )
        .merge(uploads)
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    public.merge(admin)
}
