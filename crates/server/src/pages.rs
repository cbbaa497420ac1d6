//! HTML pages rendered from the stored sections

use axum::{
    extract::{Query, State, rejection::QueryRejection},
    response::Html,
};
use homestretch_core::{HomepageId, MAIN_HOMEPAGE};
use homestretch_render::RenderMode;

use crate::error::AppError;
use crate::handlers::HomepageQuery;
use crate::state::AppState;

/// `GET /`: the public homepage
pub async fn homepage(State(state): State<AppState>) -> Html<String> {
    render(&state, MAIN_HOMEPAGE, RenderMode::Public).await
}

/// `GET /admin/preview`: every section, disabled ones dimmed
pub async fn preview(
    State(state): State<AppState>,
    query: Result<Query<HomepageQuery>, QueryRejection>,
) -> Result<Html<String>, AppError> {
    let Query(query) = query?;
    let homepage_id = query.homepage_id.unwrap_or(MAIN_HOMEPAGE);
    Ok(render(&state, homepage_id, RenderMode::Preview).await)
}

async fn render(state: &AppState, homepage_id: HomepageId, mode: RenderMode) -> Html<String> {
    let sections = state.store.list(Some(homepage_id)).await;
    Html(state.renderer.render(&sections, mode))
}
