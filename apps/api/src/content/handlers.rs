//! Axum route handlers for resume content.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::content::document::{strip_sections, Frontmatter};
use crate::content::markdown::render_animated_sections;
use crate::content::profile::Profile;
use crate::content::projects::Project;
use crate::state::AppState;

/// Sections already shown on the home page.
const HOME_PAGE_SECTIONS: &[&str] = &["Summary", "Skills"];

#[derive(Debug, Serialize)]
pub struct ResumeResponse {
    pub frontmatter: Frontmatter,
    pub content: String,
    pub html: String,
}

/// GET /api/v1/resume
///
/// Always 200: a load failure is rendered as the placeholder payload.
pub async fn handle_get_resume(State(state): State<AppState>) -> Json<ResumeResponse> {
    let document = state.content.load_resume().await;

    let content = strip_sections(&document.content, HOME_PAGE_SECTIONS)
        .trim()
        .to_string();
    let html = render_animated_sections(&content);

    Json(ResumeResponse {
        frontmatter: document.frontmatter,
        content,
        html,
    })
}

/// GET /api/v1/profile
pub async fn handle_get_profile(State(state): State<AppState>) -> Json<Profile> {
    Json(state.content.profile())
}

#[derive(Debug, Serialize)]
pub struct ProjectsResponse {
    pub projects: Vec<Project>,
}

/// GET /api/v1/projects
pub async fn handle_get_projects(State(state): State<AppState>) -> Json<ProjectsResponse> {
    Json(ProjectsResponse {
        projects: state.content.projects(),
    })
}
