use axum::Json;
use axum::extract::{Path, Query, State};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::{Project, ProjectFilter, ProjectStatus};
use crate::repository::ProjectList;
use crate::state::SharedState;

/// Raw query string. Kept as strings so bad values get a clear 400.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub category: Option<String>,
    pub featured: Option<String>,
    pub status: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
}

#[derive(Serialize)]
pub struct ProjectsResponse {
    pub projects: Vec<Project>,
    pub source: &'static str,
    pub degraded: bool,
    pub error: Option<String>,
}

#[derive(Serialize)]
pub struct ProjectResponse {
    pub project: Project,
    pub source: &'static str,
}

impl From<ProjectList> for ProjectsResponse {
    fn from(list: ProjectList) -> Self {
        let source = list.source();
        let degraded = list.is_degraded();
        let error = list.reason();
        Self {
            projects: list.into_projects(),
            source,
            degraded,
            error,
        }
    }
}

pub async fn list(
    State(state): State<SharedState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ProjectsResponse>, AppError> {
    let filter = parse_filter(params)?;
    let list = state.repository.get_projects(&filter).await;
    Ok(Json(list.into()))
}

pub async fn get(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<ProjectResponse>, AppError> {
    let (project, list) = state.repository.find_project(&id).await;
    let project = project.ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;
    Ok(Json(ProjectResponse {
        project,
        source: list.source(),
    }))
}

/// Turn query parameters into a filter. `all` or an empty value disables the
/// category filter.
pub fn parse_filter(params: ListParams) -> Result<ProjectFilter, AppError> {
    let category = params
        .category
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case("all"));

    let featured = match params.featured.as_deref().map(str::trim) {
        None | Some("") => None,
        Some("true") => Some(true),
        Some("false") => Some(false),
        Some(other) => {
            return Err(AppError::BadRequest(format!(
                "featured must be true or false, got '{other}'"
            )));
        }
    };

    let status = match params.status.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(raw.parse::<ProjectStatus>().map_err(AppError::BadRequest)?),
    };

    let limit = match params.limit.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(raw.parse::<usize>().map_err(|_| {
            AppError::BadRequest(format!("limit must be a non-negative integer, got '{raw}'"))
        })?),
    };

    Ok(ProjectFilter {
        category,
        featured,
        status,
        limit,
        search: params.search,
    })
}
