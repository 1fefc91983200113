use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use serde_json::json;

use crate::config::ConfigError;
use crate::fallback;
use crate::models::{Project, ProjectFilter};
use crate::store::{ProjectStore, StoreError};

/// Where the repository gets its rows from. Decided once, at start-up.
#[derive(Clone)]
pub enum StoreSource {
    Live(Arc<dyn ProjectStore>),
    Unconfigured(ConfigError),
}

/// Outcome of a catalogue read. Every variant carries a usable list.
#[derive(Debug)]
pub enum ProjectList {
    Live(Vec<Project>),
    Degraded {
        projects: Vec<Project>,
        reason: StoreError,
    },
    Unconfigured {
        projects: Vec<Project>,
        reason: ConfigError,
    },
}

impl ProjectList {
    pub fn projects(&self) -> &[Project] {
        match self {
            ProjectList::Live(projects)
            | ProjectList::Degraded { projects, .. }
            | ProjectList::Unconfigured { projects, .. } => projects,
        }
    }

    pub fn into_projects(self) -> Vec<Project> {
        match self {
            ProjectList::Live(projects)
            | ProjectList::Degraded { projects, .. }
            | ProjectList::Unconfigured { projects, .. } => projects,
        }
    }

    /// `"live"` or `"fallback"`.
    pub fn source(&self) -> &'static str {
        match self {
            ProjectList::Live(_) => "live",
            _ => "fallback",
        }
    }

    pub fn is_degraded(&self) -> bool {
        !matches!(self, ProjectList::Live(_))
    }

    pub fn reason(&self) -> Option<String> {
        match self {
            ProjectList::Live(_) => None,
            ProjectList::Degraded { reason, .. } => Some(reason.to_string()),
            ProjectList::Unconfigured { reason, .. } => Some(reason.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ConnectionReport {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

#[derive(Clone)]
pub struct ProjectRepository {
    source: StoreSource,
}

impl ProjectRepository {
    pub fn new(source: StoreSource) -> Self {
        Self { source }
    }

    pub fn live(store: Arc<dyn ProjectStore>) -> Self {
        Self::new(StoreSource::Live(store))
    }

    pub fn unconfigured(reason: ConfigError) -> Self {
        Self::new(StoreSource::Unconfigured(reason))
    }

    pub fn is_configured(&self) -> bool {
        matches!(self.source, StoreSource::Live(_))
    }

    /// Read the catalogue, preferring the live store. Never fails: any error
    /// yields the filtered fallback snapshot and is reported in the result.
    pub async fn get_projects(&self, filter: &ProjectFilter) -> ProjectList {
        let store = match &self.source {
            StoreSource::Live(store) => store,
            StoreSource::Unconfigured(reason) => {
                tracing::debug!("Store not configured ({reason}), serving fallback projects");
                return ProjectList::Unconfigured {
                    projects: fallback::select(filter),
                    reason: reason.clone(),
                };
            }
        };

        match store.fetch_projects(filter).await {
            Ok(rows) => {
                let projects = filter.apply(dedupe_by_id(rows));
                tracing::info!("Fetched {} projects from store", projects.len());
                ProjectList::Live(projects)
            }
            Err(reason) => {
                tracing::warn!("Project store failed, using fallback data: {reason}");
                ProjectList::Degraded {
                    projects: fallback::select(filter),
                    reason,
                }
            }
        }
    }

    /// Look one project up by id across whichever source answers.
    pub async fn find_project(&self, id: &str) -> (Option<Project>, ProjectList) {
        let list = self.get_projects(&ProjectFilter::default()).await;
        let found = list.projects().iter().find(|p| p.id == id).cloned();
        (found, list)
    }

    /// Connection test: validates configuration, then runs a count query.
    pub async fn test_connection(&self) -> ConnectionReport {
        let store = match &self.source {
            StoreSource::Live(store) => store,
            StoreSource::Unconfigured(reason) => {
                return ConnectionReport {
                    success: false,
                    error: Some(reason.to_string()),
                    data: None,
                };
            }
        };

        tracing::info!("Testing project store connection");

        match store.count_projects().await {
            Ok(count) => {
                tracing::info!("Project store connection ok ({count} projects)");
                ConnectionReport {
                    success: true,
                    error: None,
                    data: Some(json!({ "count": count })),
                }
            }
            Err(e) => {
                tracing::error!("Project store connection test failed: {e}");
                ConnectionReport {
                    success: false,
                    error: Some(e.to_string()),
                    data: None,
                }
            }
        }
    }
}

fn dedupe_by_id(rows: Vec<Project>) -> Vec<Project> {
    let mut seen = HashSet::new();
    rows.into_iter()
        .filter(|p| {
            let fresh = seen.insert(p.id.clone());
            if !fresh {
                tracing::warn!("Dropping duplicate project id {}", p.id);
            }
            fresh
        })
        .collect()
}
