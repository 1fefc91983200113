#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

use showcase::config::ConfigError;
use showcase::models::{Project, ProjectFilter, ProjectStatus};
use showcase::repository::ProjectRepository;
use showcase::store::{ProjectStore, StoreError};

/// In-memory store. Returns its rows verbatim, ignoring the filter, so tests
/// can check that the repository re-applies ordering and predicates itself.
pub struct FakeStore {
    rows: Vec<Project>,
    failure: Option<String>,
    fetches: AtomicUsize,
    counts: AtomicUsize,
}

impl FakeStore {
    pub fn with_rows(rows: Vec<Project>) -> Arc<Self> {
        Arc::new(Self {
            rows,
            failure: None,
            fetches: AtomicUsize::new(0),
            counts: AtomicUsize::new(0),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            rows: Vec::new(),
            failure: Some(message.to_string()),
            fetches: AtomicUsize::new(0),
            counts: AtomicUsize::new(0),
        })
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn counts(&self) -> usize {
        self.counts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProjectStore for FakeStore {
    async fn fetch_projects(&self, _filter: &ProjectFilter) -> Result<Vec<Project>, StoreError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(msg) => Err(StoreError::Connection(msg.clone())),
            None => Ok(self.rows.clone()),
        }
    }

    async fn count_projects(&self) -> Result<u64, StoreError> {
        self.counts.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(msg) => Err(StoreError::Connection(msg.clone())),
            None => Ok(self.rows.len() as u64),
        }
    }
}

/// A live-looking project row.
pub fn project(id: &str, category: &str, order_index: i32, featured: bool) -> Project {
    let stamp: DateTime<Utc> = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
    Project {
        id: id.to_string(),
        title: format!("Project {id}"),
        description: format!("Live project number {id}"),
        image_url: format!("https://cdn.example.com/{id}.png"),
        project_url: format!("https://example.com/{id}"),
        is_external: true,
        category: category.to_string(),
        order_index,
        status: ProjectStatus::Active,
        featured,
        tags: vec!["live".to_string()],
        view_count: 3,
        created_at: stamp,
        updated_at: stamp,
    }
}

pub fn live_repository(store: Arc<FakeStore>) -> ProjectRepository {
    ProjectRepository::live(store)
}

pub fn unconfigured_repository() -> ProjectRepository {
    ProjectRepository::unconfigured(ConfigError::MissingUrl)
}

/// A running test server instance.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// GET a path and return the JSON body + status.
    pub async fn get_json(&self, path: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("get request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// POST without a body and return the JSON body + status.
    pub async fn post_json(&self, path: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url(path))
            .send()
            .await
            .expect("post request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }
}

/// Spawn the app on a random port around the given repository.
pub async fn spawn_app(repository: ProjectRepository) -> TestApp {
    let app = showcase::build_app(repository);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    TestApp {
        addr,
        client: Client::new(),
    }
}

/// Ids of a `projects` JSON array, in order.
pub fn ids(projects: &Value) -> Vec<String> {
    projects
        .as_array()
        .expect("projects should be an array")
        .iter()
        .map(|p| p["id"].as_str().unwrap().to_string())
        .collect()
}
