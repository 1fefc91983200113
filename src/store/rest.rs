use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_RANGE};
use reqwest::{Response, StatusCode, Url};
use serde_json::Value;

use super::{ProjectStore, StoreError};
use crate::config::{ConfigError, StoreSettings};
use crate::models::{Project, ProjectFilter};

const TABLE_PATH: &str = "rest/v1/projects";

/// `ProjectStore` backed by the backend's PostgREST interface.
pub struct RestStore {
    client: reqwest::Client,
    table_url: Url,
    anon_key: String,
}

impl RestStore {
    pub fn new(base_url: Url, anon_key: &str, timeout: Duration) -> Result<Self, StoreError> {
        let table_url = base_url
            .join(TABLE_PATH)
            .map_err(|e| ConfigError::InvalidUrl(e.to_string()))?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StoreError::Unexpected(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            table_url,
            anon_key: anon_key.to_string(),
        })
    }

    pub fn from_settings(settings: &StoreSettings, timeout: Duration) -> Result<Self, StoreError> {
        Self::new(settings.url.clone(), &settings.anon_key, timeout)
    }

    /// The select URL for `filter`: equality predicates, ascending `order_index`
    /// and the optional row limit.
    ///
    /// Search is not sent: `text[]` tags cannot be substring-matched server side
    /// and ILIKE would read `%` and `_` as wildcards. With a search term the
    /// limit is withheld too, and the repository searches and truncates in memory.
    pub fn select_url(&self, filter: &ProjectFilter) -> Url {
        let mut url = self.table_url.clone();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("select", "*");

            if let Some(category) = &filter.category {
                query.append_pair("category", &format!("eq.{category}"));
            }
            if let Some(featured) = filter.featured {
                query.append_pair("featured", &format!("eq.{featured}"));
            }
            if let Some(status) = filter.status {
                query.append_pair("status", &format!("eq.{status}"));
            }
            query.append_pair("order", "order_index.asc");

            if let Some(limit) = filter.row_limit().filter(|_| filter.search_term().is_none()) {
                query.append_pair("limit", &limit.to_string());
            }
        }
        url
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.header("apikey", &self.anon_key)
            .header(AUTHORIZATION, format!("Bearer {}", self.anon_key))
            .header(ACCEPT, "application/json")
    }

    fn timeout_or_connection(err: reqwest::Error) -> StoreError {
        if err.is_timeout() {
            StoreError::Connection(format!("Request timed out: {err}"))
        } else {
            StoreError::Connection(err.to_string())
        }
    }
}

#[async_trait]
impl ProjectStore for RestStore {
    async fn fetch_projects(&self, filter: &ProjectFilter) -> Result<Vec<Project>, StoreError> {
        let url = self.select_url(filter);
        tracing::debug!("Fetching projects: {url}");

        let resp = self
            .authorize(self.client.get(url))
            .send()
            .await
            .map_err(Self::timeout_or_connection)?;

        let resp = ensure_success(resp).await?;

        let rows: Vec<Value> = resp
            .json()
            .await
            .map_err(|e| StoreError::Unexpected(format!("Malformed response body: {e}")))?;

        Ok(decode_rows(rows))
    }

    async fn count_projects(&self) -> Result<u64, StoreError> {
        let mut url = self.table_url.clone();
        url.query_pairs_mut().append_pair("select", "id");

        let resp = self
            .authorize(self.client.head(url))
            .header("Prefer", "count=exact")
            .send()
            .await
            .map_err(Self::timeout_or_connection)?;

        let resp = ensure_success(resp).await?;

        let range = resp
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| StoreError::Unexpected("Missing Content-Range header".to_string()))?;

        parse_total(range)
            .ok_or_else(|| StoreError::Unexpected(format!("Unparseable Content-Range: {range}")))
    }
}

async fn ensure_success(resp: Response) -> Result<Response, StoreError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    Err(StoreError::Query {
        status: status.as_u16(),
        message: error_message(&body, status),
    })
}

/// PostgREST puts a human-readable `message` in its error bodies.
fn error_message(body: &str, status: StatusCode) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        if let Some(msg) = value.get("message").and_then(|m| m.as_str()) {
            return msg.to_string();
        }
    }

    let trimmed: String = body.trim().chars().take(256).collect();
    if trimmed.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        trimmed
    }
}

/// Decode rows one by one. A row that does not fit the model (an unknown
/// status, a missing column) is dropped rather than failing the whole page.
fn decode_rows(rows: Vec<Value>) -> Vec<Project> {
    rows.into_iter()
        .filter_map(|row| {
            let id = row
                .get("id")
                .map(|v| v.to_string())
                .unwrap_or_else(|| "<none>".to_string());
            match serde_json::from_value::<Project>(row) {
                Ok(project) => Some(project),
                Err(e) => {
                    tracing::warn!("Skipping invalid project row {id}: {e}");
                    None
                }
            }
        })
        .collect()
}

/// Total from a `Content-Range` value such as `0-7/8` or `*/0`.
fn parse_total(range: &str) -> Option<u64> {
    range.rsplit_once('/')?.1.trim().parse().ok()
}
