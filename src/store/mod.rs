pub mod rest;

use async_trait::async_trait;

use crate::config::ConfigError;
use crate::models::{Project, ProjectFilter};

pub use rest::RestStore;

#[derive(Debug)]
pub enum StoreError {
    /// Connection parameters missing or malformed; no request was made.
    Configuration(ConfigError),
    /// The store could not be reached (DNS, TLS, refused, timeout).
    Connection(String),
    /// The store answered with a non-success status.
    Query { status: u16, message: String },
    Unexpected(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Configuration(err) => write!(f, "Configuration error: {err}"),
            StoreError::Connection(msg) => write!(f, "Connection error: {msg}"),
            StoreError::Query { status, message } => {
                write!(f, "Query error ({status}): {message}")
            }
            StoreError::Unexpected(msg) => write!(f, "Unexpected error: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<ConfigError> for StoreError {
    fn from(err: ConfigError) -> Self {
        StoreError::Configuration(err)
    }
}

/// Read access to the remote `projects` table.
#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// Rows matching every set field of `filter`, ascending by `order_index`.
    async fn fetch_projects(&self, filter: &ProjectFilter) -> Result<Vec<Project>, StoreError>;

    /// Number of rows in the table. Used as the reachability check.
    async fn count_projects(&self) -> Result<u64, StoreError>;
}
