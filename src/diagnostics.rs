use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::ProjectFilter;
use crate::repository::ProjectRepository;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckState {
    Idle,
    Testing,
    Success,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub state: CheckState,
    pub configured: bool,
    pub error: Option<String>,
    pub details: Option<serde_json::Value>,
    pub project_count: Option<usize>,
    pub checked_at: Option<DateTime<Utc>>,
}

impl CheckReport {
    fn idle(configured: bool) -> Self {
        Self {
            state: CheckState::Idle,
            configured,
            error: None,
            details: None,
            project_count: None,
            checked_at: None,
        }
    }
}

/// Manual connection-test runner: `idle -> testing -> success | error`,
/// re-entered on every retry. Never retries on its own.
pub struct Diagnostics {
    repository: ProjectRepository,
    report: Mutex<CheckReport>,
}

impl Diagnostics {
    pub fn new(repository: ProjectRepository) -> Self {
        let configured = repository.is_configured();
        Self {
            repository,
            report: Mutex::new(CheckReport::idle(configured)),
        }
    }

    pub fn snapshot(&self) -> CheckReport {
        self.report
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Run the connection test followed by a full fetch. A run already in
    /// progress is left alone and its current snapshot returned.
    pub async fn run(&self) -> CheckReport {
        {
            let mut report = self
                .report
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            if report.state == CheckState::Testing {
                return report.clone();
            }
            report.state = CheckState::Testing;
            report.error = None;
            report.details = None;
            report.project_count = None;
        }

        let guard = InterruptGuard {
            report: &self.report,
            armed: true,
        };
        let finished = self.check().await;
        guard.disarm();

        let mut report = self
            .report
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *report = finished;
        report.clone()
    }

    async fn check(&self) -> CheckReport {
        let mut report = CheckReport::idle(self.repository.is_configured());
        report.checked_at = Some(Utc::now());

        let connection = self.repository.test_connection().await;
        if !connection.success {
            let error = connection.error.unwrap_or_else(|| "unknown error".to_string());
            tracing::warn!("Diagnostics: connection test failed: {error}");
            report.state = CheckState::Error;
            report.error = Some(format!("Connection test failed: {error}"));
            return report;
        }
        report.details = connection.data;

        let list = self.repository.get_projects(&ProjectFilter::default()).await;
        if let Some(reason) = list.reason() {
            tracing::warn!("Diagnostics: project fetch degraded: {reason}");
            report.state = CheckState::Error;
            report.error = Some(format!("Projects fetch failed: {reason}"));
            return report;
        }

        report.project_count = Some(list.projects().len());
        report.state = CheckState::Success;
        tracing::info!("Diagnostics: all checks passed");
        report
    }
}

/// Moves a run out of `Testing` if its future is dropped before finishing.
struct InterruptGuard<'a> {
    report: &'a Mutex<CheckReport>,
    armed: bool,
}

impl InterruptGuard<'_> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for InterruptGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut report = self
            .report
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        report.state = CheckState::Error;
        report.error = Some("Connection test interrupted".to_string());
    }
}
