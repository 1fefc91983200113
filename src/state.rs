use std::sync::Arc;

use crate::diagnostics::Diagnostics;
use crate::repository::ProjectRepository;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub repository: ProjectRepository,
    pub diagnostics: Diagnostics,
}
