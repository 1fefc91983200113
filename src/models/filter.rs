use super::{Project, ProjectStatus};

/// Conjunctive selection over the project catalogue. `None` disables a field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectFilter {
    pub category: Option<String>,
    pub featured: Option<bool>,
    pub status: Option<ProjectStatus>,
    /// Keep only the first N after ordering. Zero behaves like `None`.
    pub limit: Option<usize>,
    /// Case-insensitive substring of title, description or any tag.
    pub search: Option<String>,
}

impl ProjectFilter {
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn featured(mut self, featured: bool) -> Self {
        self.featured = Some(featured);
        self
    }

    pub fn status(mut self, status: ProjectStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// The effective row limit, if any.
    pub fn row_limit(&self) -> Option<usize> {
        self.limit.filter(|n| *n > 0)
    }

    /// The effective search term, if any.
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    pub fn matches(&self, project: &Project) -> bool {
        if let Some(category) = &self.category {
            if &project.category != category {
                return false;
            }
        }
        if let Some(featured) = self.featured {
            if project.featured != featured {
                return false;
            }
        }
        if let Some(status) = self.status {
            if project.status != status {
                return false;
            }
        }
        if let Some(term) = self.search_term() {
            let term = term.to_lowercase();
            if !project.title.to_lowercase().contains(&term)
                && !project.description.to_lowercase().contains(&term)
                && !project.tags.iter().any(|t| t.to_lowercase().contains(&term))
            {
                return false;
            }
        }
        true
    }

    /// Filter, stable-sort by `order_index`, then truncate.
    pub fn apply<I>(&self, projects: I) -> Vec<Project>
    where
        I: IntoIterator<Item = Project>,
    {
        let mut selected: Vec<Project> = projects.into_iter().filter(|p| self.matches(p)).collect();
        selected.sort_by_key(|p| p.order_index);
        if let Some(limit) = self.row_limit() {
            selected.truncate(limit);
        }
        selected
    }
}
