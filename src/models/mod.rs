pub mod filter;
pub mod project;

pub use filter::ProjectFilter;
pub use project::{Project, ProjectStatus};
