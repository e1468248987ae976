//! Application services for the project catalogue.

mod catalogue;

pub use catalogue::{
    ProjectCatalogueError, ProjectCatalogueResult, ProjectCatalogueService, ProjectSummary,
};
