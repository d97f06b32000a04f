use std::sync::Arc;
use std::time::Duration;

use crate::catalog::{BranchDirectory, CatalogClient};

/// Collaborators shared by all request handlers; nothing in here is mutated
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogClient>,
    pub branches: Arc<dyn BranchDirectory>,
    /// Upper bound for a single catalog lookup
    pub catalog_timeout: Duration,
}

impl AppState {
    pub fn new(
        catalog: Arc<dyn CatalogClient>,
        branches: Arc<dyn BranchDirectory>,
        catalog_timeout: Duration,
    ) -> Self {
        Self {
            catalog,
            branches,
            catalog_timeout,
        }
    }
}
