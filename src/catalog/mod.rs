//! Access to the library catalog and its branch directory.
//!
//! Handlers only talk to the traits defined here, so the HTML client can be
//! swapped for a fake in tests.

pub mod branches;
pub mod html_client;
pub mod in_memory;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::MediaRecord;

pub use branches::{Branch, StaticBranchDirectory};
pub use html_client::HtmlCatalogClient;
pub use in_memory::InMemoryCatalog;

/// Looks up media in the library catalog
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Games whose title matches `title`, on `platform` (empty matches every platform)
    async fn find_games(&self, title: &str, platform: &str) -> Result<Vec<MediaRecord>>;

    /// Movies whose title matches `title`
    async fn find_movies(&self, title: &str) -> Result<Vec<MediaRecord>>;

    /// Games for `platform` that can currently be borrowed at the branch with `branch_code`
    async fn find_available_games(
        &self,
        branch_code: &str,
        platform: &str,
    ) -> Result<Vec<MediaRecord>>;
}

/// Maps branch display names to the codes the catalog understands
pub trait BranchDirectory: Send + Sync {
    /// Code of the branch called `branch`, `None` when no such branch exists
    fn resolve_branch_code(&self, branch: &str) -> Option<String>;

    /// Every known branch
    fn branches(&self) -> &[Branch];
}
