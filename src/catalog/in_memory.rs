use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

use super::CatalogClient;
use crate::error::{Result, StockError};
use crate::types::{MediaRecord, MediaType};

/// In-memory catalog for development/testing
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    media: Vec<MediaRecord>,
    branch_names: HashMap<String, String>,
    failure: Option<String>,
    delay: Option<Duration>,
}

impl InMemoryCatalog {
    pub fn new(media: Vec<MediaRecord>) -> Self {
        Self {
            media,
            ..Default::default()
        }
    }

    /// Registers the branch name the catalog uses for `code`
    pub fn with_branch_code(mut self, code: &str, branch: &str) -> Self {
        self.branch_names.insert(code.to_string(), branch.to_string());
        self
    }

    /// Every lookup fails with a catalog error carrying `message`
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Default::default()
        }
    }

    /// Every lookup waits `delay` before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    async fn lookup<F>(&self, matches: F) -> Result<Vec<MediaRecord>>
    where
        F: Fn(&MediaRecord) -> bool,
    {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(message) = &self.failure {
            return Err(StockError::Catalog {
                message: message.clone(),
            });
        }
        Ok(self.media.iter().filter(|m| matches(m)).cloned().collect())
    }
}

fn title_matches(record: &MediaRecord, title: &str) -> bool {
    record.title.to_lowercase().contains(&title.to_lowercase())
}

fn platform_matches(record: &MediaRecord, platform: &str) -> bool {
    platform.is_empty()
        || record
            .platform
            .as_deref()
            .is_some_and(|p| p.eq_ignore_ascii_case(platform))
}

#[async_trait]
impl CatalogClient for InMemoryCatalog {
    async fn find_games(&self, title: &str, platform: &str) -> Result<Vec<MediaRecord>> {
        self.lookup(|m| {
            m.media_type == MediaType::Game && title_matches(m, title) && platform_matches(m, platform)
        })
        .await
    }

    async fn find_movies(&self, title: &str) -> Result<Vec<MediaRecord>> {
        self.lookup(|m| m.media_type == MediaType::Movie && title_matches(m, title))
            .await
    }

    async fn find_available_games(&self, branch_code: &str, platform: &str) -> Result<Vec<MediaRecord>> {
        let branch = self.branch_names.get(branch_code).cloned().unwrap_or_default();
        self.lookup(|m| {
            m.media_type == MediaType::Game
                && m.is_available
                && m.branch == branch
                && platform_matches(m, platform)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> InMemoryCatalog {
        InMemoryCatalog::new(vec![
            MediaRecord::game("Zelda", "switch", "Gohlis", true),
            MediaRecord::game("Zelda", "switch", "Plagwitz", false),
            MediaRecord::game("Halo", "xbox one", "Gohlis", true),
            MediaRecord::movie("Zelig", "Gohlis", true),
        ])
        .with_branch_code("20", "Gohlis")
    }

    #[tokio::test]
    async fn finds_games_by_title_and_platform() {
        let games = catalog().find_games("zel", "switch").await.unwrap();
        assert_eq!(games.len(), 2);
        assert!(games.iter().all(|g| g.media_type == MediaType::Game));

        let all_platforms = catalog().find_games("", "").await.unwrap();
        assert_eq!(all_platforms.len(), 3);
    }

    #[tokio::test]
    async fn available_games_are_scoped_to_branch() {
        let games = catalog().find_available_games("20", "").await.unwrap();
        let titles: Vec<&str> = games.iter().map(|g| g.title.as_str()).collect();
        assert_eq!(titles, vec!["Zelda", "Halo"]);
    }

    #[tokio::test]
    async fn failing_catalog_reports_error() {
        let err = InMemoryCatalog::failing("down").find_movies("heat").await.unwrap_err();
        assert!(matches!(err, StockError::Catalog { .. }));
    }
}
