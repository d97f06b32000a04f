use async_trait::async_trait;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, instrument, warn};

use super::CatalogClient;
use crate::config::CatalogConfig;
use crate::error::{Result, StockError};
use crate::types::{MediaRecord, MediaType};

static RESULT_SELECTOR: Lazy<Selector> = Lazy::new(|| selector(".result-item"));
static TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| selector(".title"));
static BRANCH_SELECTOR: Lazy<Selector> = Lazy::new(|| selector(".branch"));
static PLATFORM_SELECTOR: Lazy<Selector> = Lazy::new(|| selector(".platform"));
static STATUS_SELECTOR: Lazy<Selector> = Lazy::new(|| selector(".status"));
static DUE_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{1,2})\.(\d{1,2})\.(\d{2}|\d{4})\b").expect("valid due date pattern"));

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("valid css selector")
}

/// Catalog client scraping the library's web OPAC result pages
pub struct HtmlCatalogClient {
    client: Client,
    base_url: String,
}

/// Query sent to the OPAC search page
#[derive(Debug, Default)]
struct SearchRequest<'a> {
    title: &'a str,
    media_type: Option<MediaType>,
    platform: &'a str,
    branch_code: &'a str,
    only_available: bool,
}

impl SearchRequest<'_> {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("title", self.title.to_string())];
        if let Some(media_type) = self.media_type {
            pairs.push(("type", media_type.as_str().to_string()));
        }
        if !self.platform.is_empty() {
            pairs.push(("platform", self.platform.to_string()));
        }
        if !self.branch_code.is_empty() {
            pairs.push(("branch", self.branch_code.to_string()));
        }
        if self.only_available {
            pairs.push(("available", "1".to_string()));
        }
        pairs
    }
}

impl HtmlCatalogClient {
    pub fn new(config: &CatalogConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout())
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn search(&self, request: SearchRequest<'_>, media_type: MediaType) -> Result<Vec<MediaRecord>> {
        let url = format!("{}/search", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&request.query_pairs())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(StockError::Catalog {
                message: format!("search request failed with status: {}", response.status()),
            });
        }

        let body = response.text().await?;
        debug!(bytes = body.len(), "Received catalog result page");
        let media = parse_results(&body, media_type);
        info!(count = media.len(), %media_type, "Parsed catalog results");
        Ok(media)
    }
}

#[async_trait]
impl CatalogClient for HtmlCatalogClient {
    #[instrument(skip(self))]
    async fn find_games(&self, title: &str, platform: &str) -> Result<Vec<MediaRecord>> {
        let request = SearchRequest {
            title,
            media_type: Some(MediaType::Game),
            platform,
            ..Default::default()
        };
        self.search(request, MediaType::Game).await
    }

    #[instrument(skip(self))]
    async fn find_movies(&self, title: &str) -> Result<Vec<MediaRecord>> {
        let request = SearchRequest {
            title,
            media_type: Some(MediaType::Movie),
            ..Default::default()
        };
        self.search(request, MediaType::Movie).await
    }

    #[instrument(skip(self))]
    async fn find_available_games(&self, branch_code: &str, platform: &str) -> Result<Vec<MediaRecord>> {
        let request = SearchRequest {
            media_type: Some(MediaType::Game),
            platform,
            branch_code,
            only_available: true,
            ..Default::default()
        };
        let games = self.search(request, MediaType::Game).await?;
        // The OPAC availability filter is advisory, the status column is authoritative
        Ok(games.into_iter().filter(|g| g.is_available).collect())
    }
}

/// Extracts media records from an OPAC result page.
///
/// Hits without a title or branch are skipped, so every returned record has a
/// non-empty branch.
pub fn parse_results(html: &str, media_type: MediaType) -> Vec<MediaRecord> {
    let document = Html::parse_document(html);
    let mut media = Vec::new();

    for item in document.select(&RESULT_SELECTOR) {
        let title = text_of(&item, &TITLE_SELECTOR);
        let branch = text_of(&item, &BRANCH_SELECTOR);
        if title.is_empty() || branch.is_empty() {
            warn!(title = %title, branch = %branch, "Skipping incomplete catalog hit");
            continue;
        }
        let status = text_of(&item, &STATUS_SELECTOR);
        let platform = match media_type {
            MediaType::Game => Some(text_of(&item, &PLATFORM_SELECTOR).to_lowercase())
                .filter(|p| !p.is_empty()),
            MediaType::Movie => None,
        };

        media.push(MediaRecord {
            title,
            media_type,
            branch,
            is_available: is_available(&status),
            platform,
            return_date: parse_return_date(&status),
        });
    }
    media
}

fn text_of(element: &ElementRef<'_>, selector: &Selector) -> String {
    element
        .select(selector)
        .next()
        .map(|el| {
            el.text()
                .collect::<Vec<_>>()
                .join(" ")
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
        })
        .unwrap_or_default()
}

fn is_available(status: &str) -> bool {
    let status = status.to_lowercase();
    status.contains("verfügbar") && !status.contains("nicht verfügbar")
}

/// Due date from a status like `entliehen bis 11.08.24`
fn parse_return_date(status: &str) -> Option<NaiveDate> {
    let caps = DUE_DATE.captures(status)?;
    let day: u32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let mut year: i32 = caps[3].parse().ok()?;
    if caps[3].len() == 2 {
        year += 2000;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}
