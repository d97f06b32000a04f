use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{GAME, MOVIE};

/// Kind of medium a catalog entry describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Game,
    Movie,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Game => GAME,
            MediaType::Movie => MOVIE,
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One catalog entry as reported by the library for a single branch.
///
/// Records are produced per query by a [`crate::catalog::CatalogClient`] and
/// never change afterwards. `branch` is non-empty for everything the catalog
/// client hands out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRecord {
    pub title: String,
    pub media_type: MediaType,
    pub branch: String,
    pub is_available: bool,
    /// Console platform, only set for games
    pub platform: Option<String>,
    /// Due date of a lent out copy when the catalog reports one
    pub return_date: Option<NaiveDate>,
}

impl MediaRecord {
    pub fn game(title: &str, platform: &str, branch: &str, is_available: bool) -> Self {
        Self {
            title: title.to_string(),
            media_type: MediaType::Game,
            branch: branch.to_string(),
            is_available,
            platform: Some(platform.to_string()),
            return_date: None,
        }
    }

    pub fn movie(title: &str, branch: &str, is_available: bool) -> Self {
        Self {
            title: title.to_string(),
            media_type: MediaType::Movie,
            branch: branch.to_string(),
            is_available,
            platform: None,
            return_date: None,
        }
    }

    pub fn with_return_date(mut self, return_date: NaiveDate) -> Self {
        self.return_date = Some(return_date);
        self
    }

    /// Return date in the catalog's short German format, e.g. `11.08.24`
    pub fn return_date_label(&self) -> Option<String> {
        self.return_date
            .map(|date| date.format("%d.%m.%y").to_string())
    }
}

/// All records of one branch, in the order the catalog returned them
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchGroup {
    pub branch: String,
    pub media: Vec<MediaRecord>,
}

/// Parameters of a game search, already lower-cased
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameQuery {
    pub title: String,
    pub platform: String,
    pub show_not_available: bool,
}

/// Parameters of a movie search, already lower-cased
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieQuery {
    pub title: String,
    pub show_not_available: bool,
}

/// Parameters of the per-branch game listing, already lower-cased
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchIndexQuery {
    pub branch: String,
    pub platform: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_type_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&MediaType::Game).unwrap(), "\"game\"");
        assert_eq!(MediaType::Movie.to_string(), "movie");
    }

    #[test]
    fn return_date_label_uses_short_german_format() {
        let record = MediaRecord::movie("Heat", "Zentralbibliothek", false)
            .with_return_date(NaiveDate::from_ymd_opt(2024, 8, 11).unwrap());
        assert_eq!(record.return_date_label().as_deref(), Some("11.08.24"));
        assert_eq!(MediaRecord::movie("Heat", "Gohlis", true).return_date_label(), None);
    }
}
