use serde::Deserialize;

use crate::types::{BranchIndexQuery, GameQuery, MovieQuery};

// Form payloads posted by the htmx frontend. Missing fields are treated as empty.

#[derive(Deserialize, Debug, Clone, Default)]
pub struct GameSearchForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub platform: String,
    #[serde(default, rename = "showNotAvailable")]
    pub show_not_available: String,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct MovieSearchForm {
    #[serde(default, rename = "movie-title")]
    pub title: String,
    #[serde(default, rename = "showNotAvailable")]
    pub show_not_available: String,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct GameIndexForm {
    #[serde(default)]
    pub branch: String,
    #[serde(default)]
    pub platform: String,
}

fn is_checked(flag: &str) -> bool {
    flag.to_lowercase() == "true"
}

impl From<GameSearchForm> for GameQuery {
    fn from(form: GameSearchForm) -> Self {
        Self {
            title: form.title.to_lowercase(),
            platform: form.platform.to_lowercase(),
            show_not_available: is_checked(&form.show_not_available),
        }
    }
}

impl From<MovieSearchForm> for MovieQuery {
    fn from(form: MovieSearchForm) -> Self {
        Self {
            title: form.title.to_lowercase(),
            show_not_available: is_checked(&form.show_not_available),
        }
    }
}

impl From<GameIndexForm> for BranchIndexQuery {
    fn from(form: GameIndexForm) -> Self {
        Self {
            branch: form.branch.to_lowercase(),
            platform: form.platform.to_lowercase(),
        }
    }
}
