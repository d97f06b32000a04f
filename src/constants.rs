/// Media type tags used in templates, routes and catalog queries
pub const GAME: &str = "game";
pub const MOVIE: &str = "movie";

// User facing messages (the library's audience is German speaking)
pub const NO_RESULTS_MESSAGE: &str = "<p>Es wurden keine Titel gefunden.</p>";
pub const NO_AVAILABLE_RESULTS_MESSAGE: &str = "<p>Es wurden keine ausleihbaren Titel gefunden.</p>";
pub const UNKNOWN_BRANCH_MESSAGE: &str = "<p>Die angegebene Bibliothek ist unbekannt.</p>";
pub const CATALOG_UNAVAILABLE_MESSAGE: &str =
    "<p>Der Katalog der Bibliothek ist gerade nicht erreichbar. Bitte versuche es später erneut.</p>";
pub const RENDER_FAILED_MESSAGE: &str = "<p>Die Ergebnisse konnten nicht angezeigt werden.</p>";

/// Placeholder answered by the return date endpoint until the catalog exposes due dates per item
pub const PLACEHOLDER_RETURN_DATE: &str = "11.08.24";

/// Console platforms the catalog distinguishes for games
pub const PLATFORMS: &[&str] = &["switch", "ps4", "ps5", "xbox one", "xbox series x"];

// Defaults for configuration values
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_STATIC_DIR: &str = "web/static";
pub const DEFAULT_CATALOG_URL: &str = "https://webopac.stadtbibliothek-leipzig.de/webOPACClient";
pub const DEFAULT_CATALOG_TIMEOUT_SECONDS: u64 = 20;
pub const DEFAULT_USER_AGENT: &str = concat!("library_stock/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_BOT_POLL_TIMEOUT_SECONDS: u64 = 10;
pub const TELEGRAM_API_URL: &str = "https://api.telegram.org";
