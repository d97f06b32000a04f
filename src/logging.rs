use std::fs;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const LOG_DIR: &str = "logs";
const LOG_FILE: &str = "library_stock.log";
const DEFAULT_DIRECTIVES: &str = "library_stock=info,tower_http=info";

/// Filter from a `RUST_LOG` style spec; missing or unparsable specs fall back to the defaults
fn env_filter(spec: Option<&str>) -> EnvFilter {
    spec.and_then(|s| EnvFilter::try_new(s).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// Installs the global subscriber: readable lines on stdout, JSON lines in a
/// daily rotated file under `logs/`.
pub fn init_logging() {
    if let Err(e) = fs::create_dir_all(LOG_DIR) {
        eprintln!("cannot create {LOG_DIR}/: {e}");
    }

    let (file_writer, flush_guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(LOG_DIR, LOG_FILE));

    let spec = std::env::var("RUST_LOG").ok();
    tracing_subscriber::registry()
        .with(env_filter(spec.as_deref()))
        .with(fmt::layer().json().with_writer(file_writer))
        .with(fmt::layer().with_writer(std::io::stdout))
        .init();

    // Dropping the guard would stop the writer thread while the process still logs
    std::mem::forget(flush_guard);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_default_directives() {
        assert!(env_filter(None).to_string().contains("library_stock=info"));
        assert!(env_filter(Some("library_stock=loudest")).to_string().contains("library_stock=info"));
    }

    #[test]
    fn explicit_spec_wins() {
        let filter = env_filter(Some("library_stock=debug")).to_string();
        assert!(filter.contains("library_stock=debug"));
        assert!(!filter.contains("tower_http"));
    }
}
