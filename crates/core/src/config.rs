use std::env;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

fn env_u16(key: &str, default: u16) -> u16 {
    env_opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn env_u32(key: &str, default: u32) -> u32 {
    env_opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub postgres: PostgresConfig,
    pub scraper: ScraperConfig,
    pub procedures: ProcedureConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::from_env(),
            postgres: PostgresConfig::from_env(),
            scraper: ScraperConfig::from_env(),
            procedures: ProcedureConfig::from_env(),
        }
    }

    /// Print a redacted summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded:");
        tracing::info!("  server:    port={}", self.server.port);
        tracing::info!(
            "  postgres:  host={}, db={}",
            self.postgres.host,
            self.postgres.database
        );
        tracing::info!(
            "  scraper:   base_url={}, actor={}, configured={}",
            self.scraper.base_url,
            self.scraper.actor_id,
            self.scraper.is_configured()
        );
    }
}

// ── Server ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origin: String,
}

impl ServerConfig {
    fn from_env() -> Self {
        Self {
            host: env_or("HOST", "0.0.0.0"),
            port: env_u16("PORT", 3001),
            cors_origin: env_or("CORS_ORIGIN", "*"),
        }
    }
}

// ── PostgreSQL ────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostgresConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub ssl_mode: String,
    pub max_connections: u32,
}

impl PostgresConfig {
    fn from_env() -> Self {
        Self {
            host: env_or("PG_HOST", "localhost"),
            port: env_u16("PG_PORT", 5432),
            database: env_or("PG_DATABASE", "tasteboard"),
            username: env_opt("PG_USERNAME"),
            password: env_opt("PG_PASSWORD"),
            ssl_mode: env_or("PG_SSL_MODE", "prefer"),
            max_connections: env_u32("PG_MAX_CONNECTIONS", 10),
        }
    }

    pub fn connection_string(&self) -> String {
        let user = self.username.as_deref().unwrap_or("postgres");
        let pass = self.password.as_deref().unwrap_or("");
        format!(
            "postgres://{}:{}@{}:{}/{}?sslmode={}",
            user, pass, self.host, self.port, self.database, self.ssl_mode
        )
    }

    pub fn is_configured(&self) -> bool {
        self.username.is_some()
    }
}

// ── Scraping service ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScraperConfig {
    /// API token for the scraping service. When absent, every scrape
    /// operation is refused with a configuration error before any side
    /// effect.
    pub api_token: Option<String>,
    pub base_url: String,
    /// Actor identifier of the review-scraping job on the service.
    pub actor_id: String,
    /// Crawl limit used for full "all restaurants" runs.
    pub max_places: u32,
    /// Page size for dataset item retrieval.
    pub page_size: u32,
}

impl ScraperConfig {
    fn from_env() -> Self {
        Self {
            api_token: env_opt("SCRAPER_API_TOKEN"),
            base_url: env_or("SCRAPER_BASE_URL", "https://api.apify.com"),
            actor_id: env_or("SCRAPER_ACTOR_ID", "compass~google-maps-reviews-scraper"),
            max_places: env_u32("SCRAPER_MAX_PLACES", 200),
            page_size: env_u32("SCRAPER_PAGE_SIZE", 500),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_token.is_some()
    }
}

// ── Aggregation procedures ────────────────────────────────────

/// Statement text for the externally-defined database routines. The
/// application only ever executes these by name; deployments can point the
/// env vars at their own routines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcedureConfig {
    pub clear_db: String,
    pub make_ratings: String,
    pub make_restaurants: String,
    pub house_rating: String,
}

impl ProcedureConfig {
    fn from_env() -> Self {
        Self {
            clear_db: env_or("PROC_CLEAR_DB", "CALL clear_review_data()"),
            make_ratings: env_or("PROC_MAKE_RATINGS", "CALL rebuild_ratings()"),
            make_restaurants: env_or("PROC_MAKE_RESTAURANTS", "CALL rebuild_restaurants()"),
            house_rating: env_or("PROC_HOUSE_RATING", "CALL rebuild_house_ratings()"),
        }
    }
}
