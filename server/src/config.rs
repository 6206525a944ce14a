//! Server configuration parsed from environment variables.
//!
//! Read once at startup. `.env` is loaded by `main` before this runs, so
//! values from the file and the real environment look the same here.

use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_SVG_STORE_DIR: &str = "data/denah";
pub const DEFAULT_STATIC_DIR: &str = "public/denah";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// `None` runs the server without persistence; room and contract
    /// routes then answer 503.
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    /// Where `POST /api/save-svg` writes and `GET /api/get-svg` reads.
    pub svg_store_dir: PathBuf,
    /// Shipped floor plans, served under `/denah`.
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            database_url: None,
            db_max_connections: DEFAULT_DB_MAX_CONNECTIONS,
            svg_store_dir: PathBuf::from(DEFAULT_SVG_STORE_DIR),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
        }
    }
}

impl ServerConfig {
    /// Build config from the process environment.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `DATABASE_URL`: persistence disabled when absent or blank
    /// - `DB_MAX_CONNECTIONS`: default 5
    /// - `SVG_STORE_DIR`: default `data/denah`
    /// - `STATIC_DIR`: default `public/denah`
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup. Unparseable numbers fall
    /// back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = parse_or(lookup("PORT"), DEFAULT_PORT);
        let database_url = lookup("DATABASE_URL")
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty());
        let db_max_connections = parse_or(lookup("DB_MAX_CONNECTIONS"), DEFAULT_DB_MAX_CONNECTIONS);
        let svg_store_dir = lookup("SVG_STORE_DIR").map_or_else(|| PathBuf::from(DEFAULT_SVG_STORE_DIR), PathBuf::from);
        let static_dir = lookup("STATIC_DIR").map_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR), PathBuf::from);

        Self { port, database_url, db_max_connections, svg_store_dir, static_dir }
    }
}

fn parse_or<T: std::str::FromStr>(raw: Option<String>, default: T) -> T {
    match raw.map(|v| v.trim().parse::<T>()) {
        Some(Ok(v)) => v,
        Some(Err(_)) => {
            tracing::warn!(expected = std::any::type_name::<T>(), "ignoring unparseable config value");
            default
        }
        None => default,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
