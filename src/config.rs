//! Startup configuration, loaded once from the environment.

use std::env;
use std::str::FromStr;

/// Database connection settings. Credentials are never hardcoded; every field
/// comes from the environment with a local-development default.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    /// Maximum connections held by the pool.
    pub pool_size: u32,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            host: "localhost".into(),
            port: 3306,
            user: "root".into(),
            password: String::new(),
            database: "pharmacy_management".into(),
            pool_size: 5,
        }
    }
}

impl DbConfig {
    /// Read `DB_HOST`, `DB_PORT`, `DB_USER`, `DB_PASSWORD`, `DB_NAME`,
    /// `DB_POOL_SIZE`. Unset or unparsable values fall back to defaults.
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            host: env::var("DB_HOST").unwrap_or(d.host),
            port: parse_or(env::var("DB_PORT").ok(), d.port),
            user: env::var("DB_USER").unwrap_or(d.user),
            password: env::var("DB_PASSWORD").unwrap_or(d.password),
            database: env::var("DB_NAME").unwrap_or(d.database),
            pool_size: parse_or(env::var("DB_POOL_SIZE").ok(), d.pool_size),
        }
    }
}

/// Full application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db: DbConfig,
    /// Bind address for the HTTP listener.
    pub listen_addr: String,
    /// Directory served for non-API paths (the bundled frontend).
    pub static_dir: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db: DbConfig::default(),
            listen_addr: "0.0.0.0:3000".into(),
            static_dir: "frontend".into(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            db: DbConfig::from_env(),
            listen_addr: env::var("LISTEN_ADDR").unwrap_or(d.listen_addr),
            static_dir: env::var("STATIC_DIR").unwrap_or(d.static_dir),
        }
    }
}

fn parse_or<T: FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|s| s.parse().ok()).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_config_defaults() {
        let cfg = DbConfig::default();
        assert_eq!(cfg.host, "localhost");
        assert_eq!(cfg.port, 3306);
        assert_eq!(cfg.user, "root");
        assert_eq!(cfg.password, "");
        assert_eq!(cfg.database, "pharmacy_management");
        assert_eq!(cfg.pool_size, 5);
    }

    #[test]
    fn app_config_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.listen_addr, "0.0.0.0:3000");
        assert_eq!(cfg.static_dir, "frontend");
    }

    #[test]
    fn parse_or_falls_back() {
        assert_eq!(parse_or::<u32>(Some("7".into()), 5), 7);
        assert_eq!(parse_or::<u32>(Some("not a number".into()), 5), 5);
        assert_eq!(parse_or::<u32>(None, 5), 5);
        assert_eq!(parse_or::<u16>(Some("3307".into()), 3306), 3307);
    }
}
