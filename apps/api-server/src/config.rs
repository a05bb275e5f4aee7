//! Application configuration loaded from environment variables.

use std::env;

use bloglist_core::services::OwnershipPolicy;
use bloglist_infra::{DatabaseConfig, JwtConfig};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub jwt: JwtConfig,
    pub ownership: OwnershipPolicy,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL")
            .ok()
            .map(|url| DatabaseConfig {
                url,
                max_connections: env::var("DB_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(10),
                min_connections: env::var("DB_MIN_CONNECTIONS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(1),
            });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3003),
            database,
            jwt: JwtConfig::from_env(),
            ownership: Self::parse_ownership(env::var("BLOG_OWNERSHIP").ok()),
        }
    }

    /// `BLOG_OWNERSHIP=open|owner`. Unset or unrecognised values mean `open`.
    fn parse_ownership(value: Option<String>) -> OwnershipPolicy {
        match value.map(|v| v.parse::<OwnershipPolicy>()) {
            None => OwnershipPolicy::default(),
            Some(Ok(policy)) => policy,
            Some(Err(e)) => {
                tracing::warn!("Ignoring BLOG_OWNERSHIP: {}", e);
                OwnershipPolicy::default()
            }
        }
    }
}
