use anyhow::Context;
use serde::Deserialize;

/// Seven days.
const DEFAULT_TOKEN_TTL_MINUTES: i64 = 60 * 24 * 7;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub db_max_connections: u32,
    pub host: String,
    pub port: u16,
    pub jwt: JwtConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL is not set")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET").context("JWT_SECRET is not set")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "expense-tracker".into()),
            audience: std::env::var("JWT_AUDIENCE")
                .unwrap_or_else(|_| "expense-tracker-users".into()),
            ttl_minutes: env_parse("JWT_TTL_MINUTES").unwrap_or(DEFAULT_TOKEN_TTL_MINUTES),
        };
        Ok(Self {
            database_url,
            db_max_connections: env_parse("DB_MAX_CONNECTIONS").unwrap_or(10),
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env_parse("APP_PORT").unwrap_or(3001),
            jwt,
        })
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse::<T>().ok())
}
