use std::net::IpAddr;
use std::str::FromStr;

use sqlx::postgres::{PgConnectOptions, PgSslMode};

#[derive(Debug, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub host: IpAddr,
    pub port: u16,
    pub max_body_size: usize,
    pub log_level: String,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub max_connections: u32,
    /// Apply the bundled schema migrations at startup (`PERKBOX_RUN_MIGRATIONS`).
    pub run_migrations: bool,
}

impl DatabaseConfig {
    /// Connection options; an explicit `DATABASE_URL` wins over the individual parts.
    pub fn connect_options(&self) -> Result<PgConnectOptions, String> {
        match &self.url {
            Some(url) => {
                PgConnectOptions::from_str(url).map_err(|e| format!("Invalid DATABASE_URL: {e}"))
            }
            None => Ok(PgConnectOptions::new()
                .host(&self.host)
                .port(self.port)
                .username(&self.user)
                .password(&self.password)
                .database(&self.name)
                .ssl_mode(PgSslMode::Disable)),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let url = std::env::var("DATABASE_URL").ok().filter(|s| !s.is_empty());

        // The individual parts are only mandatory when no full URL is given.
        let part = |key: &str| -> Result<String, String> {
            if url.is_some() {
                Ok(std::env::var(key).unwrap_or_default())
            } else {
                env_required(key)
            }
        };

        let database = DatabaseConfig {
            url: url.clone(),
            host: env_or("POSTGRES_HOST", "localhost"),
            port: env_or("POSTGRES_PORT", "5432")
                .parse()
                .map_err(|e| format!("Invalid POSTGRES_PORT: {e}"))?,
            user: part("POSTGRES_USER")?,
            password: part("POSTGRES_PASSWORD")?,
            name: part("USER_DB")?,
            max_connections: env_or("PERKBOX_DB_MAX_CONNECTIONS", "10")
                .parse()
                .map_err(|e| format!("Invalid PERKBOX_DB_MAX_CONNECTIONS: {e}"))?,
            run_migrations: parse_flag(
                "PERKBOX_RUN_MIGRATIONS",
                &env_or("PERKBOX_RUN_MIGRATIONS", "false"),
            )?,
        };

        let host: IpAddr = env_or("PERKBOX_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid PERKBOX_HOST: {e}"))?;

        let port: u16 = env_or("PERKBOX_PORT", "8080")
            .parse()
            .map_err(|e| format!("Invalid PERKBOX_PORT: {e}"))?;

        let max_body_size: usize = env_or("PERKBOX_MAX_BODY_SIZE", "1048576")
            .parse()
            .map_err(|e| format!("Invalid PERKBOX_MAX_BODY_SIZE: {e}"))?;

        let log_level = env_or("PERKBOX_LOG_LEVEL", "info");

        Ok(Config {
            database,
            host,
            port,
            max_body_size,
            log_level,
        })
    }
}

fn env_required(key: &str) -> Result<String, String> {
    std::env::var(key).map_err(|_| format!("Missing required environment variable: {key}"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_flag(key: &str, value: &str) -> Result<bool, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(format!("Invalid {key}: expected a boolean, got '{other}'")),
    }
}
