use anyhow::{Context, Result};
use std::env;
use tracing::info;

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    /// How long an issued OTP code stays valid
    pub otp_ttl_minutes: i64,
}

impl Config {
    pub fn load() -> Result<Self> {
        let port = env_or("NESTLING_PORT", "3000")
            .parse()
            .context("NESTLING_PORT must be a port number")?;
        let database_url = env_or("NESTLING_DATABASE_URL", "sqlite:nestling.db");
        let otp_ttl_minutes = env_or("NESTLING_OTP_TTL_MINUTES", "5")
            .parse()
            .context("NESTLING_OTP_TTL_MINUTES must be a whole number of minutes")?;

        Ok(Self {
            port,
            database_url,
            otp_ttl_minutes,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    })
}
