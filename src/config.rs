use anyhow::{Context, Result};

const DEFAULT_CORS_ORIGINS: &str = "http://localhost:5000,http://localhost:4200";

#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub database_url: String,
    pub cors_allowed_origins: Vec<String>,
    pub rate_limit_per_second: u64,
    pub rate_limit_burst: u32,
}

impl ReportConfig {
    pub fn from_env() -> Result<Self> {
        let database_url = std::env::var("REPORT_DATABASE_URL")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .context("REPORT_DATABASE_URL must be set for the report server runtime")?;
        let database_url = normalize_database_url(database_url);
        if database_url.trim().is_empty() {
            anyhow::bail!("REPORT_DATABASE_URL resolved to an empty value");
        }

        let cors_allowed_origins =
            parse_origins(&env_string("REPORT_CORS_ALLOWED_ORIGINS", DEFAULT_CORS_ORIGINS));
        if cors_allowed_origins.is_empty() {
            anyhow::bail!("REPORT_CORS_ALLOWED_ORIGINS resolved to an empty list");
        }

        let rate_limit_per_second = env_u64("REPORT_RATE_LIMIT_PER_SECOND", 20).max(1);
        let rate_limit_burst = env_u32("REPORT_RATE_LIMIT_BURST", 60).max(1);

        Ok(Self {
            database_url,
            cors_allowed_origins,
            rate_limit_per_second,
            rate_limit_burst,
        })
    }
}

fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| origin.to_string())
        .collect()
}

fn env_string(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_u32(key: &str, default: u32) -> u32 {
    std::env::var(key)
        .ok()
        .and_then(|value| value.trim().parse::<u32>().ok())
        .unwrap_or(default)
}

fn env_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|value| value.trim().parse::<u64>().ok())
        .unwrap_or(default)
}

fn normalize_database_url(url: String) -> String {
    if let Some(stripped) = url.strip_prefix("postgresql+psycopg://") {
        return format!("postgresql://{stripped}");
    }
    if let Some(stripped) = url.strip_prefix("postgresql+asyncpg://") {
        return format!("postgresql://{stripped}");
    }
    url
}
