//! Process-wide settings, loaded once from the environment.

use crate::error::{ConfigError, ConfigResult};

/// Configuration recognized by both the API (launcher) and worker binaries
/// (§6 "Environment variables recognized").
#[derive(Debug, Clone)]
pub struct Settings {
    /// Scene Store (Postgres) connection string.
    pub database_url: String,
    /// Task Store (Redis) connection string.
    pub redis_url: String,
    /// Downstream notification service base URL.
    pub base_url: String,
    /// Bearer token for the downstream notification POST.
    pub service_token: String,
    /// Path appended to `base_url` for the notification POST.
    pub notify_endpoint: String,
    pub aws_s3_region: String,
    pub aws_s3_bucket_name: String,
    pub aws_s3_access_key: String,
    pub aws_s3_secret_key: String,
    /// Address the API server binds to.
    pub bind_addr: String,
    /// Number of concurrent worker loops the worker binary spawns.
    pub worker_concurrency: usize,
}

impl Settings {
    /// Load settings from the process environment, first merging in a
    /// `.env` file if one is present.
    pub fn from_env() -> ConfigResult<Self> {
        let _ = dotenvy::dotenv();

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            redis_url: optional("REDIS_URL", "redis://127.0.0.1:6379"),
            base_url: required("BASE_URL")?,
            service_token: required("SERVICE_TOKEN")?,
            notify_endpoint: required("NOTIFY_ENDPOINT")?,
            aws_s3_region: required("AWS_S3_REGION")?,
            aws_s3_bucket_name: required("AWS_S3_BUCKET_NAME")?,
            aws_s3_access_key: required("AWS_S3_ACCESS_KEY")?,
            aws_s3_secret_key: required("AWS_S3_SECRET_KEY")?,
            bind_addr: optional("BIND_ADDR", "0.0.0.0:8000"),
            worker_concurrency: optional("WORKER_CONCURRENCY", "4")
                .parse()
                .map_err(|e| ConfigError::InvalidValue {
                    var: "WORKER_CONCURRENCY".to_string(),
                    message: format!("{e}"),
                })?,
        })
    }
}

fn required(name: &str) -> ConfigResult<String> {
    std::env::var(name).map_err(|_| ConfigError::MissingVar(name.to_string()))
}

fn optional(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}
