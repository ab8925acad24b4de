//! Configuration module
//!
//! This module provides the configuration structures for the conversion service.
//! Configuration is read once from the environment at startup and is immutable
//! afterwards; handlers receive it through the shared application state.

use std::env;
use std::path::Path;

// Common constants
const SERVER_PORT: u16 = 8080;
const MAX_UPLOAD_SIZE_MB: usize = 100;
const REQUEST_TIMEOUT_SECS: u64 = 300;
const HTTP_CONCURRENCY_LIMIT: usize = 1024;

/// Base HTTP server configuration
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    pub request_timeout_secs: u64,
    pub http_concurrency_limit: usize,
    /// `text` or `json`
    pub log_format: String,
}

/// Conversion service configuration
#[derive(Clone, Debug)]
pub struct ServiceConfig {
    pub base: BaseConfig,
    /// Maximum accepted request body (all uploaded files plus form overhead)
    pub max_upload_size_bytes: usize,
    /// Parent directory for per-request staging workspaces; system temp dir when unset
    pub workspace_dir: Option<String>,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<ServiceConfig>);

impl Config {
    fn as_service(&self) -> &ServiceConfig {
        &self.0
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = ServiceConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.as_service().validate()
    }

    pub fn server_port(&self) -> u16 {
        self.as_service().base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.as_service().base.cors_origins
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins().iter().any(|origin| origin == "*")
    }

    pub fn log_format(&self) -> &str {
        &self.as_service().base.log_format
    }

    pub fn environment(&self) -> &str {
        &self.as_service().base.environment
    }

    pub fn request_timeout_secs(&self) -> u64 {
        self.as_service().base.request_timeout_secs
    }

    pub fn http_concurrency_limit(&self) -> usize {
        self.as_service().base.http_concurrency_limit
    }

    pub fn max_upload_size_bytes(&self) -> usize {
        self.as_service().max_upload_size_bytes
    }

    pub fn workspace_dir(&self) -> Option<&str> {
        self.as_service().workspace_dir.as_deref()
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base: BaseConfig {
                server_port: SERVER_PORT,
                cors_origins: vec!["*".to_string()],
                environment: "development".to_string(),
                request_timeout_secs: REQUEST_TIMEOUT_SECS,
                http_concurrency_limit: HTTP_CONCURRENCY_LIMIT,
                log_format: "text".to_string(),
            },
            max_upload_size_bytes: MAX_UPLOAD_SIZE_MB * 1024 * 1024,
            workspace_dir: None,
        }
    }
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins: Vec<String> = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_upload_size_mb = env::var("MAX_UPLOAD_SIZE_MB")
            .unwrap_or_else(|_| MAX_UPLOAD_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(MAX_UPLOAD_SIZE_MB);
        let max_upload_size_bytes = upload_limit_bytes(max_upload_size_mb)?;

        let base = BaseConfig {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            environment,
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| REQUEST_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(REQUEST_TIMEOUT_SECS),
            http_concurrency_limit: env::var("HTTP_CONCURRENCY_LIMIT")
                .unwrap_or_else(|_| HTTP_CONCURRENCY_LIMIT.to_string())
                .parse()
                .unwrap_or(HTTP_CONCURRENCY_LIMIT),
            log_format: env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string()),
        };

        let config = ServiceConfig {
            base,
            max_upload_size_bytes,
            workspace_dir: env::var("WORKSPACE_DIR").ok().filter(|s| !s.is_empty()),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.max_upload_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_UPLOAD_SIZE_MB must be greater than 0"));
        }

        if self.base.request_timeout_secs == 0 {
            return Err(anyhow::anyhow!(
                "REQUEST_TIMEOUT_SECS must be greater than 0"
            ));
        }

        if self.base.http_concurrency_limit == 0 {
            return Err(anyhow::anyhow!(
                "HTTP_CONCURRENCY_LIMIT must be greater than 0"
            ));
        }

        if self.base.cors_origins.is_empty() {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS must list at least one origin or '*'"
            ));
        }

        if let Some(dir) = &self.workspace_dir {
            if !Path::new(dir).is_dir() {
                return Err(anyhow::anyhow!(
                    "WORKSPACE_DIR must point to an existing directory"
                ));
            }
        }

        Ok(())
    }
}

/// Convert the configured upload limit from megabytes to bytes
fn upload_limit_bytes(megabytes: usize) -> Result<usize, anyhow::Error> {
    megabytes
        .checked_mul(1024 * 1024)
        .ok_or_else(|| anyhow::anyhow!("MAX_UPLOAD_SIZE_MB is too large"))
}
