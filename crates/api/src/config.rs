use std::str::FromStr;
use std::time::Duration;

use axum::http::HeaderValue;
use realtrust_media::cloudinary::CloudinaryConfig;
use regex::Regex;

/// Default fixed origins: the Vite and CRA dev servers.
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:5173,http://localhost:3000";

/// Default pattern for preview deployments of the frontend.
const DEFAULT_PREVIEW_PATTERN: &str = r"^https://real-trust-.*\.vercel\.app$";

/// Errors raised while reading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} is invalid: {message}")]
    Invalid { key: &'static str, message: String },
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Cross-origin policy: an exact allow-list plus an optional regex for
/// preview deployments.
#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub origins: Vec<HeaderValue>,
    pub preview_pattern: Option<Regex>,
}

impl CorsConfig {
    /// Whether `origin` may make credentialed cross-origin requests.
    pub fn allows(&self, origin: &HeaderValue) -> bool {
        if self.origins.iter().any(|o| o == origin) {
            return true;
        }
        match (&self.preview_pattern, origin.to_str()) {
            (Some(pattern), Ok(origin)) => pattern.is_match(origin),
            _ => false,
        }
    }
}

/// Media host credentials.
#[derive(Debug, Clone)]
pub struct MediaConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    pub timeout_secs: u64,
}

impl MediaConfig {
    pub fn cloudinary(&self) -> CloudinaryConfig {
        CloudinaryConfig::new(
            self.cloud_name.clone(),
            self.api_key.clone(),
            self.api_secret.clone(),
            Duration::from_secs(self.timeout_secs),
        )
    }
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// PostgreSQL connection string (required).
    pub database_url: String,
    /// Connection pool size (default: `10`).
    pub database_max_connections: u32,
    pub cors: CorsConfig,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub media: MediaConfig,
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                    | Default                                        |
    /// |----------------------------|------------------------------------------------|
    /// | `HOST`                     | `0.0.0.0`                                      |
    /// | `PORT`                     | `5000`                                         |
    /// | `DATABASE_URL`             | required                                       |
    /// | `DATABASE_MAX_CONNECTIONS` | `10`                                           |
    /// | `CORS_ORIGINS`             | `http://localhost:5173,http://localhost:3000`  |
    /// | `FRONTEND_URL`             | unset                                          |
    /// | `CORS_PREVIEW_PATTERN`     | `^https://real-trust-.*\.vercel\.app$`         |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`                                           |
    /// | `CLOUDINARY_CLOUD_NAME`    | required                                       |
    /// | `CLOUDINARY_API_KEY`       | required                                       |
    /// | `CLOUDINARY_API_SECRET`    | required                                       |
    /// | `MEDIA_TIMEOUT_SECS`       | `30`                                           |
    /// | `LOG_FORMAT`               | `pretty` (`json` for structured output)        |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &'static str| var(key).ok_or(ConfigError::Missing(key));

        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_or("PORT", var("PORT"), 5000)?;
        let database_url = required("DATABASE_URL")?;
        let database_max_connections =
            parse_or("DATABASE_MAX_CONNECTIONS", var("DATABASE_MAX_CONNECTIONS"), 10)?;
        let request_timeout_secs =
            parse_or("REQUEST_TIMEOUT_SECS", var("REQUEST_TIMEOUT_SECS"), 30)?;

        let mut origin_list: Vec<String> = var("CORS_ORIGINS")
            .unwrap_or_else(|| DEFAULT_CORS_ORIGINS.into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if let Some(frontend) = var("FRONTEND_URL") {
            origin_list.push(frontend.trim().trim_end_matches('/').to_string());
        }
        let origins = origin_list
            .iter()
            .map(|o| {
                HeaderValue::from_str(o).map_err(|e| ConfigError::Invalid {
                    key: "CORS_ORIGINS",
                    message: format!("'{o}': {e}"),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let preview_pattern = match var("CORS_PREVIEW_PATTERN") {
            Some(p) if p.eq_ignore_ascii_case("none") => None,
            other => {
                let pattern = other.unwrap_or_else(|| DEFAULT_PREVIEW_PATTERN.into());
                let re = Regex::new(&pattern).map_err(|e| ConfigError::Invalid {
                    key: "CORS_PREVIEW_PATTERN",
                    message: e.to_string(),
                })?;
                Some(re)
            }
        };

        let media = MediaConfig {
            cloud_name: required("CLOUDINARY_CLOUD_NAME")?,
            api_key: required("CLOUDINARY_API_KEY")?,
            api_secret: required("CLOUDINARY_API_SECRET")?,
            timeout_secs: parse_or("MEDIA_TIMEOUT_SECS", var("MEDIA_TIMEOUT_SECS"), 30)?,
        };

        let log_format = match var("LOG_FORMAT").as_deref() {
            None | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "LOG_FORMAT",
                    message: format!("expected 'pretty' or 'json', got '{other}'"),
                })
            }
        };

        Ok(Self {
            host,
            port,
            database_url,
            database_max_connections,
            cors: CorsConfig {
                origins,
                preview_pattern,
            },
            request_timeout_secs,
            media,
            log_format,
        })
    }
}

fn parse_or<T>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            message: e.to_string(),
        }),
    }
}
