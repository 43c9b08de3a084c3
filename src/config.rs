//! Process configuration parsed from environment variables.
//!
//! SYSTEM CONTEXT
//! ==============
//! The backend endpoint and public API key are the only required settings.
//! Everything else has a default so a local `.env` with two lines is enough
//! to run the front end against a hosted project.

use url::Url;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BACKEND_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_BACKEND_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required env var {0}")]
    Missing(&'static str),
    #[error("invalid {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackendTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL of the managed backend project, without trailing slash.
    pub backend_url: String,
    /// Public (anon) API key sent with every backend request.
    pub backend_key: String,
    pub port: u16,
    /// Origin users reach this site at. Used to build the reset-password link.
    pub public_origin: String,
    pub cookie_secure: bool,
    pub timeouts: BackendTimeouts,
}

impl AppConfig {
    /// Build typed config from environment variables.
    ///
    /// Required:
    /// - `SUPABASE_URL`
    /// - `SUPABASE_ANON_KEY`
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `PUBLIC_ORIGIN`: default `http://localhost:<PORT>`
    /// - `COOKIE_SECURE`: inferred from the `PUBLIC_ORIGIN` scheme when unset
    /// - `BACKEND_REQUEST_TIMEOUT_SECS`: default 30
    /// - `BACKEND_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or a URL is malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let backend_url = std::env::var("SUPABASE_URL").map_err(|_| ConfigError::Missing("SUPABASE_URL"))?;
        let backend_key = std::env::var("SUPABASE_ANON_KEY").map_err(|_| ConfigError::Missing("SUPABASE_ANON_KEY"))?;
        let port = env_parse("PORT", DEFAULT_PORT);
        let public_origin =
            std::env::var("PUBLIC_ORIGIN").unwrap_or_else(|_| format!("http://localhost:{port}"));

        let backend_url = normalize_base_url("SUPABASE_URL", &backend_url)?;
        let public_origin = normalize_base_url("PUBLIC_ORIGIN", &public_origin)?;
        if backend_key.trim().is_empty() {
            return Err(ConfigError::Missing("SUPABASE_ANON_KEY"));
        }

        let cookie_secure = env_bool("COOKIE_SECURE").unwrap_or_else(|| public_origin.starts_with("https://"));
        let timeouts = BackendTimeouts {
            request_secs: env_parse("BACKEND_REQUEST_TIMEOUT_SECS", DEFAULT_BACKEND_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse("BACKEND_CONNECT_TIMEOUT_SECS", DEFAULT_BACKEND_CONNECT_TIMEOUT_SECS),
        };

        Ok(Self { backend_url, backend_key, port, public_origin, cookie_secure, timeouts })
    }

    /// Absolute URL the password-reset email should send users back to.
    #[must_use]
    pub fn reset_password_redirect(&self) -> String {
        format!("{}/reset-password", self.public_origin)
    }
}

/// Validate an http(s) base URL and strip any trailing slash.
pub(crate) fn normalize_base_url(var: &'static str, raw: &str) -> Result<String, ConfigError> {
    let parsed = Url::parse(raw.trim()).map_err(|e| ConfigError::Invalid { var, reason: e.to_string() })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::Invalid { var, reason: format!("unsupported scheme '{}'", parsed.scheme()) });
    }
    Ok(parsed.as_str().trim_end_matches('/').to_owned())
}

pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
