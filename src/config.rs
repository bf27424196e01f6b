//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Required Variables
//!
//! ```bash
//! export OAUTH_CLIENT_ID="1234.apps.googleusercontent.com"
//! export OAUTH_CLIENT_SECRET="GOCSPX-..."
//! ```
//!
//! `YOUR_CLIENT_ID` / `YOUR_CLIENT_SECRET` are accepted as fallbacks.
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:$PORT`, `PORT` defaults to `3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `OAUTH_REDIRECT_URL` - Callback registered with Google
//!   (default: `http://localhost:3000/oauth2callback`)
//! - `OAUTH_AUTH_URL` / `OAUTH_TOKEN_URL` - Google OAuth endpoints
//! - `ANALYTICS_BASE_URL` - YouTube Analytics API root
//! - `ALLOWED_ORIGINS` - Comma-separated CORS allow-list
//! - `LOOKBACK_PADDING_DAYS` - Extra days for `24h` / `48h` windows (default: 0, max: 7)
//! - `UPSTREAM_TIMEOUT_SECS` - Timeout for Google requests (default: 30)

use anyhow::{Context, Result};
use std::env;
use url::Url;

use crate::infrastructure::google::{
    DEFAULT_ANALYTICS_BASE_URL, DEFAULT_AUTH_URL, DEFAULT_TOKEN_URL, OAuthSettings,
};
use crate::utils::secrets::mask_secret;

/// Origins allowed when `ALLOWED_ORIGINS` is not set.
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 2] = [
    "https://zesty-entremet-052696.netlify.app",
    "http://localhost:3000",
];

const DEFAULT_REDIRECT_URL: &str = "http://localhost:3000/oauth2callback";

/// Largest accepted `LOOKBACK_PADDING_DAYS`.
const MAX_LOOKBACK_PADDING_DAYS: u64 = 7;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    pub oauth: OAuthSettings,
    pub analytics_base_url: String,
    /// Browser origins allowed to call the relay cross-origin.
    pub allowed_origins: Vec<String>,
    /// Extra lookback days for the `24h` and `48h` periods.
    pub lookback_padding_days: u64,
    /// Timeout (seconds) applied to every request sent to Google.
    pub upstream_timeout_secs: u64,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the OAuth client credentials are missing or a
    /// numeric variable cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let listen_addr = Self::load_listen_addr();
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let oauth = OAuthSettings {
            client_id: env_with_fallback("OAUTH_CLIENT_ID", "YOUR_CLIENT_ID")
                .context("OAUTH_CLIENT_ID must be set")?,
            client_secret: env_with_fallback("OAUTH_CLIENT_SECRET", "YOUR_CLIENT_SECRET")
                .context("OAUTH_CLIENT_SECRET must be set")?,
            redirect_url: env::var("OAUTH_REDIRECT_URL")
                .unwrap_or_else(|_| DEFAULT_REDIRECT_URL.to_string()),
            auth_url: env::var("OAUTH_AUTH_URL").unwrap_or_else(|_| DEFAULT_AUTH_URL.to_string()),
            token_url: env::var("OAUTH_TOKEN_URL")
                .unwrap_or_else(|_| DEFAULT_TOKEN_URL.to_string()),
        };

        let analytics_base_url = env::var("ANALYTICS_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_ANALYTICS_BASE_URL.to_string());

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .map(|raw| parse_origins(&raw))
            .unwrap_or_else(|_| {
                DEFAULT_ALLOWED_ORIGINS
                    .iter()
                    .map(|o| o.to_string())
                    .collect()
            });

        let lookback_padding_days = match env::var("LOOKBACK_PADDING_DAYS") {
            Ok(v) => v
                .parse::<u64>()
                .with_context(|| format!("LOOKBACK_PADDING_DAYS must be a number, got '{v}'"))?,
            Err(_) => 0,
        };

        let upstream_timeout_secs = match env::var("UPSTREAM_TIMEOUT_SECS") {
            Ok(v) => v
                .parse::<u64>()
                .with_context(|| format!("UPSTREAM_TIMEOUT_SECS must be a number, got '{v}'"))?,
            Err(_) => 30,
        };

        Ok(Self {
            listen_addr,
            log_level,
            log_format,
            oauth,
            analytics_base_url,
            allowed_origins,
            lookback_padding_days,
            upstream_timeout_secs,
        })
    }

    /// Loads the bind address.
    ///
    /// Priority:
    /// 1. `LISTEN` environment variable
    /// 2. `0.0.0.0:$PORT` (hosting platforms inject `PORT`)
    /// 3. `0.0.0.0:3000`
    fn load_listen_addr() -> String {
        if let Ok(listen) = env::var("LISTEN") {
            return listen;
        }

        let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
        format!("0.0.0.0:{port}")
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is invalid
    /// - the OAuth client credentials are empty
    /// - any endpoint URL or allowed origin is not an absolute http(s) URL
    /// - `lookback_padding_days` or `upstream_timeout_secs` is out of range
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if self.oauth.client_id.trim().is_empty() {
            anyhow::bail!("OAUTH_CLIENT_ID must not be empty");
        }
        if self.oauth.client_secret.trim().is_empty() {
            anyhow::bail!("OAUTH_CLIENT_SECRET must not be empty");
        }

        validate_http_url("OAUTH_REDIRECT_URL", &self.oauth.redirect_url)?;
        validate_http_url("OAUTH_AUTH_URL", &self.oauth.auth_url)?;
        validate_http_url("OAUTH_TOKEN_URL", &self.oauth.token_url)?;
        validate_http_url("ANALYTICS_BASE_URL", &self.analytics_base_url)?;

        if self.allowed_origins.is_empty() {
            anyhow::bail!("ALLOWED_ORIGINS must list at least one origin");
        }
        for origin in &self.allowed_origins {
            validate_origin(origin)?;
        }

        if self.lookback_padding_days > MAX_LOOKBACK_PADDING_DAYS {
            anyhow::bail!(
                "LOOKBACK_PADDING_DAYS must be at most {}, got {}",
                MAX_LOOKBACK_PADDING_DAYS,
                self.lookback_padding_days
            );
        }

        if self.upstream_timeout_secs == 0 {
            anyhow::bail!("UPSTREAM_TIMEOUT_SECS must be greater than 0");
        }

        Ok(())
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  OAuth client: {}", self.oauth.client_id);
        tracing::info!(
            "  OAuth secret: {}",
            mask_secret(&self.oauth.client_secret)
        );
        tracing::info!("  OAuth redirect: {}", self.oauth.redirect_url);
        tracing::info!("  Analytics API: {}", self.analytics_base_url);
        tracing::info!("  Allowed origins: {}", self.allowed_origins.join(", "));
        tracing::info!("  Lookback padding: {} day(s)", self.lookback_padding_days);
        tracing::info!("  Upstream timeout: {}s", self.upstream_timeout_secs);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Reads `primary`, falling back to `legacy`.
fn env_with_fallback(primary: &str, legacy: &str) -> Result<String, env::VarError> {
    env::var(primary).or_else(|_| env::var(legacy))
}

/// Splits a comma-separated origin list, dropping blanks and trailing slashes.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().trim_end_matches('/').to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn validate_http_url(name: &str, value: &str) -> Result<()> {
    let url = Url::parse(value).with_context(|| format!("{name} is not a valid URL: '{value}'"))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        anyhow::bail!("{name} must use http or https, got '{value}'");
    }

    Ok(())
}

/// An origin is scheme + host (+ port), nothing else.
fn validate_origin(origin: &str) -> Result<()> {
    validate_http_url("ALLOWED_ORIGINS", origin)?;

    let url = Url::parse(origin)?;
    if url.path() != "/" || url.query().is_some() || origin.ends_with('/') {
        anyhow::bail!("ALLOWED_ORIGINS entries must not contain a path, got '{origin}'");
    }

    Ok(())
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if required variables are missing or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 13] = [
        "LISTEN",
        "PORT",
        "OAUTH_CLIENT_ID",
        "OAUTH_CLIENT_SECRET",
        "YOUR_CLIENT_ID",
        "YOUR_CLIENT_SECRET",
        "OAUTH_REDIRECT_URL",
        "OAUTH_AUTH_URL",
        "OAUTH_TOKEN_URL",
        "ANALYTICS_BASE_URL",
        "ALLOWED_ORIGINS",
        "LOOKBACK_PADDING_DAYS",
        "UPSTREAM_TIMEOUT_SECS",
    ];

    fn clear_env() {
        // SAFETY: Tests touching the environment are run serially
        unsafe {
            for var in VARS {
                env::remove_var(var);
            }
        }
    }

    fn valid_config() -> Config {
        Config {
            listen_addr: "0.0.0.0:3000".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            oauth: OAuthSettings {
                client_id: "client.apps.googleusercontent.com".to_string(),
                client_secret: "GOCSPX-secret".to_string(),
                redirect_url: DEFAULT_REDIRECT_URL.to_string(),
                auth_url: DEFAULT_AUTH_URL.to_string(),
                token_url: DEFAULT_TOKEN_URL.to_string(),
            },
            analytics_base_url: DEFAULT_ANALYTICS_BASE_URL.to_string(),
            allowed_origins: DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|o| o.to_string())
                .collect(),
            lookback_padding_days: 0,
            upstream_timeout_secs: 30,
        }
    }

    #[test]
    fn test_config_validation() {
        let mut config = valid_config();
        assert!(config.validate().is_ok());

        config.log_format = "invalid".to_string();
        assert!(config.validate().is_err());
        config.log_format = "json".to_string();
        assert!(config.validate().is_ok());

        config.listen_addr = "3000".to_string();
        assert!(config.validate().is_err());
        config.listen_addr = "0.0.0.0:3000".to_string();

        config.oauth.client_secret = "  ".to_string();
        assert!(config.validate().is_err());
        config.oauth.client_secret = "GOCSPX-secret".to_string();

        config.oauth.redirect_url = "ftp://example.com/cb".to_string();
        assert!(config.validate().is_err());
        config.oauth.redirect_url = DEFAULT_REDIRECT_URL.to_string();

        config.lookback_padding_days = 8;
        assert!(config.validate().is_err());
        config.lookback_padding_days = 1;
        assert!(config.validate().is_ok());

        config.upstream_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_origin_validation() {
        let mut config = valid_config();

        config.allowed_origins = vec!["https://dashboard.example.com/app".to_string()];
        assert!(config.validate().is_err());

        config.allowed_origins = vec!["dashboard.example.com".to_string()];
        assert!(config.validate().is_err());

        config.allowed_origins = vec![];
        assert!(config.validate().is_err());

        config.allowed_origins = vec!["http://127.0.0.1:5173".to_string()];
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_origins() {
        assert_eq!(
            parse_origins(" https://a.example.com/ , ,http://localhost:3000"),
            vec!["https://a.example.com", "http://localhost:3000"]
        );
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::set_var("OAUTH_CLIENT_ID", "client-id");
            env::set_var("OAUTH_CLIENT_SECRET", "client-secret");
        }

        let config = Config::from_env().unwrap();

        assert_eq!(config.listen_addr, "0.0.0.0:3000");
        assert_eq!(config.oauth.redirect_url, DEFAULT_REDIRECT_URL);
        assert_eq!(config.oauth.token_url, DEFAULT_TOKEN_URL);
        assert_eq!(config.analytics_base_url, DEFAULT_ANALYTICS_BASE_URL);
        assert_eq!(config.allowed_origins, DEFAULT_ALLOWED_ORIGINS);
        assert_eq!(config.lookback_padding_days, 0);
        assert_eq!(config.upstream_timeout_secs, 30);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_requires_client_credentials() {
        clear_env();

        assert!(Config::from_env().is_err());
    }

    #[test]
    #[serial]
    fn test_legacy_credential_names() {
        clear_env();
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("YOUR_CLIENT_ID", "legacy-id");
            env::set_var("YOUR_CLIENT_SECRET", "legacy-secret");
            env::set_var("OAUTH_CLIENT_ID", "new-id");
        }

        let config = Config::from_env().unwrap();

        // New names take priority
        assert_eq!(config.oauth.client_id, "new-id");
        assert_eq!(config.oauth.client_secret, "legacy-secret");

        clear_env();
    }

    #[test]
    #[serial]
    fn test_listen_addr_priority() {
        clear_env();
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("PORT", "8080");
        }
        assert_eq!(Config::load_listen_addr(), "0.0.0.0:8080");

        unsafe {
            env::set_var("LISTEN", "127.0.0.1:9000");
        }
        assert_eq!(Config::load_listen_addr(), "127.0.0.1:9000");

        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_padding_is_rejected() {
        clear_env();
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("OAUTH_CLIENT_ID", "client-id");
            env::set_var("OAUTH_CLIENT_SECRET", "client-secret");
            env::set_var("LOOKBACK_PADDING_DAYS", "one");
        }

        assert!(Config::from_env().is_err());

        unsafe {
            env::set_var("LOOKBACK_PADDING_DAYS", "1");
        }
        assert_eq!(Config::from_env().unwrap().lookback_padding_days, 1);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_timeout_is_rejected() {
        clear_env();
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("OAUTH_CLIENT_ID", "client-id");
            env::set_var("OAUTH_CLIENT_SECRET", "client-secret");
            env::set_var("UPSTREAM_TIMEOUT_SECS", "30s");
        }

        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("UPSTREAM_TIMEOUT_SECS"));

        unsafe {
            env::set_var("UPSTREAM_TIMEOUT_SECS", "5");
        }
        assert_eq!(Config::from_env().unwrap().upstream_timeout_secs, 5);

        clear_env();
    }
}
