//! Storefront configuration loaded from environment variables.
//!
//! Required:
//! - `STORE_DATABASE_URL` - `PostgreSQL` connection string (`DATABASE_URL` also accepted)
//! - `STORE_BASE_URL` - public URL the storefront is served from
//! - `STORE_SESSION_SECRET` - session secret; must pass the strength checks below
//!
//! Optional:
//! - `STORE_HOST` / `STORE_PORT` - bind address (default 127.0.0.1:3000)
//! - `STORE_MEDIA_DIR` - product image directory served under `/media` (default `media`)
//! - `SENTRY_DSN` / `SENTRY_ENVIRONMENT` - error tracking

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;

const SESSION_SECRET_MIN_LENGTH: usize = 32;
const SECRET_MIN_ENTROPY: f64 = 3.3;

/// Substrings that mark a secret as a template value someone forgot to
/// replace. Checked case-insensitively.
const SECRET_BLOCKLIST: &[&str] = &[
    "changeme",
    "placeholder",
    "replace",
    "example",
    "password",
    "secret",
    "your-",
    "enter-",
    "put-your",
    "add-your",
    "insert",
    "todo",
    "fixme",
    "xxx",
];

/// Errors produced while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// `PostgreSQL` connection URL (carries credentials, so kept secret)
    pub database_url: SecretString,
    /// Address the server binds to
    pub host: IpAddr,
    /// Port the server listens on
    pub port: u16,
    /// Public base URL, e.g. `https://shop.birchwood.example`
    pub base_url: String,
    /// Session secret, validated for length and strength
    pub session_secret: SecretString,
    /// Directory with product images, served under `/media`
    pub media_dir: PathBuf,
    /// Sentry DSN; error tracking is off when unset
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag (e.g. `production`)
    pub sentry_environment: Option<String>,
}

impl StoreConfig {
    /// Load and validate configuration from the environment.
    ///
    /// A `.env` file in the working directory is read first if present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required variable is absent, a value
    /// does not parse, or the session secret fails the strength checks.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let database_url = require("STORE_DATABASE_URL")
            .or_else(|_| require("DATABASE_URL"))
            .map_err(|_| ConfigError::MissingEnvVar("STORE_DATABASE_URL".into()))
            .map(SecretString::from)?;

        let host = parse_var("STORE_HOST", "127.0.0.1")?;
        let port = parse_var("STORE_PORT", "3000")?;
        let base_url = require("STORE_BASE_URL")?;

        let session_secret = require("STORE_SESSION_SECRET")?;
        check_secret_strength("STORE_SESSION_SECRET", &session_secret)?;

        Ok(Self {
            database_url,
            host,
            port,
            base_url,
            session_secret: SecretString::from(session_secret),
            media_dir: PathBuf::from(var_or("STORE_MEDIA_DIR", "media")),
            sentry_dsn: std::env::var("SENTRY_DSN").ok(),
            sentry_environment: std::env::var("SENTRY_ENVIRONMENT").ok(),
        })
    }

    /// The socket address the server binds to.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the storefront is served over HTTPS (drives cookie security).
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

fn require(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_owned()))
}

fn var_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn parse_var<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    var_or(key, default)
        .parse()
        .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_owned(), e.to_string()))
}

/// Reject secrets that are short, templated, or low-entropy.
fn check_secret_strength(var_name: &str, secret: &str) -> Result<(), ConfigError> {
    if secret.len() < SESSION_SECRET_MIN_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_owned(),
            format!(
                "must be at least {SESSION_SECRET_MIN_LENGTH} characters (got {})",
                secret.len()
            ),
        ));
    }

    let lowered = secret.to_lowercase();
    if let Some(hit) = SECRET_BLOCKLIST.iter().find(|p| lowered.contains(**p)) {
        return Err(ConfigError::InsecureSecret(
            var_name.to_owned(),
            format!("looks like a placeholder (contains '{hit}')"),
        ));
    }

    let entropy = shannon_entropy(secret);
    if entropy < SECRET_MIN_ENTROPY {
        return Err(ConfigError::InsecureSecret(
            var_name.to_owned(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {SECRET_MIN_ENTROPY:.1}); \
                 generate the secret randomly"
            ),
        ));
    }

    Ok(())
}

/// Shannon entropy of `s` in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    let mut counts: HashMap<char, usize> = HashMap::new();
    let mut len = 0_usize;
    for c in s.chars() {
        *counts.entry(c).or_default() += 1;
        len += 1;
    }

    if len == 0 {
        return 0.0;
    }

    #[allow(clippy::cast_precision_loss)] // secrets are far below f64 precision limits
    let len = len as f64;
    counts
        .into_values()
        .map(|count| {
            #[allow(clippy::cast_precision_loss)]
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn entropy_of_empty_and_uniform_strings_is_zero() {
        assert!(shannon_entropy("").abs() < f64::EPSILON);
        assert!(shannon_entropy("zzzzzzzz").abs() < f64::EPSILON);
    }

    #[test]
    fn entropy_of_even_two_char_mix_is_one_bit() {
        assert!((shannon_entropy("abababab") - 1.0).abs() < 0.01);
    }

    #[test]
    fn entropy_of_random_looking_secret_clears_threshold() {
        assert!(shannon_entropy("aB3$xY9!mK2@nL5#pQ7&") > SECRET_MIN_ENTROPY);
    }

    #[test]
    fn rejects_short_secret() {
        let result = check_secret_strength("TEST_SECRET", "too-short");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn rejects_placeholder_secret() {
        for secret in [
            "your-session-secret-goes-here-now!!",
            "changeme-changeme-changeme-changeme",
        ] {
            assert!(
                check_secret_strength("TEST_SECRET", secret).is_err(),
                "should reject {secret}"
            );
        }
    }

    #[test]
    fn rejects_low_entropy_secret() {
        let result = check_secret_strength("TEST_SECRET", &"ab".repeat(20));
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn accepts_strong_secret() {
        assert!(check_secret_strength("TEST_SECRET", "aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6j").is_ok());
    }

    fn config_fixture() -> StoreConfig {
        StoreConfig {
            database_url: SecretString::from("postgres://localhost/birchwood_test"),
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            base_url: "http://localhost:3000".to_owned(),
            session_secret: SecretString::from("x".repeat(32)),
            media_dir: PathBuf::from("media"),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }

    #[test]
    fn socket_addr_combines_host_and_port() {
        let addr = config_fixture().socket_addr();
        assert_eq!(addr.to_string(), "127.0.0.1:3000");
    }

    #[test]
    fn https_base_url_means_secure_cookies() {
        let mut config = config_fixture();
        assert!(!config.is_secure());
        config.base_url = "https://shop.birchwood.example".to_owned();
        assert!(config.is_secure());
    }
}
