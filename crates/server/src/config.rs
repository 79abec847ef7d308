//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `DATABASE_URL` - `PostgreSQL` connection string of the platform database
//! - `STORE_CORS` - Comma-separated origins allowed to call `/store` routes
//! - `ADMIN_CORS` - Comma-separated origins allowed to call `/admin` routes
//! - `AUTH_CORS` - Comma-separated origins for the platform's auth routes
//!
//! ## Optional
//! - `JWT_SECRET` - Token signing secret (default: `supersecret`, development only)
//! - `COOKIE_SECRET` - Cookie signing secret (default: `supersecret`, development only)
//! - `NODE_ENV` - `development`, `test`, `staging` or `production` (default: development)
//! - `HOST` - Bind address (default: 127.0.0.1)
//! - `PORT` - Listen port (default: 9000)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use url::Url;

/// Secret used by the platform when none is configured.
const DEFAULT_SECRET: &str = "supersecret";
const MIN_SECRET_LENGTH: usize = 32;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Deployment environment, read from `NODE_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Test,
    Staging,
    Production,
}

impl Environment {
    /// Whether secrets must be real (non-default, high entropy).
    #[must_use]
    pub const fn requires_strong_secrets(self) -> bool {
        matches!(self, Self::Staging | Self::Production)
    }

    /// Name used for Sentry's `environment` field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Test => "test",
            Self::Staging => "staging",
            Self::Production => "production",
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "test" => Ok(Self::Test),
            "staging" => Ok(Self::Staging),
            "production" | "prod" => Ok(Self::Production),
            other => Err(format!("unknown environment '{other}'")),
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Deployment environment
    pub environment: Environment,
    /// CORS and signing settings shared with the host platform
    pub http: HttpConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// HTTP settings mirrored from the platform's `projectConfig.http`.
///
/// Implements `Debug` manually to redact secret fields.
#[derive(Clone)]
pub struct HttpConfig {
    /// Origins allowed on `/store` routes
    pub store_cors: Vec<String>,
    /// Origins allowed on `/admin` routes
    pub admin_cors: Vec<String>,
    /// Origins allowed on the platform's auth routes
    pub auth_cors: Vec<String>,
    /// Token signing secret
    pub jwt_secret: SecretString,
    /// Cookie signing secret
    pub cookie_secret: SecretString,
}

impl std::fmt::Debug for HttpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpConfig")
            .field("store_cors", &self.store_cors)
            .field("admin_cors", &self.admin_cors)
            .field("auth_cors", &self.auth_cors)
            .field("jwt_secret", &"[REDACTED]")
            .field("cookie_secret", &"[REDACTED]")
            .finish()
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if secrets fail validation in staging/production.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// See [`ServerConfig::from_env`].
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let vars = Vars(&get);

        let environment = vars
            .or_default("NODE_ENV", "development")
            .parse::<Environment>()
            .map_err(|e| ConfigError::InvalidEnvVar("NODE_ENV".to_string(), e))?;
        let database_url = SecretString::from(vars.required("DATABASE_URL")?);
        let host = vars
            .or_default("HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("HOST".to_string(), e.to_string()))?;
        let port = vars
            .or_default("PORT", "9000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("PORT".to_string(), e.to_string()))?;

        let http = HttpConfig::from_vars(&vars, environment)?;
        let sentry_dsn = vars.optional("SENTRY_DSN");

        Ok(Self {
            database_url,
            host,
            port,
            environment,
            http,
            sentry_dsn,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl HttpConfig {
    fn from_vars(vars: &Vars<'_>, environment: Environment) -> Result<Self, ConfigError> {
        Ok(Self {
            store_cors: parse_origins("STORE_CORS", &vars.required("STORE_CORS")?)?,
            admin_cors: parse_origins("ADMIN_CORS", &vars.required("ADMIN_CORS")?)?,
            auth_cors: parse_origins("AUTH_CORS", &vars.required("AUTH_CORS")?)?,
            jwt_secret: signing_secret(vars, "JWT_SECRET", environment)?,
            cookie_secret: signing_secret(vars, "COOKIE_SECRET", environment)?,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Environment lookup with the usual required/optional/default accessors.
struct Vars<'a>(&'a dyn Fn(&str) -> Option<String>);

impl Vars<'_> {
    /// Get a required variable.
    fn required(&self, key: &str) -> Result<String, ConfigError> {
        self.optional(key)
            .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
    }

    /// Get an optional variable. Empty values count as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }
}

/// Parse a comma-separated origin list such as `http://localhost:8000,https://shop.test`.
fn parse_origins(var_name: &str, raw: &str) -> Result<Vec<String>, ConfigError> {
    let origins = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            let url = Url::parse(s).map_err(|e| {
                ConfigError::InvalidEnvVar(var_name.to_string(), format!("'{s}': {e}"))
            })?;
            if url.host_str().is_none() {
                return Err(ConfigError::InvalidEnvVar(
                    var_name.to_string(),
                    format!("'{s}' has no host"),
                ));
            }
            Ok(url.origin().ascii_serialization())
        })
        .collect::<Result<Vec<_>, _>>()?;

    if origins.is_empty() {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            "must list at least one origin".to_string(),
        ));
    }
    Ok(origins)
}

/// Load a signing secret, falling back to the platform default outside staging/production.
fn signing_secret(
    vars: &Vars<'_>,
    key: &str,
    environment: Environment,
) -> Result<SecretString, ConfigError> {
    let secret = SecretString::from(vars.or_default(key, DEFAULT_SECRET));
    if environment.requires_strong_secrets() {
        validate_secret_length(&secret, key)?;
        validate_secret_strength(secret.expose_secret(), key)?;
    }
    Ok(secret)
}

/// Validate that a secret meets minimum length requirements.
fn validate_secret_length(secret: &SecretString, var_name: &str) -> Result<(), ConfigError> {
    let value = secret.expose_secret();
    if value.len() < MIN_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "must be at least {} characters (got {})",
                MIN_SECRET_LENGTH,
                value.len()
            ),
        ));
    }
    Ok(())
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a randomly generated secret."
            ),
        ));
    }

    Ok(())
}
