//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//! - `LARQ_STORAGE_PATH` - JSON file backing local storage (default: .larq/storage.json)
//! - `LARQ_CHECKOUT_DELAY_MS` - Simulated payment delay in milliseconds (default: 2000)
//! - `LARQ_CURRENCY` - Catalog currency code (default: EUR)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name (default: development)

use std::path::PathBuf;
use std::time::Duration;

use larq_core::CurrencyCode;
use thiserror::Error;

const DEFAULT_STORAGE_PATH: &str = ".larq/storage.json";
const DEFAULT_CHECKOUT_DELAY_MS: &str = "2000";
const DEFAULT_CURRENCY: &str = "EUR";
const DEFAULT_SENTRY_ENVIRONMENT: &str = "development";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// JSON file standing in for browser local storage
    pub storage_path: PathBuf,
    /// How long the mock payment takes
    pub checkout_delay: Duration,
    /// Currency the catalog is priced in
    pub currency: CurrencyCode,
    /// Sentry error tracking configuration
    pub sentry: SentryConfig,
}

/// Sentry configuration. Error tracking is off without a DSN.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentryConfig {
    pub dsn: Option<String>,
    pub environment: String,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            checkout_delay: Duration::from_secs(2),
            currency: CurrencyCode::EUR,
            sentry: SentryConfig {
                dsn: None,
                environment: DEFAULT_SENTRY_ENVIRONMENT.to_string(),
            },
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if a variable is set but cannot
    /// be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if a variable is set but cannot
    /// be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let storage_path = PathBuf::from(env.or_default("LARQ_STORAGE_PATH", DEFAULT_STORAGE_PATH));

        let delay_ms = env
            .or_default("LARQ_CHECKOUT_DELAY_MS", DEFAULT_CHECKOUT_DELAY_MS)
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("LARQ_CHECKOUT_DELAY_MS".to_string(), e.to_string())
            })?;

        let currency = env
            .or_default("LARQ_CURRENCY", DEFAULT_CURRENCY)
            .parse::<CurrencyCode>()
            .map_err(|e| ConfigError::InvalidEnvVar("LARQ_CURRENCY".to_string(), e.to_string()))?;

        let sentry = SentryConfig {
            dsn: env.optional("SENTRY_DSN"),
            environment: env.or_default("SENTRY_ENVIRONMENT", DEFAULT_SENTRY_ENVIRONMENT),
        };

        Ok(Self {
            storage_path,
            checkout_delay: Duration::from_millis(delay_ms),
            currency,
            sentry,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Env<F>(F);

impl<F: Fn(&str) -> Option<String>> Env<F> {
    /// Get an optional variable; empty values count as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config, StorefrontConfig::default());
        assert_eq!(config.storage_path, PathBuf::from(".larq/storage.json"));
        assert_eq!(config.checkout_delay, Duration::from_millis(2000));
        assert_eq!(config.currency, CurrencyCode::EUR);
        assert!(config.sentry.dsn.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("LARQ_STORAGE_PATH", "/tmp/larq.json"),
            ("LARQ_CHECKOUT_DELAY_MS", "50"),
            ("LARQ_CURRENCY", "usd"),
            ("SENTRY_DSN", "https://key@sentry.example/1"),
            ("SENTRY_ENVIRONMENT", "production"),
        ])
        .unwrap();

        assert_eq!(config.storage_path, PathBuf::from("/tmp/larq.json"));
        assert_eq!(config.checkout_delay, Duration::from_millis(50));
        assert_eq!(config.currency, CurrencyCode::USD);
        assert_eq!(
            config.sentry.dsn.as_deref(),
            Some("https://key@sentry.example/1")
        );
        assert_eq!(config.sentry.environment, "production");
    }

    #[test]
    fn test_empty_dsn_disables_sentry() {
        let config = load(&[("SENTRY_DSN", "  ")]).unwrap();
        assert!(config.sentry.dsn.is_none());
    }

    #[test]
    fn test_invalid_delay() {
        let err = load(&[("LARQ_CHECKOUT_DELAY_MS", "soon")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "LARQ_CHECKOUT_DELAY_MS"));
    }

    #[test]
    fn test_invalid_currency() {
        let err = load(&[("LARQ_CURRENCY", "XYZ")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "LARQ_CURRENCY"));
    }
}
