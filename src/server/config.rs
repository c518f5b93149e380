use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use crate::server::error::config::ConfigError;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_MEDIA_ROOT: &str = "./media";
const DEFAULT_PAYSTACK_BASE_URL: &str = "https://api.paystack.co";
const DEFAULT_EMAIL_FROM: &str = "no-reply@estate-market.local";

/// Payment backend used for cart purchases.
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentProvider {
    /// Random outcome per charge, no network calls.
    Simulated,
    /// Paystack charge API.
    Paystack { secret_key: String, base_url: String },
}

/// Lifetimes of issued bearer tokens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TokenSettings {
    pub access_ttl: chrono::Duration,
    pub refresh_ttl: chrono::Duration,
}

impl Default for TokenSettings {
    fn default() -> Self {
        Self {
            access_ttl: chrono::Duration::hours(24),
            refresh_ttl: chrono::Duration::days(7),
        }
    }
}

pub struct Config {
    pub database_url: String,
    pub app_url: String,
    pub bind_addr: SocketAddr,
    pub media_root: PathBuf,
    pub tokens: TokenSettings,
    pub payment_provider: PaymentProvider,
    pub email_from: String,
    pub cors_allowed_origin: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
        };
        let optional = |name: &str, default: &str| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let app_url = required("APP_URL")?;
        url::Url::parse(&app_url).map_err(|e| ConfigError::InvalidEnvVar {
            name: "APP_URL".to_string(),
            reason: e.to_string(),
        })?;

        let access_hours: i64 = parse_var("ACCESS_TOKEN_TTL_HOURS", &optional("ACCESS_TOKEN_TTL_HOURS", "24"))?;
        let refresh_days: i64 = parse_var("REFRESH_TOKEN_TTL_DAYS", &optional("REFRESH_TOKEN_TTL_DAYS", "7"))?;

        let payment_provider = match optional("PAYMENT_PROVIDER", "simulated").to_lowercase().as_str() {
            "simulated" => PaymentProvider::Simulated,
            "paystack" => PaymentProvider::Paystack {
                secret_key: required("PAYSTACK_SECRET_KEY")?,
                base_url: optional("PAYSTACK_BASE_URL", DEFAULT_PAYSTACK_BASE_URL),
            },
            other => {
                return Err(ConfigError::InvalidEnvVar {
                    name: "PAYMENT_PROVIDER".to_string(),
                    reason: format!("expected 'simulated' or 'paystack', got '{}'", other),
                })
            }
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            app_url: app_url.trim_end_matches('/').to_string(),
            bind_addr: parse_var("BIND_ADDR", &optional("BIND_ADDR", DEFAULT_BIND_ADDR))?,
            media_root: PathBuf::from(optional("MEDIA_ROOT", DEFAULT_MEDIA_ROOT)),
            tokens: TokenSettings {
                access_ttl: chrono::Duration::hours(access_hours),
                refresh_ttl: chrono::Duration::days(refresh_days),
            },
            payment_provider,
            email_from: optional("EMAIL_FROM", DEFAULT_EMAIL_FROM),
            cors_allowed_origin: optional("CORS_ALLOWED_ORIGIN", "*"),
        })
    }
}

fn parse_var<T>(name: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.parse::<T>().map_err(|e| ConfigError::InvalidEnvVar {
        name: name.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn applies_defaults() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("APP_URL", "http://localhost:8080/"),
        ]))
        .unwrap();

        assert_eq!(config.app_url, "http://localhost:8080");
        assert_eq!(config.bind_addr.to_string(), "0.0.0.0:8080");
        assert_eq!(config.media_root, PathBuf::from("./media"));
        assert_eq!(config.tokens, TokenSettings::default());
        assert_eq!(config.payment_provider, PaymentProvider::Simulated);
        assert_eq!(config.cors_allowed_origin, "*");
    }

    #[test]
    fn reports_missing_database_url() {
        let result = Config::from_lookup(lookup(&[("APP_URL", "http://localhost")]));

        assert!(matches!(result, Err(ConfigError::MissingEnvVar(name)) if name == "DATABASE_URL"));
    }

    #[test]
    fn paystack_requires_secret_key() {
        let result = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("APP_URL", "http://localhost"),
            ("PAYMENT_PROVIDER", "paystack"),
        ]));

        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(name)) if name == "PAYSTACK_SECRET_KEY")
        );
    }

    #[test]
    fn rejects_unparseable_ttl() {
        let result = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("APP_URL", "http://localhost"),
            ("ACCESS_TOKEN_TTL_HOURS", "soon"),
        ]));

        assert!(matches!(
            result,
            Err(ConfigError::InvalidEnvVar { name, .. }) if name == "ACCESS_TOKEN_TTL_HOURS"
        ));
    }
}
