//! Environment-driven application configuration.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use reqwest::Url;
use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_DATABASE_URL: &str = "smartlife.db";
const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1/";
const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_OPENAI_TIMEOUT_SECS: u64 = 30;

/// Configuration failures raised at bootstrap.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("SMARTLIFE_BIND_ADDR is not a socket address: {value}")]
    InvalidBindAddr { value: String },
    #[error("OPENAI_BASE_URL is not a valid URL: {value}")]
    InvalidBaseUrl { value: String },
    #[error("OPENAI_TIMEOUT_SECS is not a number of seconds: {value}")]
    InvalidTimeout { value: String },
}

/// Remote model settings; absent entirely when no API key is configured.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub base_url: Url,
    pub model: String,
    pub timeout: Duration,
}

/// Application settings resolved once at process start.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub database_url: String,
    pub openai: Option<OpenAiConfig>,
}

impl AppConfig {
    /// Read configuration from the environment.
    ///
    /// A missing `OPENAI_API_KEY` is not an error: the interview generator
    /// then serves the deterministic fallback set for every topic.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = parse_bind_addr(
            &env::var("SMARTLIFE_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_owned()),
        )?;
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_owned());

        let openai = match env::var("OPENAI_API_KEY") {
            Ok(api_key) if !api_key.trim().is_empty() => Some(OpenAiConfig {
                api_key,
                base_url: parse_base_url(
                    &env::var("OPENAI_BASE_URL")
                        .unwrap_or_else(|_| DEFAULT_OPENAI_BASE_URL.to_owned()),
                )?,
                model: env::var("OPENAI_MODEL")
                    .unwrap_or_else(|_| DEFAULT_OPENAI_MODEL.to_owned()),
                timeout: parse_timeout(&env::var("OPENAI_TIMEOUT_SECS").unwrap_or_else(|_| {
                    DEFAULT_OPENAI_TIMEOUT_SECS.to_string()
                }))?,
            }),
            _ => None,
        };

        Ok(Self {
            bind_addr,
            database_url,
            openai,
        })
    }
}

fn parse_bind_addr(value: &str) -> Result<SocketAddr, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidBindAddr {
        value: value.to_owned(),
    })
}

fn parse_base_url(value: &str) -> Result<Url, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidBaseUrl {
        value: value.to_owned(),
    })
}

fn parse_timeout(value: &str) -> Result<Duration, ConfigError> {
    value
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|_| ConfigError::InvalidTimeout {
            value: value.to_owned(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn parses_a_socket_address() {
        let addr = parse_bind_addr("0.0.0.0:9000").expect("valid address");
        assert_eq!(addr.port(), 9000);
    }

    #[rstest]
    #[case::no_port("localhost")]
    #[case::garbage("not-an-address")]
    fn rejects_bad_bind_addresses(#[case] value: &str) {
        assert!(matches!(
            parse_bind_addr(value),
            Err(ConfigError::InvalidBindAddr { .. })
        ));
    }

    #[test]
    fn rejects_non_numeric_timeouts() {
        assert!(matches!(
            parse_timeout("soon"),
            Err(ConfigError::InvalidTimeout { .. })
        ));
        assert_eq!(
            parse_timeout("45").expect("valid timeout"),
            Duration::from_secs(45)
        );
    }

    #[test]
    fn rejects_unparseable_base_urls() {
        assert!(matches!(
            parse_base_url("::not a url::"),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
    }
}
