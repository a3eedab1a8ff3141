//! Sanity checks applied to an assembled [`Config`](super::Config) before use.

use std::net::IpAddr;
use std::time::Duration;

use crate::core::config::Config;
use crate::core::error::{AppError, Result};

pub(crate) fn validate(config: &Config) -> Result<()> {
    if config.dns_timeout == Duration::ZERO {
        return Err(AppError::Config("dns_timeout must be non-zero".to_string()));
    }
    if config.smtp_timeout == Duration::ZERO {
        return Err(AppError::Config(
            "smtp_timeout must be non-zero".to_string(),
        ));
    }
    if config.dns_servers.is_empty() {
        return Err(AppError::Config(
            "at least one DNS server is required".to_string(),
        ));
    }
    for server in &config.dns_servers {
        server.parse::<IpAddr>().map_err(|e| {
            AppError::Config(format!("invalid DNS server address '{}': {}", server, e))
        })?;
    }
    if config.smtp_port == 0 {
        return Err(AppError::Config("smtp_port must be non-zero".to_string()));
    }
    if !config.smtp_sender_email.contains('@') {
        return Err(AppError::Config(format!(
            "smtp_sender_email '{}' is not an email address",
            config.smtp_sender_email
        )));
    }
    if config.smtp_hello_domain.trim().is_empty() {
        return Err(AppError::Config(
            "smtp_hello_domain must not be empty".to_string(),
        ));
    }
    if config.max_verification_attempts == 0 {
        return Err(AppError::Config(
            "max_verification_attempts must be at least 1".to_string(),
        ));
    }
    if config.max_mx_hosts == 0 {
        return Err(AppError::Config(
            "max_mx_hosts must be at least 1".to_string(),
        ));
    }
    let (min_sleep, max_sleep) = config.sleep_between_attempts;
    if min_sleep < 0.0 || max_sleep < min_sleep {
        return Err(AppError::Config(format!(
            "sleep range ({}, {}) is not a valid interval",
            min_sleep, max_sleep
        )));
    }
    if config.max_concurrency == 0 {
        return Err(AppError::Config(
            "max_concurrency must be at least 1".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn bad_dns_server_is_rejected() {
        let config = Config {
            dns_servers: vec!["not-an-ip".to_string()],
            ..Config::default()
        };
        assert!(matches!(validate(&config), Err(AppError::Config(_))));
    }

    #[test]
    fn sender_without_at_is_rejected() {
        let config = Config {
            smtp_sender_email: "postmaster".to_string(),
            ..Config::default()
        };
        assert!(matches!(validate(&config), Err(AppError::Config(_))));
    }

    #[test]
    fn inverted_sleep_range_is_rejected() {
        let config = Config {
            sleep_between_attempts: (0.5, 0.1),
            ..Config::default()
        };
        assert!(matches!(validate(&config), Err(AppError::Config(_))));
    }

    #[test]
    fn zero_attempts_is_rejected() {
        let config = Config {
            max_verification_attempts: 0,
            ..Config::default()
        };
        assert!(matches!(validate(&config), Err(AppError::Config(_))));
    }
}
