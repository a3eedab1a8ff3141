//! Defines the structure mirroring the TOML configuration file format.

use serde::Deserialize;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub(crate) dns: DnsConfig,
    #[serde(default)]
    pub(crate) smtp: SmtpConfig,
    #[serde(default)]
    pub(crate) verification: VerificationConfig,
    #[serde(default)]
    pub(crate) disposable: DisposableConfig,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub(crate) struct DnsConfig {
    pub(crate) dns_timeout: Option<u64>,
    pub(crate) dns_servers: Option<Vec<String>>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub(crate) struct SmtpConfig {
    pub(crate) smtp_timeout: Option<u64>,
    pub(crate) smtp_port: Option<u16>,
    pub(crate) smtp_sender_email: Option<String>,
    pub(crate) smtp_hello_domain: Option<String>,
    pub(crate) max_verification_attempts: Option<u32>,
    pub(crate) max_mx_hosts: Option<usize>,
    pub(crate) min_sleep: Option<f32>,
    pub(crate) max_sleep: Option<f32>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub(crate) struct VerificationConfig {
    pub(crate) max_concurrency: Option<usize>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub(crate) struct DisposableConfig {
    pub(crate) extra_list_path: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_partial_file() {
        let raw = r#"
            [dns]
            dns_timeout = 3

            [smtp]
            smtp_sender_email = "probe@triage.test"
            max_verification_attempts = 3
        "#;
        let parsed: ConfigFile = toml::from_str(raw).expect("valid config file");
        assert_eq!(parsed.dns.dns_timeout, Some(3));
        assert_eq!(
            parsed.smtp.smtp_sender_email.as_deref(),
            Some("probe@triage.test")
        );
        assert_eq!(parsed.smtp.max_verification_attempts, Some(3));
        assert!(parsed.verification.max_concurrency.is_none());
        assert!(parsed.disposable.extra_list_path.is_none());
    }

    #[test]
    fn rejects_unknown_fields() {
        let raw = r#"
            [dns]
            nameservers = ["8.8.8.8"]
        "#;
        assert!(toml::from_str::<ConfigFile>(raw).is_err());
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let parsed: ConfigFile = toml::from_str("").expect("empty config file");
        assert!(parsed.dns.dns_servers.is_none());
        assert!(parsed.smtp.smtp_timeout.is_none());
    }
}
