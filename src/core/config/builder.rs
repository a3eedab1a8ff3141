//! Builder for assembling a runtime [`Config`] from defaults, a configuration
//! file, and programmatic overrides, in that order of precedence.

use std::path::PathBuf;
use std::time::Duration;

use crate::core::config::file::ConfigFile;
use crate::core::config::{validation, Config};
use crate::core::error::Result;

/// Incrementally builds a [`Config`]. Later calls override earlier ones.
#[derive(Debug, Default, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Starts a builder from defaults plus the configuration file at `path`,
    /// or at the default search locations when `path` is `None`. A missing
    /// default-location file is not an error.
    pub fn from_config_file(path: Option<&std::path::Path>) -> Result<Self> {
        let mut builder = Self::new();
        if let Some((file, origin)) = crate::core::config::loading::load_config_file(path)? {
            builder = builder.apply_file(&file).loaded_config_path(Some(origin));
        }
        Ok(builder)
    }

    /// Applies every value present in a parsed configuration file on top of
    /// the current state. Absent fields leave the current value untouched.
    pub fn apply_file(mut self, file: &ConfigFile) -> Self {
        if let Some(secs) = file.dns.dns_timeout {
            self.config.dns_timeout = Duration::from_secs(secs);
        }
        if let Some(ref servers) = file.dns.dns_servers {
            self.config.dns_servers = servers.clone();
        }
        if let Some(secs) = file.smtp.smtp_timeout {
            self.config.smtp_timeout = Duration::from_secs(secs);
        }
        if let Some(port) = file.smtp.smtp_port {
            self.config.smtp_port = port;
        }
        if let Some(ref sender) = file.smtp.smtp_sender_email {
            self.config.smtp_sender_email = sender.clone();
        }
        if let Some(ref hello) = file.smtp.smtp_hello_domain {
            self.config.smtp_hello_domain = hello.clone();
        }
        if let Some(attempts) = file.smtp.max_verification_attempts {
            self.config.max_verification_attempts = attempts;
        }
        if let Some(hosts) = file.smtp.max_mx_hosts {
            self.config.max_mx_hosts = hosts;
        }
        if let Some(min) = file.smtp.min_sleep {
            self.config.sleep_between_attempts.0 = min;
        }
        if let Some(max) = file.smtp.max_sleep {
            self.config.sleep_between_attempts.1 = max;
        }
        if let Some(concurrency) = file.verification.max_concurrency {
            self.config.max_concurrency = concurrency;
        }
        if let Some(ref path) = file.disposable.extra_list_path {
            self.config.disposable_list_path = Some(PathBuf::from(path));
        }
        self
    }

    pub fn dns_timeout(mut self, timeout: Duration) -> Self {
        self.config.dns_timeout = timeout;
        self
    }

    pub fn dns_servers(mut self, servers: Vec<String>) -> Self {
        self.config.dns_servers = servers;
        self
    }

    pub fn smtp_timeout(mut self, timeout: Duration) -> Self {
        self.config.smtp_timeout = timeout;
        self
    }

    pub fn smtp_port(mut self, port: u16) -> Self {
        self.config.smtp_port = port;
        self
    }

    pub fn smtp_sender_email(mut self, sender: impl Into<String>) -> Self {
        self.config.smtp_sender_email = sender.into();
        self
    }

    pub fn smtp_hello_domain(mut self, hello: impl Into<String>) -> Self {
        self.config.smtp_hello_domain = hello.into();
        self
    }

    pub fn max_verification_attempts(mut self, attempts: u32) -> Self {
        self.config.max_verification_attempts = attempts;
        self
    }

    pub fn max_mx_hosts(mut self, hosts: usize) -> Self {
        self.config.max_mx_hosts = hosts;
        self
    }

    pub fn sleep_between_attempts(mut self, min: f32, max: f32) -> Self {
        self.config.sleep_between_attempts = (min, max);
        self
    }

    pub fn max_concurrency(mut self, concurrency: usize) -> Self {
        self.config.max_concurrency = concurrency;
        self
    }

    pub fn disposable_list_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.disposable_list_path = Some(path.into());
        self
    }

    pub(crate) fn loaded_config_path(mut self, path: Option<String>) -> Self {
        self.config.loaded_config_path = path;
        self
    }

    /// Validates the assembled configuration and returns it.
    pub fn build(self) -> Result<Config> {
        validation::validate(&self.config)?;
        Ok(self.config)
    }
}
