//! Defines the core runtime `Config` struct, its defaults, and related utilities.
//! Submodules handle loading, building, and validation.

pub(crate) mod builder;
pub(crate) mod file;
pub(crate) mod loading;
pub(crate) mod validation;

pub use builder::ConfigBuilder;
pub use file::ConfigFile;

use std::path::PathBuf;
use std::time::Duration;

/// Runtime configuration settings used by the email-triage core logic.
#[derive(Debug, Clone)]
pub struct Config {
    pub dns_timeout: Duration,
    pub dns_servers: Vec<String>,

    pub smtp_timeout: Duration,
    pub smtp_port: u16,
    pub smtp_sender_email: String,
    pub smtp_hello_domain: String,
    pub max_verification_attempts: u32,
    pub max_mx_hosts: usize,
    pub sleep_between_attempts: (f32, f32),

    pub max_concurrency: usize,

    pub disposable_list_path: Option<PathBuf>,

    pub loaded_config_path: Option<String>,
}

impl Config {
    fn build_default() -> Self {
        let dns_servers = vec![
            "8.8.8.8".to_string(),
            "8.8.4.4".to_string(),
            "1.1.1.1".to_string(),
            "1.0.0.1".to_string(),
        ];

        Config {
            dns_timeout: Duration::from_secs(5),
            dns_servers,
            smtp_timeout: Duration::from_secs(5),
            smtp_port: 25,
            smtp_sender_email: "verify-probe@example.com".to_string(),
            smtp_hello_domain: "example.com".to_string(),
            max_verification_attempts: 2,
            max_mx_hosts: 3,
            sleep_between_attempts: (0.1, 0.5),
            max_concurrency: std::thread::available_parallelism()
                .map_or(1, |n| n.get())
                .max(1),
            disposable_list_path: None,
            loaded_config_path: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::build_default()
    }
}

/// Utility function to get a random sleep duration based on [`Config`].
///
/// Uses the `sleep_between_attempts` setting from the provided configuration.
pub fn get_random_sleep_duration(config: &Config) -> Duration {
    use rand::Rng;
    let (min, max) = config.sleep_between_attempts;
    if min >= max {
        return Duration::from_secs_f32(min.max(0.0));
    }
    let duration_secs = rand::thread_rng().gen_range(min..max);
    Duration::from_secs_f32(duration_secs)
}
