//! Membership check against a block-list of disposable/temporary email
//! providers. The list is built once at startup and shared read-only across
//! all concurrent verifications.

use std::collections::HashSet;
use std::fs;

use crate::core::config::Config;
use crate::core::error::{AppError, Result};

/// Providers shipped with the binary. One domain per line, `#` for comments.
static BUILTIN_LIST: &str = include_str!("../../data/disposable_domains.txt");

/// Immutable set of known disposable-provider domains.
///
/// Open-world: a domain absent from the list is treated as not disposable.
pub struct DisposableList {
    domains: HashSet<String>,
}

impl DisposableList {
    /// Builds the list from the embedded dataset only.
    pub fn builtin() -> Self {
        Self {
            domains: parse_list(BUILTIN_LIST),
        }
    }

    /// Builds the list from the embedded dataset plus the optional extra file
    /// named in the configuration.
    pub fn load(config: &Config) -> Result<Self> {
        let mut domains = parse_list(BUILTIN_LIST);
        let builtin_count = domains.len();

        if let Some(ref path) = config.disposable_list_path {
            let extra = fs::read_to_string(path).map_err(|e| {
                AppError::Initialization(format!(
                    "Failed to read disposable domain list '{}': {}",
                    path.display(),
                    e
                ))
            })?;
            domains.extend(parse_list(&extra));
        }

        let list = Self { domains };
        match config.disposable_list_path {
            Some(ref path) => tracing::info!(
                target: "verification",
                "Loaded disposable domain list: {} built-in, {} total after '{}'",
                builtin_count,
                list.len(),
                path.display()
            ),
            None => tracing::info!(
                target: "verification",
                "Loaded disposable domain list: {} built-in entries",
                list.len()
            ),
        }

        Ok(list)
    }

    /// Returns `true` when the address's domain (the part after the last
    /// `@`, or the whole input when there is none) is a listed disposable
    /// provider. Case-insensitive; pure lookup, no I/O.
    pub fn is_disposable(&self, address: &str) -> bool {
        let domain = address.rsplit_once('@').map_or(address, |(_, d)| d);
        self.domains.contains(&domain.to_ascii_lowercase())
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

fn parse_list(raw: &str) -> HashSet<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_ascii_lowercase)
        .collect()
}
