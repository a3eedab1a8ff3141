//! DNS-based domain routability checks.
//!
//! A domain is considered routable when it has MX records, or, failing that,
//! A/AAAA records (RFC 5321 implicit MX). Resolution failures of any kind are
//! evidence of an unroutable domain, not pipeline errors.

use std::net::IpAddr;

use trust_dns_resolver::config::{NameServerConfigGroup, ResolverConfig, ResolverOpts};
use trust_dns_resolver::TokioAsyncResolver;

use crate::core::config::Config;
use crate::core::error::Result;
use crate::verification::ResolveDomain;

/// Async resolver wrapper shared by the routability stage and the SMTP
/// prober. Cloning is cheap; the underlying resolver is reference-counted.
#[derive(Clone)]
pub struct DnsChecker {
    resolver: TokioAsyncResolver,
}

impl DnsChecker {
    /// Builds a resolver pointed at the configured name servers with the
    /// configured per-query timeout.
    pub fn new(config: &Config) -> Result<Self> {
        let ips: Vec<IpAddr> = config
            .dns_servers
            .iter()
            .map(|s| s.parse::<IpAddr>())
            .collect::<std::result::Result<_, _>>()?;

        let group = NameServerConfigGroup::from_ips_clear(&ips, 53, true);
        let resolver_config = ResolverConfig::from_parts(None, vec![], group);

        let mut opts = ResolverOpts::default();
        opts.timeout = config.dns_timeout;
        opts.attempts = 2;

        let resolver = TokioAsyncResolver::tokio(resolver_config, opts);
        tracing::debug!(
            target: "verification_dns",
            "DNS resolver initialized with {} server(s), timeout {:?}",
            ips.len(),
            config.dns_timeout
        );

        Ok(Self { resolver })
    }

    /// Returns the domain's MX exchange host names, sorted by preference
    /// (most preferred first). DNS failures surface as errors here; callers
    /// decide whether to absorb them.
    pub async fn mail_exchangers(&self, domain: &str) -> Result<Vec<String>> {
        let lookup = self.resolver.mx_lookup(domain).await?;
        let mut records: Vec<(u16, String)> = lookup
            .iter()
            .map(|mx| {
                let exchange = mx.exchange().to_utf8();
                (mx.preference(), exchange.trim_end_matches('.').to_string())
            })
            .collect();
        records.sort_by_key(|(preference, _)| *preference);
        Ok(records.into_iter().map(|(_, exchange)| exchange).collect())
    }

    /// Returns `true` when the domain resolves to at least one A or AAAA
    /// record. Resolution errors count as "no records".
    pub async fn has_address_records(&self, domain: &str) -> bool {
        match self.resolver.lookup_ip(domain).await {
            Ok(lookup) => lookup.iter().next().is_some(),
            Err(e) => {
                tracing::debug!(
                    target: "verification_dns",
                    "A/AAAA lookup failed for {}: {}",
                    domain,
                    e
                );
                false
            }
        }
    }
}

#[async_trait::async_trait]
impl ResolveDomain for DnsChecker {
    async fn has_routable_domain(&self, domain: &str) -> bool {
        match self.mail_exchangers(domain).await {
            Ok(exchangers) if !exchangers.is_empty() => {
                tracing::debug!(
                    target: "verification_dns",
                    "Domain {} has {} MX record(s)",
                    domain,
                    exchangers.len()
                );
                return true;
            }
            Ok(_) => {
                tracing::debug!(target: "verification_dns", "Domain {} has no MX records", domain);
            }
            Err(e) => {
                tracing::debug!(
                    target: "verification_dns",
                    "MX lookup failed for {}: {}",
                    domain,
                    e
                );
            }
        }
        self.has_address_records(domain).await
    }
}
