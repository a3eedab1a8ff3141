//! The verification pipeline: sequences the individual checks and maps their
//! outcomes onto the `valid` / `risky` / `invalid` classification.

pub mod disposable;
pub mod dns;
pub mod smtp;
pub mod syntax;

pub use disposable::DisposableList;
pub use dns::DnsChecker;
pub use smtp::{SmtpProber, SmtpVerificationResult};

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::{FutureExt, StreamExt};

use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::models::{
    VerificationResult, MSG_DISPOSABLE, MSG_DOMAIN_NOT_FOUND, MSG_INVALID_FORMAT,
};

/// Answers whether a domain has usable mail routing (MX records, or A/AAAA
/// as a fallback). Implementations absorb resolution failures into `false`.
#[async_trait::async_trait]
pub trait ResolveDomain: Send + Sync {
    async fn has_routable_domain(&self, domain: &str) -> bool;
}

/// Best-effort check whether the destination mail server would accept a
/// message for `address`. Implementations never fail; uncertainty is encoded
/// in the returned result.
#[async_trait::async_trait]
pub trait ProbeMailbox: Send + Sync {
    async fn probe_mailbox(&self, address: &str) -> SmtpVerificationResult;
}

/// The verification pipeline. Generic over its network-bound collaborators
/// so they can be substituted in tests; production code uses the defaults.
pub struct Verifier<R = DnsChecker, P = SmtpProber> {
    config: Arc<Config>,
    resolver: R,
    disposable: Arc<DisposableList>,
    prober: P,
}

impl Verifier {
    /// Builds a verifier with the real DNS checker, the disposable list named
    /// by the configuration, and the SMTP prober.
    pub fn new(config: Config) -> Result<Self> {
        let config = Arc::new(config);
        let resolver = DnsChecker::new(&config)?;
        let disposable = Arc::new(DisposableList::load(&config)?);
        let prober = SmtpProber::new(Arc::clone(&config), resolver.clone());
        Ok(Self {
            config,
            resolver,
            disposable,
            prober,
        })
    }
}

impl<R: ResolveDomain, P: ProbeMailbox> Verifier<R, P> {
    /// Assembles a verifier from explicit parts.
    pub fn with_components(
        config: Config,
        resolver: R,
        disposable: Arc<DisposableList>,
        prober: P,
    ) -> Self {
        Self {
            config: Arc::new(config),
            resolver,
            disposable,
            prober,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Classifies one address. Stages run strictly in order and the first
    /// disqualifying stage ends the run; later stages are never invoked.
    /// Never fails and never panics on malformed input.
    pub async fn verify(&self, address: &str) -> VerificationResult {
        let address = address.trim();
        let task_label = format!("[Verify: {}]", address);

        if !syntax::is_valid_syntax(address) {
            tracing::info!(target: "verification", "{} invalid: bad format", task_label);
            return VerificationResult::invalid(address, MSG_INVALID_FORMAT);
        }

        // The syntax check guarantees exactly one '@' with a non-empty
        // domain after it.
        let domain = address.rsplit_once('@').map(|(_, d)| d).unwrap_or_default();

        if !self.resolver.has_routable_domain(domain).await {
            tracing::info!(target: "verification", "{} invalid: domain not found", task_label);
            return VerificationResult::invalid(address, MSG_DOMAIN_NOT_FOUND);
        }

        if self.disposable.is_disposable(address) {
            tracing::info!(target: "verification", "{} invalid: disposable domain", task_label);
            return VerificationResult::invalid(address, MSG_DISPOSABLE);
        }

        let probe = self.prober.probe_mailbox(address).await;
        match probe.exists {
            Some(true) => {
                tracing::info!(target: "verification", "{} valid: {}", task_label, probe.message);
                VerificationResult::valid(address)
            }
            _ => {
                tracing::info!(target: "verification", "{} risky: {}", task_label, probe.message);
                VerificationResult::risky(address)
            }
        }
    }

    /// Verifies every address concurrently and returns one result per input,
    /// in input order, regardless of completion order. A failure or panic in
    /// one address's pipeline degrades that entry to `risky` and cannot
    /// affect any other entry.
    pub async fn verify_batch(&self, addresses: &[String]) -> Vec<VerificationResult> {
        let concurrency = self.config.max_concurrency.max(1);
        tracing::info!(
            target: "verification",
            "Verifying batch of {} address(es), concurrency {}",
            addresses.len(),
            concurrency
        );

        futures::stream::iter(addresses.iter().map(|address| {
            let fallback = address.trim().to_string();
            AssertUnwindSafe(self.verify(address))
                .catch_unwind()
                .map(move |outcome| {
                    outcome.unwrap_or_else(|_| {
                        tracing::error!(
                            target: "verification",
                            "[Verify: {}] pipeline panicked, degrading to risky",
                            fallback
                        );
                        VerificationResult::risky(fallback)
                    })
                })
        }))
        .buffered(concurrency)
        .collect()
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::VerificationStatus;

    struct AlwaysRoutable;

    #[async_trait::async_trait]
    impl ResolveDomain for AlwaysRoutable {
        async fn has_routable_domain(&self, _domain: &str) -> bool {
            true
        }
    }

    struct AlwaysAccepts;

    #[async_trait::async_trait]
    impl ProbeMailbox for AlwaysAccepts {
        async fn probe_mailbox(&self, _address: &str) -> SmtpVerificationResult {
            SmtpVerificationResult::conclusive(true, "accepted".to_string())
        }
    }

    fn verifier() -> Verifier<AlwaysRoutable, AlwaysAccepts> {
        Verifier::with_components(
            Config::default(),
            AlwaysRoutable,
            Arc::new(DisposableList::builtin()),
            AlwaysAccepts,
        )
    }

    #[tokio::test]
    async fn input_is_trimmed_before_classification() {
        let result = verifier().verify("  user@example.com  ").await;
        assert_eq!(result.email, "user@example.com");
        assert_eq!(result.status, VerificationStatus::Valid);
    }

    #[tokio::test]
    async fn empty_batch_yields_empty_results() {
        let results = verifier().verify_batch(&[]).await;
        assert!(results.is_empty());
    }
}
