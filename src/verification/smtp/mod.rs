//! Best-effort mailbox existence probe.
//!
//! Connects to the recipient domain's mail servers and walks the minimal
//! dialogue (EHLO, MAIL FROM, RCPT TO, QUIT) needed to ask whether the
//! recipient would be accepted, without ever sending a message. Many servers
//! refuse to answer honestly, so a negative outcome is weak evidence; the
//! classifier treats it accordingly.

mod result;
mod session;

pub use result::SmtpVerificationResult;

use std::sync::Arc;
use std::time::Instant;

use crate::core::config::{get_random_sleep_duration, Config};
use crate::core::error::{AppError, Result};
use crate::verification::dns::DnsChecker;
use crate::verification::ProbeMailbox;

use session::SmtpSession;

/// Probes mail servers for recipient acceptance. Stateless across calls;
/// safe to share between concurrent verifications.
pub struct SmtpProber {
    config: Arc<Config>,
    dns: DnsChecker,
}

impl SmtpProber {
    pub fn new(config: Arc<Config>, dns: DnsChecker) -> Self {
        Self { config, dns }
    }

    /// MX hosts to try, most preferred first, capped by configuration. A
    /// domain that reached this stage without MX records gets probed directly
    /// (implicit-MX fallback).
    async fn candidate_hosts(&self, domain: &str) -> Vec<String> {
        match self.dns.mail_exchangers(domain).await {
            Ok(hosts) if !hosts.is_empty() => {
                hosts.into_iter().take(self.config.max_mx_hosts).collect()
            }
            Ok(_) => vec![domain.to_string()],
            Err(e) => {
                tracing::debug!(
                    target: "verification_smtp",
                    "MX lookup failed for {}, probing domain host directly: {}",
                    domain,
                    e
                );
                vec![domain.to_string()]
            }
        }
    }

    /// Runs the probe dialogue against one host. Protocol-level surprises
    /// surface as errors; recipient verdicts surface as results.
    async fn probe_host(&self, host: &str, address: &str) -> Result<SmtpVerificationResult> {
        let mut session = SmtpSession::connect(
            host,
            self.config.smtp_port,
            self.config.smtp_timeout,
            self.config.smtp_timeout,
        )
        .await?;

        let greeting = session.read_reply().await?;
        if !greeting.is_positive_completion() {
            return Err(AppError::SmtpProtocol(format!(
                "{} greeted with '{}'",
                host, greeting
            )));
        }

        let ehlo = session
            .command(&format!("EHLO {}", self.config.smtp_hello_domain))
            .await?;
        if !ehlo.is_positive_completion() {
            let helo = session
                .command(&format!("HELO {}", self.config.smtp_hello_domain))
                .await?;
            if !helo.is_positive_completion() {
                return Err(AppError::SmtpProtocol(format!(
                    "{} rejected both EHLO and HELO ('{}')",
                    host, helo
                )));
            }
        }

        let mail = session
            .command(&format!("MAIL FROM:<{}>", self.config.smtp_sender_email))
            .await?;
        if mail.is_transient_failure() {
            let _ = session.command("QUIT").await;
            return Ok(SmtpVerificationResult::inconclusive_retry(format!(
                "{} deferred MAIL FROM ({})",
                host, mail
            )));
        }
        if !mail.is_positive_completion() {
            let _ = session.command("QUIT").await;
            return Err(AppError::SmtpProtocol(format!(
                "{} rejected MAIL FROM ('{}')",
                host, mail
            )));
        }

        let rcpt = session.command(&format!("RCPT TO:<{}>", address)).await?;
        let outcome = if rcpt.is_positive_completion() {
            SmtpVerificationResult::conclusive(
                true,
                format!("{} accepted recipient ({})", host, rcpt),
            )
        } else if rcpt.is_permanent_failure() {
            SmtpVerificationResult::conclusive(
                false,
                format!("{} rejected recipient ({})", host, rcpt),
            )
        } else if rcpt.is_transient_failure() {
            SmtpVerificationResult::inconclusive_retry(format!(
                "{} deferred recipient ({})",
                host, rcpt
            ))
        } else {
            SmtpVerificationResult::inconclusive_no_retry(format!(
                "{} gave an unexpected RCPT reply ({})",
                host, rcpt
            ))
        };

        let _ = session.command("QUIT").await;
        Ok(outcome)
    }
}

#[async_trait::async_trait]
impl ProbeMailbox for SmtpProber {
    async fn probe_mailbox(&self, address: &str) -> SmtpVerificationResult {
        let task_label = format!("[SMTP: {}]", address);
        let start_time = Instant::now();

        let Some((_, domain)) = address.rsplit_once('@') else {
            return SmtpVerificationResult::inconclusive_no_retry(
                "address has no domain part".to_string(),
            );
        };

        let mut last = SmtpVerificationResult::inconclusive_no_retry(
            "no mail server could be probed".to_string(),
        );

        'attempts: for attempt in 1..=self.config.max_verification_attempts {
            if attempt > 1 {
                tokio::time::sleep(get_random_sleep_duration(&self.config)).await;
            }
            tracing::debug!(
                target: "verification_smtp",
                "{} Attempt {}/{}",
                task_label,
                attempt,
                self.config.max_verification_attempts
            );

            for host in self.candidate_hosts(domain).await {
                match self.probe_host(&host, address).await {
                    Ok(outcome) => {
                        if outcome.exists.is_some() {
                            tracing::debug!(
                                target: "verification_smtp",
                                "{} Conclusive after {:.2?}: {}",
                                task_label,
                                start_time.elapsed(),
                                outcome.message
                            );
                            return outcome;
                        }
                        last = outcome;
                    }
                    Err(e) => {
                        tracing::debug!(
                            target: "verification_smtp",
                            "{} Probe of {} failed: {}",
                            task_label,
                            host,
                            e
                        );
                        last = SmtpVerificationResult::inconclusive_no_retry(format!(
                            "{}: {}",
                            host, e
                        ));
                    }
                }
            }

            if !last.should_retry {
                break 'attempts;
            }
        }

        tracing::debug!(
            target: "verification_smtp",
            "{} Inconclusive after {:.2?}: {}",
            task_label,
            start_time.elapsed(),
            last.message
        );
        last
    }
}
