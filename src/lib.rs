//! # email_triage_core
//!
//! Classifies email addresses as `valid`, `risky` or `invalid` by running a
//! short pipeline of checks: syntax shape, domain routability (MX with A/AAAA
//! fallback), disposable-provider detection, and a best-effort SMTP mailbox
//! probe. The pipeline short-circuits on the first disqualifying stage, and a
//! negative mailbox probe downgrades to `risky` rather than `invalid` because
//! mail servers routinely refuse to confirm recipients.
//!
//! ```no_run
//! use email_triage_core::{Config, Verifier};
//!
//! #[tokio::main]
//! async fn main() -> email_triage_core::Result<()> {
//!     let verifier = Verifier::new(Config::default())?;
//!     let result = verifier.verify("user@example.com").await;
//!     println!("{}: {}", result.status, result.message);
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod verification;

pub use crate::core::config::{get_random_sleep_duration, Config, ConfigBuilder, ConfigFile};
pub use crate::core::error::{AppError, Result};
pub use crate::core::models::{
    VerificationResult, VerificationStatus, MSG_DISPOSABLE, MSG_DOMAIN_NOT_FOUND,
    MSG_INVALID_FORMAT, MSG_SMTP_RISKY, MSG_VALID,
};
pub use crate::verification::{
    DisposableList, DnsChecker, ProbeMailbox, ResolveDomain, SmtpProber, SmtpVerificationResult,
    Verifier,
};
