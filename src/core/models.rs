//! Core data types shared between the verification pipeline and its callers.

use serde::{Deserialize, Serialize};

/// Three-level classification produced by the verification pipeline.
///
/// `Risky` exists because a negative mailbox probe is weak evidence: many
/// servers refuse to confirm recipients, so "probe failed" must not be
/// reported as "address does not exist".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    Valid,
    Risky,
    Invalid,
}

impl std::fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            VerificationStatus::Valid => "valid",
            VerificationStatus::Risky => "risky",
            VerificationStatus::Invalid => "invalid",
        };
        f.write_str(label)
    }
}

/// Classification message for an address that failed the syntax check.
pub const MSG_INVALID_FORMAT: &str = "Invalid email format";
/// Classification message for a well-formed address whose domain has no
/// usable DNS records.
pub const MSG_DOMAIN_NOT_FOUND: &str = "Email format is valid, but domain not found";
/// Classification message for an address served by a disposable provider.
pub const MSG_DISPOSABLE: &str = "Valid format and domain exist, but disposable email detected";
/// Classification message for an address whose mailbox accepted the probe.
pub const MSG_VALID: &str = "Email is valid";
/// Classification message for an address whose mailbox could not be
/// confirmed.
pub const MSG_SMTP_RISKY: &str = "Domain exists but SMTP verification failed, email is risky";

/// The pipeline's output for a single address.
///
/// The serialized field names and status values are a stable contract
/// consumed by storage and UI layers; they must not change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub email: String,
    pub status: VerificationStatus,
    pub message: String,
}

impl VerificationResult {
    pub fn valid(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            status: VerificationStatus::Valid,
            message: MSG_VALID.to_string(),
        }
    }

    pub fn risky(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            status: VerificationStatus::Risky,
            message: MSG_SMTP_RISKY.to_string(),
        }
    }

    pub fn invalid(email: impl Into<String>, message: &str) -> Self {
        Self {
            email: email.into(),
            status: VerificationStatus::Invalid,
            message: message.to_string(),
        }
    }
}
