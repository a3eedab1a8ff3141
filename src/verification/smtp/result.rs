//! Defines the result type for SMTP mailbox probe operations.

/// Represents the outcome of an SMTP probe attempt for an email address.
#[derive(Debug, Clone)]
pub struct SmtpVerificationResult {
    /// True = mailbox accepted, False = mailbox rejected, None = inconclusive.
    pub exists: Option<bool>,
    /// Detailed message about the outcome.
    pub message: String,
    /// Suggests if retrying might yield a different result (e.g., greylisting).
    pub should_retry: bool,
}

impl SmtpVerificationResult {
    /// Creates a conclusive result (server affirmatively accepted or rejected
    /// the recipient).
    pub fn conclusive(exists: bool, message: String) -> Self {
        Self {
            exists: Some(exists),
            message,
            should_retry: false,
        }
    }

    /// Creates an inconclusive result where retrying might help.
    pub fn inconclusive_retry(message: String) -> Self {
        Self {
            exists: None,
            message,
            should_retry: true,
        }
    }

    /// Creates an inconclusive result where retrying is unlikely to help.
    pub fn inconclusive_no_retry(message: String) -> Self {
        Self {
            exists: None,
            message,
            should_retry: false,
        }
    }
}
