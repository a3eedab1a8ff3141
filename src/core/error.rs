//! Defines the custom error types for the email-triage application.

use std::{io, net::AddrParseError};
use thiserror::Error;

/// The primary error type for the email classification process.
#[derive(Error, Debug)]
pub enum AppError {
    /// Error occurring during configuration loading or validation.
    #[error("Configuration Error: {0}")]
    Config(String),

    /// Error initializing necessary components (e.g., resolver, disposable list).
    #[error("Initialization Error: {0}")]
    Initialization(String),

    /// Error related to file input/output operations.
    #[error("IO Error: {0}")]
    Io(#[from] io::Error),

    /// Error during JSON serialization or deserialization.
    #[error("JSON Error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error during DNS resolution.
    #[error("DNS Resolution Error: {0}")]
    Dns(#[from] trust_dns_resolver::error::ResolveError),

    /// Error parsing an IP address or socket address.
    #[error("Address Parsing Error: {0}")]
    AddrParse(#[from] AddrParseError),

    /// The mail server replied with something the probe could not work with.
    #[error("SMTP Protocol Error: {0}")]
    SmtpProtocol(String),

    /// An SMTP connect, read or write exceeded its deadline.
    #[error("SMTP Timeout: {0}")]
    SmtpTimeout(String),

    /// Indicates insufficient input data to proceed (e.g., no addresses given).
    #[error("Insufficient Input Data: {0}")]
    InsufficientInput(String),

    /// An underlying error that doesn't fit other categories, using anyhow.
    #[error("Generic Error: {0}")]
    Generic(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;
