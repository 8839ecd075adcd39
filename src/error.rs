//! Error types for the moov library

use crate::call::CallStatus;
use thiserror::Error;

/// Result type alias for moov operations
pub type Result<T> = std::result::Result<T, MoovError>;

/// Main error type for moov operations
#[derive(Error, Debug)]
pub enum MoovError {
    /// Transport error (DNS, connect, TLS, timeout). Never classified.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Request URL could not be built
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// A header name or value could not be encoded
    #[error("Invalid header: {message}")]
    InvalidHeader { message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The API answered with a non-success status
    #[error("{status} ({code}): {message}")]
    Api {
        status: CallStatus,
        code: u16,
        message: String,
    },

    /// Bank account already linked, or the routing number is unknown
    #[error("duplicate bank account or invalid routing number")]
    DuplicateBankAccount,

    /// Micro-deposits were never sent for this bank account
    #[error("no account with the specified accountID was found or micro-deposits have not been sent for the source")]
    NoMicroDeposit,

    /// Confirmed micro-deposit amounts do not match
    #[error("micro-deposit amounts are incorrect")]
    AmountIncorrect,

    /// The idempotency key was already used for a different request
    #[error("idempotency key already used for a different request")]
    IdempotencyKey,

    /// The request body failed server-side validation
    #[error("request body failed validation")]
    RequestBody,
}

impl MoovError {
    /// Create an invalid header error
    pub fn invalid_header(message: impl Into<String>) -> Self {
        Self::InvalidHeader {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a classified API error
    pub fn api(status: CallStatus, code: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            code,
            message: message.into(),
        }
    }

    /// The classified status behind this error.
    ///
    /// Domain errors report the status they were mapped from. Transport,
    /// decode and configuration errors are unclassified and return `None`.
    pub fn call_status(&self) -> Option<CallStatus> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::DuplicateBankAccount | Self::AmountIncorrect | Self::IdempotencyKey => {
                Some(CallStatus::StateConflict)
            }
            Self::NoMicroDeposit => Some(CallStatus::NotFound),
            Self::RequestBody => Some(CallStatus::FailedValidation),
            Self::Http(_)
            | Self::Json(_)
            | Self::Url(_)
            | Self::InvalidHeader { .. }
            | Self::Config { .. } => None,
        }
    }

    /// Whether the failed call may be retried as-is.
    ///
    /// Unclassified errors are never reported as retryable; callers that want
    /// to retry transport failures must decide that themselves.
    pub fn is_retryable(&self) -> bool {
        self.call_status().is_some_and(|status| status.is_retryable())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let error = MoovError::api(CallStatus::NotFound, 404, "transfer not found");
        assert_eq!(error.to_string(), "not_found (404): transfer not found");
    }

    #[test]
    fn test_domain_errors_keep_their_status() {
        assert_eq!(
            MoovError::IdempotencyKey.call_status(),
            Some(CallStatus::StateConflict)
        );
        assert_eq!(
            MoovError::NoMicroDeposit.call_status(),
            Some(CallStatus::NotFound)
        );
        assert_eq!(
            MoovError::RequestBody.call_status(),
            Some(CallStatus::FailedValidation)
        );
        assert!(!MoovError::DuplicateBankAccount.is_retryable());
    }

    #[test]
    fn test_retryable_follows_status() {
        assert!(MoovError::api(CallStatus::RateLimited, 429, "slow down").is_retryable());
        assert!(MoovError::api(CallStatus::ServerError, 503, "unavailable").is_retryable());
        assert!(!MoovError::api(CallStatus::BadRequest, 400, "bad").is_retryable());
    }

    #[test]
    fn test_unclassified_errors() {
        let error = MoovError::config("missing secret key");
        assert_eq!(error.call_status(), None);
        assert!(!error.is_retryable());
        assert_eq!(error.to_string(), "Configuration error: missing secret key");
    }
}
