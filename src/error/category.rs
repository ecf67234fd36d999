//! Error category classification.
//!
//! Gives callers one coarse switch for deciding what to tell the user and
//! whether trying again could help.

use std::fmt;

/// High-level categorization of errors for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Connection, timeout or mid-stream transport loss.
    /// Generally transient.
    Network,

    /// The backend refused or failed the request (HTTP 5xx and friends).
    Server,

    /// The request or the stream content is unusable (HTTP 4xx, a sender
    /// that never terminates its frames). Retrying will not help.
    Protocol,

    /// Invalid settings supplied by the user or environment.
    Configuration,
}

impl ErrorCategory {
    /// Returns true if errors in this category are generally transient.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::Network | ErrorCategory::Server)
    }

    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Server => "server",
            ErrorCategory::Protocol => "protocol",
            ErrorCategory::Configuration => "configuration",
        }
    }

    /// Returns suggested recovery actions for this category.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Check your connection to the assistant server and try again",
            ErrorCategory::Server => {
                "The assistant server may be experiencing issues. Please try again later"
            }
            ErrorCategory::Protocol => {
                "The assistant server sent a response this client cannot read"
            }
            ErrorCategory::Configuration => "Check the CHATWIRE_* environment variables",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_retryable() {
        assert!(ErrorCategory::Network.is_retryable());
        assert!(ErrorCategory::Server.is_retryable());
        assert!(!ErrorCategory::Protocol.is_retryable());
        assert!(!ErrorCategory::Configuration.is_retryable());
    }

    #[test]
    fn test_category_display() {
        assert_eq!(format!("{}", ErrorCategory::Network), "network");
        assert_eq!(format!("{}", ErrorCategory::Protocol), "protocol");
    }

    #[test]
    fn test_category_recovery_hint() {
        assert!(ErrorCategory::Network.recovery_hint().contains("connection"));
        assert!(ErrorCategory::Configuration.recovery_hint().contains("CHATWIRE_"));
    }
}
