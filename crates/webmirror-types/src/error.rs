//! Error types and handling for WebMirror
//!
//! The error taxonomy mirrors the fault boundaries of the sync run:
//! configuration faults abort before any network activity, acquisition and
//! persistence faults degrade the run, and per-item transfer faults are
//! isolated to their item.

/// Main error type for WebMirror operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        /// Error message from the I/O operation
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message describing the configuration issue
        message: String,
    },

    /// Network error
    #[error("Network error: {message}")]
    Network {
        /// Error message describing the network issue
        message: String,
    },

    /// Remote listing could not be retrieved or understood
    #[error("Listing error: {message}")]
    Listing {
        /// Error message describing the listing issue
        message: String,
    },

    /// Sync status persistence error
    #[error("Status error: {message}")]
    Status {
        /// Error message describing the status-store issue
        message: String,
    },

    /// Synchronization error
    #[error("Synchronization error: {message}")]
    Sync {
        /// Error message describing the synchronization issue
        message: String,
    },

    /// Generic error with custom message
    #[error("{message}")]
    Other {
        /// Custom error message
        message: String,
    },
}

/// Error kind for categorizing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// I/O related errors
    Io,
    /// Configuration errors
    Config,
    /// Network errors
    Network,
    /// Listing acquisition/parse errors
    Listing,
    /// Status persistence errors
    Status,
    /// Synchronization errors
    Sync,
    /// Other errors
    Other,
}

impl Error {
    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io { .. } => ErrorKind::Io,
            Self::Config { .. } => ErrorKind::Config,
            Self::Network { .. } => ErrorKind::Network,
            Self::Listing { .. } => ErrorKind::Listing,
            Self::Status { .. } => ErrorKind::Status,
            Self::Sync { .. } => ErrorKind::Sync,
            Self::Other { .. } => ErrorKind::Other,
        }
    }

    /// Check if this error is recoverable by a later run.
    ///
    /// Network, listing, and persistence faults clear themselves on the next
    /// invocation because failed items are never folded into the status map.
    /// Configuration faults require user action first.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Config { .. } => false,
            Self::Network { .. }
            | Self::Listing { .. }
            | Self::Status { .. }
            | Self::Sync { .. }
            | Self::Io { .. }
            | Self::Other { .. } => true,
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create a new listing error
    pub fn listing<S: Into<String>>(message: S) -> Self {
        Self::Listing {
            message: message.into(),
        }
    }

    /// Create a new status persistence error
    pub fn status<S: Into<String>>(message: S) -> Self {
        Self::Status {
            message: message.into(),
        }
    }

    /// Create a new sync error
    pub fn sync<S: Into<String>>(message: S) -> Self {
        Self::Sync {
            message: message.into(),
        }
    }

    /// Create a new generic error
    pub fn other<S: Into<String>>(message: S) -> Self {
        Self::Other {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_error_kind_consistency(message in ".*") {
            let errors = vec![
                Error::Io { message: message.clone() },
                Error::Config { message: message.clone() },
                Error::Network { message: message.clone() },
                Error::Listing { message: message.clone() },
                Error::Status { message: message.clone() },
                Error::Sync { message: message.clone() },
                Error::Other { message: message.clone() },
            ];

            for error in errors {
                match error {
                    Error::Io { .. } => prop_assert_eq!(error.kind(), ErrorKind::Io),
                    Error::Config { .. } => prop_assert_eq!(error.kind(), ErrorKind::Config),
                    Error::Network { .. } => prop_assert_eq!(error.kind(), ErrorKind::Network),
                    Error::Listing { .. } => prop_assert_eq!(error.kind(), ErrorKind::Listing),
                    Error::Status { .. } => prop_assert_eq!(error.kind(), ErrorKind::Status),
                    Error::Sync { .. } => prop_assert_eq!(error.kind(), ErrorKind::Sync),
                    Error::Other { .. } => prop_assert_eq!(error.kind(), ErrorKind::Other),
                }
            }
        }
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "test file");
        let error = Error::from(io_error);

        assert_eq!(error.kind(), ErrorKind::Io);
        assert!(error.to_string().contains("test file"));
    }

    #[test]
    fn test_config_error_not_recoverable() {
        let error = Error::config("target directory does not exist");
        assert!(!error.is_recoverable());
    }

    #[test]
    fn test_network_error_recoverable() {
        let error = Error::network("connection reset by peer");
        assert!(error.is_recoverable());
    }
}
