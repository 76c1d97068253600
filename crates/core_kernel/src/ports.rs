//! Ports and Adapters Infrastructure
//!
//! Foundational types for the hexagonal (ports and adapters) layout used by the
//! domain crates. A domain defines a port trait extending [`DomainPort`];
//! adapters implement it against a concrete backend (a host ledger, an
//! in-memory map for tests, ...).
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │           Lifecycle service (domain)          │
//! └──────────────────────────────────────────────┘
//!                        │
//!                        ▼
//! ┌──────────────────────────────────────────────┐
//! │      Port traits (LedgerStore, ...)           │
//! │   defined in the domain, depend on kernel     │
//! └──────────────────────────────────────────────┘
//!              ▲                     ▲
//!     ┌────────┴────────┐   ┌────────┴────────┐
//!     │  Host ledger    │   │   In-memory     │
//!     │  adapter        │   │   adapter       │
//!     └─────────────────┘   └─────────────────┘
//! ```

use std::fmt;
use thiserror::Error;

/// Error type for port operations
///
/// Every adapter reports failures through this type so the domain sees the
/// same shape regardless of the backend.
#[derive(Debug, Error)]
pub enum PortError {
    /// The requested entity was not found
    #[error("Not found: {entity_type} with id {id}")]
    NotFound {
        entity_type: String,
        id: String,
    },

    /// The operation conflicts with existing data
    #[error("Conflict: {message}")]
    Conflict {
        message: String,
    },

    /// Connection to the underlying system failed
    #[error("Connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The operation timed out
    #[error("Timeout after {duration_ms}ms: {operation}")]
    Timeout {
        operation: String,
        duration_ms: u64,
    },

    /// The external system is unavailable
    #[error("Service unavailable: {service}")]
    ServiceUnavailable {
        service: String,
    },
}

impl PortError {
    /// Creates a NotFound error
    pub fn not_found(entity_type: impl Into<String>, id: impl fmt::Display) -> Self {
        PortError::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    /// Creates a Conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        PortError::Conflict {
            message: message.into(),
        }
    }

    /// Creates a Connection error
    pub fn connection(message: impl Into<String>) -> Self {
        PortError::Connection {
            message: message.into(),
            source: None,
        }
    }

    /// Returns true if this error indicates a transient failure that may succeed on retry
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            PortError::Connection { .. }
                | PortError::Timeout { .. }
                | PortError::ServiceUnavailable { .. }
        )
    }

    /// Returns true if this error indicates the entity was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, PortError::NotFound { .. })
    }

    /// Returns true if this error indicates a write conflict
    pub fn is_conflict(&self) -> bool {
        matches!(self, PortError::Conflict { .. })
    }
}

/// Marker trait for all domain ports
///
/// Port traits extend this marker so they are thread-safe and usable behind
/// `Arc<dyn ...>` in async code.
pub trait DomainPort: Send + Sync + 'static {}

/// Metadata about an invocation, carried into log spans
#[derive(Debug, Clone, Default)]
pub struct OperationMetadata {
    /// Correlation ID for tracing across systems (the host transaction id)
    pub correlation_id: Option<String>,
}

impl OperationMetadata {
    pub fn with_correlation_id(correlation_id: impl Into<String>) -> Self {
        Self {
            correlation_id: Some(correlation_id.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_error_not_found() {
        let error = PortError::not_found("Claim", "1005");
        assert!(error.is_not_found());
        assert!(!error.is_transient());
        assert!(error.to_string().contains("Claim"));
        assert!(error.to_string().contains("1005"));
    }

    #[test]
    fn test_port_error_transient() {
        let timeout = PortError::Timeout {
            operation: "put_state".to_string(),
            duration_ms: 5000,
        };
        assert!(timeout.is_transient());

        let unavailable = PortError::ServiceUnavailable {
            service: "ledger".to_string(),
        };
        assert!(unavailable.is_transient());

        let conflict = PortError::conflict("key exists");
        assert!(!conflict.is_transient());
        assert!(conflict.is_conflict());
    }

    #[test]
    fn test_operation_metadata() {
        let metadata = OperationMetadata::with_correlation_id("tx-123");
        assert_eq!(metadata.correlation_id.as_deref(), Some("tx-123"));
        assert_eq!(OperationMetadata::default().correlation_id, None);
    }
}
