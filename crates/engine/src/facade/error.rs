//! The facade-level error carried in a failed envelope.

use std::fmt;
use warband_domain::DomainError;
use warband_shared::ErrorKind;

use crate::use_cases::combat::CombatError;
use crate::use_cases::items::ItemError;
use crate::use_cases::session::SessionError;

/// Client-facing text for store failures. The underlying error is logged,
/// never returned.
pub const STORE_UNAVAILABLE_MESSAGE: &str = "The game store is unavailable - please try again";

/// A classified failure with a message safe to show a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineError {
    pub kind: ErrorKind,
    pub message: String,
}

impl EngineError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Build from a classified use-case error. Transient failures are logged
    /// with full detail and replaced by a generic message.
    fn classified<E: fmt::Display>(kind: ErrorKind, error: &E) -> Self {
        if kind == ErrorKind::Transient {
            tracing::error!(error = %error, "Store failure");
            return Self::new(kind, STORE_UNAVAILABLE_MESSAGE);
        }
        Self::new(kind, error.to_string())
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for EngineError {}

impl From<DomainError> for EngineError {
    fn from(e: DomainError) -> Self {
        let kind = if e.is_input_error() {
            ErrorKind::InvalidInput
        } else {
            ErrorKind::InvalidState
        };
        Self::new(kind, e.to_string())
    }
}

impl From<SessionError> for EngineError {
    fn from(e: SessionError) -> Self {
        Self::classified(e.kind(), &e)
    }
}

impl From<CombatError> for EngineError {
    fn from(e: CombatError) -> Self {
        Self::classified(e.kind(), &e)
    }
}

impl From<ItemError> for EngineError {
    fn from(e: ItemError) -> Self {
        Self::classified(e.kind(), &e)
    }
}

impl From<EngineError> for (ErrorKind, String) {
    fn from(e: EngineError) -> Self {
        (e.kind, e.message)
    }
}
