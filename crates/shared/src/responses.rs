//! The result envelope returned by every engine operation.
//!
//! Success serializes as `{"ok": true, "data": ...}` and failure as
//! `{"ok": false, "errorKind": "...", "message": "..."}`.

use serde::de::{self, Deserializer};
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Error Kinds
// =============================================================================

/// Failure classification carried in the envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// A referenced game, player, or unit does not exist
    NotFound,
    /// Duplicate username, or a player/game mismatch
    Conflict,
    /// Malformed identifiers, unknown item, bad name
    InvalidInput,
    /// Action not permitted given current entity state
    InvalidState,
    /// Store unavailable or contention not resolved within the retry budget
    Transient,
    /// Unknown variant for forward compatibility
    #[serde(other)]
    Unknown,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "NotFound",
            Self::Conflict => "Conflict",
            Self::InvalidInput => "InvalidInput",
            Self::InvalidState => "InvalidState",
            Self::Transient => "Transient",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// NOTE: HTTP status mapping lives in the engine's HTTP adapter, not here.

// =============================================================================
// Envelope
// =============================================================================

/// Result of an engine operation
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope<T> {
    /// Operation succeeded
    Ok(T),
    /// Operation failed
    Err {
        kind: ErrorKind,
        /// Human-readable error message
        message: String,
    },
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Envelope::Ok(data)
    }

    pub fn err(kind: ErrorKind, message: impl Into<String>) -> Self {
        Envelope::Err {
            kind,
            message: message.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Envelope::Ok(_))
    }

    pub fn is_err(&self) -> bool {
        matches!(self, Envelope::Err { .. })
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Envelope::Ok(data) => Some(data),
            Envelope::Err { .. } => None,
        }
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            Envelope::Ok(data) => Some(data),
            Envelope::Err { .. } => None,
        }
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            Envelope::Ok(_) => None,
            Envelope::Err { kind, .. } => Some(*kind),
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Envelope::Ok(_) => None,
            Envelope::Err { message, .. } => Some(message),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Envelope<U> {
        match self {
            Envelope::Ok(data) => Envelope::Ok(f(data)),
            Envelope::Err { kind, message } => Envelope::Err { kind, message },
        }
    }
}

impl<T, E> From<Result<T, E>> for Envelope<T>
where
    E: Into<(ErrorKind, String)>,
{
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => Envelope::Ok(data),
            Err(e) => {
                let (kind, message) = e.into();
                Envelope::Err { kind, message }
            }
        }
    }
}

impl<T: Serialize> Serialize for Envelope<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Envelope::Ok(data) => {
                let mut state = serializer.serialize_struct("Envelope", 2)?;
                state.serialize_field("ok", &true)?;
                state.serialize_field("data", data)?;
                state.end()
            }
            Envelope::Err { kind, message } => {
                let mut state = serializer.serialize_struct("Envelope", 3)?;
                state.serialize_field("ok", &false)?;
                state.serialize_field("errorKind", kind)?;
                state.serialize_field("message", message)?;
                state.end()
            }
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEnvelope<T> {
    ok: bool,
    data: Option<T>,
    error_kind: Option<ErrorKind>,
    message: Option<String>,
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Envelope<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawEnvelope::<T>::deserialize(deserializer)?;
        if raw.ok {
            raw.data
                .map(Envelope::Ok)
                .ok_or_else(|| de::Error::missing_field("data"))
        } else {
            Ok(Envelope::Err {
                kind: raw.error_kind.unwrap_or(ErrorKind::Unknown),
                message: raw.message.unwrap_or_default(),
            })
        }
    }
}
