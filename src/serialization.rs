//! Serialization views (feature `serde`).
//!
//! A node serializes as four named fields: `code` (integer), `message`,
//! `operation` and `cause`. The caller picks whether `cause` is a nested
//! record or left out through [`CauseMode`]. A foreign cause is written with
//! the resolution fallbacks, never with its own text.
//!
//! ```rust
//! use errchain::{CauseMode, ErrorChain, ErrorCode, ErrorOptions};
//!
//! let root = ErrorChain::new(ErrorCode::NotFound, "no such order");
//! let err = ErrorChain::wrap_with_operation("orders::get", root);
//!
//! let body = serde_json::to_value(err.record(CauseMode::Omit)).unwrap();
//! assert_eq!(
//!     body,
//!     serde_json::json!({"code": 5, "message": "no such order", "operation": "orders::get"})
//! );
//! ```

use crate::{Cause, ErrorChain, ErrorCode, ErrorOptions, ErrorRef, GENERIC_MESSAGE};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// How a record writes the `cause` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CauseMode {
    /// Write the cause as a nested record, recursively.
    #[default]
    Nested,
    /// Leave the `cause` field out.
    Omit,
}

/// Serializable view of one link and, depending on the mode, everything
/// below it.
#[derive(Debug, Clone, Copy)]
pub struct ErrorRecord<'a> {
    frame: ErrorRef<'a>,
    mode: CauseMode,
}

impl<'a> ErrorRecord<'a> {
    /// View `frame` with the given cause mode.
    #[inline]
    pub fn new(frame: ErrorRef<'a>, mode: CauseMode) -> Self {
        Self { frame, mode }
    }
}

impl ErrorChain {
    /// Serializable view of this chain.
    #[inline]
    pub fn record(&self, mode: CauseMode) -> ErrorRecord<'_> {
        ErrorRecord::new(ErrorRef::Chain(self), mode)
    }
}

impl Serialize for ErrorRecord<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let (code, message, operation, cause) = match self.frame {
            ErrorRef::Chain(node) => (node.code(), node.message(), node.operation(), node.cause()),
            ErrorRef::Foreign(_) => (ErrorCode::Internal, GENERIC_MESSAGE, "", None),
        };
        let nested = match self.mode {
            CauseMode::Nested => cause.map(|cause| ErrorRecord::new(cause.as_error_ref(), self.mode)),
            CauseMode::Omit => None,
        };

        let len = if nested.is_some() { 4 } else { 3 };
        let mut state = serializer.serialize_struct("ErrorChain", len)?;
        state.serialize_field("code", &code)?;
        state.serialize_field("message", message)?;
        state.serialize_field("operation", operation)?;
        if let Some(nested) = nested {
            state.serialize_field("cause", &nested)?;
        }
        state.end()
    }
}

impl Serialize for ErrorChain {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.record(CauseMode::Nested).serialize(serializer)
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.value())
    }
}

impl<'de> Deserialize<'de> for ErrorCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        i32::deserialize(deserializer).map(ErrorCode::from_value)
    }
}

/// Wire shape accepted when reading a chain back.
#[derive(Deserialize)]
struct RawRecord {
    code: ErrorCode,
    #[serde(default)]
    message: String,
    #[serde(default)]
    operation: String,
    #[serde(default)]
    cause: Option<Box<RawRecord>>,
}

impl RawRecord {
    fn into_chain(self) -> ErrorChain {
        let cause = self.cause.map(|cause| Cause::from(cause.into_chain()));
        let options = ErrorOptions {
            operation: Some(self.operation.into()),
            cause,
        };
        ErrorChain::with_options(self.code, self.message, options)
    }
}

impl<'de> Deserialize<'de> for ErrorChain {
    /// Rebuild a chain from nested records. Missing text fields default to
    /// empty; `code` is required.
    ///
    /// Each link is one level of nesting, so read-back depth is capped by the
    /// deserializer's nesting limit. With `serde_json` defaults that is 127
    /// links; deeper input is rejected with an error, never a panic.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawRecord::deserialize(deserializer).map(RawRecord::into_chain)
    }
}
