//! Error code taxonomy.
//!
//! A closed set of seventeen classifications with stable integer values.
//! Every code has exactly one canonical snake_case name. Integers outside the
//! taxonomy are still representable (they arrive from the wire, from older
//! peers, or from careless callers) and display as `"unspecified"` instead of
//! failing.
//!
//! # Example
//!
//! ```rust
//! use errchain::ErrorCode;
//!
//! assert_eq!(ErrorCode::Conflict.value(), 6);
//! assert_eq!(ErrorCode::Conflict.to_string(), "conflict");
//! assert_eq!(ErrorCode::from(6), ErrorCode::Conflict);
//! assert_eq!(ErrorCode::from(42).to_string(), "unspecified");
//! ```

use crate::status::HttpStatus;
use std::fmt;
use std::str::FromStr;

/// Display name used for integers outside the taxonomy.
pub const UNSPECIFIED_NAME: &str = "unspecified";

/// Failure classification.
///
/// `Ok` at a chain node means "not set at this level"; resolution skips it and
/// keeps looking further down the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ErrorCode {
    /// Not an error; returned on success.
    #[default]
    Ok,
    /// The operation was cancelled, typically by the caller.
    Cancelled,
    /// Error from an unknown error space.
    Unknown,
    /// Validation failed.
    InvalidArgument,
    /// Deadline expired before the operation could complete.
    DeadlineExceeded,
    /// Entity does not exist.
    NotFound,
    /// Action cannot be performed in the current state.
    Conflict,
    /// Requester does not have permission to perform the action.
    NotAuthorized,
    /// A resource has been exhausted.
    ResourceExhausted,
    /// The system is not in the state required for the operation.
    FailedPrecondition,
    /// The operation was aborted.
    Aborted,
    /// The operation was attempted past the valid range.
    OutOfRange,
    /// The operation is not implemented.
    Unimplemented,
    /// Internal error.
    Internal,
    /// The system or operation is not available.
    Unavailable,
    /// Unrecoverable data loss or corruption.
    DataLoss,
    /// Requester is not authenticated.
    Unauthenticated,
    /// An integer outside the taxonomy, carried verbatim.
    ///
    /// `ErrorCode::from(i32)` only produces this variant for values that do
    /// not map to a named code.
    Unrecognized(i32),
}

impl ErrorCode {
    /// Every named code, in ascending value order.
    pub const ALL: [ErrorCode; 17] = [
        ErrorCode::Ok,
        ErrorCode::Cancelled,
        ErrorCode::Unknown,
        ErrorCode::InvalidArgument,
        ErrorCode::DeadlineExceeded,
        ErrorCode::NotFound,
        ErrorCode::Conflict,
        ErrorCode::NotAuthorized,
        ErrorCode::ResourceExhausted,
        ErrorCode::FailedPrecondition,
        ErrorCode::Aborted,
        ErrorCode::OutOfRange,
        ErrorCode::Unimplemented,
        ErrorCode::Internal,
        ErrorCode::Unavailable,
        ErrorCode::DataLoss,
        ErrorCode::Unauthenticated,
    ];

    /// Stable integer value.
    #[inline]
    pub const fn value(self) -> i32 {
        match self {
            ErrorCode::Ok => 0,
            ErrorCode::Cancelled => 1,
            ErrorCode::Unknown => 2,
            ErrorCode::InvalidArgument => 3,
            ErrorCode::DeadlineExceeded => 4,
            ErrorCode::NotFound => 5,
            ErrorCode::Conflict => 6,
            ErrorCode::NotAuthorized => 7,
            ErrorCode::ResourceExhausted => 8,
            ErrorCode::FailedPrecondition => 9,
            ErrorCode::Aborted => 10,
            ErrorCode::OutOfRange => 11,
            ErrorCode::Unimplemented => 12,
            ErrorCode::Internal => 13,
            ErrorCode::Unavailable => 14,
            ErrorCode::DataLoss => 15,
            ErrorCode::Unauthenticated => 16,
            ErrorCode::Unrecognized(value) => value,
        }
    }

    /// Map an integer onto the taxonomy. Total: unknown values become
    /// `Unrecognized`.
    #[inline]
    pub const fn from_value(value: i32) -> Self {
        match value {
            0 => ErrorCode::Ok,
            1 => ErrorCode::Cancelled,
            2 => ErrorCode::Unknown,
            3 => ErrorCode::InvalidArgument,
            4 => ErrorCode::DeadlineExceeded,
            5 => ErrorCode::NotFound,
            6 => ErrorCode::Conflict,
            7 => ErrorCode::NotAuthorized,
            8 => ErrorCode::ResourceExhausted,
            9 => ErrorCode::FailedPrecondition,
            10 => ErrorCode::Aborted,
            11 => ErrorCode::OutOfRange,
            12 => ErrorCode::Unimplemented,
            13 => ErrorCode::Internal,
            14 => ErrorCode::Unavailable,
            15 => ErrorCode::DataLoss,
            16 => ErrorCode::Unauthenticated,
            other => ErrorCode::Unrecognized(other),
        }
    }

    /// Canonical snake_case name, `"unspecified"` for unrecognized values.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            ErrorCode::Ok => "ok",
            ErrorCode::Cancelled => "cancelled",
            ErrorCode::Unknown => "unknown",
            ErrorCode::InvalidArgument => "invalid_argument",
            ErrorCode::DeadlineExceeded => "deadline_exceeded",
            ErrorCode::NotFound => "not_found",
            ErrorCode::Conflict => "conflict",
            ErrorCode::NotAuthorized => "not_authorized",
            ErrorCode::ResourceExhausted => "resource_exhausted",
            ErrorCode::FailedPrecondition => "failed_precondition",
            ErrorCode::Aborted => "aborted",
            ErrorCode::OutOfRange => "out_of_range",
            ErrorCode::Unimplemented => "unimplemented",
            ErrorCode::Internal => "internal",
            ErrorCode::Unavailable => "unavailable",
            ErrorCode::DataLoss => "data_loss",
            ErrorCode::Unauthenticated => "unauthenticated",
            ErrorCode::Unrecognized(_) => UNSPECIFIED_NAME,
        }
    }

    /// `true` only for `Ok`, the "unset" marker.
    #[inline]
    pub const fn is_ok(self) -> bool {
        matches!(self, ErrorCode::Ok)
    }

    /// `true` for the seventeen named codes.
    #[inline]
    pub const fn is_recognized(self) -> bool {
        !matches!(self, ErrorCode::Unrecognized(_))
    }

    /// Conventional HTTP status for this classification.
    ///
    /// `Ok` maps to 200 even though it never travels an error path.
    /// Unrecognized values map to 500.
    #[inline]
    pub const fn http_status(self) -> HttpStatus {
        let status = match self {
            ErrorCode::Ok => 200,
            ErrorCode::Cancelled => 499,
            ErrorCode::Unknown => 500,
            ErrorCode::InvalidArgument => 400,
            ErrorCode::DeadlineExceeded => 408,
            ErrorCode::NotFound => 404,
            ErrorCode::Conflict => 409,
            ErrorCode::NotAuthorized => 403,
            ErrorCode::ResourceExhausted => 429,
            ErrorCode::FailedPrecondition => 412,
            ErrorCode::Aborted => 409,
            ErrorCode::OutOfRange => 416,
            ErrorCode::Unimplemented => 501,
            ErrorCode::Internal => 500,
            ErrorCode::Unavailable => 503,
            ErrorCode::DataLoss => 500,
            ErrorCode::Unauthenticated => 401,
            ErrorCode::Unrecognized(_) => 500,
        };
        HttpStatus(status)
    }
}

impl From<i32> for ErrorCode {
    #[inline]
    fn from(value: i32) -> Self {
        Self::from_value(value)
    }
}

impl From<ErrorCode> for i32 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.value()
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ErrorCode {
    type Err = ParseErrorCodeError;

    /// Parse a canonical name. `"unspecified"` is rejected since it names no
    /// single value.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ErrorCode::ALL
            .iter()
            .copied()
            .find(|code| code.name() == s)
            .ok_or_else(|| ParseErrorCodeError {
                input: s.to_owned(),
            })
    }
}

/// Returned when a string is not the canonical name of any code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrorCodeError {
    input: String,
}

impl ParseErrorCodeError {
    /// The rejected input.
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for ParseErrorCodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a known error code name", self.input)
    }
}

impl std::error::Error for ParseErrorCodeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_match_taxonomy() {
        let expected = [
            "ok",
            "cancelled",
            "unknown",
            "invalid_argument",
            "deadline_exceeded",
            "not_found",
            "conflict",
            "not_authorized",
            "resource_exhausted",
            "failed_precondition",
            "aborted",
            "out_of_range",
            "unimplemented",
            "internal",
            "unavailable",
            "data_loss",
            "unauthenticated",
        ];

        for (code, name) in ErrorCode::ALL.iter().zip(expected) {
            assert_eq!(code.to_string(), name);
        }
    }

    #[test]
    fn values_are_stable_and_dense() {
        for (i, code) in ErrorCode::ALL.iter().enumerate() {
            assert_eq!(code.value(), i as i32);
            assert_eq!(ErrorCode::from(i as i32), *code);
            assert!(code.is_recognized());
        }
    }

    #[test]
    fn unrecognized_values_display_unspecified() {
        for value in [-1, 17, 99, i32::MAX, i32::MIN] {
            let code = ErrorCode::from(value);
            assert_eq!(code, ErrorCode::Unrecognized(value));
            assert_eq!(code.value(), value);
            assert_eq!(code.to_string(), "unspecified");
            assert!(!code.is_recognized());
        }
    }

    #[test]
    fn only_ok_is_ok() {
        assert!(ErrorCode::Ok.is_ok());
        assert!(ErrorCode::default().is_ok());
        assert!(!ErrorCode::Internal.is_ok());
        assert!(!ErrorCode::Unrecognized(0x7f).is_ok());
    }

    #[test]
    fn http_table() {
        let table = [
            (ErrorCode::Ok, 200),
            (ErrorCode::Cancelled, 499),
            (ErrorCode::Unknown, 500),
            (ErrorCode::InvalidArgument, 400),
            (ErrorCode::DeadlineExceeded, 408),
            (ErrorCode::NotFound, 404),
            (ErrorCode::Conflict, 409),
            (ErrorCode::NotAuthorized, 403),
            (ErrorCode::ResourceExhausted, 429),
            (ErrorCode::FailedPrecondition, 412),
            (ErrorCode::Aborted, 409),
            (ErrorCode::OutOfRange, 416),
            (ErrorCode::Unimplemented, 501),
            (ErrorCode::Internal, 500),
            (ErrorCode::Unavailable, 503),
            (ErrorCode::DataLoss, 500),
            (ErrorCode::Unauthenticated, 401),
            (ErrorCode::Unrecognized(1234), 500),
        ];

        for (code, status) in table {
            assert_eq!(code.http_status(), HttpStatus(status), "{code}");
        }
    }

    #[test]
    fn parse_canonical_names() {
        assert_eq!("not_found".parse::<ErrorCode>(), Ok(ErrorCode::NotFound));
        assert_eq!(
            "failed_precondition".parse::<ErrorCode>(),
            Ok(ErrorCode::FailedPrecondition)
        );

        let err = "unspecified".parse::<ErrorCode>().unwrap_err();
        assert_eq!(err.input(), "unspecified");
        assert!(err.to_string().contains("unspecified"));

        assert!("NotFound".parse::<ErrorCode>().is_err());
    }
}
