//! Shorthand for building and re-raising chains.
//!
//! # Usage
//!
//! ```rust
//! use errchain::{chain_err, ErrorCode, ResultExt};
//!
//! fn parse_port(raw: &str) -> errchain::Result<u16> {
//!     raw.parse::<u16>().wrap_op("config::parse_port")
//! }
//!
//! fn check_port(port: u16) -> errchain::Result<u16> {
//!     if port < 1024 {
//!         return Err(chain_err!(
//!             ErrorCode::InvalidArgument,
//!             "config::check_port",
//!             "port {} is privileged",
//!             port
//!         ));
//!     }
//!     Ok(port)
//! }
//!
//! let err = parse_port("http").unwrap_err();
//! assert_eq!(err.resolved_code(), ErrorCode::Internal);
//! assert_eq!(err.resolved_operation(), "config::parse_port");
//!
//! let err = check_port(80).unwrap_err();
//! assert_eq!(err.to_string(), "3: config::check_port: port 80 is privileged");
//! ```

use crate::{BoxError, ErrorChain, ErrorCode, ErrorOptions};
use std::borrow::Cow;

/// Create an [`ErrorChain`](crate::ErrorChain) with an operation label and a
/// formatted message.
///
/// # Arguments
/// - `$code`: anything convertible into `ErrorCode`
/// - `$op`: operation name (string literal)
/// - `$fmt`: message literal, optionally followed by format arguments
#[macro_export]
macro_rules! chain_err {
    ($code:expr, $op:literal, $msg:literal) => {
        $crate::ErrorChain::with_options(
            $code,
            $msg,
            $crate::ErrorOptions::new().with_operation($op),
        )
    };
    ($code:expr, $op:literal, $fmt:literal $(, $arg:expr)+ $(,)?) => {
        $crate::ErrorChain::with_options(
            $code,
            format!($fmt $(, $arg)+),
            $crate::ErrorOptions::new().with_operation($op),
        )
    };
}

/// Re-raise the error side of a `Result` as a chain node.
pub trait ResultExt<T> {
    /// Wrap the error, keeping its resolved facets.
    fn wrap_err(self) -> crate::Result<T>;

    /// Wrap the error under a new operation name.
    fn wrap_op(self, operation: impl Into<Cow<'static, str>>) -> crate::Result<T>;

    /// Replace the error with a fresh node that keeps it as its cause.
    fn or_code(
        self,
        code: ErrorCode,
        message: impl Into<Cow<'static, str>>,
    ) -> crate::Result<T>;
}

impl<T, E: Into<BoxError>> ResultExt<T> for Result<T, E> {
    fn wrap_err(self) -> crate::Result<T> {
        self.map_err(ErrorChain::wrap)
    }

    fn wrap_op(self, operation: impl Into<Cow<'static, str>>) -> crate::Result<T> {
        self.map_err(|err| ErrorChain::wrap_with_operation(operation, err))
    }

    fn or_code(
        self,
        code: ErrorCode,
        message: impl Into<Cow<'static, str>>,
    ) -> crate::Result<T> {
        self.map_err(|err| {
            ErrorChain::with_options(code, message, ErrorOptions::new().with_cause(err))
        })
    }
}
