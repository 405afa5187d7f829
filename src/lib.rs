//! # errchain
//!
//! Structured error chains for application code.
//!
//! Every failure carries four facets:
//!
//! 1. **code**: a stable classification from a closed taxonomy ([`ErrorCode`])
//! 2. **message**: human-readable text safe to show a caller
//! 3. **operation**: the call site that raised or re-labeled the failure
//! 4. **cause**: the failure it wraps, one of ours or a foreign error
//!
//! Each layer of a call stack wraps what it received and may stamp its own
//! operation name. Callers later recover the facets from any error value,
//! whatever its origin, by walking the chain.
//!
//! ## Resolution Rules
//!
//! - `Ok` at a node means "unset here"; the walk continues into the cause
//! - A chain that never sets a code resolves to `Internal`, never to `Ok`
//! - Foreign errors answer nothing; their text is never returned as a message
//! - Every function is total and never panics
//!
//! ## Quick Start
//!
//! ```rust
//! use errchain::{ErrorChain, ErrorCode, ErrorOptions, Result};
//!
//! fn find_user(_id: u64) -> Result<String> {
//!     Err(ErrorChain::with_options(
//!         ErrorCode::NotFound,
//!         "user does not exist",
//!         ErrorOptions::new().with_operation("users::find"),
//!     ))
//! }
//!
//! fn handle_request() -> Result<String> {
//!     find_user(7).map_err(|e| ErrorChain::wrap_with_operation("api::get_user", e))
//! }
//!
//! let err = handle_request().unwrap_err();
//! assert_eq!(err.resolved_code(), ErrorCode::NotFound);
//! assert_eq!(err.resolved_message(), "user does not exist");
//! assert_eq!(err.resolved_operation(), "api::get_user");
//! assert_eq!(err.to_string(), "5: api::get_user: 5: users::find: user does not exist");
//! assert_eq!(err.http_status().as_u16(), 404);
//! ```
//!
//! ## Features
//!
//! - `serde`: serialization views over chains, see [`ErrorRecord`]
//! - `tracing`: emit chains as `tracing` events via [`ChainLog::emit`]

#![warn(missing_docs)]
#![warn(clippy::all)]

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

pub mod codes;
pub mod convenience;
pub mod logging;
pub mod models;
pub mod resolve;
#[cfg(feature = "serde")]
pub mod serialization;
pub mod status;

pub use codes::*;
pub use convenience::*;
pub use logging::*;
pub use models::*;
pub use resolve::*;
#[cfg(feature = "serde")]
pub use serialization::*;
pub use status::*;

/// Type alias for Results using our error type.
pub type Result<T> = std::result::Result<T, ErrorChain>;

/// One link of a causal error chain.
///
/// Nodes are immutable once built. Chains grow by wrapping, and each node
/// exclusively owns its cause, so a chain can never contain a cycle.
///
/// # Construction
///
/// - [`ErrorChain::new`]: a fresh leaf failure
/// - [`ErrorChain::with_options`]: a fresh failure with an operation and/or cause
/// - [`ErrorChain::wrap`]: re-raise an existing failure, keeping its facets
/// - [`ErrorChain::wrap_with_operation`]: re-raise under a new operation name
///
/// # Rendering
///
/// `Display` produces a single-line trace: the numeric code (when this node
/// sets one), the operation (when non-empty), then the rendering of the cause
/// or, at the bottom, the message.
///
/// ```rust
/// use errchain::{ErrorChain, ErrorCode, ErrorOptions};
///
/// let err = ErrorChain::with_options(
///     ErrorCode::Conflict,
///     "An internal error",
///     ErrorOptions::new().with_operation("TestError"),
/// );
/// assert_eq!(err.to_string(), "6: TestError: An internal error");
/// ```
#[must_use = "errors should be handled or logged"]
#[derive(Debug)]
pub struct ErrorChain {
    code: ErrorCode,
    message: Cow<'static, str>,
    operation: Cow<'static, str>,
    cause: Option<Cause>,
}

impl ErrorChain {
    /// Create a leaf failure with no operation and no cause.
    ///
    /// Any integer is accepted as a code; values outside the taxonomy are
    /// kept and display as `"unspecified"`.
    #[inline]
    pub fn new(code: impl Into<ErrorCode>, message: impl Into<Cow<'static, str>>) -> Self {
        Self::with_options(code, message, ErrorOptions::default())
    }

    /// Create a failure with optional named settings applied.
    #[inline]
    pub fn with_options(
        code: impl Into<ErrorCode>,
        message: impl Into<Cow<'static, str>>,
        options: ErrorOptions,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            operation: options.operation.unwrap_or_default(),
            cause: options.cause,
        }
    }

    /// Wrap any error, copying its resolved code, message and operation into
    /// the new node.
    ///
    /// Resolving through the wrapper gives the same answers as resolving the
    /// argument directly; the extra link only records the re-raise site.
    pub fn wrap(err: impl Into<BoxError>) -> Self {
        Self::from_cause(None, Cause::new(err))
    }

    /// Wrap any error under a new operation name, keeping its resolved code
    /// and message.
    ///
    /// ```rust
    /// use errchain::{ErrorChain, ErrorCode, ErrorOptions};
    ///
    /// let inner = ErrorChain::with_options(
    ///     ErrorCode::Conflict,
    ///     "version mismatch",
    ///     ErrorOptions::new().with_operation("store::put"),
    /// );
    /// let outer = ErrorChain::wrap_with_operation("api::update", inner);
    ///
    /// assert_eq!(outer.resolved_operation(), "api::update");
    /// assert_eq!(outer.resolved_code(), ErrorCode::Conflict);
    /// assert_eq!(outer.cause().and_then(|c| c.as_chain()).map(|c| c.operation()), Some("store::put"));
    /// ```
    pub fn wrap_with_operation(
        operation: impl Into<Cow<'static, str>>,
        err: impl Into<BoxError>,
    ) -> Self {
        Self::from_cause(Some(operation.into()), Cause::new(err))
    }

    fn from_cause(operation: Option<Cow<'static, str>>, cause: Cause) -> Self {
        let (code, message, inherited) = {
            let source = cause.as_error_ref();
            (source.code(), source.message().to_owned(), source.operation())
        };
        let operation = match operation {
            Some(operation) => operation,
            None => Cow::Owned(inherited.to_owned()),
        };

        Self {
            code,
            message: Cow::Owned(message),
            operation,
            cause: Some(cause),
        }
    }

    /// This node's own code. `Ok` means unset at this level.
    #[inline]
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// This node's own message; may be empty.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// This node's own operation label; may be empty.
    #[inline]
    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// The wrapped failure, if any.
    #[inline]
    pub const fn cause(&self) -> Option<&Cause> {
        self.cause.as_ref()
    }

    /// First explicit code down the chain, `Internal` if none.
    #[inline]
    pub fn resolved_code(&self) -> ErrorCode {
        ErrorRef::Chain(self).code()
    }

    /// First non-empty message down the chain, [`GENERIC_MESSAGE`] if none.
    #[inline]
    pub fn resolved_message(&self) -> &str {
        ErrorRef::Chain(self).message()
    }

    /// First non-empty operation down the chain, empty if none.
    #[inline]
    pub fn resolved_operation(&self) -> &str {
        ErrorRef::Chain(self).operation()
    }

    /// HTTP status for the resolved code.
    #[inline]
    pub fn http_status(&self) -> HttpStatus {
        self.resolved_code().http_status()
    }

    /// Links of this chain, starting with `self`.
    #[inline]
    pub fn frames(&self) -> Frames<'_> {
        ErrorRef::Chain(self).frames()
    }
}

impl fmt::Display for ErrorChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut node = self;
        loop {
            if !node.code.is_ok() {
                write!(f, "{}: ", node.code.value())?;
            }
            if !node.operation.is_empty() {
                write!(f, "{}: ", node.operation)?;
            }
            match &node.cause {
                Some(Cause::Chain(inner)) => node = &**inner,
                Some(Cause::Foreign(err)) => return write!(f, "{}", err),
                None => return f.write_str(&node.message),
            }
        }
    }
}

impl Error for ErrorChain {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause.as_ref().map(Cause::as_error)
    }
}

impl Drop for ErrorChain {
    // Unlink causes one at a time so dropping a long chain uses constant stack.
    fn drop(&mut self) {
        let mut next = self.cause.take();
        while let Some(Cause::Chain(mut node)) = next {
            next = node.cause.take();
        }
    }
}
