//! Chain links and the boundary between our nodes and foreign errors.
//!
//! An error of unknown origin is classified exactly once, when it enters the
//! crate, into one of two shapes:
//!
//! - [`ErrorRef::Chain`]: one of our own nodes, which can answer code,
//!   message and operation questions and may have a cause
//! - [`ErrorRef::Foreign`]: anything else, which is opaque and terminates
//!   every walk
//!
//! Owned causes follow the same split through [`Cause`]. After that point
//! walks dispatch on the variant and never probe types again.

use crate::ErrorChain;
use std::borrow::Cow;
use std::error::Error;
use std::fmt;

/// Boxed foreign error as accepted from callers.
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// The wrapped failure owned by a chain node.
pub enum Cause {
    /// Another node of ours.
    Chain(Box<ErrorChain>),
    /// An error from outside this crate.
    Foreign(BoxError),
}

impl Cause {
    /// Classify an arbitrary error value.
    ///
    /// `ErrorChain` values (even when already boxed as `dyn Error`) become
    /// [`Cause::Chain`]; everything else becomes [`Cause::Foreign`].
    pub fn new(err: impl Into<BoxError>) -> Self {
        let boxed: BoxError = err.into();
        match boxed.downcast::<ErrorChain>() {
            Ok(chain) => Cause::Chain(chain),
            Err(foreign) => Cause::Foreign(foreign),
        }
    }

    /// The wrapped node, if the cause is one of ours.
    #[inline]
    pub fn as_chain(&self) -> Option<&ErrorChain> {
        match self {
            Cause::Chain(chain) => Some(&**chain),
            Cause::Foreign(_) => None,
        }
    }

    /// The wrapped foreign error, if any.
    #[inline]
    pub fn as_foreign(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        match self {
            Cause::Chain(_) => None,
            Cause::Foreign(err) => Some(&**err),
        }
    }

    /// Borrow as a classified reference.
    #[inline]
    pub fn as_error_ref(&self) -> ErrorRef<'_> {
        match self {
            Cause::Chain(chain) => ErrorRef::Chain(&**chain),
            Cause::Foreign(err) => ErrorRef::Foreign(&**err),
        }
    }

    /// Borrow as a plain `dyn Error`.
    #[inline]
    pub fn as_error(&self) -> &(dyn Error + 'static) {
        match self {
            Cause::Chain(chain) => &**chain,
            Cause::Foreign(err) => &**err,
        }
    }
}

impl From<ErrorChain> for Cause {
    fn from(chain: ErrorChain) -> Self {
        Cause::Chain(Box::new(chain))
    }
}

impl fmt::Debug for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cause::Chain(chain) => f.debug_tuple("Chain").field(chain).finish(),
            Cause::Foreign(err) => f.debug_tuple("Foreign").field(err).finish(),
        }
    }
}

/// A borrowed error, classified at the crate boundary.
#[derive(Debug, Clone, Copy)]
pub enum ErrorRef<'a> {
    /// One of our nodes.
    Chain(&'a ErrorChain),
    /// Any other error. Opaque: it has no code, no safe message and no
    /// operation, and its own `source()` is not followed.
    Foreign(&'a (dyn Error + 'static)),
}

impl<'a> ErrorRef<'a> {
    /// Classify an arbitrary error.
    #[inline]
    pub fn classify(err: &'a (dyn Error + 'static)) -> Self {
        match err.downcast_ref::<ErrorChain>() {
            Some(chain) => ErrorRef::Chain(chain),
            None => ErrorRef::Foreign(err),
        }
    }

    /// The next link down, if this is a node with a cause.
    #[inline]
    pub fn cause(self) -> Option<ErrorRef<'a>> {
        match self {
            ErrorRef::Chain(chain) => chain.cause().map(Cause::as_error_ref),
            ErrorRef::Foreign(_) => None,
        }
    }

    /// `true` for foreign errors.
    #[inline]
    pub fn is_foreign(self) -> bool {
        matches!(self, ErrorRef::Foreign(_))
    }
}

impl<'a> From<&'a ErrorChain> for ErrorRef<'a> {
    fn from(chain: &'a ErrorChain) -> Self {
        ErrorRef::Chain(chain)
    }
}

/// Optional named settings for [`ErrorChain::with_options`].
///
/// Unset fields leave the node's operation empty and its cause absent.
///
/// ```rust
/// use errchain::{ErrorChain, ErrorCode, ErrorOptions};
///
/// let io = std::io::Error::other("disk on fire");
/// let err = ErrorChain::with_options(
///     ErrorCode::Unavailable,
///     "storage is unavailable",
///     ErrorOptions::new()
///         .with_operation("storage::flush")
///         .with_cause(io),
/// );
///
/// assert_eq!(err.operation(), "storage::flush");
/// assert!(err.cause().is_some());
/// ```
#[derive(Debug, Default)]
pub struct ErrorOptions {
    pub(crate) operation: Option<Cow<'static, str>>,
    pub(crate) cause: Option<Cause>,
}

impl ErrorOptions {
    /// No operation, no cause.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the operation label.
    #[inline]
    pub fn with_operation(mut self, operation: impl Into<Cow<'static, str>>) -> Self {
        self.operation = Some(operation.into());
        self
    }

    /// Attach a wrapped underlying failure.
    #[inline]
    pub fn with_cause(mut self, err: impl Into<BoxError>) -> Self {
        self.cause = Some(Cause::new(err));
        self
    }
}
