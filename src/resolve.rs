//! Resolution: walk a chain from the outermost node inwards and return the
//! first explicit answer, or a fixed default when no node has one.
//!
//! | facet     | absent input | nothing found     |
//! |-----------|--------------|-------------------|
//! | code      | `ok`         | `internal`        |
//! | message   | `""`         | [`GENERIC_MESSAGE`] |
//! | operation | `""`         | `""`              |
//!
//! A foreign error answers nothing and ends the walk. Every function here is
//! total.
//!
//! Walks are iterative. Acyclicity comes from ownership: a node can only own
//! a cause that existed before it was built.

use crate::{ErrorCode, ErrorRef};
use std::error::Error;

/// Message returned when no node in a chain carries one.
///
/// Foreign error text is never surfaced through resolution.
pub const GENERIC_MESSAGE: &str =
    "An internal error has occurred. Please contact technical support.";

/// Iterator over the links of a chain, outermost first.
///
/// A foreign error, when present, is always the last item.
#[derive(Debug, Clone)]
pub struct Frames<'a> {
    next: Option<ErrorRef<'a>>,
}

impl<'a> Frames<'a> {
    #[inline]
    pub(crate) fn new(start: Option<ErrorRef<'a>>) -> Self {
        Self { next: start }
    }
}

impl<'a> Iterator for Frames<'a> {
    type Item = ErrorRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = current.cause();
        Some(current)
    }
}

impl std::iter::FusedIterator for Frames<'_> {}

impl<'a> ErrorRef<'a> {
    /// Links from this one inwards.
    #[inline]
    pub fn frames(self) -> Frames<'a> {
        Frames::new(Some(self))
    }

    /// First explicit code, `Internal` if none.
    pub fn code(self) -> ErrorCode {
        self.frames()
            .find_map(|frame| match frame {
                ErrorRef::Chain(node) if !node.code().is_ok() => Some(node.code()),
                _ => None,
            })
            .unwrap_or(ErrorCode::Internal)
    }

    /// First non-empty message, [`GENERIC_MESSAGE`] if none.
    pub fn message(self) -> &'a str {
        self.frames()
            .find_map(|frame| match frame {
                ErrorRef::Chain(node) if !node.message().is_empty() => Some(node.message()),
                _ => None,
            })
            .unwrap_or(GENERIC_MESSAGE)
    }

    /// First non-empty operation, empty if none.
    pub fn operation(self) -> &'a str {
        self.frames()
            .find_map(|frame| match frame {
                ErrorRef::Chain(node) if !node.operation().is_empty() => Some(node.operation()),
                _ => None,
            })
            .unwrap_or("")
    }
}

/// Resolve the classification of any error.
///
/// ```rust
/// use errchain::{resolve_code, ErrorChain, ErrorCode};
/// use std::error::Error;
///
/// let err: Box<dyn Error> = Box::new(ErrorChain::new(ErrorCode::NotFound, "no such user"));
/// assert_eq!(resolve_code(Some(err.as_ref())), ErrorCode::NotFound);
/// assert_eq!(resolve_code(None), ErrorCode::Ok);
///
/// let io = std::io::Error::other("socket closed");
/// assert_eq!(resolve_code(Some(&io)), ErrorCode::Internal);
/// ```
pub fn resolve_code(err: Option<&(dyn Error + 'static)>) -> ErrorCode {
    err.map_or(ErrorCode::Ok, |err| ErrorRef::classify(err).code())
}

/// Resolve the human-readable message of any error.
pub fn resolve_message<'a>(err: Option<&'a (dyn Error + 'static)>) -> &'a str {
    err.map_or("", |err| ErrorRef::classify(err).message())
}

/// Resolve the operation label of any error.
pub fn resolve_operation<'a>(err: Option<&'a (dyn Error + 'static)>) -> &'a str {
    err.map_or("", |err| ErrorRef::classify(err).operation())
}
