//! Structured log views over a chain.
//!
//! Nothing here performs I/O. [`ChainLog`] borrows a chain and hands the
//! logger resolved facets plus the operation trail; the logger decides where
//! the bytes go. With the `tracing` feature, [`ChainLog::emit`] records one
//! `tracing` event instead.
//!
//! Foreign errors show up in the trail as `<foreign>`. Their text is never
//! written by this module.

use crate::{ErrorChain, ErrorCode, ErrorRef, HttpStatus};
use smallvec::SmallVec;
use std::borrow::Cow;
use std::fmt;

/// Maximum length for any individual field in formatted output.
pub const MAX_FIELD_OUTPUT_LEN: usize = 1024;

/// Appended to truncated fields.
const TRUNCATION_INDICATOR: &str = "...[TRUNCATED]";

/// Trail label for a foreign link.
const FOREIGN_LABEL: &str = "<foreign>";

/// Log view of a whole chain.
///
/// Borrows from the chain and cannot outlive it. The root node is held
/// directly; `frames` always starts with it.
///
/// ```rust
/// use errchain::{ErrorChain, ErrorCode, ErrorOptions};
///
/// let root = ErrorChain::with_options(
///     ErrorCode::NotFound,
///     "no row",
///     ErrorOptions::new().with_operation("db::query"),
/// );
/// let err = ErrorChain::wrap_with_operation("api::show", root);
///
/// let mut line = String::new();
/// err.log().write_to(&mut line).unwrap();
/// assert_eq!(
///     line,
///     "[not_found] operation='api::show' message='no row' trail='api::show <- db::query'"
/// );
/// ```
#[derive(Debug)]
pub struct ChainLog<'a> {
    root: &'a ErrorChain,
    frames: SmallVec<[ErrorRef<'a>; 4]>,
}

impl<'a> ChainLog<'a> {
    /// Build the view for `chain`.
    pub fn new(chain: &'a ErrorChain) -> Self {
        Self {
            root: chain,
            frames: chain.frames().collect(),
        }
    }

    /// All links, outermost first.
    #[inline]
    pub fn frames(&self) -> &[ErrorRef<'a>] {
        &self.frames
    }

    /// Number of links, foreign tail included.
    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// `true` when the chain ends in a foreign error.
    #[inline]
    pub fn has_foreign_cause(&self) -> bool {
        self.frames.last().is_some_and(|frame| frame.is_foreign())
    }

    /// Resolved code.
    #[inline]
    pub fn code(&self) -> ErrorCode {
        self.root.resolved_code()
    }

    /// Resolved message.
    #[inline]
    pub fn message(&self) -> &'a str {
        self.root.resolved_message()
    }

    /// Resolved operation.
    #[inline]
    pub fn operation(&self) -> &'a str {
        self.root.resolved_operation()
    }

    /// HTTP status of the resolved code.
    #[inline]
    pub fn http_status(&self) -> HttpStatus {
        self.code().http_status()
    }

    /// Operation labels down the chain, joined with `" <- "`.
    #[inline]
    pub fn trail(&self) -> Trail<'_, 'a> {
        Trail(self.frames.as_slice())
    }

    /// Write a single structured line without allocating for short fields.
    ///
    /// Fields longer than [`MAX_FIELD_OUTPUT_LEN`] are cut at a UTF-8
    /// boundary and marked.
    pub fn write_to(&self, f: &mut impl fmt::Write) -> fmt::Result {
        write!(
            f,
            "[{}] operation='{}' message='{}'",
            self.code(),
            clip_field(self.operation()),
            clip_field(self.message()),
        )?;

        let trail = self.trail().to_string();
        if !trail.is_empty() {
            write!(f, " trail='{}'", clip_field(&trail))?;
        }

        Ok(())
    }

    /// Record the chain as one `tracing` event at error level.
    ///
    /// The resolved message is the event message; the other facets are
    /// fields.
    #[cfg(feature = "tracing")]
    pub fn emit(&self) {
        let trail = self.trail().to_string();
        tracing::error!(
            code = %self.code(),
            code_value = self.code().value(),
            status = self.http_status().as_u16(),
            operation = %clip_field(self.operation()),
            trail = %clip_field(&trail),
            depth = self.depth(),
            "{}",
            clip_field(self.message())
        );
    }
}

/// Operation trail of a chain, see [`ChainLog::trail`].
#[derive(Debug, Clone, Copy)]
pub struct Trail<'v, 'a>(&'v [ErrorRef<'a>]);

impl fmt::Display for Trail<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels = self.0.iter().filter_map(|frame| match frame {
            ErrorRef::Chain(node) if node.operation().is_empty() => None,
            ErrorRef::Chain(node) => Some(node.operation()),
            ErrorRef::Foreign(_) => Some(FOREIGN_LABEL),
        });

        for (i, label) in labels.enumerate() {
            if i > 0 {
                f.write_str(" <- ")?;
            }
            f.write_str(label)?;
        }
        Ok(())
    }
}

/// Compact rendering of the outermost node only:
/// `operation <code> "message"`.
///
/// ```rust
/// use errchain::{ErrorChain, ErrorCode, ErrorOptions};
///
/// let err = ErrorChain::with_options(
///     ErrorCode::Conflict,
///     "An internal error",
///     ErrorOptions::new().with_operation("TestError"),
/// );
/// assert_eq!(err.summary().to_string(), r#"TestError <conflict> "An internal error""#);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Summary<'a>(&'a ErrorChain);

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} <{}> \"{}\"",
            self.0.operation(),
            self.0.code(),
            self.0.message()
        )
    }
}

impl ErrorChain {
    /// Structured log view of this chain.
    #[inline]
    pub fn log(&self) -> ChainLog<'_> {
        ChainLog::new(self)
    }

    /// Callback-style access to the log view.
    ///
    /// ```rust
    /// # use errchain::{ErrorChain, ErrorCode};
    /// let err = ErrorChain::new(ErrorCode::Aborted, "rolled back");
    /// let depth = err.with_log(|log| log.depth());
    /// assert_eq!(depth, 1);
    /// ```
    #[inline]
    pub fn with_log<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&ChainLog<'_>) -> R,
    {
        let log = self.log();
        f(&log)
    }

    /// Compact single-frame rendering.
    #[inline]
    pub fn summary(&self) -> Summary<'_> {
        Summary(self)
    }
}

/// Cap a logged field at [`MAX_FIELD_OUTPUT_LEN`] bytes, indicator included.
///
/// Cuts on a char boundary so labels and messages in any script stay valid.
fn clip_field(field: &str) -> Cow<'_, str> {
    if field.len() <= MAX_FIELD_OUTPUT_LEN {
        return Cow::Borrowed(field);
    }

    let budget = MAX_FIELD_OUTPUT_LEN - TRUNCATION_INDICATOR.len();
    let end = field
        .char_indices()
        .map(|(i, _)| i)
        .take_while(|&i| i <= budget)
        .last()
        .unwrap_or(0);

    let mut clipped = String::with_capacity(end + TRUNCATION_INDICATOR.len());
    clipped.push_str(&field[..end]);
    clipped.push_str(TRUNCATION_INDICATOR);
    Cow::Owned(clipped)
}
