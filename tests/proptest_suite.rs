//! Property-based tests for errchain
//!
//! These tests use proptest to generate random chains and verify the
//! resolution invariants hold.

use errchain::{
    resolve_code, resolve_message, resolve_operation, ErrorChain, ErrorCode, ErrorOptions,
    ErrorRef, GENERIC_MESSAGE,
};
use proptest::prelude::*;
use std::error::Error;
use std::io;

/// One generated layer: (code value, message, operation).
type Layer = (i32, String, String);

fn layer() -> impl Strategy<Value = Layer> {
    (
        prop_oneof![Just(0), 0..17i32, any::<i32>()],
        prop_oneof![Just(String::new()), "\\PC{0,40}"],
        prop_oneof![Just(String::new()), "[a-z_:]{1,20}"],
    )
}

/// Build a chain from innermost to outermost, optionally ending in a foreign
/// error.
fn build(layers: &[Layer], foreign_root: bool) -> ErrorChain {
    let mut iter = layers.iter().rev();
    let (code, message, operation) = iter.next().cloned().unwrap_or_default();

    let mut options = ErrorOptions::new().with_operation(operation);
    if foreign_root {
        options = options.with_cause(io::Error::other("foreign root"));
    }
    let mut chain = ErrorChain::with_options(code, message, options);

    for (code, message, operation) in iter.cloned() {
        chain = ErrorChain::with_options(
            code,
            message,
            ErrorOptions::new().with_operation(operation).with_cause(chain),
        );
    }
    chain
}

/// Reference answers computed directly from the generated layers.
fn expected(layers: &[Layer]) -> (ErrorCode, String, String) {
    let code = layers
        .iter()
        .map(|(code, _, _)| ErrorCode::from(*code))
        .find(|code| !code.is_ok())
        .unwrap_or(ErrorCode::Internal);
    let message = layers
        .iter()
        .map(|(_, message, _)| message.clone())
        .find(|message| !message.is_empty())
        .unwrap_or_else(|| GENERIC_MESSAGE.to_owned());
    let operation = layers
        .iter()
        .map(|(_, _, operation)| operation.clone())
        .find(|operation| !operation.is_empty())
        .unwrap_or_default();
    (code, message, operation)
}

// ============================================================================
// RESOLUTION PROPERTIES
// ============================================================================

proptest! {
    /// Resolution finds the first explicit facet, outermost first
    #[test]
    fn resolution_matches_reference(
        layers in prop::collection::vec(layer(), 1..12),
        foreign_root in any::<bool>(),
    ) {
        let chain = build(&layers, foreign_root);
        let (code, message, operation) = expected(&layers);

        prop_assert_eq!(chain.resolved_code(), code);
        prop_assert_eq!(chain.resolved_message(), message.as_str());
        prop_assert_eq!(chain.resolved_operation(), operation.as_str());
    }

    /// A node with an unset code answers exactly what its cause answers
    #[test]
    fn unset_code_delegates(
        layers in prop::collection::vec(layer(), 1..8),
        message in "\\PC{0,20}",
    ) {
        let inner = build(&layers, false);
        let inner_code = inner.resolved_code();
        let outer = ErrorChain::with_options(
            ErrorCode::Ok,
            message,
            ErrorOptions::new().with_cause(inner),
        );

        prop_assert_eq!(outer.resolved_code(), inner_code);
    }

    /// Non-nil errors never resolve to Ok
    #[test]
    fn never_resolves_to_ok(
        layers in prop::collection::vec(layer(), 1..8),
        foreign_root in any::<bool>(),
    ) {
        let chain = build(&layers, foreign_root);
        prop_assert!(!chain.resolved_code().is_ok());
        prop_assert!(!chain.resolved_message().is_empty());
    }
}

// ============================================================================
// WRAPPING PROPERTIES
// ============================================================================

proptest! {
    /// wrap() preserves every resolved facet
    #[test]
    fn wrap_is_transparent(
        layers in prop::collection::vec(layer(), 1..8),
        foreign_root in any::<bool>(),
    ) {
        let chain = build(&layers, foreign_root);
        let before = (
            chain.resolved_code(),
            chain.resolved_message().to_owned(),
            chain.resolved_operation().to_owned(),
        );

        let wrapped = ErrorChain::wrap(chain);
        prop_assert_eq!(wrapped.resolved_code(), before.0);
        prop_assert_eq!(wrapped.resolved_message(), before.1.as_str());
        prop_assert_eq!(wrapped.resolved_operation(), before.2.as_str());
        prop_assert!(wrapped.frames().count() >= 2);
    }

    /// wrap_with_operation() preserves code and message, forces operation
    #[test]
    fn wrap_with_operation_forces_label(
        layers in prop::collection::vec(layer(), 1..8),
        operation in "[a-z_:]{1,20}",
    ) {
        let chain = build(&layers, false);
        let code = chain.resolved_code();
        let message = chain.resolved_message().to_owned();

        let wrapped = ErrorChain::wrap_with_operation(operation.clone(), chain);
        prop_assert_eq!(wrapped.resolved_code(), code);
        prop_assert_eq!(wrapped.resolved_message(), message.as_str());
        prop_assert_eq!(wrapped.resolved_operation(), operation.as_str());
    }
}

// ============================================================================
// BOUNDARY PROPERTIES
// ============================================================================

proptest! {
    /// Foreign error text is never surfaced by resolution
    #[test]
    fn foreign_errors_resolve_to_fallbacks(text in "\\PC{0,200}") {
        let err = io::Error::other(text);
        let err: &(dyn Error + 'static) = &err;

        prop_assert_eq!(resolve_code(Some(err)), ErrorCode::Internal);
        prop_assert_eq!(resolve_message(Some(err)), GENERIC_MESSAGE);
        prop_assert_eq!(resolve_operation(Some(err)), "");
        prop_assert!(ErrorRef::classify(err).is_foreign());
    }

    /// Boxing a chain as dyn Error does not hide it from resolution
    #[test]
    fn boxed_chains_are_recognized(layers in prop::collection::vec(layer(), 1..6)) {
        let chain = build(&layers, false);
        let code = chain.resolved_code();
        let boxed: Box<dyn Error + Send + Sync> = Box::new(chain);
        let err: &(dyn Error + 'static) = &*boxed;

        prop_assert_eq!(resolve_code(Some(err)), code);
    }

    /// Construction and rendering never panic on arbitrary input
    #[test]
    fn rendering_is_total(
        code in any::<i32>(),
        message in "\\PC{0,500}",
        operation in "\\PC{0,100}",
    ) {
        let err = ErrorChain::with_options(
            code,
            message,
            ErrorOptions::new().with_operation(operation),
        );
        let _ = err.to_string();
        let _ = err.summary().to_string();
        let mut line = String::new();
        prop_assert!(err.log().write_to(&mut line).is_ok());
    }

    /// Every integer has a display name; only the taxonomy has its own
    #[test]
    fn display_names_are_total(value in any::<i32>()) {
        let code = ErrorCode::from(value);
        prop_assert_eq!(code.value(), value);
        if (0..17).contains(&value) {
            prop_assert_ne!(code.to_string(), "unspecified");
            prop_assert_eq!(code.to_string().parse::<ErrorCode>().ok(), Some(code));
        } else {
            prop_assert_eq!(code.to_string(), "unspecified");
        }
    }
}

// ============================================================================
// SCENARIOS
// ============================================================================

#[test]
fn absent_error_resolves_to_nothing() {
    assert_eq!(resolve_code(None), ErrorCode::Ok);
    assert_eq!(resolve_message(None), "");
    assert_eq!(resolve_operation(None), "");
}

#[test]
fn rendered_scenario() {
    let err = ErrorChain::with_options(
        ErrorCode::Conflict,
        "An internal error",
        ErrorOptions::new().with_operation("TestError"),
    );
    assert_eq!(err.to_string(), "6: TestError: An internal error");
}

#[test]
fn wrap_with_operation_scenario() {
    let a = ErrorChain::with_options(
        ErrorCode::Conflict,
        "An error message",
        ErrorOptions::new().with_operation("TestNew"),
    );
    let b = ErrorChain::wrap_with_operation("TestWrap", a);

    let cause = b.cause().and_then(|cause| cause.as_chain()).expect("cause is a node");
    assert_eq!(cause.code(), ErrorCode::Conflict);
    assert_eq!(cause.operation(), "TestNew");
    assert_eq!(cause.message(), "An error message");

    assert_eq!(b.resolved_operation(), "TestWrap");
    assert_eq!(b.resolved_code(), ErrorCode::Conflict);
}

#[test]
fn source_walk_reaches_foreign_root() {
    let err = ErrorChain::wrap_with_operation(
        "outer",
        ErrorChain::wrap(io::Error::from(io::ErrorKind::UnexpectedEof)),
    );

    let mut depth = 0;
    let mut current: Option<&(dyn Error + 'static)> = Some(&err);
    while let Some(err) = current {
        depth += 1;
        current = err.source();
    }
    assert_eq!(depth, 3);
}
