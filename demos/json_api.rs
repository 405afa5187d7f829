//! Render resolved errors as JSON response bodies.

use errchain::{CauseMode, ErrorChain, ErrorCode, ErrorOptions};

fn main() -> Result<(), serde_json::Error> {
    let root = ErrorChain::with_options(
        ErrorCode::FailedPrecondition,
        "order is already shipped",
        ErrorOptions::new().with_operation("orders::cancel"),
    );
    let err = ErrorChain::wrap_with_operation("api::cancel_order", root);

    // Public body: top frame only
    println!("{}", serde_json::to_string_pretty(&err.record(CauseMode::Omit))?);

    // Internal body: the full chain
    println!("{}", serde_json::to_string_pretty(&err.record(CauseMode::Nested))?);

    Ok(())
}
