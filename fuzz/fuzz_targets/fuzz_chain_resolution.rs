#![no_main]

use errchain::{ErrorChain, ErrorOptions};
use libfuzzer_sys::fuzz_target;

// Each 4-byte block becomes one layer: code, message length, operation
// length, flags. Text is sliced from the tail of the input.
fuzz_target!(|data: &[u8]| {
    let (header, text) = data.split_at(data.len().min(64));
    let text = String::from_utf8_lossy(text);

    let mut chain: Option<ErrorChain> = None;
    for block in header.chunks_exact(4) {
        let code = i32::from(block[0] as i8);
        let message: String = text.chars().take(block[1] as usize).collect();
        let operation: String = text.chars().rev().take(block[2] as usize).collect();

        let mut options = ErrorOptions::new().with_operation(operation);
        options = match chain.take() {
            Some(inner) => options.with_cause(inner),
            None if block[3] & 1 == 1 => options.with_cause(std::io::Error::other("fuzz")),
            None => options,
        };
        chain = Some(ErrorChain::with_options(code, message, options));
    }

    if let Some(chain) = chain {
        let _ = chain.resolved_code();
        let _ = chain.resolved_message();
        let _ = chain.resolved_operation();
        let _ = chain.to_string();
        let _ = chain.summary().to_string();
        let mut line = String::new();
        let _ = chain.log().write_to(&mut line);

        let wrapped = ErrorChain::wrap(chain);
        assert!(!wrapped.resolved_code().is_ok());
    }
});
