#![no_main]

use errchain::ErrorCode;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(code) = text.parse::<ErrorCode>() {
            assert_eq!(code.name(), text);
            assert!(code.is_recognized());
        }
    }

    if data.len() >= 4 {
        let value = i32::from_le_bytes([data[0], data[1], data[2], data[3]]);
        let code = ErrorCode::from(value);
        assert_eq!(code.value(), value);
        let _ = code.http_status();
    }
});
