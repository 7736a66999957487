#![no_main]

use ferrous_ioc::{DiError, Marker};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    match Marker::parse(text) {
        Ok(marker) => {
            // Every token must have been empty, `inject` or `key=...`
            for token in text.split(',') {
                assert!(token.is_empty() || token == "inject" || token.starts_with("key="));
            }
            assert_eq!(marker.inject, text.split(',').any(|t| t == "inject"));

            let last_key = text
                .split(',')
                .filter_map(|t| t.strip_prefix("key="))
                .filter(|v| !v.is_empty())
                .last();
            assert_eq!(marker.key.as_ref().and_then(|k| k.as_str()), last_key);
        }
        Err(DiError::TagParse { token }) => {
            assert!(text.split(',').any(|t| t == token));
        }
        Err(other) => panic!("unexpected error: {other}"),
    }
});
