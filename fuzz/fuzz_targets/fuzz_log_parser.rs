//! Fuzz target for evaluation log decoding.
//!
//! Goal: Decoding should **never panic** on any input, and every closed
//! vocabulary string must either parse to its canonical value or be rejected.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_log_parser
//! ```

#![no_main]

use gemara_app::{ReportFormat, parse_log, serialize_log};
use gemara_types::{ConfidenceLevel, ResolutionStrategy, Verdict};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(v) = text.parse::<Verdict>() {
        assert_eq!(v.as_str(), text);
    }
    if let Ok(c) = text.parse::<ConfidenceLevel>() {
        assert_eq!(c.as_str(), text);
    }
    if let Ok(s) = text.parse::<ResolutionStrategy>() {
        assert_eq!(s.as_str(), text);
    }

    for format in [ReportFormat::Json, ReportFormat::Yaml] {
        // Anything that decodes must survive a re-encode and decode unchanged.
        if let Ok(log) = parse_log(text, format) {
            let encoded = serialize_log(&log, format).expect("re-encode decoded log");
            let back = parse_log(&encoded, format).expect("decode re-encoded log");
            assert_eq!(back, log);
        }
    }
});
