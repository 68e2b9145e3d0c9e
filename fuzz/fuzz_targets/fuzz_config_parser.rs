//! Fuzz target for `gemara.toml` parsing and resolution.
//!
//! Goal: Parsing and resolving should **never panic** on any input.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_config_parser
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data)
        && let Ok(cfg) = gemara_settings::parse_config_toml(text)
    {
        let _ = gemara_settings::resolve_config(cfg, gemara_settings::Overrides::default());
    }
});
