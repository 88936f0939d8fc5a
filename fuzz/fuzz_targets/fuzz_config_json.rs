//! Fuzz target: `MediboxConfig::from_json`
//!
//! Invariants checked:
//! - No panics on arbitrary input
//! - Anything accepted also passes `validate()`
//!
//! cargo fuzz run fuzz_config_json

#![no_main]

use libfuzzer_sys::fuzz_target;
use medibox::config::MediboxConfig;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };
    if let Ok(config) = MediboxConfig::from_json(text) {
        assert!(config.validate().is_ok());
        assert!(config.control.sampling_interval_s > 0);
    }
});
