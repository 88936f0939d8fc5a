//! Fuzz target: remote parameter payloads.
//!
//! The first byte picks the parameter, the rest is the payload exactly as
//! it would arrive from the broker.
//!
//! Invariants checked:
//! - No panics under any byte sequence
//! - A rejected update leaves every parameter untouched
//! - `sampling_interval_s` never becomes zero
//!
//! cargo fuzz run fuzz_remote_param

#![no_main]

use libfuzzer_sys::fuzz_target;
use medibox::config::ControlParams;
use medibox::remote::{ParamKind, RemoteUpdate, apply};

fuzz_target!(|data: &[u8]| {
    let Some((&selector, payload)) = data.split_first() else {
        return;
    };
    let kind = ParamKind::ALL[usize::from(selector) % ParamKind::ALL.len()];
    let update = RemoteUpdate::from_bytes(kind, payload);

    let mut params = ControlParams::default();
    let before = params;
    match apply(&mut params, update.kind, &update.payload) {
        Ok(change) => assert_eq!(change.kind, kind),
        Err(_) => assert_eq!(params, before, "rejected update must not mutate"),
    }
    assert!(params.sampling_interval_s > 0);
});
