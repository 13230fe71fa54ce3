//! Fuzz target for model introspection.
//!
//! Arbitrary object dumps must be rejected with an error, never a panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use nbexport::model::introspect;
use nbexport::ModelHandle;

fuzz_target!(|data: &[u8]| {
    if data.len() > 100_000 {
        return;
    }

    if let Ok(model) = ModelHandle::from_slice(data) {
        let _ = introspect(&model);
    }
});
