//! Fuzz target for the ARFF header reader.
//!
//! The reader must never panic on malformed headers, and anything it accepts
//! must resolve or fail with an error.

#![no_main]

use libfuzzer_sys::fuzz_target;
use nbexport::schema::resolve;
use nbexport::{ArffReader, ClassSelector};

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs to avoid OOM
    if data.len() > 100_000 {
        return;
    }

    let text = String::from_utf8_lossy(data);
    if let Ok(description) = ArffReader::new().read_str(&text) {
        let _ = resolve(&description, &ClassSelector::Declared);
    }
});
