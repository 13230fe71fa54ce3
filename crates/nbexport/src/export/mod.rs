//! The portable model document: building, sanitizing and writing it.
//!
//! # Document layout
//!
//! ```text
//! {
//!   "classAttribute": "play",
//!   "classes": ["yes", "no"],
//!   "classPriors": { "yes": 0.6, "no": 0.4 },
//!   "attributes": [
//!     { "name": "weather", "values": ["sunny", "rainy"],
//!       "condProbs": { "yes": [0.7, 0.3], "no": [0.2, 0.8] } }
//!   ],
//!   "epsilon": 1e-12
//! }
//! ```

mod document;
mod numeric;
mod sink;

pub use document::{AttributeExport, ExportedModel, build_document};
pub use numeric::{EPSILON, Probability, sanitize};
pub use sink::{WrittenDocument, render_document, write_document};
