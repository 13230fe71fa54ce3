//! Dataset descriptions and the schema resolved from them.

mod resolver;
mod types;

pub use resolver::{ClassSelector, resolve};
pub use types::{
    AttributeKind, AttributeSchema, ClassSchema, DatasetAttribute, DatasetDescription,
    ResolvedSchema,
};
