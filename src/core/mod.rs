//! Building blocks shared by the schema, codec and validator.
mod amount;
mod field_path;

pub use amount::*;
pub use field_path::*;
