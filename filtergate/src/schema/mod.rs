//! Field declarations, structural limits, and schema construction.

mod builder;
mod field;
mod limits;
mod registry;

pub(crate) use builder::CompiledField;

// Re-export all public items
pub use builder::{FilterSchema, ParseError, ParseOutcome, SchemaBuilder};
pub use field::{FieldDef, FieldType, Rewrite, RewriteContext, RewriteFn, RewriteOutput};
pub use limits::Limits;
pub use registry::FieldRegistry;
