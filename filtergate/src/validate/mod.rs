//! Operator resolution, primitive value checks, and recursive document
//! validation.
//!
//! Validation is whitelist-only and closed-world: a document is accepted iff
//! every key is either a registered field with a type-appropriate condition
//! or a combinator permitted at the current nesting level, and every
//! configured limit holds. The first violation in traversal order is
//! surfaced; nothing is aggregated across branches.

mod document;
mod error;
mod operator;
mod primitives;

pub(crate) use document::check_document;

// Re-export all public items
pub use error::{LimitKind, ValidationError, ViolationKind};
pub use operator::{Operator, OperatorSet};
pub use primitives::{PrimitiveCheck, PrimitiveChecks};
