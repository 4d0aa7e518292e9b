// =============================================================================
// CRATE-LEVEL QUALITY LINTS (following Tokio/Serde standards)
// =============================================================================
#![forbid(unsafe_code)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]
#![warn(unreachable_pub)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
// =============================================================================
// CLIPPY CONFIGURATION
// =============================================================================
// Pedantic lints that are too verbose to fix individually in a DSL-heavy crate
#![allow(clippy::doc_markdown)] // Code items in docs - extensive doc changes needed
#![allow(clippy::missing_errors_doc)] // # Errors sections - doc-heavy
#![allow(clippy::missing_panics_doc)] // # Panics sections - doc-heavy
#![allow(clippy::module_name_repetitions)] // Type names matching module - acceptable
#![allow(clippy::return_self_not_must_use)] // Builder pattern methods return Self by design
#![allow(clippy::must_use_candidate)] // Builder methods - fluent API doesn't need must_use

//! # filtergate - Whitelist Validation for Mongo-style Filter Documents
//!
//! Validates and normalizes untrusted, recursive filter-query documents
//! against a per-application whitelist of fields, value types, and operators,
//! while bounding structural complexity (nesting depth, condition count, `$or`
//! branches, array operand length) to prevent denial-of-service via oversized
//! or deeply nested input.
//!
//! ## Quick Start
//!
//! ```
//! use filtergate::prelude::*;
//!
//! let schema = FilterSchema::builder()
//!     .field(FieldDef::number("id"))
//!     .field(FieldDef::string("name").fulltext())
//!     .field(FieldDef::string("roles").array())
//!     .field(FieldDef::date("created_at"))
//!     .build();
//!
//! // Accepted: registered fields with type-appropriate operators
//! let filter = serde_json::json!({
//!     "name": { "$fulltext": "alice" },
//!     "id": { "$in": [1, 2, 3] },
//!     "created_at": { "$gte": "2024-01-01" }
//! });
//! assert!(schema.validate(&filter).is_ok());
//!
//! // Rejected: unregistered field
//! let filter = serde_json::json!({ "password": "hunter2" });
//! assert!(schema.validate(&filter).is_err());
//! ```
//!
//! ## Supported Operators
//!
//! The legal operator set is resolved per field from its value type and
//! capability flags; anything outside that set is rejected.
//!
//! | Operator | Applies to | Operand |
//! |----------|------------|---------|
//! | `$eq` | all types | value of the type, or `null` |
//! | `$ne` | all types | value of the type, or `null` |
//! | `$in` | all types | array of values/`null`, bounded by `max_array_len` |
//! | `$nin` | all types | array of values/`null`, bounded by `max_array_len` |
//! | `$gt` / `$gte` / `$lt` / `$lte` | `number`, `date` | non-null value of the type |
//! | `$contains` / `$overlap` | `array` fields | array of non-null values, bounded |
//! | `$fulltext` | `fulltext` string fields | non-null string |
//!
//! A field condition may also be a bare literal (implicit `$eq`) or `null`.
//! The combinators `$and`, `$or` (bounded by `max_or_branches`), and `$not`
//! nest recursively up to `max_depth`.
//!
//! ## Output Rewriting
//!
//! A field may declare a rewrite rule applied to accepted documents:
//!
//! ```
//! use filtergate::prelude::*;
//!
//! let schema = FilterSchema::builder()
//!     .field(FieldDef::string("authorName").map_to("author.name"))
//!     .build();
//!
//! let out = schema.parse(serde_json::json!({ "authorName": "John" })).unwrap();
//! assert_eq!(out, serde_json::json!({ "author": { "name": "John" } }));
//! ```
//!
//! Callback rules receive each matched `(field, operator, value)` pair and
//! return a partial document merged into the output; see
//! [`FieldDef::map_with`].
//!
//! ## Concurrency
//!
//! A built [`FilterSchema`] is immutable, `Send + Sync`, and safe for
//! unlimited concurrent use; validation reads only the schema and the
//! caller's document.

mod rewrite;
mod schema;
mod validate;

pub use rewrite::set_nested_value;
pub use schema::{
    FieldDef, FieldRegistry, FieldType, FilterSchema, Limits, ParseError, ParseOutcome, Rewrite,
    RewriteContext, RewriteFn, RewriteOutput, SchemaBuilder,
};
pub use validate::{
    LimitKind, Operator, OperatorSet, PrimitiveCheck, PrimitiveChecks, ValidationError,
    ViolationKind,
};

/// Prelude module for convenient imports.
///
/// ```
/// use filtergate::prelude::*;
///
/// let schema = FilterSchema::builder()
///     .field(FieldDef::boolean("active"))
///     .build();
/// assert!(schema.validate(&serde_json::json!({ "active": true })).is_ok());
/// ```
pub mod prelude {
    pub use crate::{
        FieldDef, FieldRegistry, FieldType, FilterSchema, LimitKind, Limits, Operator, OperatorSet,
        ParseError, ParseOutcome, PrimitiveCheck, PrimitiveChecks, Rewrite, RewriteContext,
        RewriteFn, RewriteOutput, SchemaBuilder, ValidationError, ViolationKind, set_nested_value,
    };
}


// ============================================================================
// API Contract Tests (compile-time assertions)
// ============================================================================

#[cfg(test)]
mod api_contracts {
    use static_assertions::assert_impl_all;

    // ========================================================================
    // Schema types
    // ========================================================================

    // FilterSchema is immutable and shareable across threads
    assert_impl_all!(crate::FilterSchema: Clone, std::fmt::Debug, Send, Sync);

    // SchemaBuilder is Debug
    assert_impl_all!(crate::SchemaBuilder: std::fmt::Debug);

    // FieldDef carries Arc'd callbacks, so it stays Send + Sync
    assert_impl_all!(crate::FieldDef: Clone, std::fmt::Debug, Send, Sync);

    // FieldRegistry is Clone, Debug, Default
    assert_impl_all!(crate::FieldRegistry: Clone, std::fmt::Debug, Default);

    // Limits is Copy, Clone, Debug, PartialEq, Eq, Default
    assert_impl_all!(crate::Limits: Copy, Clone, std::fmt::Debug, PartialEq, Eq, Default);

    // ========================================================================
    // Enum types
    // ========================================================================

    // FieldType is Copy, Clone, Debug, PartialEq, Eq, Hash
    assert_impl_all!(crate::FieldType: Copy, Clone, std::fmt::Debug, PartialEq, Eq, std::hash::Hash);

    // Operator is Copy, Clone, Debug, PartialEq, Eq, Hash
    assert_impl_all!(crate::Operator: Copy, Clone, std::fmt::Debug, PartialEq, Eq, std::hash::Hash);

    // LimitKind is Copy, Clone, Debug, PartialEq, Eq
    assert_impl_all!(crate::LimitKind: Copy, Clone, std::fmt::Debug, PartialEq, Eq);

    // ========================================================================
    // Error types
    // ========================================================================

    // ValidationError is Clone, Debug, PartialEq, Eq, Error
    assert_impl_all!(crate::ValidationError: Clone, std::fmt::Debug, PartialEq, Eq, std::error::Error);

    // ParseError is Clone, Debug, PartialEq, Eq, Error
    assert_impl_all!(crate::ParseError: Clone, std::fmt::Debug, PartialEq, Eq, std::error::Error);

    // ParseOutcome is Clone, Debug, PartialEq
    assert_impl_all!(crate::ParseOutcome: Clone, std::fmt::Debug, PartialEq);
}
