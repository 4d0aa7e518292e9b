//! Schema compilation and the validate/parse entry points.

use crate::rewrite::rewrite_document;
use crate::schema::field::{FieldDef, FieldType};
use crate::schema::limits::Limits;
use crate::schema::registry::FieldRegistry;
use crate::validate::{
    OperatorSet, PrimitiveCheck, PrimitiveChecks, ValidationError, check_document,
};
use serde_json::Value;
use std::fmt;

/// A field definition with its operator set resolved at build time.
#[derive(Debug, Clone)]
pub(crate) struct CompiledField {
    pub(crate) def: FieldDef,
    pub(crate) ops: OperatorSet,
}

/// An immutable, compiled whitelist schema.
///
/// Built once via [`FilterSchema::builder`], then shared freely: validation
/// and parsing read only the schema and the caller's document, so a schema
/// is safe for unlimited concurrent use.
#[derive(Debug, Clone)]
pub struct FilterSchema {
    fields: Vec<CompiledField>,
    limits: Limits,
    primitives: PrimitiveChecks,
    has_rewrites: bool,
}

impl FilterSchema {
    /// Start building a schema.
    #[must_use]
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    /// The configured structural limits.
    #[must_use]
    pub const fn limits(&self) -> &Limits {
        &self.limits
    }

    /// The per-type primitive checks in effect.
    #[must_use]
    pub const fn primitives(&self) -> &PrimitiveChecks {
        &self.primitives
    }

    /// Look up a registered field and its resolved operator set.
    pub(crate) fn compiled_field(&self, name: &str) -> Option<&CompiledField> {
        self.fields.iter().find(|f| f.def.name() == name)
    }

    /// Iterate the registered fields in registration order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.iter().map(|f| &f.def)
    }

    /// Validate a filter document without producing output.
    ///
    /// Returns the first violation in traversal order, or `Ok(())` when the
    /// whole document is acceptable. The input is never mutated.
    pub fn validate(&self, document: &Value) -> Result<(), ValidationError> {
        check_document(self, document, 0)
    }

    /// Validate a filter document and return the output document.
    ///
    /// When no registered field declares a rewrite rule the input is
    /// returned unchanged; otherwise rewrite rules are applied to the
    /// accepted document. A rejected document produces no output at all.
    pub fn parse(&self, document: Value) -> Result<Value, ValidationError> {
        self.validate(&document)?;
        if !self.has_rewrites {
            return Ok(document);
        }
        match document {
            Value::Object(doc) => Ok(Value::Object(rewrite_document(self, &doc))),
            // validate() only accepts objects
            other => Ok(other),
        }
    }

    /// Non-throwing variant of [`parse`](Self::parse).
    ///
    /// Validation short-circuits on the first violation, so the `Invalid`
    /// vector currently carries exactly one error; the shape leaves room for
    /// aggregation.
    #[must_use]
    pub fn try_parse(&self, document: Value) -> ParseOutcome {
        match self.parse(document) {
            Ok(output) => ParseOutcome::Valid(output),
            Err(err) => ParseOutcome::Invalid(vec![err]),
        }
    }

    /// Parse a filter document from raw JSON text.
    pub fn parse_str(&self, json: &str) -> Result<Value, ParseError> {
        let document: Value = serde_json::from_str(json).map_err(|e| ParseError::Json {
            message: e.to_string(),
        })?;
        self.parse(document).map_err(ParseError::Invalid)
    }

    /// Parse a filter document from raw JSON bytes.
    pub fn parse_bytes(&self, json: &[u8]) -> Result<Value, ParseError> {
        let document: Value = serde_json::from_slice(json).map_err(|e| ParseError::Json {
            message: e.to_string(),
        })?;
        self.parse(document).map_err(ParseError::Invalid)
    }
}

/// Outcome of [`FilterSchema::try_parse`].
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    /// The document was accepted; carries the (possibly rewritten) output.
    Valid(Value),
    /// The document was rejected; carries the violations found.
    Invalid(Vec<ValidationError>),
}

impl ParseOutcome {
    /// Whether the document was accepted.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// The output document, if accepted.
    #[must_use]
    pub const fn output(&self) -> Option<&Value> {
        match self {
            Self::Valid(value) => Some(value),
            Self::Invalid(_) => None,
        }
    }

    /// The violations, if rejected.
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        match self {
            Self::Valid(_) => &[],
            Self::Invalid(errors) => errors,
        }
    }
}

/// Error from the raw-JSON entry points: either the text is not JSON at
/// all, or the decoded document failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
    /// The input is not syntactically valid JSON.
    Json {
        /// The decoder's message.
        message: String,
    },
    /// The decoded document was rejected by the schema.
    Invalid(ValidationError),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json { message } => write!(f, "invalid JSON: {message}"),
            Self::Invalid(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json { .. } => None,
            Self::Invalid(err) => Some(err),
        }
    }
}

/// Fluent builder for [`FilterSchema`].
///
/// # Example
///
/// ```
/// use filtergate::{FieldDef, FilterSchema, Limits};
///
/// let schema = FilterSchema::builder()
///     .limits(Limits::new().max_depth(3))
///     .field(FieldDef::string("name"))
///     .field(FieldDef::number("age"))
///     .build();
/// assert_eq!(schema.fields().count(), 2);
/// ```
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    registry: FieldRegistry,
    limits: Limits,
    primitives: PrimitiveChecks,
}

impl SchemaBuilder {
    /// Create a builder with default limits and primitive checks and no
    /// registered fields.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: FieldRegistry::new(),
            limits: Limits::new(),
            primitives: PrimitiveChecks::new(),
        }
    }

    /// Set the structural limits.
    #[must_use]
    pub const fn limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Register a field. Re-registering a name replaces the earlier
    /// definition (last wins).
    #[must_use]
    pub fn field(mut self, field: FieldDef) -> Self {
        self.registry.insert(field);
        self
    }

    /// Register every field from an existing registry.
    #[must_use]
    pub fn fields(mut self, registry: FieldRegistry) -> Self {
        for field in registry.into_fields() {
            self.registry.insert(field);
        }
        self
    }

    /// Substitute the primitive check for one field type.
    #[must_use]
    pub const fn primitive(mut self, field_type: FieldType, check: PrimitiveCheck) -> Self {
        self.primitives.set(field_type, check);
        self
    }

    /// Resolve every field's operator set and freeze the schema.
    #[must_use]
    pub fn build(self) -> FilterSchema {
        let has_rewrites = self.registry.has_rewrites();
        let fields = self
            .registry
            .into_fields()
            .into_iter()
            .map(|def| {
                let ops = OperatorSet::resolve(def.field_type(), def.is_array(), def.is_fulltext());
                CompiledField { def, ops }
            })
            .collect();

        FilterSchema {
            fields,
            limits: self.limits,
            primitives: self.primitives,
            has_rewrites,
        }
    }
}
