//! Field declarations: value types, capability flags, and rewrite rules.

use crate::validate::Operator;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// Value type of a registered field.
///
/// Determines both the legal operator set and the primitive check invoked
/// for bare literals and operator operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// UTF-8 string values.
    String,
    /// Numeric values, integer or float.
    Number,
    /// Boolean values.
    Boolean,
    /// Date values carried as ISO-8601 strings.
    Date,
}

impl FieldType {
    /// Type name used in diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Date => "date",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Partial output document returned by a rewrite callback, shallow-merged
/// into the result at the current recursion level.
pub type RewriteOutput = Map<String, Value>;

/// Rewrite callback: invoked once per matched operator/value pair.
///
/// `Arc`'d so that a built schema stays `Send + Sync` and cheap to clone.
pub type RewriteFn = Arc<dyn Fn(&RewriteContext<'_>) -> RewriteOutput + Send + Sync>;

/// One matched operator/value pair handed to a rewrite callback.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct RewriteContext<'a> {
    /// Field name exactly as it appeared in the input document.
    pub field: &'a str,
    /// Operator of the matched pair; `Operator::Eq` for a bare literal.
    pub operator: Operator,
    /// Condition value: the bare literal for an implicit equality, or the
    /// single-entry operator object (e.g. `{"$ne": "x"}`) for an explicit
    /// operator, so the operator survives the rewrite.
    pub value: &'a Value,
}

impl<'a> RewriteContext<'a> {
    pub(crate) const fn new(field: &'a str, operator: Operator, value: &'a Value) -> Self {
        Self {
            field,
            operator,
            value,
        }
    }
}

/// Output transformation rule applied to a field's accepted conditions.
#[derive(Clone)]
pub enum Rewrite {
    /// Write the original, un-decomposed operand at a `.`-separated
    /// destination path, nesting intermediate objects.
    DottedPath(String),
    /// Invoke a callback per matched operator/value pair and shallow-merge
    /// each returned partial document, in encounter order.
    Callback(RewriteFn),
}

impl fmt::Debug for Rewrite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DottedPath(path) => f.debug_tuple("DottedPath").field(path).finish(),
            Self::Callback(_) => f.write_str("Callback(..)"),
        }
    }
}

/// One whitelisted field: name, value type, capability flags, and an
/// optional rewrite rule.
///
/// # Example
///
/// ```
/// use filtergate::{FieldDef, FieldType};
///
/// let tags = FieldDef::string("tags").array();
/// assert_eq!(tags.field_type(), FieldType::String);
/// assert!(tags.is_array());
///
/// let title = FieldDef::string("title").fulltext().map_to("meta.title");
/// assert!(title.is_fulltext());
/// ```
#[derive(Debug, Clone)]
pub struct FieldDef {
    pub(crate) name: String,
    pub(crate) field_type: FieldType,
    pub(crate) array: bool,
    pub(crate) fulltext: bool,
    pub(crate) rewrite: Option<Rewrite>,
}

impl FieldDef {
    /// Declare a field with an explicit value type.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            array: false,
            fulltext: false,
            rewrite: None,
        }
    }

    /// Declare a string field.
    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::String)
    }

    /// Declare a number field.
    pub fn number(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Number)
    }

    /// Declare a boolean field.
    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Boolean)
    }

    /// Declare a date field.
    pub fn date(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Date)
    }

    /// Mark the field as array-typed, enabling `$contains`/`$overlap` with
    /// array operands of the base type.
    #[must_use]
    pub const fn array(mut self) -> Self {
        self.array = true;
        self
    }

    /// Enable the `$fulltext` operator. Only meaningful for string fields;
    /// ignored for other types.
    #[must_use]
    pub const fn fulltext(mut self) -> Self {
        self.fulltext = true;
        self
    }

    /// Rewrite matched conditions to a `.`-separated destination path in the
    /// output document.
    #[must_use]
    pub fn map_to(mut self, path: impl Into<String>) -> Self {
        self.rewrite = Some(Rewrite::DottedPath(path.into()));
        self
    }

    /// Rewrite matched conditions through a callback, invoked once per
    /// operator/value pair; each returned partial document is shallow-merged
    /// into the output in encounter order (later pairs overwrite).
    #[must_use]
    pub fn map_with<F>(mut self, callback: F) -> Self
    where
        F: Fn(&RewriteContext<'_>) -> RewriteOutput + Send + Sync + 'static,
    {
        self.rewrite = Some(Rewrite::Callback(Arc::new(callback)));
        self
    }

    /// Field name as it appears in input documents.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared value type.
    #[must_use]
    pub const fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// Whether `$contains`/`$overlap` are enabled.
    #[must_use]
    pub const fn is_array(&self) -> bool {
        self.array
    }

    /// Whether `$fulltext` is enabled (string fields only).
    #[must_use]
    pub const fn is_fulltext(&self) -> bool {
        self.fulltext
    }

    /// The field's rewrite rule, if any.
    #[must_use]
    pub const fn rewrite(&self) -> Option<&Rewrite> {
        self.rewrite.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_defaults() {
        let field = FieldDef::string("name");
        assert_eq!(field.name(), "name");
        assert_eq!(field.field_type(), FieldType::String);
        assert!(!field.is_array());
        assert!(!field.is_fulltext());
        assert!(field.rewrite().is_none());
    }

    #[test]
    fn test_capability_flags() {
        let field = FieldDef::string("roles").array().fulltext();
        assert!(field.is_array());
        assert!(field.is_fulltext());
    }

    #[test]
    fn test_dotted_path_rule() {
        let field = FieldDef::string("authorName").map_to("author.name");
        assert!(matches!(
            field.rewrite(),
            Some(Rewrite::DottedPath(path)) if path == "author.name"
        ));
    }

    #[test]
    fn test_callback_rule_debug_is_opaque() {
        let field = FieldDef::string("keyword").map_with(|_| RewriteOutput::new());
        assert_eq!(format!("{:?}", field.rewrite().unwrap()), "Callback(..)");
    }

    #[test]
    fn test_field_type_names() {
        assert_eq!(FieldType::String.name(), "string");
        assert_eq!(FieldType::Number.name(), "number");
        assert_eq!(FieldType::Boolean.name(), "boolean");
        assert_eq!(FieldType::Date.name(), "date");
    }
}
