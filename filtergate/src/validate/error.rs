//! Validation error taxonomy.
//!
//! Every violation is validation-time, non-fatal, and caller-recoverable;
//! rejection never mutates or partially emits output.

use crate::schema::FieldType;
use std::fmt;

/// Which configured limit a `LimitExceeded` violation refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    /// `max_depth` - combinator nesting depth.
    Depth,
    /// `max_conditions` - field conditions at one level.
    Conditions,
    /// `max_or_branches` - branches of a `$or` array.
    OrBranches,
    /// `max_array_len` - length of an array operand.
    ArrayLength,
}

impl LimitKind {
    /// The limit's configuration name, used in diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Depth => "max_depth",
            Self::Conditions => "max_conditions",
            Self::OrBranches => "max_or_branches",
            Self::ArrayLength => "max_array_len",
        }
    }
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The specific violation that caused a rejection.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ViolationKind {
    /// A key is neither a registered field nor a combinator permitted at
    /// this nesting level.
    UnregisteredKey {
        /// The offending key.
        key: String,
    },
    /// A literal or operand does not satisfy the primitive check for the
    /// field's declared type.
    TypeMismatch {
        /// The field whose condition failed.
        field: String,
        /// The field's declared type.
        expected: FieldType,
    },
    /// An operator-object key is outside the field's resolved legal set.
    OperatorNotAllowed {
        /// The field the operator was applied to.
        field: String,
        /// The operator symbol as submitted (may be unknown entirely).
        operator: String,
    },
    /// A configured structural limit was surpassed.
    LimitExceeded {
        /// Which limit.
        limit: LimitKind,
        /// The configured cap.
        max: usize,
        /// The observed value.
        actual: usize,
    },
    /// `$and`/`$or` given a non-array, or `$not` given a non-object.
    MalformedCombinator {
        /// The combinator key.
        combinator: &'static str,
        /// What it expects.
        expected: &'static str,
    },
    /// A filter document (the root or a combinator element) is not a JSON
    /// object.
    ExpectedDocument,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnregisteredKey { key } => {
                write!(f, "key `{key}` is not a registered field")
            },
            Self::TypeMismatch { field, expected } => {
                write!(f, "value for field `{field}` is not a valid {expected}")
            },
            Self::OperatorNotAllowed { field, operator } => {
                write!(f, "operator `{operator}` is not allowed for field `{field}`")
            },
            Self::LimitExceeded { limit, max, actual } => {
                write!(f, "{limit} exceeded: {actual} > {max}")
            },
            Self::MalformedCombinator {
                combinator,
                expected,
            } => {
                write!(f, "`{combinator}` expects {expected}")
            },
            Self::ExpectedDocument => write!(f, "expected a filter document object"),
        }
    }
}

/// A single rejected validation outcome: the first violation encountered in
/// traversal order, with the path to the offending key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    path: Vec<String>,
    kind: ViolationKind,
}

impl ValidationError {
    pub(crate) const fn new(kind: ViolationKind) -> Self {
        Self {
            path: Vec::new(),
            kind,
        }
    }

    /// Prepend a path segment while unwinding out of a recursion level.
    pub(crate) fn at(mut self, segment: impl Into<String>) -> Self {
        self.path.insert(0, segment.into());
        self
    }

    /// Dotted path from the document root to the offending key; empty when
    /// the violation is at the root itself.
    #[must_use]
    pub fn path(&self) -> String {
        self.path.join(".")
    }

    /// The violation that caused the rejection.
    #[must_use]
    pub const fn kind(&self) -> &ViolationKind {
        &self.kind
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            self.kind.fmt(f)
        } else {
            write!(f, "at `{}`: {}", self.path.join("."), self.kind)
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_names() {
        assert_eq!(LimitKind::Depth.name(), "max_depth");
        assert_eq!(LimitKind::Conditions.name(), "max_conditions");
        assert_eq!(LimitKind::OrBranches.name(), "max_or_branches");
        assert_eq!(LimitKind::ArrayLength.name(), "max_array_len");
    }

    #[test]
    fn test_display_carries_limit_and_value() {
        let err = ValidationError::new(ViolationKind::LimitExceeded {
            limit: LimitKind::OrBranches,
            max: 5,
            actual: 6,
        });
        let msg = format!("{err}");
        assert!(msg.contains("max_or_branches"));
        assert!(msg.contains('5'));
        assert!(msg.contains('6'));
    }

    #[test]
    fn test_display_with_path() {
        let err = ValidationError::new(ViolationKind::UnregisteredKey {
            key: "password".into(),
        })
        .at("0")
        .at("$and");
        assert_eq!(err.path(), "$and.0");
        let msg = format!("{err}");
        assert!(msg.contains("at `$and.0`"));
        assert!(msg.contains("password"));
    }

    #[test]
    fn test_display_without_path() {
        let err = ValidationError::new(ViolationKind::ExpectedDocument);
        assert_eq!(err.path(), "");
        assert_eq!(format!("{err}"), "expected a filter document object");
    }

    #[test]
    fn test_display_type_mismatch() {
        let err = ValidationError::new(ViolationKind::TypeMismatch {
            field: "age".into(),
            expected: FieldType::Number,
        });
        let msg = format!("{err}");
        assert!(msg.contains("age"));
        assert!(msg.contains("number"));
    }

    #[test]
    fn test_display_operator_not_allowed() {
        let err = ValidationError::new(ViolationKind::OperatorNotAllowed {
            field: "name".into(),
            operator: "$like".into(),
        });
        let msg = format!("{err}");
        assert!(msg.contains("$like"));
        assert!(msg.contains("name"));
    }

    #[test]
    fn test_display_malformed_combinator() {
        let err = ValidationError::new(ViolationKind::MalformedCombinator {
            combinator: "$not",
            expected: "a filter document object",
        });
        assert_eq!(format!("{err}"), "`$not` expects a filter document object");
    }
}
