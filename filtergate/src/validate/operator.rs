//! Comparison operators and per-field operator-set resolution.

use crate::schema::FieldType;
use std::fmt;

/// Comparison operators accepted inside operator objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Equal; also the implicit operator for bare literals: `$eq`
    Eq,
    /// Not equal: `$ne`
    Ne,
    /// Greater than: `$gt`
    Gt,
    /// Greater than or equal: `$gte`
    Gte,
    /// Less than: `$lt`
    Lt,
    /// Less than or equal: `$lte`
    Lte,
    /// Membership in an array operand: `$in`
    In,
    /// Non-membership in an array operand: `$nin`
    Nin,
    /// Array field contains every operand element: `$contains`
    Contains,
    /// Array field shares at least one operand element: `$overlap`
    Overlap,
    /// Full-text match on a fulltext string field: `$fulltext`
    Fulltext,
}

impl Operator {
    /// Parse a Mongo-style operator symbol, with or without the `$` prefix.
    ///
    /// Validation itself only admits the canonical `$`-prefixed form as an
    /// operator-object key; the prefix-tolerant parse backs symbol
    /// canonicalization during rewriting.
    ///
    /// # Example
    ///
    /// ```
    /// use filtergate::Operator;
    ///
    /// assert_eq!(Operator::parse("$eq"), Some(Operator::Eq));
    /// assert_eq!(Operator::parse("gte"), Some(Operator::Gte));
    /// assert_eq!(Operator::parse("$like"), None);
    /// ```
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        // Strip leading $ if present
        let s = s.strip_prefix('$').unwrap_or(s);

        match s {
            "eq" => Some(Self::Eq),
            "ne" => Some(Self::Ne),
            "gt" => Some(Self::Gt),
            "gte" => Some(Self::Gte),
            "lt" => Some(Self::Lt),
            "lte" => Some(Self::Lte),
            "in" => Some(Self::In),
            "nin" => Some(Self::Nin),
            "contains" => Some(Self::Contains),
            "overlap" => Some(Self::Overlap),
            "fulltext" => Some(Self::Fulltext),
            _ => None,
        }
    }

    /// Canonical symbol including the `$` prefix.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "$eq",
            Self::Ne => "$ne",
            Self::Gt => "$gt",
            Self::Gte => "$gte",
            Self::Lt => "$lt",
            Self::Lte => "$lte",
            Self::In => "$in",
            Self::Nin => "$nin",
            Self::Contains => "$contains",
            Self::Overlap => "$overlap",
            Self::Fulltext => "$fulltext",
        }
    }

    /// Shape of the operand this operator expects.
    pub(crate) const fn operand_shape(self) -> OperandShape {
        match self {
            Self::Eq | Self::Ne => OperandShape::Scalar { nullable: true },
            Self::Gt | Self::Gte | Self::Lt | Self::Lte | Self::Fulltext => {
                OperandShape::Scalar { nullable: false }
            },
            Self::In | Self::Nin => OperandShape::Array {
                nullable_items: true,
            },
            Self::Contains | Self::Overlap => OperandShape::Array {
                nullable_items: false,
            },
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operand shape, resolved per operator: a single typed value or a
/// length-bounded array of typed values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OperandShape {
    /// Single value of the field type; `nullable` admits JSON `null`.
    Scalar {
        /// Whether `null` is a legal operand.
        nullable: bool,
    },
    /// Array of values of the field type, bounded by `max_array_len`.
    Array {
        /// Whether `null` elements are legal.
        nullable_items: bool,
    },
}

/// The exact set of operators legal for one field, resolved once at schema
/// build time from the field's type and capability flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorSet {
    ops: Vec<Operator>,
}

impl OperatorSet {
    /// Resolve the legal operator set for a field.
    ///
    /// - every type accepts `$eq`, `$ne`, `$in`, `$nin`;
    /// - `number` and `date` additionally accept `$gt`/`$gte`/`$lt`/`$lte`;
    /// - array fields additionally accept `$contains`/`$overlap`;
    /// - fulltext string fields additionally accept `$fulltext`.
    #[must_use]
    pub fn resolve(field_type: FieldType, array: bool, fulltext: bool) -> Self {
        let mut ops = vec![Operator::Eq, Operator::Ne, Operator::In, Operator::Nin];

        if matches!(field_type, FieldType::Number | FieldType::Date) {
            ops.extend([Operator::Gt, Operator::Gte, Operator::Lt, Operator::Lte]);
        }
        if array {
            ops.extend([Operator::Contains, Operator::Overlap]);
        }
        // fulltext is meaningful only for string fields
        if fulltext && field_type == FieldType::String {
            ops.push(Operator::Fulltext);
        }

        Self { ops }
    }

    /// Whether the operator belongs to this set.
    #[must_use]
    pub fn contains(&self, op: Operator) -> bool {
        self.ops.contains(&op)
    }

    /// Iterate the legal operators.
    pub fn iter(&self) -> impl Iterator<Item = Operator> + '_ {
        self.ops.iter().copied()
    }

    /// Number of legal operators.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Whether the set is empty (never the case for a resolved set).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}
