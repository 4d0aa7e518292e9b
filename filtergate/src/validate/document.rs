//! Recursive structural validation of filter documents.
//!
//! The check is depth-indexed: a document at level `d` may contain
//! combinator keys only while `d < max_depth`, and each recursion into
//! `$and`/`$or`/`$not` validates the sub-document at `d + 1` with every
//! limit enforced independently at that level. Traversal short-circuits on
//! the first violation.

use crate::schema::{CompiledField, FilterSchema};
use crate::validate::error::{LimitKind, ValidationError, ViolationKind};
use crate::validate::operator::{OperandShape, Operator};
use serde_json::Value;

/// Validate a filter document at the given nesting level.
pub(crate) fn check_document(
    schema: &FilterSchema,
    value: &Value,
    depth: usize,
) -> Result<(), ValidationError> {
    let Some(doc) = value.as_object() else {
        return Err(ValidationError::new(ViolationKind::ExpectedDocument));
    };

    let limits = schema.limits();
    let mut conditions = 0usize;

    for (key, entry) in doc {
        match key.as_str() {
            combinator @ ("$and" | "$or") => {
                if depth >= limits.max_depth {
                    return Err(depth_exceeded(limits.max_depth, depth).at(key.clone()));
                }
                let Some(branches) = entry.as_array() else {
                    return Err(ValidationError::new(ViolationKind::MalformedCombinator {
                        combinator: if combinator == "$and" { "$and" } else { "$or" },
                        expected: "an array of filter documents",
                    })
                    .at(key.clone()));
                };
                if combinator == "$or" && branches.len() > limits.max_or_branches {
                    return Err(ValidationError::new(ViolationKind::LimitExceeded {
                        limit: LimitKind::OrBranches,
                        max: limits.max_or_branches,
                        actual: branches.len(),
                    })
                    .at(key.clone()));
                }
                for (index, branch) in branches.iter().enumerate() {
                    check_document(schema, branch, depth + 1)
                        .map_err(|e| e.at(index.to_string()).at(key.clone()))?;
                }
            },
            "$not" => {
                if depth >= limits.max_depth {
                    return Err(depth_exceeded(limits.max_depth, depth).at(key.clone()));
                }
                if !entry.is_object() {
                    return Err(ValidationError::new(ViolationKind::MalformedCombinator {
                        combinator: "$not",
                        expected: "a filter document object",
                    })
                    .at(key.clone()));
                }
                check_document(schema, entry, depth + 1).map_err(|e| e.at(key.clone()))?;
            },
            _ => {
                conditions += 1;
                let Some(field) = schema.compiled_field(key) else {
                    return Err(ValidationError::new(ViolationKind::UnregisteredKey {
                        key: key.clone(),
                    }));
                };
                check_condition(schema, field, entry).map_err(|e| e.at(key.clone()))?;
            },
        }
    }

    // Counted after the keys themselves validate; combinators never count
    if conditions > limits.max_conditions {
        return Err(ValidationError::new(ViolationKind::LimitExceeded {
            limit: LimitKind::Conditions,
            max: limits.max_conditions,
            actual: conditions,
        }));
    }

    Ok(())
}

/// Validate one field condition: bare literal, `null`, or operator object.
fn check_condition(
    schema: &FilterSchema,
    field: &CompiledField,
    value: &Value,
) -> Result<(), ValidationError> {
    match value {
        // Implicit equality against null
        Value::Null => Ok(()),
        // Operator object: whitelist-only keys, typed operands.
        // An empty object is a vacuous condition and accepted.
        Value::Object(operators) => {
            for (symbol, operand) in operators {
                // Only the canonical `$`-prefixed symbol is a legal
                // operator-object key
                let op = Operator::parse(symbol)
                    .filter(|op| op.as_str() == symbol && field.ops.contains(*op))
                    .ok_or_else(|| {
                        ValidationError::new(ViolationKind::OperatorNotAllowed {
                            field: field.def.name().to_string(),
                            operator: symbol.clone(),
                        })
                    })?;
                check_operand(schema, field, op, operand).map_err(|e| e.at(symbol.clone()))?;
            }
            Ok(())
        },
        // Bare literal: implicit equality, primitive-checked
        literal => {
            if schema.primitives().check(field.def.field_type(), literal) {
                Ok(())
            } else {
                Err(type_mismatch(field))
            }
        },
    }
}

/// Validate one operator's operand against its resolved shape.
fn check_operand(
    schema: &FilterSchema,
    field: &CompiledField,
    op: Operator,
    operand: &Value,
) -> Result<(), ValidationError> {
    match op.operand_shape() {
        OperandShape::Scalar { nullable } => {
            if operand.is_null() {
                if nullable {
                    return Ok(());
                }
                return Err(type_mismatch(field));
            }
            if schema.primitives().check(field.def.field_type(), operand) {
                Ok(())
            } else {
                Err(type_mismatch(field))
            }
        },
        OperandShape::Array { nullable_items } => {
            let Some(items) = operand.as_array() else {
                return Err(type_mismatch(field));
            };
            let max = schema.limits().max_array_len;
            if items.len() > max {
                return Err(ValidationError::new(ViolationKind::LimitExceeded {
                    limit: LimitKind::ArrayLength,
                    max,
                    actual: items.len(),
                }));
            }
            for (index, item) in items.iter().enumerate() {
                let ok = if item.is_null() {
                    nullable_items
                } else {
                    schema.primitives().check(field.def.field_type(), item)
                };
                if !ok {
                    return Err(type_mismatch(field).at(index.to_string()));
                }
            }
            Ok(())
        },
    }
}

fn type_mismatch(field: &CompiledField) -> ValidationError {
    ValidationError::new(ViolationKind::TypeMismatch {
        field: field.def.name().to_string(),
        expected: field.def.field_type(),
    })
}

fn depth_exceeded(max: usize, depth: usize) -> ValidationError {
    ValidationError::new(ViolationKind::LimitExceeded {
        limit: LimitKind::Depth,
        max,
        actual: depth + 1,
    })
}
